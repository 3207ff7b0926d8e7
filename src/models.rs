use serde::{Serialize, Deserialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationRequest {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub product_name: String,
    pub product_file_s3_url: String,
    pub landing_url: String,
    pub niche: String,
    #[serde(default = "default_max_images")]
    pub max_images: u32, // accepted for compatibility, not consumed
    #[serde(default = "default_variants_per_platform")]
    pub variants_per_platform: u32,
    #[serde(default = "default_human_review")]
    pub human_review_required: bool,
}

fn default_max_images() -> u32 { 5 }
fn default_variants_per_platform() -> u32 { 3 }
fn default_human_review() -> bool { true }

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Pinterest,
    Instagram,
    Linkedin,
    Reddit,
}

impl Platform {
    /// Every platform in output order.
    pub const ALL: [Platform; 5] = [
        Platform::Twitter,
        Platform::Pinterest,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Reddit,
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageSignals {
    pub title: String,
    pub description: String,
    pub headlines: Vec<String>,
    pub keywords: Vec<String>,
    pub value_props: Vec<String>,
}

impl Default for LandingPageSignals {
    fn default() -> Self {
        Self {
            title: "Digital Product".to_string(),
            description: String::new(),
            headlines: Vec::new(),
            keywords: Vec::new(),
            value_props: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformVariant {
    pub caption: String,
    pub angle: String,
    pub call_to_action: String,
    pub hashtags: Vec<String>,
    pub hook: String,
    pub keywords: Vec<String>,
    pub image_prompt: String,
    pub recommended_posting_time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAssets {
    pub platform: Platform,
    pub variants: Vec<PlatformVariant>,
    pub strategy_notes: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResearchInsight {
    pub title: String,
    pub insight: String,
    pub action: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Success,
    Partial,
    /// Reserved for callers; generation itself never reports it.
    #[allow(dead_code)]
    Failed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationResult {
    pub product_id: Uuid,
    pub status: GenerationStatus,
    pub master_assets_s3: Option<String>,
    pub research_insights_s3: Option<String>,
    pub assets: Vec<PlatformAssets>,
    pub research_insights: Vec<ResearchInsight>,
    pub summary: String,
    pub review_recommendation: Option<String>,
}

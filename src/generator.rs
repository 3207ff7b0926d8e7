use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::catalog::{self, FALLBACK_HIGHLIGHTS};
use crate::extract::{fetch_landing_page_signals, fetch_product_highlights, UNREADABLE_PRODUCT_FILE};
use crate::fetcher::ResourceFetcher;
use crate::models::{
    GenerationRequest, GenerationResult, GenerationStatus, LandingPageSignals, Platform,
    PlatformAssets, PlatformVariant, ResearchInsight,
};
use crate::snapshot::{encode_data_url, MasterSnapshot, ResearchSnapshot};

const MAX_BENEFITS: usize = 6;
const MAX_INSIGHTS: usize = 4;
const MIN_VARIANTS: u32 = 1;
const MAX_VARIANTS: u32 = 6;
const REVIEW_RECOMMENDATION: &str = "Run a final tone and compliance sweep before distribution.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("snapshot encoding failed: {0}")] Snapshot(#[from] serde_json::Error),
}

/// Polynomial rolling hash (`h * 31 + unit`) over UTF-16 code units, wrapping in i32.
pub fn hash_string(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

fn template_index(variant_index: usize, highlight_hash: i32, len: usize) -> usize {
    (variant_index as i64 + highlight_hash as i64).rem_euclid(len as i64) as usize
}

pub fn generate_core_benefits(
    req: &GenerationRequest,
    landing: &LandingPageSignals,
    highlights: &[String],
) -> Vec<String> {
    let baseline = catalog::baseline_benefits(&req.product_name, &req.niche);
    landing.headlines.iter().take(3)
        .chain(highlights.iter().take(3))
        .chain(baseline.iter())
        .map(|item| item.strip_suffix('.').unwrap_or(item).to_string())
        .filter(|item| !item.is_empty())
        .take(MAX_BENEFITS)
        .collect()
}

pub fn generate_hashtags(niche: &str, platform: Platform) -> Vec<String> {
    let normalized: String = niche
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect();
    normalized
        .split_whitespace()
        .take(3)
        .chain(catalog::profile(platform).hashtag_modifiers.iter().copied())
        .map(|word| format!("#{word}"))
        .take(5)
        .collect()
}

pub fn generate_image_prompt(
    platform: Platform,
    product_name: &str,
    niche: &str,
    highlight: &str,
    variant_index: usize,
) -> String {
    let vibe = catalog::profile(platform).aesthetic;
    format!(
        "{vibe}. Feature headline \"{highlight}\" with {product_name} callout. Showcase {niche} transformation. Variant {}.",
        variant_index + 1
    )
}

pub fn craft_variant(
    platform: Platform,
    req: &GenerationRequest,
    highlight: &str,
    variant_index: usize,
    core_benefits: &[String],
) -> PlatformVariant {
    let profile = catalog::profile(platform);
    let niche = req.niche.as_str();
    let product_name = req.product_name.as_str();
    let highlight_hash = hash_string(highlight);

    let primary_benefit = if core_benefits.is_empty() {
        String::new()
    } else {
        core_benefits[variant_index % core_benefits.len()].clone()
    };

    let hooks = catalog::hooks(niche, product_name, highlight);
    let hook = hooks[template_index(variant_index, highlight_hash, hooks.len())].clone();
    let angles = catalog::angles(niche, product_name);
    let angle = angles[template_index(variant_index, highlight_hash, angles.len())].clone();

    let closer = if profile.community_first {
        "Let's discuss what would make this even better below."
    } else {
        "Ready to launch something people can't ignore?"
    };
    let caption = [
        hook.clone(),
        format!("Why it matters: {primary_benefit}."),
        format!("Inside you'll get: {highlight}."),
        format!("Built for {niche} makers who want momentum fast."),
        closer.to_string(),
    ]
    .join("\n\n");

    PlatformVariant {
        caption,
        angle,
        call_to_action: format!("{} → {}", profile.default_cta, req.landing_url),
        hashtags: generate_hashtags(niche, platform),
        hook,
        keywords: vec![product_name.to_string(), niche.to_string(), primary_benefit],
        image_prompt: generate_image_prompt(platform, product_name, niche, highlight, variant_index),
        recommended_posting_time: profile.best_times[variant_index % profile.best_times.len()].to_string(),
    }
}

pub fn craft_platform_assets(
    platform: Platform,
    req: &GenerationRequest,
    highlights: &[String],
    core_benefits: &[String],
) -> PlatformAssets {
    let profile = catalog::profile(platform);
    let usable: Vec<String> = if highlights.is_empty() {
        FALLBACK_HIGHLIGHTS.iter().map(|h| h.to_string()).collect()
    } else {
        highlights.to_vec()
    };

    let count = req.variants_per_platform.clamp(MIN_VARIANTS, MAX_VARIANTS) as usize;
    let variants = (0..count)
        .map(|index| {
            let highlight = &usable[index % usable.len()];
            craft_variant(platform, req, highlight, index, core_benefits)
        })
        .collect();

    let scroll_stop = if platform == Platform::Reddit { "discussion prompts" } else { "motion-first visuals" };
    let strategy_notes = [
        format!("Tone: {}", profile.tone),
        "Lead with proof-driven intro then tangible takeaway.".to_string(),
        format!("Use {scroll_stop} for scroll-stop."),
        "Repurpose into sequences by rotating hooks + CTA.".to_string(),
    ]
    .join(" ");

    PlatformAssets { platform, variants, strategy_notes }
}

pub fn build_research_insights(
    req: &GenerationRequest,
    landing: &LandingPageSignals,
    highlights: &[String],
) -> Vec<ResearchInsight> {
    let mut insights = vec![ResearchInsight {
        title: format!("{} Momentum", req.niche),
        insight: format!(
            "Audiences in {} respond strongly to frameworks plus tangible assets. Headlines referencing \"{}\" carry extra weight.",
            req.niche, landing.title
        ),
        action: "Prioritize carousel or thread formats that break down the framework, followed by a clear CTA linking to the landing page.".to_string(),
    }];

    if !landing.description.is_empty() {
        insights.push(ResearchInsight {
            title: "Landing Page Positioning".to_string(),
            insight: format!("Primary promise: \"{}\".", landing.description),
            action: "Mirror this promise verbatim in at least one paid angle and use it as the closing CTA for organic content.".to_string(),
        });
    }

    if !highlights.is_empty() {
        let standouts: Vec<&str> = highlights.iter().take(2).map(String::as_str).collect();
        insights.push(ResearchInsight {
            title: "Asset Highlights".to_string(),
            insight: format!("Standout deliverables include {}.", standouts.join(" and ")),
            action: "Convert each highlight into a short-form video storyboard or animated GIF to boost engagement on Instagram and Pinterest.".to_string(),
        });
    }

    insights.push(ResearchInsight {
        title: "Community Feedback Loop".to_string(),
        insight: "Organic traction compounds when early adopters co-create. Encourage UGC by shipping a swipe file or challenge template.".to_string(),
        action: "Add a post-purchase prompt asking customers to share their fastest win, then feature those quotes in LinkedIn and Reddit follow-ups.".to_string(),
    });

    insights.truncate(MAX_INSIGHTS);
    insights
}

fn build_summary(assets: &[PlatformAssets], core_benefits: &[String], human_review: bool) -> String {
    let total: usize = assets.iter().map(|a| a.variants.len()).sum();
    let focus: Vec<&str> = core_benefits.iter().take(3).map(String::as_str).collect();
    let closing = if human_review {
        "Flagged for human polish before scheduling."
    } else {
        "Ready for direct publishing."
    };
    format!(
        "Generated {total} variants across {} platforms. Focus areas: {}. {closing}",
        assets.len(),
        focus.join(", ")
    )
}

/// Fetches both upstream resources concurrently, then assembles the full bundle.
pub async fn generate_marketing_response(
    fetcher: &dyn ResourceFetcher,
    req: &GenerationRequest,
) -> Result<GenerationResult, GenerationError> {
    info!("🚀 Generating marketing bundle for {} ({})", req.product_name, req.product_id);

    let (landing, highlights) = tokio::join!(
        fetch_landing_page_signals(fetcher, &req.landing_url),
        fetch_product_highlights(fetcher, &req.product_file_s3_url)
    );

    let core_benefits = generate_core_benefits(req, &landing, &highlights);
    let assets: Vec<PlatformAssets> = Platform::ALL
        .iter()
        .map(|&platform| craft_platform_assets(platform, req, &highlights, &core_benefits))
        .collect();
    let research_insights = build_research_insights(req, &landing, &highlights);
    let summary = build_summary(&assets, &core_benefits, req.human_review_required);

    let mut result = GenerationResult {
        product_id: req.product_id,
        status: GenerationStatus::Success,
        master_assets_s3: None,
        research_insights_s3: None,
        assets,
        research_insights,
        summary,
        review_recommendation: req.human_review_required.then(|| REVIEW_RECOMMENDATION.to_string()),
    };

    result.master_assets_s3 = Some(encode_data_url(&MasterSnapshot {
        generated_at: Utc::now(),
        product_id: req.product_id,
        assets: &result.assets,
    })?);
    result.research_insights_s3 = Some(encode_data_url(&ResearchSnapshot {
        generated_at: Utc::now(),
        product_id: req.product_id,
        research_insights: &result.research_insights,
        landing_summary: &landing,
    })?);

    if highlights.iter().any(|h| h == UNREADABLE_PRODUCT_FILE) {
        result.status = GenerationStatus::Partial;
    }

    info!(
        "✅ Generated {} platforms with status {:?} for {}",
        result.assets.len(), result.status, req.product_id
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::product_file_fallback;
    use crate::fetcher::{FetchError, FetchedResource};
    use crate::snapshot::decode_data_url;
    use async_trait::async_trait;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use uuid::Uuid;

    const LANDING: &str = "https://launch.example.com/";
    const FILE: &str = "https://files.example.com/kit.txt";

    /// Serves canned resources by URL; anything else fails like a dead host.
    struct StubFetcher {
        resources: HashMap<String, (Option<&'static str>, &'static str)>,
    }

    impl StubFetcher {
        fn offline() -> Self {
            Self { resources: HashMap::new() }
        }

        fn with(mut self, url: &str, content_type: Option<&'static str>, body: &'static str) -> Self {
            self.resources.insert(url.to_string(), (content_type, body));
            self
        }
    }

    #[async_trait]
    impl ResourceFetcher for StubFetcher {
        async fn get(&self, url: &str) -> Result<FetchedResource, FetchError> {
            match self.resources.get(url) {
                Some(&(content_type, body)) => Ok(FetchedResource {
                    status: StatusCode::OK,
                    content_type: content_type.map(str::to_string),
                    body: Bytes::from_static(body.as_bytes()),
                }),
                None => Err(FetchError::Http(format!("connection refused: {url}"))),
            }
        }
    }

    fn request(variants: u32, human_review: bool) -> GenerationRequest {
        GenerationRequest {
            product_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            product_name: "Creator Launch OS".to_string(),
            product_file_s3_url: FILE.to_string(),
            landing_url: LANDING.to_string(),
            niche: "creator-led product launches".to_string(),
            max_images: 5,
            variants_per_platform: variants,
            human_review_required: human_review,
        }
    }

    fn online() -> StubFetcher {
        StubFetcher::offline()
            .with(
                LANDING,
                Some("text/html"),
                "<html><head><title>Launch OS</title><meta name=\"description\" content=\"Launch in a weekend.\"></head>\
                 <body><h1>Plan your launch.</h1><h2>Sell on day one</h2></body></html>",
            )
            .with(FILE, Some("text/plain"), "30 hook templates\nLaunch calendar\n\nEmail swipe file\n")
    }

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(hash_string(""), 0);
        assert_eq!(hash_string("a"), 97);
        assert_eq!(hash_string("hello"), 99162322);
        // wraps into negative territory
        assert_eq!(hash_string("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn template_index_is_never_negative() {
        assert_eq!(template_index(0, -1, 5), 4);
        assert_eq!(template_index(2, i32::MIN, 5), ((2i64 + i32::MIN as i64).rem_euclid(5)) as usize);
        assert_eq!(template_index(3, 99162322, 5), (99162325 % 5) as usize);
    }

    #[test]
    fn core_benefits_merge_in_order_and_strip_periods() {
        let req = request(3, true);
        let landing = LandingPageSignals {
            headlines: vec!["Plan your launch.".into(), "Sell on day one".into()],
            ..LandingPageSignals::default()
        };
        let highlights = vec!["30 hook templates.".to_string(), ".".to_string()];
        let benefits = generate_core_benefits(&req, &landing, &highlights);
        assert_eq!(benefits, vec![
            "Plan your launch".to_string(),
            "Sell on day one".to_string(),
            "30 hook templates".to_string(),
            "Creator Launch OS accelerates creator-led product launches outcomes".to_string(),
            "Built to remove guesswork from creator-led product launches workflows".to_string(),
            "Transforms downloaded content into revenue-generating assets".to_string(),
        ]);
    }

    #[test]
    fn hashtags_end_with_platform_modifiers() {
        assert_eq!(
            generate_hashtags("creator-led product launches", Platform::Twitter),
            vec!["#creator", "#led", "#product", "#growth", "#thread"]
        );
        assert_eq!(
            generate_hashtags("AI", Platform::Reddit),
            vec!["#ai", "#AMA", "#caseStudy", "#howto"]
        );
        assert_eq!(
            generate_hashtags("!!", Platform::Linkedin),
            vec!["#digitalstrategy", "#professionaldevelopment", "#productivity"]
        );
    }

    #[test]
    fn variant_composes_caption_and_metadata() {
        let req = request(3, true);
        let benefits = vec!["First".to_string(), "Second".to_string()];
        let variant = craft_variant(Platform::Reddit, &req, "Launch calendar", 1, &benefits);

        // hash is -493360917, so (1 + hash) lands on the last template
        let expected_hook = "Launch calendar — delivered in minutes with Creator Launch OS.";
        assert_eq!(variant.hook, expected_hook);
        assert_eq!(variant.angle, "Proof-driven angle showing before/after transformation");
        assert_eq!(variant.caption, format!(
            "{expected_hook}\n\nWhy it matters: Second.\n\nInside you'll get: Launch calendar.\n\n\
             Built for creator-led product launches makers who want momentum fast.\n\n\
             Let's discuss what would make this even better below."
        ));
        assert_eq!(variant.call_to_action, format!("Check out the full breakdown here → {LANDING}"));
        assert_eq!(variant.keywords, vec!["Creator Launch OS", "creator-led product launches", "Second"]);
        assert_eq!(variant.recommended_posting_time, "1:00 PM");
        assert!(variant.image_prompt.ends_with(
            "Feature headline \"Launch calendar\" with Creator Launch OS callout. Showcase creator-led product launches transformation. Variant 2."
        ));
    }

    #[test]
    fn hook_and_angle_selection_is_stable() {
        let req = request(3, true);
        let highlight = "Transform ideas into launch-ready assets";
        assert_eq!(hash_string(highlight), 1585677650);

        let first = craft_variant(Platform::Twitter, &req, highlight, 0, &[]);
        assert_eq!(first.hook, "What if creator-led product launches pros had Creator Launch OS on day one?");
        assert_eq!(first.angle, "Outcome-focused for creator-led product launches creators");

        let second = craft_variant(Platform::Linkedin, &req, highlight, 1, &[]);
        assert_eq!(second.hook, "The Creator Launch OS shortcut top creator-led product launches creators keep quiet.");
        assert_eq!(second.angle, "Behind-the-scenes breakdown of Creator Launch OS");
    }

    #[test]
    fn variant_tolerates_empty_benefits() {
        let req = request(1, false);
        let variant = craft_variant(Platform::Twitter, &req, "x", 4, &[]);
        assert!(variant.caption.contains("Why it matters: ."));
        assert!(variant.caption.ends_with("Ready to launch something people can't ignore?"));
        assert_eq!(variant.keywords[2], "");
    }

    #[test]
    fn platform_assets_clamp_and_cycle() {
        let req = request(10, true);
        let assets = craft_platform_assets(Platform::Pinterest, &req, &[], &["B".to_string()]);
        assert_eq!(assets.variants.len(), 6);
        let times: Vec<&str> = assets.variants.iter().map(|v| v.recommended_posting_time.as_str()).collect();
        assert_eq!(times, vec!["9:00 AM", "3:00 PM", "8:00 PM", "9:00 AM", "3:00 PM", "8:00 PM"]);
        assert!(assets.variants[0].caption.contains(FALLBACK_HIGHLIGHTS[0]));
        assert!(assets.variants[4].caption.contains(FALLBACK_HIGHLIGHTS[1]));
        assert_eq!(
            assets.strategy_notes,
            "Tone: visual + aspirational Lead with proof-driven intro then tangible takeaway. \
             Use motion-first visuals for scroll-stop. Repurpose into sequences by rotating hooks + CTA."
        );

        let zero = request(0, true);
        assert_eq!(craft_platform_assets(Platform::Reddit, &zero, &[], &[]).variants.len(), 1);
    }

    #[test]
    fn insights_follow_priority_order() {
        let req = request(3, true);
        let minimal = build_research_insights(&req, &LandingPageSignals::default(), &[]);
        let titles: Vec<&str> = minimal.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["creator-led product launches Momentum", "Community Feedback Loop"]);
        assert!(minimal[0].insight.contains("\"Digital Product\""));

        let landing = LandingPageSignals { description: "Launch in a weekend.".into(), ..Default::default() };
        let highlights = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let full = build_research_insights(&req, &landing, &highlights);
        assert_eq!(full.len(), 4);
        assert_eq!(full[1].insight, "Primary promise: \"Launch in a weekend.\".");
        assert_eq!(full[2].insight, "Standout deliverables include A and B.");
        assert_eq!(full[3].title, "Community Feedback Loop");
    }

    #[tokio::test]
    async fn offline_upstreams_yield_partial_result() {
        let req = request(3, true);
        let result = generate_marketing_response(&StubFetcher::offline(), &req).await.unwrap();

        assert_eq!(result.status, GenerationStatus::Partial);
        assert_eq!(result.product_id, req.product_id);
        assert_eq!(result.assets.len(), 5);
        let platforms: Vec<Platform> = result.assets.iter().map(|a| a.platform).collect();
        assert_eq!(platforms, Platform::ALL.to_vec());
        assert!(result.assets.iter().all(|a| a.variants.len() == 3));
        assert_eq!(
            result.review_recommendation.as_deref(),
            Some("Run a final tone and compliance sweep before distribution.")
        );
        assert!(result.assets[0].variants[0].caption.contains(product_file_fallback()[0].as_str()));
        assert!(result.summary.starts_with("Generated 15 variants across 5 platforms. Focus areas: "));
        assert!(result.summary.ends_with("Flagged for human polish before scheduling."));
    }

    #[tokio::test]
    async fn reachable_upstreams_yield_success() {
        let req = request(2, false);
        let result = generate_marketing_response(&online(), &req).await.unwrap();

        assert_eq!(result.status, GenerationStatus::Success);
        assert_eq!(result.review_recommendation, None);
        assert_eq!(
            result.summary,
            "Generated 10 variants across 5 platforms. Focus areas: Plan your launch, Sell on day one, 30 hook templates. Ready for direct publishing."
        );
        assert_eq!(result.research_insights.len(), 4);
        assert_eq!(result.research_insights[2].insight, "Standout deliverables include 30 hook templates and Launch calendar.");
    }

    #[tokio::test]
    async fn identical_inputs_produce_identical_variants() {
        let req = request(4, true);
        let first = generate_marketing_response(&online(), &req).await.unwrap();
        let second = generate_marketing_response(&online(), &req).await.unwrap();
        assert_eq!(first.assets, second.assets);
        assert_eq!(first.research_insights, second.research_insights);
        assert_eq!(first.summary, second.summary);
    }

    #[tokio::test]
    async fn snapshots_decode_to_result_fields() {
        let req = request(3, true);
        let result = generate_marketing_response(&online(), &req).await.unwrap();

        let master = decode_data_url(result.master_assets_s3.as_deref().unwrap()).unwrap();
        let assets: Vec<PlatformAssets> = serde_json::from_value(master["assets"].clone()).unwrap();
        assert_eq!(assets, result.assets);
        assert_eq!(master["product_id"], serde_json::json!(req.product_id));

        let research = decode_data_url(result.research_insights_s3.as_deref().unwrap()).unwrap();
        let insights: Vec<ResearchInsight> = serde_json::from_value(research["research_insights"].clone()).unwrap();
        assert_eq!(insights, result.research_insights);
        assert_eq!(research["landing_summary"]["title"], "Launch OS");
        assert_eq!(research["landing_summary"]["valueProps"], serde_json::json!([]));
    }
}

//! Read-only phrase tables keyed by platform.

use crate::models::Platform;

pub struct PlatformProfile {
    pub default_cta: &'static str,
    pub best_times: [&'static str; 3],
    pub tone: &'static str,
    /// Community platforms close on a discussion prompt instead of a launch push.
    pub community_first: bool,
    pub hashtag_modifiers: [&'static str; 3],
    pub aesthetic: &'static str,
}

const TWITTER: PlatformProfile = PlatformProfile {
    default_cta: "Tap to explore the product now",
    best_times: ["8:00 AM", "12:30 PM", "5:30 PM"],
    tone: "bold + punchy",
    community_first: false,
    hashtag_modifiers: ["growth", "thread", "digitalproduct"],
    aesthetic: "minimalist neon blueprint aesthetic, crisp infographic elements, dark navy background, futuristic sans-serif typography, 3D lighting, 16:9",
};

const PINTEREST: PlatformProfile = PlatformProfile {
    default_cta: "Pin it for your next project",
    best_times: ["9:00 AM", "3:00 PM", "8:00 PM"],
    tone: "visual + aspirational",
    community_first: false,
    hashtag_modifiers: ["pinspiration", "aesthetic", "designideas"],
    aesthetic: "warm minimal flat-lay, natural lighting, textured paper background, elegant serif typography, muted pastel palette, 2:3 vertical poster",
};

const INSTAGRAM: PlatformProfile = PlatformProfile {
    default_cta: "Swipe through & click the link in bio",
    best_times: ["11:00 AM", "1:00 PM", "7:00 PM"],
    tone: "story-first + emotive",
    community_first: false,
    hashtag_modifiers: ["reels", "carouseltips", "creator"],
    aesthetic: "dynamic carousel cover, gradient glow, bold modern typography, high-contrast color pops, subtle grain, 1:1 square frame",
};

const LINKEDIN: PlatformProfile = PlatformProfile {
    default_cta: "Request access or learn more",
    best_times: ["8:30 AM", "10:00 AM", "2:00 PM"],
    tone: "insightful + data-backed",
    community_first: false,
    hashtag_modifiers: ["digitalstrategy", "professionaldevelopment", "productivity"],
    aesthetic: "sleek corporate deck cover, cool-toned palette, data visualization accents, refined sans-serif fonts, clean layout, 3:2 aspect ratio",
};

const REDDIT: PlatformProfile = PlatformProfile {
    default_cta: "Check out the full breakdown here",
    best_times: ["10:00 AM", "1:00 PM", "9:00 PM"],
    tone: "authentic + community-first",
    community_first: true,
    hashtag_modifiers: ["AMA", "caseStudy", "howto"],
    aesthetic: "playful comic infographic, hand-drawn arrows, bold header text, community vibes, 4:5 portrait",
};

pub fn profile(platform: Platform) -> &'static PlatformProfile {
    match platform {
        Platform::Twitter => &TWITTER,
        Platform::Pinterest => &PINTEREST,
        Platform::Instagram => &INSTAGRAM,
        Platform::Linkedin => &LINKEDIN,
        Platform::Reddit => &REDDIT,
    }
}

/// Highlights used when the product file yielded nothing.
pub const FALLBACK_HIGHLIGHTS: [&str; 3] = [
    "Transform ideas into launch-ready assets",
    "Reduce production time dramatically",
    "Ready-made templates & frameworks included",
];

pub fn hooks(niche: &str, product_name: &str, highlight: &str) -> [String; 5] {
    [
        format!("What if {niche} pros had {product_name} on day one?"),
        format!("The {product_name} shortcut top {niche} creators keep quiet."),
        format!("{product_name}: turn your {niche} ideas into revenue-ready assets."),
        format!("I tried {product_name} so you don't have to... here’s the verdict."),
        format!("{highlight} — delivered in minutes with {product_name}."),
    ]
}

pub fn angles(niche: &str, product_name: &str) -> [String; 5] {
    [
        format!("Outcome-focused for {niche} creators"),
        format!("Behind-the-scenes breakdown of {product_name}"),
        format!("Step-by-step walkthrough leveraging {product_name}"),
        format!("Common {niche} pain point solved instantly"),
        "Proof-driven angle showing before/after transformation".to_string(),
    ]
}

pub fn baseline_benefits(product_name: &str, niche: &str) -> [String; 5] {
    [
        format!("{product_name} accelerates {niche} outcomes."),
        format!("Built to remove guesswork from {niche} workflows."),
        "Transforms downloaded content into revenue-generating assets.".to_string(),
        format!("Actionable frameworks curated for {niche} operators."),
        "Ships with copy-and-paste resources so you launch faster.".to_string(),
    ]
}

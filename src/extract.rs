//! Signal extraction from the landing page and the downloadable product file.
//!
//! Both extractors are best-effort: any upstream failure is logged and replaced
//! with a fixed fallback, so callers never see an error.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{error, info};

use crate::fetcher::{FetchError, FetchedResource, ResourceFetcher};
use crate::models::LandingPageSignals;

/// First line of the product-file fallback. Its presence marks a run as partial.
pub const UNREADABLE_PRODUCT_FILE: &str = "Unable to automatically read the product file.";
const UNREADABLE_PRODUCT_FILE_FOLLOWUP: &str = "Highlight the most compelling value proposition manually.";

const DEFAULT_TITLE: &str = "Digital Product";
const MAX_HEADLINES: usize = 6;
const MAX_VALUE_PROPS: usize = 8;
const MAX_TEXT_LINES: usize = 12;
const MAX_JSON_KEYS: usize = 6;

pub fn product_file_fallback() -> Vec<String> {
    vec![
        UNREADABLE_PRODUCT_FILE.to_string(),
        UNREADABLE_PRODUCT_FILE_FOLLOWUP.to_string(),
    ]
}

pub async fn fetch_landing_page_signals(fetcher: &dyn ResourceFetcher, url: &str) -> LandingPageSignals {
    let result = match fetcher.get(url).await {
        Ok(resource) => parse_landing_page(&resource.text()),
        Err(e) => Err(e),
    };
    match result {
        Ok(signals) => {
            info!(
                "✅ Landing page '{}' yielded {} headlines, {} value props",
                signals.title, signals.headlines.len(), signals.value_props.len()
            );
            signals
        }
        Err(e) => {
            error!("❌ Landing page summary failed for {}: {}", url, e);
            LandingPageSignals::default()
        }
    }
}

pub async fn fetch_product_highlights(fetcher: &dyn ResourceFetcher, url: &str) -> Vec<String> {
    let result = match fetcher.get(url).await {
        Ok(resource) => {
            info!("📄 Product file {} returned {} ({:?})", url, resource.status, resource.content_type);
            highlights_for(&resource)
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(highlights) => {
            info!("✅ Product file produced {} highlights", highlights.len());
            highlights
        }
        Err(e) => {
            error!("❌ Product file extraction failed for {}: {}", url, e);
            product_file_fallback()
        }
    }
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Other(format!("bad selector {css}: {e:?}")))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub fn parse_landing_page(html: &str) -> Result<LandingPageSignals, FetchError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let meta_description = document
        .select(&selector(r#"meta[name="description"]"#)?)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let description = match meta_description {
        Some(d) => d,
        None => document
            .select(&selector("p")?)
            .next()
            .map(element_text)
            .unwrap_or_default(),
    };

    let headlines = document
        .select(&selector("h1, h2")?)
        .map(element_text)
        .filter(|h| !h.is_empty())
        .take(MAX_HEADLINES)
        .collect();

    // Blank keyword entries are kept as-is.
    let keywords = document
        .select(&selector(r#"meta[name="keywords"]"#)?)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.split(',').map(|kw| kw.trim().to_string()).collect())
        .unwrap_or_default();

    // Cap is applied before blanks are dropped.
    let value_props = document
        .select(&selector("li")?)
        .take(MAX_VALUE_PROPS)
        .map(element_text)
        .filter(|li| !li.is_empty())
        .collect();

    Ok(LandingPageSignals { title, description, headlines, keywords, value_props })
}

pub fn highlights_for(resource: &FetchedResource) -> Result<Vec<String>, FetchError> {
    let content_type = resource.content_type.as_deref().unwrap_or("");

    if content_type.contains("text/plain") {
        return Ok(resource
            .text()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(MAX_TEXT_LINES)
            .map(str::to_string)
            .collect());
    }

    if content_type.contains("application/json") {
        let json: Value = serde_json::from_slice(&resource.body)
            .map_err(|e| FetchError::Body(format!("invalid JSON: {e}")))?;
        let keys = top_level_keys(&json)?;
        return Ok(vec![
            "Includes structured JSON data with actionable insights.".to_string(),
            format!("Top-level keys: {}", keys.join(", ")),
        ]);
    }

    let pair: [&str; 2] = if content_type.contains("application/pdf") {
        [
            "Detailed PDF guide included.",
            "Highlight key frameworks, checklists, and visuals when promoting.",
        ]
    } else if content_type.contains("zip") {
        [
            "Downloadable bundle with multiple assets.",
            "Emphasize templates, resources, and quick-start guides in messaging.",
        ]
    } else {
        [
            "Rich downloadable asset included.",
            "Focus on the most transformative outcomes and quick wins.",
        ]
    };
    Ok(pair.iter().map(|s| s.to_string()).collect())
}

fn top_level_keys(json: &Value) -> Result<Vec<String>, FetchError> {
    let keys = match json {
        Value::Object(map) => {
            // Integer-like keys come first in ascending order, the rest keep document order.
            let mut indexed: Vec<(u32, &String)> = map.keys().filter_map(|k| array_index(k).map(|i| (i, k))).collect();
            indexed.sort_by_key(|(i, _)| *i);
            indexed
                .into_iter()
                .map(|(_, k)| k)
                .chain(map.keys().filter(|k| array_index(k).is_none()))
                .take(MAX_JSON_KEYS)
                .cloned()
                .collect()
        }
        Value::Array(items) => (0..items.len().min(MAX_JSON_KEYS)).map(|i| i.to_string()).collect(),
        Value::String(text) => (0..text.encode_utf16().count().min(MAX_JSON_KEYS)).map(|i| i.to_string()).collect(),
        Value::Null => return Err(FetchError::Body("JSON document is null".into())),
        Value::Bool(_) | Value::Number(_) => Vec::new(),
    };
    Ok(keys)
}

/// Canonical array index: decimal without leading zeros, below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

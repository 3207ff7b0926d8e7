use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::models::{LandingPageSignals, PlatformAssets, ResearchInsight};

const DATA_URL_PREFIX: &str = "data:application/json;base64,";

#[derive(Serialize)]
pub struct MasterSnapshot<'a> {
    #[serde(serialize_with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
    pub product_id: Uuid,
    pub assets: &'a [PlatformAssets],
}

#[derive(Serialize)]
pub struct ResearchSnapshot<'a> {
    #[serde(serialize_with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
    pub product_id: Uuid,
    pub research_insights: &'a [ResearchInsight],
    pub landing_summary: &'a LandingPageSignals,
}

fn iso_millis<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Pretty-printed JSON wrapped in a self-contained base64 data URL.
pub fn encode_data_url<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, base64::engine::general_purpose::STANDARD.encode(json.as_bytes())))
}

#[cfg(test)]
pub fn decode_data_url(url: &str) -> Option<serde_json::Value> {
    let encoded = url.strip_prefix(DATA_URL_PREFIX)?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).ok()?;
    serde_json::from_slice(&bytes).ok()
}

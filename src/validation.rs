use reqwest::Url;
use thiserror::Error;

use crate::models::GenerationRequest;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be a valid URL")]
    InvalidUrl { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: u32, max: u32 },
}

fn min_len(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.encode_utf16().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

fn absolute_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    Url::parse(value).map(|_| ()).map_err(|_| ValidationError::InvalidUrl { field })
}

fn in_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(())
}

/// Shape checks run before generation; ids are already typed by deserialization.
pub fn validate(req: &GenerationRequest) -> Result<(), ValidationError> {
    min_len("product_name", &req.product_name, 2)?;
    absolute_url("product_file_s3_url", &req.product_file_s3_url)?;
    absolute_url("landing_url", &req.landing_url)?;
    min_len("niche", &req.niche, 2)?;
    in_range("max_images", req.max_images, 0, 12)?;
    in_range("variants_per_platform", req.variants_per_platform, 1, 10)?;
    Ok(())
}

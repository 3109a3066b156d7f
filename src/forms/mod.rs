use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod calls;
pub mod clients;
pub mod onboarding;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

/// Splits a comma separated tag field into trimmed, sanitized tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| ammonia::clean(tag.trim()))
        .filter(|tag| !tag.is_empty())
        .collect()
}

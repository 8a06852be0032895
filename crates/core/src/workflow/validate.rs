//! Input validation for review requests.

use thiserror::Error;

use super::status::{AllowList, ContentStatus};
use crate::record::{RecordId, RecordIdError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Post ID is required")]
    MissingId,
    #[error("Invalid post ID: {0}")]
    InvalidId(#[from] RecordIdError),
    #[error("Status is required")]
    MissingStatus,
    #[error("Invalid status. Must be one of: {allowed}")]
    InvalidStatus { allowed: String },
}

pub fn validate_id(candidate: Option<&str>) -> Result<RecordId, ValidationError> {
    match candidate {
        None => Err(ValidationError::MissingId),
        Some(raw) if raw.trim().is_empty() => Err(ValidationError::MissingId),
        Some(raw) => Ok(RecordId::parse(raw)?),
    }
}

/// Accept `candidate` only if `allow` lists it verbatim.
pub fn validate_status(
    candidate: Option<&str>,
    allow: &AllowList,
) -> Result<ContentStatus, ValidationError> {
    let label = match candidate {
        None | Some("") => return Err(ValidationError::MissingStatus),
        Some(label) => label,
    };
    let invalid = || ValidationError::InvalidStatus {
        allowed: allow.describe(),
    };
    if !allow.contains(label) {
        return Err(invalid());
    }
    ContentStatus::from_label(label).ok_or_else(invalid)
}

/// Blank or whitespace-only comments count as no comment.
pub fn normalize_comment(comment: Option<&str>) -> Option<&str> {
    comment.filter(|c| !c.trim().is_empty())
}

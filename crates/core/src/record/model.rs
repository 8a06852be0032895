use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;

/// One row of the record store as it arrives over the wire.
/// Field values are untyped; see `post::transform` for the projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(id: RecordId, fields: Map<String, Value>) -> Self {
        Self {
            id,
            created_time: None,
            fields,
        }
    }
}

/// Body of a list response. `offset` is present when more pages exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordList {
    pub records: Vec<RawRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// File attachment as stored in an attachment field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl Attachment {
    /// URL to show: the large thumbnail when the store generated one.
    pub fn display_url(&self) -> &str {
        self.thumbnails
            .as_ref()
            .and_then(|t| t.large.as_ref())
            .map(|large| large.url.as_str())
            .unwrap_or(&self.url)
    }
}

//! Record → [`Post`] projection.
//!
//! Every raw-field lookup for posts happens here. Lookups never fail: a
//! missing or mistyped field falls back to its empty value.

use serde_json::{Map, Value};

use super::model::Post;
use crate::record::{fields, Attachment, RawRecord};

impl From<&RawRecord> for Post {
    fn from(record: &RawRecord) -> Self {
        let f = &record.fields;
        Post {
            id: record.id.clone(),
            title: text(f, fields::TITLE),
            status: text(f, fields::STATUS),
            content_status: text(f, fields::CONTENT_STATUS),
            platforms: list(f, fields::PLATFORMS).unwrap_or_default(),
            post_format: list(f, fields::POST_FORMAT).unwrap_or_default(),
            scheduled_for: text(f, fields::SCHEDULED_FOR),
            content_instagram: opt_text(f, fields::CONTENT_INSTAGRAM),
            content_twitter: opt_text(f, fields::CONTENT_TWITTER),
            content_facebook: opt_text(f, fields::CONTENT_FACEBOOK),
            hashtags: opt_text(f, fields::HASHTAGS),
            slides: slides(f),
            slide_count: count(f, fields::SLIDE_COUNT),
            video_type: opt_text(f, fields::VIDEO_TYPE),
            video_length: opt_text(f, fields::VIDEO_LENGTH),
            image_ideas: opt_text(f, fields::IMAGE_IDEAS),
            image_prompts: opt_text(f, fields::IMAGE_PROMPTS),
            theme: list(f, fields::THEME),
            content_pillar: list(f, fields::CONTENT_PILLAR),
            content_type: list(f, fields::CONTENT_TYPE),
            images: attachments(record),
        }
    }
}

impl From<RawRecord> for Post {
    fn from(record: RawRecord) -> Self {
        Post::from(&record)
    }
}

fn text(f: &Map<String, Value>, name: &str) -> String {
    opt_text(f, name).unwrap_or_default()
}

fn opt_text(f: &Map<String, Value>, name: &str) -> Option<String> {
    match f.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Multiple-select fields; a single-select value reads as a one-item list.
fn list(f: &Map<String, Value>, name: &str) -> Option<Vec<String>> {
    match f.get(name)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::to_string)
                .collect(),
        ),
        Value::String(s) if !s.is_empty() => Some(vec![s.clone()]),
        _ => None,
    }
}

fn count(f: &Map<String, Value>, name: &str) -> Option<u32> {
    match f.get(name)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0 && v.fract() == 0.0).map(|v| v as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads the eight slide slots in order, dropping empty ones.
fn slides(f: &Map<String, Value>) -> Vec<String> {
    fields::SLIDES
        .iter()
        .filter_map(|slot| match f.get(*slot)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

fn attachments(record: &RawRecord) -> Vec<Attachment> {
    let Some(Value::Array(items)) = record.fields.get(fields::IMAGES) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(attachment) => Some(attachment),
            Err(e) => {
                tracing::warn!(record = %record.id, "skipping malformed attachment: {e}");
                None
            }
        })
        .collect()
}

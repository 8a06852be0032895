use serde::{Deserialize, Serialize};

use crate::record::{Attachment, RecordId};

/// A post as the review UI sees it: a fixed-shape projection of exactly one
/// store record, rebuilt on every read.
///
/// Absent raw fields become `""`, an empty list, or `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: RecordId,
    pub title: String,
    pub status: String,
    pub content_status: String,
    /// The first entry names the platform this post is for.
    pub platforms: Vec<String>,
    /// The first entry is the post's format.
    pub post_format: Vec<String>,
    /// ISO-8601 timestamp, or `""` when unscheduled.
    pub scheduled_for: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_facebook: Option<String>,
    /// Whitespace-delimited tags; see [`Post::hashtag_list`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<String>,
    /// Non-empty slides in slot order, at most eight.
    pub slides: Vec<String>,
    /// Explicit count from the store; may disagree with `slides.len()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ideas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_pillar: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Vec<String>>,
    #[serde(default)]
    pub images: Vec<Attachment>,
}

impl Post {
    pub fn platform(&self) -> Option<&str> {
        self.platforms.first().map(String::as_str)
    }

    pub fn format(&self) -> Option<&str> {
        self.post_format.first().map(String::as_str)
    }

    /// `slide_count` when the store set one, otherwise the number of slides.
    pub fn display_slide_count(&self) -> usize {
        self.slide_count
            .map(|n| n as usize)
            .unwrap_or(self.slides.len())
    }

    pub fn hashtag_list(&self) -> Vec<&str> {
        self.hashtags
            .as_deref()
            .map(|tags| tags.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Caption for `platforms[0]`, falling back to the first non-empty one.
    pub fn caption(&self) -> Option<&str> {
        fn non_empty(c: &Option<String>) -> Option<&str> {
            c.as_deref().filter(|s| !s.is_empty())
        }
        let platform = self.platform().unwrap_or_default().to_lowercase();

        if platform.contains("instagram") {
            non_empty(&self.content_instagram)
        } else if platform.contains("twitter") {
            non_empty(&self.content_twitter)
        } else if platform.contains("facebook") {
            non_empty(&self.content_facebook)
        } else {
            non_empty(&self.content_instagram)
                .or_else(|| non_empty(&self.content_twitter))
                .or_else(|| non_empty(&self.content_facebook))
        }
    }
}

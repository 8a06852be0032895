//! What the review pages show for a post.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::model::Post;
use crate::record::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPreview {
    pub id: RecordId,
    pub title: String,
    pub platform: PlatformBadge,
    pub format: String,
    pub scheduled: String,
    pub caption_heading: &'static str,
    pub caption: Option<String>,
    pub hashtags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ideas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prompts: Option<String>,
    pub images: Vec<ImagePreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBadge {
    pub name: String,
    pub icon: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SequenceKind {
    Slides,
    Scenes,
    Tweets,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub kind: SequenceKind,
    pub heading: String,
    pub items: Vec<SequenceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceItem {
    pub number: usize,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_length: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePreview {
    pub id: String,
    pub filename: String,
    pub display_url: String,
}

impl PlatformBadge {
    pub fn for_platform(name: &str) -> Self {
        let (icon, label) = match name {
            "Instagram" => ("IG", "Instagram"),
            "Twitter" => ("X", "Twitter/X"),
            "Facebook" => ("f", "Facebook"),
            other => ("?", other),
        };
        Self {
            name: name.to_string(),
            icon,
            label: label.to_string(),
        }
    }
}

impl SequenceKind {
    fn for_format(format: &str) -> Option<Self> {
        match format {
            "Carousel" => Some(SequenceKind::Slides),
            "Video" | "Reel" => Some(SequenceKind::Scenes),
            "Thread" => Some(SequenceKind::Tweets),
            _ => None,
        }
    }

    fn heading(self, count: usize) -> String {
        match self {
            SequenceKind::Slides => format!("Carousel Slides ({count})"),
            SequenceKind::Scenes => format!("Video Script ({count} scenes)"),
            SequenceKind::Tweets => format!("Thread ({count} tweets)"),
        }
    }

    fn item_label(self, number: usize) -> String {
        match self {
            SequenceKind::Slides => format!("Slide {number}"),
            SequenceKind::Scenes => format!("Scene {number}"),
            SequenceKind::Tweets => format!("Tweet {number}"),
        }
    }
}

/// Long-form schedule label, e.g. `Tuesday, January 2, 2024 at 9:00 AM UTC`.
/// Values that do not parse are shown verbatim.
pub fn schedule_label(scheduled_for: &str) -> String {
    if scheduled_for.is_empty() {
        return "Not scheduled".to_string();
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(scheduled_for) {
        return at
            .with_timezone(&Utc)
            .format("%A, %B %-d, %Y at %-I:%M %p UTC")
            .to_string();
    }
    if let Ok(day) = NaiveDate::parse_from_str(scheduled_for, "%Y-%m-%d") {
        return day.format("%A, %B %-d, %Y").to_string();
    }
    scheduled_for.to_string()
}

impl From<&Post> for PostPreview {
    fn from(post: &Post) -> Self {
        let platform = post.platform().unwrap_or("Unknown");
        let format = post.format().unwrap_or("Post");

        let sequence = SequenceKind::for_format(format)
            .filter(|_| !post.slides.is_empty())
            .map(|kind| Sequence {
                kind,
                heading: kind.heading(post.display_slide_count()),
                items: post
                    .slides
                    .iter()
                    .enumerate()
                    .map(|(i, text)| SequenceItem {
                        number: i + 1,
                        label: kind.item_label(i + 1),
                        text: text.clone(),
                    })
                    .collect(),
            });

        let video = matches!(format, "Video" | "Reel")
            .then(|| VideoDetails {
                video_type: post.video_type.clone(),
                video_length: post.video_length.clone(),
            })
            .filter(|v| v.video_type.is_some() || v.video_length.is_some());

        let caption_heading = if platform == "Twitter" && format == "Thread" {
            "First Tweet"
        } else {
            "Caption"
        };

        PostPreview {
            id: post.id.clone(),
            title: post.title.clone(),
            platform: PlatformBadge::for_platform(platform),
            format: format.to_string(),
            scheduled: schedule_label(&post.scheduled_for),
            caption_heading,
            caption: post.caption().map(str::to_string),
            hashtags: post.hashtag_list().into_iter().map(str::to_string).collect(),
            sequence,
            video,
            image_ideas: post.image_ideas.clone().filter(|s| !s.is_empty()),
            image_prompts: post.image_prompts.clone().filter(|s| !s.is_empty()),
            images: post
                .images
                .iter()
                .map(|a| ImagePreview {
                    id: a.id.clone(),
                    filename: a.filename.clone(),
                    display_url: a.display_url().to_string(),
                })
                .collect(),
        }
    }
}

//! Raw field labels of the posts table. Nothing outside the record adapter
//! and the post projection should name these.

pub const TITLE: &str = "Title";
pub const STATUS: &str = "Status";
pub const CONTENT_STATUS: &str = "Content Status";
pub const PLATFORMS: &str = "Platforms";
pub const POST_FORMAT: &str = "Post Format";
pub const SCHEDULED_FOR: &str = "Scheduled For";
pub const CONTENT_INSTAGRAM: &str = "Content - Instagram";
pub const CONTENT_TWITTER: &str = "Content - Twitter";
pub const CONTENT_FACEBOOK: &str = "Content - Facebook";
pub const HASHTAGS: &str = "Hashtags";
pub const SLIDE_COUNT: &str = "Slide Count";
pub const VIDEO_TYPE: &str = "Video Type";
pub const VIDEO_LENGTH: &str = "Video Length";
pub const IMAGE_IDEAS: &str = "Image Ideas";
pub const IMAGE_PROMPTS: &str = "Image Prompts";
pub const THEME: &str = "Theme";
pub const CONTENT_PILLAR: &str = "Content Pillar";
pub const CONTENT_TYPE: &str = "Content Type";
pub const IMAGES: &str = "Images";
pub const REVISION_NOTES: &str = "Revision Notes";

/// Carousel slides, scenes and thread tweets live in eight fixed slots.
pub const SLIDES: [&str; 8] = [
    "Slide 1", "Slide 2", "Slide 3", "Slide 4", "Slide 5", "Slide 6", "Slide 7", "Slide 8",
];

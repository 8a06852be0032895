use std::fmt;

use serde::{Deserialize, Serialize};

/// Review workflow labels held in the store's `Content Status` field.
///
/// `Draft → Ready for Review → Review → {Approved, Needs Revision}`.
/// "Revision Requested" is an older label for the sent-back state; it is
/// accepted on input and always written back as "Needs Revision".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentStatus {
    #[serde(rename = "Draft")]
    Draft,
    #[serde(rename = "Ready for Review")]
    ReadyForReview,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Needs Revision", alias = "Revision Requested")]
    NeedsRevision,
}

pub const REVISION_REQUESTED_ALIAS: &str = "Revision Requested";

impl ContentStatus {
    pub const ALL: [ContentStatus; 5] = [
        ContentStatus::Draft,
        ContentStatus::ReadyForReview,
        ContentStatus::Review,
        ContentStatus::Approved,
        ContentStatus::NeedsRevision,
    ];

    /// Canonical label, as written to the store.
    pub fn label(self) -> &'static str {
        match self {
            ContentStatus::Draft => "Draft",
            ContentStatus::ReadyForReview => "Ready for Review",
            ContentStatus::Review => "Review",
            ContentStatus::Approved => "Approved",
            ContentStatus::NeedsRevision => "Needs Revision",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        if label == REVISION_REQUESTED_ALIAS {
            return Some(ContentStatus::NeedsRevision);
        }
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Approved and sent-back posts leave the review queue.
    pub fn is_terminal(self) -> bool {
        matches!(self, ContentStatus::Approved | ContentStatus::NeedsRevision)
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The status labels one entry point will accept, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowList {
    labels: &'static [&'static str],
}

impl AllowList {
    /// Labels accepted by the generic update-status endpoint.
    pub const UPDATE_STATUS: AllowList = AllowList::new(&[
        "Approved",
        "Needs Revision",
        "Revision Requested",
        "Draft",
        "Ready for Review",
        "Review",
    ]);

    /// Labels a reviewer's decision may carry.
    pub const REVIEW_DECISIONS: AllowList =
        AllowList::new(&["Approved", "Needs Revision", "Revision Requested"]);

    pub const fn new(labels: &'static [&'static str]) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(&label)
    }

    pub fn describe(&self) -> String {
        self.labels.join(", ")
    }
}

//! Domain core of the review portal: record store access, post projection
//! and the review workflow.

pub mod adapter;
pub mod post;
pub mod record;
pub mod store;
pub mod workflow;

pub use adapter::RecordAdapter;
pub use post::{Post, PostPreview};
pub use record::RecordId;
pub use store::{RecordStore, StoreError};
pub use workflow::{ReviewError, ReviewWorkflow};

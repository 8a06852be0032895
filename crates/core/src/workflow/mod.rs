//! Review decisions: status vocabulary, input validation and the
//! approve / request-revision / update operations.

pub mod review;
pub mod status;
pub mod validate;

pub use review::{ReviewError, ReviewWorkflow, StatusChange, StatusUpdate};
pub use status::{AllowList, ContentStatus};
pub use validate::ValidationError;

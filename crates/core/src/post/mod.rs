pub mod model;
pub mod preview;
pub mod transform;

pub use model::Post;
pub use preview::PostPreview;

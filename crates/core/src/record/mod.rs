pub mod fields;
pub mod id;
pub mod model;

pub use id::{RecordId, RecordIdError};
pub use model::{Attachment, RawRecord, RecordList, Thumbnail, Thumbnails};

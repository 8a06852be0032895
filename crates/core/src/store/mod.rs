//! Record store abstraction.
//!
//! The store owns durability. This module defines the `RecordStore` trait
//! the adapter talks to, plus the query and patch shapes that cross it.
//! Implementations: [`AirtableStore`] over HTTPS and [`InMemoryStore`] for
//! tests and local runs.

mod airtable;
mod memory;
mod patch;
mod query;

pub use airtable::{AirtableStore, AirtableStoreConfig, DEFAULT_API_URL};
pub use memory::{InMemoryStore, StoreRequest};
pub use patch::FieldPatch;
pub use query::{ListQuery, Sort, SortDirection};

use async_trait::async_trait;

use crate::record::{RawRecord, RecordId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store answered with a non-success status.
    /// `message` is the response body as received.
    #[error("record store responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// The store could not be reached, or its reply could not be read.
    #[error("record store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The in-memory store could not apply a filter formula.
    #[error("invalid filter formula: {0}")]
    Formula(String),
}

impl StoreError {
    /// HTTP status reported by the store, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            StoreError::Transport(e) => e.status().map(|s| s.as_u16()),
            StoreError::Formula(_) => None,
        }
    }
}

/// Storage backend for post records.
///
/// Each call is one round trip. Implementations do not retry and do not
/// cache; callers refetch when they need fresh state.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records matching `query.filter`, in `query.sort` order.
    async fn list_records(&self, query: &ListQuery) -> Result<Vec<RawRecord>, StoreError>;

    /// A single record, or `None` when the store reports it does not exist.
    async fn get_record(&self, id: &RecordId) -> Result<Option<RawRecord>, StoreError>;

    /// Partial update: fields not named in `patch` are left as they are.
    async fn update_record(&self, id: &RecordId, patch: &FieldPatch) -> Result<(), StoreError>;
}

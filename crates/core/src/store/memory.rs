//! In-memory implementation of `RecordStore`.
//!
//! Applies filter formulas with the formula evaluator and sorts stably, so
//! tie order is insertion order. Every call is journaled, and a failure
//! status can be injected to stand in for a store outage.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use review_portal_formula::{eval_filter, parse};

use super::{FieldPatch, ListQuery, RecordStore, SortDirection, StoreError};
use crate::record::{RawRecord, RecordId};

/// A call received by the in-memory store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    List(ListQuery),
    Get(RecordId),
    Update(RecordId, FieldPatch),
}

pub struct InMemoryStore {
    records: RwLock<Vec<RawRecord>>,
    journal: RwLock<Vec<StoreRequest>>,
    failure: RwLock<Option<(u16, String)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            journal: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    pub async fn record(&self, id: &RecordId) -> Option<RawRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    /// Calls received so far, oldest first.
    pub async fn requests(&self) -> Vec<StoreRequest> {
        self.journal.read().await.clone()
    }

    /// Answer every subsequent call with `status` until [`Self::recover`].
    pub async fn fail_with(&self, status: u16, message: impl Into<String>) {
        *self.failure.write().await = Some((status, message.into()));
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    async fn begin(&self, request: StoreRequest) -> Result<(), StoreError> {
        self.journal.write().await.push(request);
        match self.failure.read().await.as_ref() {
            Some((status, message)) => Err(StoreError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_key(record: &RawRecord, field: &str) -> String {
    match record.fields.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn not_found_body() -> String {
    r#"{"error":"NOT_FOUND"}"#.to_string()
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_records(&self, query: &ListQuery) -> Result<Vec<RawRecord>, StoreError> {
        self.begin(StoreRequest::List(query.clone())).await?;

        // Evaluate the rendered text, which is what an HTTP store receives.
        let filter = query
            .filter
            .as_ref()
            .map(|expr| parse(&expr.to_string()))
            .transpose()
            .map_err(|e| StoreError::Formula(e.to_string()))?;

        let records = self.records.read().await;
        let mut matched = Vec::new();
        for record in records.iter() {
            let keep = match &filter {
                Some(expr) => eval_filter(expr, &record.fields)
                    .map_err(|e| StoreError::Formula(e.to_string()))?,
                None => true,
            };
            if keep {
                matched.push(record.clone());
            }
        }

        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                let order = sort_key(a, &sort.field).cmp(&sort_key(b, &sort.field));
                match sort.direction {
                    SortDirection::Asc => order,
                    SortDirection::Desc => order.reverse(),
                }
            });
        }
        Ok(matched)
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<RawRecord>, StoreError> {
        self.begin(StoreRequest::Get(id.clone())).await?;
        Ok(self.record(id).await)
    }

    async fn update_record(&self, id: &RecordId, patch: &FieldPatch) -> Result<(), StoreError> {
        self.begin(StoreRequest::Update(id.clone(), patch.clone()))
            .await?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::Status {
                status: 404,
                message: not_found_body(),
            })?;
        for (field, value) in &patch.fields {
            record.fields.insert(field.clone(), value.clone());
        }
        Ok(())
    }
}

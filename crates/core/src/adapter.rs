//! Record adapter: the only code that knows the posts table's field labels.
//!
//! Reads go through the store on every call and are projected into
//! [`Post`]s. Writes touch `Content Status` and, when a reviewer left one,
//! `Revision Notes`; nothing else.

use std::sync::Arc;

use review_portal_formula::Expr;

use crate::post::Post;
use crate::record::{fields, RecordId};
use crate::store::{FieldPatch, ListQuery, RecordStore, SortDirection, StoreError};
use crate::workflow::ContentStatus;

#[derive(Clone)]
pub struct RecordAdapter {
    store: Arc<dyn RecordStore>,
}

impl RecordAdapter {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// `{Content Status} = "Review"`, earliest scheduled first.
    pub fn review_queue_query() -> ListQuery {
        ListQuery::new()
            .filter(
                Expr::field(fields::CONTENT_STATUS)
                    .equals(Expr::string(ContentStatus::Review.label())),
            )
            .sort(fields::SCHEDULED_FOR, SortDirection::Asc)
    }

    /// Posts awaiting review, in the order the store returned them.
    pub async fn list_for_review(&self) -> Result<Vec<Post>, StoreError> {
        let records = self
            .store
            .list_records(&Self::review_queue_query())
            .await?;

        let total = records.len();
        let posts: Vec<Post> = records
            .into_iter()
            .map(Post::from)
            .filter(|post| {
                let in_review = post.content_status == ContentStatus::Review.label();
                if !in_review {
                    tracing::warn!(
                        id = %post.id,
                        content_status = %post.content_status,
                        "store returned a record outside the review queue, skipping"
                    );
                }
                in_review
            })
            .collect();

        tracing::debug!(total, returned = posts.len(), "listed review queue");
        Ok(posts)
    }

    pub async fn get_by_id(&self, id: &RecordId) -> Result<Option<Post>, StoreError> {
        Ok(self.store.get_record(id).await?.map(Post::from))
    }

    /// Write `status` and, if it has any non-whitespace content, `comment`
    /// verbatim as the revision notes. Blank comments leave the notes as
    /// they were.
    pub async fn update_status(
        &self,
        id: &RecordId,
        status: ContentStatus,
        comment: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut patch = FieldPatch::new().set(fields::CONTENT_STATUS, status.label());
        if let Some(comment) = comment.filter(|c| !c.trim().is_empty()) {
            patch = patch.set(fields::REVISION_NOTES, comment);
        }
        self.store.update_record(id, &patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;
    use crate::store::{InMemoryStore, StoreRequest};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Returns every record regardless of the query, like a store that
    /// ignores `filterByFormula`.
    struct UnfilteredStore(Vec<RawRecord>);

    #[async_trait]
    impl RecordStore for UnfilteredStore {
        async fn list_records(&self, _query: &ListQuery) -> Result<Vec<RawRecord>, StoreError> {
            Ok(self.0.clone())
        }

        async fn get_record(&self, _id: &RecordId) -> Result<Option<RawRecord>, StoreError> {
            Ok(None)
        }

        async fn update_record(&self, _id: &RecordId, _patch: &FieldPatch) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn record(id: &str, fields: Value) -> RawRecord {
        let Value::Object(map) = fields else {
            panic!("fields must be an object");
        };
        RawRecord::new(RecordId::parse(id).unwrap(), map)
    }

    fn adapter_over(records: Vec<RawRecord>) -> (Arc<InMemoryStore>, RecordAdapter) {
        let store = Arc::new(InMemoryStore::with_records(records));
        (store.clone(), RecordAdapter::new(store))
    }

    fn id(raw: &str) -> RecordId {
        RecordId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn review_queue_is_sorted_by_schedule() {
        let (_, adapter) = adapter_over(vec![
            record("rec02", json!({"Content Status": "Review", "Scheduled For": "2024-01-02"})),
            record("rec01", json!({"Content Status": "Review", "Scheduled For": "2024-01-01"})),
            record("recDraft", json!({"Content Status": "Draft", "Scheduled For": "2023-12-31"})),
        ]);

        let posts = adapter.list_for_review().await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["rec01", "rec02"]);
    }

    #[tokio::test]
    async fn review_queue_drops_records_the_store_did_not_filter() {
        let adapter = RecordAdapter::new(Arc::new(UnfilteredStore(vec![
            record("rec01", json!({"Content Status": "Review", "Title": "Keep"})),
            record("rec02", json!({"Content Status": "Draft", "Title": "Drop"})),
            record("rec03", json!({"Title": "No status"})),
        ])));

        let posts = adapter.list_for_review().await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["rec01"]);
    }

    #[tokio::test]
    async fn review_queue_sends_filter_and_sort() {
        let (store, adapter) = adapter_over(Vec::new());
        adapter.list_for_review().await.unwrap();

        let requests = store.requests().await;
        let [StoreRequest::List(query)] = requests.as_slice() else {
            panic!("expected one list call, got {requests:?}");
        };
        assert_eq!(
            query.filter.as_ref().map(ToString::to_string).as_deref(),
            Some(r#"{Content Status} = "Review""#)
        );
        let sort = query.sort.as_ref().unwrap();
        assert_eq!(sort.field, "Scheduled For");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[tokio::test]
    async fn approve_writes_status_only() {
        let (store, adapter) = adapter_over(vec![record(
            "rec123",
            json!({"Content Status": "Review", "Revision Notes": "old"}),
        )]);

        adapter
            .update_status(&id("rec123"), ContentStatus::Approved, None)
            .await
            .unwrap();

        let requests = store.requests().await;
        let [StoreRequest::Update(_, patch)] = requests.as_slice() else {
            panic!("expected one update call, got {requests:?}");
        };
        assert_eq!(patch.get("Content Status"), Some(&json!("Approved")));
        assert!(!patch.contains("Revision Notes"));

        let stored = store.record(&id("rec123")).await.unwrap();
        assert_eq!(stored.fields["Revision Notes"], json!("old"));
    }

    #[tokio::test]
    async fn revision_writes_comment_verbatim() {
        let (store, adapter) =
            adapter_over(vec![record("rec123", json!({"Content Status": "Review"}))]);

        adapter
            .update_status(
                &id("rec123"),
                ContentStatus::NeedsRevision,
                Some("fix the caption"),
            )
            .await
            .unwrap();

        let stored = store.record(&id("rec123")).await.unwrap();
        assert_eq!(stored.fields["Content Status"], json!("Needs Revision"));
        assert_eq!(stored.fields["Revision Notes"], json!("fix the caption"));
    }

    #[tokio::test]
    async fn whitespace_comment_is_not_written() {
        let (store, adapter) =
            adapter_over(vec![record("rec123", json!({"Content Status": "Review"}))]);

        adapter
            .update_status(&id("rec123"), ContentStatus::NeedsRevision, Some("  \n "))
            .await
            .unwrap();

        let stored = store.record(&id("rec123")).await.unwrap();
        assert!(!stored.fields.contains_key("Revision Notes"));
    }

    #[tokio::test]
    async fn missing_record_is_none() {
        let (_, adapter) = adapter_over(Vec::new());
        assert!(adapter.get_by_id(&id("recNope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_failure_keeps_status() {
        let (store, adapter) = adapter_over(Vec::new());
        store.fail_with(503, "Service Unavailable").await;

        let err = adapter.list_for_review().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}

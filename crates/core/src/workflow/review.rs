use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::status::{AllowList, ContentStatus};
use super::validate::{normalize_comment, validate_id, validate_status, ValidationError};
use crate::adapter::RecordAdapter;
use crate::post::{Post, PostPreview};
use crate::record::RecordId;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A status change as requested by a client. Fields are optional so that
/// missing input surfaces as a validation error rather than a decode error.
///
/// Clients name the post as `id` or `postId`; a blank `id` defers to `postId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl StatusUpdate {
    pub fn record_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .or(self.post_id.as_deref())
    }
}

/// A status change that the store accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub id: RecordId,
    pub status: ContentStatus,
    pub notes_written: bool,
}

/// Review decisions on top of the record adapter.
///
/// Inputs are validated before anything reaches the store; a request that
/// fails validation causes no store traffic.
#[derive(Clone)]
pub struct ReviewWorkflow {
    adapter: RecordAdapter,
}

impl ReviewWorkflow {
    pub fn new(adapter: RecordAdapter) -> Self {
        Self { adapter }
    }

    /// The review queue, earliest scheduled first.
    pub async fn pending(&self) -> Result<Vec<Post>, ReviewError> {
        Ok(self.adapter.list_for_review().await?)
    }

    pub async fn post(&self, id: &str) -> Result<Option<Post>, ReviewError> {
        let id = validate_id(Some(id))?;
        Ok(self.adapter.get_by_id(&id).await?)
    }

    pub async fn preview(&self, id: &str) -> Result<Option<PostPreview>, ReviewError> {
        Ok(self.post(id).await?.map(|post| PostPreview::from(&post)))
    }

    pub async fn approve(&self, id: &str) -> Result<StatusChange, ReviewError> {
        self.decide(Some(id), ContentStatus::Approved.label(), None)
            .await
    }

    pub async fn request_revision(
        &self,
        id: &str,
        comment: Option<&str>,
    ) -> Result<StatusChange, ReviewError> {
        self.decide(Some(id), ContentStatus::NeedsRevision.label(), comment)
            .await
    }

    /// Apply a client-supplied update, accepting only labels in `allow`.
    pub async fn update_status(
        &self,
        request: &StatusUpdate,
        allow: &AllowList,
    ) -> Result<StatusChange, ReviewError> {
        let id = validate_id(request.record_id())?;
        let status = validate_status(request.status.as_deref(), allow)?;
        self.apply(id, status, request.comment.as_deref()).await
    }

    async fn decide(
        &self,
        id: Option<&str>,
        label: &str,
        comment: Option<&str>,
    ) -> Result<StatusChange, ReviewError> {
        let id = validate_id(id)?;
        let status = validate_status(Some(label), &AllowList::REVIEW_DECISIONS)?;
        self.apply(id, status, comment).await
    }

    async fn apply(
        &self,
        id: RecordId,
        status: ContentStatus,
        comment: Option<&str>,
    ) -> Result<StatusChange, ReviewError> {
        let comment = normalize_comment(comment);
        self.adapter.update_status(&id, status, comment).await?;

        tracing::info!(
            %id,
            status = status.label(),
            left_review = status.is_terminal(),
            notes = comment.is_some(),
            "post status updated"
        );
        Ok(StatusChange {
            id,
            status,
            notes_written: comment.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::record::RawRecord;
    use crate::store::{InMemoryStore, StoreRequest};
    use serde_json::{json, Value};

    fn record(id: &str, fields: Value) -> RawRecord {
        let Value::Object(map) = fields else {
            panic!("fields must be an object");
        };
        RawRecord::new(RecordId::parse(id).unwrap(), map)
    }

    fn workflow() -> (Arc<InMemoryStore>, ReviewWorkflow) {
        let store = Arc::new(InMemoryStore::with_records(vec![record(
            "rec123",
            json!({
                "Title": "Launch day",
                "Content Status": "Review",
                "Platforms": ["Instagram"],
                "Post Format": ["Carousel"],
                "Slide 1": "Hook",
                "Slide 2": "Detail",
            }),
        )]));
        let workflow = ReviewWorkflow::new(RecordAdapter::new(store.clone()));
        (store, workflow)
    }

    fn update(id: Option<&str>, status: Option<&str>, comment: Option<&str>) -> StatusUpdate {
        StatusUpdate {
            id: id.map(str::to_string),
            post_id: None,
            status: status.map(str::to_string),
            comment: comment.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn approve_moves_post_out_of_queue() {
        let (_, workflow) = workflow();
        let change = workflow.approve("rec123").await.unwrap();
        assert_eq!(change.status, ContentStatus::Approved);
        assert!(!change.notes_written);
        assert!(workflow.pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn request_revision_records_notes() {
        let (store, workflow) = workflow();
        let change = workflow
            .request_revision("rec123", Some("fix the caption"))
            .await
            .unwrap();
        assert!(change.notes_written);

        let stored = store.record(&RecordId::parse("rec123").unwrap()).await.unwrap();
        assert_eq!(stored.fields["Content Status"], json!("Needs Revision"));
        assert_eq!(stored.fields["Revision Notes"], json!("fix the caption"));
    }

    #[tokio::test]
    async fn revision_requested_alias_is_written_canonically() {
        let (store, workflow) = workflow();
        let change = workflow
            .update_status(
                &update(Some("rec123"), Some("Revision Requested"), None),
                &AllowList::UPDATE_STATUS,
            )
            .await
            .unwrap();
        assert_eq!(change.status, ContentStatus::NeedsRevision);

        let stored = store.record(&RecordId::parse("rec123").unwrap()).await.unwrap();
        assert_eq!(stored.fields["Content Status"], json!("Needs Revision"));
    }

    #[test]
    fn blank_id_defers_to_post_id() {
        let both = |id: Option<&str>, post_id: Option<&str>| StatusUpdate {
            id: id.map(str::to_string),
            post_id: post_id.map(str::to_string),
            ..StatusUpdate::default()
        };
        assert_eq!(both(Some(""), Some("rec01")).record_id(), Some("rec01"));
        assert_eq!(both(Some("  "), Some("rec01")).record_id(), Some("rec01"));
        assert_eq!(both(None, Some("rec01")).record_id(), Some("rec01"));
        assert_eq!(both(Some("rec02"), Some("rec01")).record_id(), Some("rec02"));
        assert_eq!(both(None, None).record_id(), None);

        let decoded: StatusUpdate =
            serde_json::from_str(r#"{"id": null, "postId": "rec01", "status": "Approved"}"#)
                .unwrap();
        assert_eq!(decoded.record_id(), Some("rec01"));
    }

    #[tokio::test]
    async fn invalid_requests_never_reach_the_store() {
        let (store, workflow) = workflow();
        let allow = AllowList::UPDATE_STATUS;

        let cases = [
            update(None, Some("Approved"), None),
            update(Some("rec123"), None, None),
            update(Some("rec123"), Some("Published"), None),
            update(Some("../etc"), Some("Approved"), None),
        ];
        for case in &cases {
            let err = workflow.update_status(case, &allow).await.unwrap_err();
            assert!(matches!(err, ReviewError::Validation(_)), "{case:?}");
        }
        assert!(store.requests().await.is_empty());
    }

    #[tokio::test]
    async fn preview_of_carousel() {
        let (_, workflow) = workflow();
        let preview = workflow.preview("rec123").await.unwrap().unwrap();
        let value = serde_json::to_value(&preview).unwrap();
        assert_eq!(value["title"], json!("Launch day"));
        assert!(workflow.preview("recMissing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_outage_is_reported() {
        let (store, workflow) = workflow();
        store.fail_with(500, "boom").await;

        let err = workflow.approve("rec123").await.unwrap_err();
        match err {
            ReviewError::Store(e) => assert_eq!(e.status(), Some(500)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            store.requests().await.as_slice(),
            [StoreRequest::Update(..)]
        ));
    }
}

use std::fmt;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};

use super::{FieldPatch, ListQuery, RecordStore, StoreError};
use crate::record::{RawRecord, RecordId, RecordList};

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Where the posts table lives and how to authenticate against it.
#[derive(Clone)]
pub struct AirtableStoreConfig {
    pub api_url: String,
    pub base_id: String,
    pub table: String,
    pub api_key: String,
}

impl fmt::Debug for AirtableStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableStoreConfig")
            .field("api_url", &self.api_url)
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// HTTPS client for an Airtable-compatible REST table.
///
/// One request per call, bearer-authenticated, no retries. Transport
/// timeouts are reqwest's defaults.
#[derive(Clone)]
pub struct AirtableStore {
    client: Client,
    table_url: String,
    api_key: String,
}

impl AirtableStore {
    pub fn new(config: AirtableStoreConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: AirtableStoreConfig) -> Self {
        let table_url = format!(
            "{}/{}/{}",
            config.api_url.trim_end_matches('/'),
            config.base_id,
            config.table
        );
        Self {
            client,
            table_url,
            api_key: config.api_key,
        }
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.table_url, id)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
    }
}

/// Turn a non-success response into `StoreError::Status`, keeping the body.
async fn error_for_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await?;
    tracing::warn!(status = status.as_u16(), "record store error: {message}");
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn list_records(&self, query: &ListQuery) -> Result<Vec<RawRecord>, StoreError> {
        tracing::debug!(url = %self.table_url, ?query, "listing records");

        let response = self
            .get(&self.table_url)
            .query(&query.to_params())
            .send()
            .await?;
        let list: RecordList = error_for_status(response).await?.json().await?;

        if list.offset.is_some() {
            tracing::warn!(
                returned = list.records.len(),
                "record store has more pages; only the first page is used"
            );
        }
        Ok(list.records)
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<RawRecord>, StoreError> {
        tracing::debug!(%id, "fetching record");

        let response = self.get(&self.record_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record = error_for_status(response).await?.json().await?;
        Ok(Some(record))
    }

    async fn update_record(&self, id: &RecordId, patch: &FieldPatch) -> Result<(), StoreError> {
        tracing::debug!(%id, fields = ?patch.fields.keys().collect::<Vec<_>>(), "patching record");

        let response = self
            .client
            .patch(self.record_url(id))
            .bearer_auth(&self.api_key)
            .json(patch)
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> AirtableStoreConfig {
        AirtableStoreConfig {
            api_url: api_url.to_string(),
            base_id: "appBase".to_string(),
            table: "tblPosts".to_string(),
            api_key: "secret".to_string(),
        }
    }

    #[test]
    fn table_url_joins_parts() {
        let store = AirtableStore::new(config("https://api.airtable.com/v0/"));
        assert_eq!(store.table_url(), "https://api.airtable.com/v0/appBase/tblPosts");
        let id = RecordId::parse("rec1").unwrap();
        assert_eq!(
            store.record_url(&id),
            "https://api.airtable.com/v0/appBase/tblPosts/rec1"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let rendered = format!("{:?}", config(DEFAULT_API_URL));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

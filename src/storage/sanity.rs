//! Sanity HTTP API client
//!
//! GROQ queries go to `/v{version}/data/query/{dataset}`; writes go to
//! `/v{version}/data/mutate/{dataset}` as a single `createOrReplace`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use super::ContentStore;
use crate::config::StoreConfig;
use crate::constants::store::{DOCUMENT_BY_SLUG_QUERY, SLUG_LISTING_QUERY};
use crate::types::{Result, SectorDocument, SectorError};

const SERVICE: &str = "Sanity";

pub struct SanityStore {
    /// Write token; never shown in debug output
    token: SecretString,
    base_url: String,
    dataset: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for SanityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityStore")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("dataset", &self.dataset)
            .finish()
    }
}

fn required<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SanityStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let missing = || SectorError::Config("Sanity project, dataset, and token are required".to_string());
        let project_id = required(&config.project_id).ok_or_else(missing)?;
        let dataset = required(&config.dataset).ok_or_else(missing)?;
        let token = required(&config.token).ok_or_else(missing)?;

        let host = config
            .api_host
            .as_deref()
            .map(|h| h.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{}.api.sanity.io", project_id));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SectorError::transport(SERVICE, format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token: SecretString::from(token.to_string()),
            base_url: format!("{}/v{}", host, config.api_version.trim_start_matches('v')),
            dataset: dataset.to_string(),
            client,
        })
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/data/{}/{}", self.base_url, operation, self.dataset)
    }

    /// Run a GROQ query and return its `result` member
    async fn query(&self, groq: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut pairs: Vec<(String, String)> = vec![("query".to_string(), groq.to_string())];
        for (name, value) in params {
            let encoded = serde_json::to_string(value)?;
            pairs.push((format!("${}", name), encoded));
        }

        let url = self.endpoint("query");
        debug!("GROQ query against {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .query(&pairs)
            .send()
            .await
            .map_err(|e| SectorError::transport(SERVICE, e))?;

        let body = read_body(response).await?;
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }
}

async fn read_body(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SectorError::remote(SERVICE, status.as_u16(), body));
    }
    response
        .json()
        .await
        .map_err(|e| SectorError::transport(SERVICE, format!("unreadable response body: {}", e)))
}

#[async_trait]
impl ContentStore for SanityStore {
    async fn list_slugs(&self) -> Result<Vec<String>> {
        let result = self.query(SLUG_LISTING_QUERY, &[]).await?;
        let slugs: Vec<String> = result
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|row| row.get("slug").and_then(Value::as_str))
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
            .collect();
        debug!("Store lists {} sector slugs", slugs.len());
        Ok(slugs)
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<Value>> {
        let result = self.query(DOCUMENT_BY_SLUG_QUERY, &[("slug", slug)]).await?;
        Ok(match result {
            Value::Null => None,
            page => Some(page),
        })
    }

    async fn upsert(&self, document: &SectorDocument) -> Result<()> {
        let url = self.endpoint("mutate");
        info!("Upserting {} (page {})", document.id, document.page_index);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&json!({ "mutations": [{ "createOrReplace": document }] }))
            .send()
            .await
            .map_err(|e| SectorError::transport(SERVICE, e))?;

        read_body(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::validation::fixtures::sector_json;
    use crate::types::{PageIndex, SectorPayload};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path, query_param},
    };

    fn store_for(server: &MockServer) -> SanityStore {
        SanityStore::new(&StoreConfig {
            project_id: Some("proj".to_string()),
            dataset: Some("production".to_string()),
            token: Some("sk-write".to_string()),
            api_host: Some(server.uri()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_missing_settings_are_config_errors() {
        let err = SanityStore::new(&StoreConfig {
            project_id: Some("proj".to_string()),
            dataset: Some("production".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Sanity project, dataset, and token are required"));
    }

    #[test]
    fn test_default_host_uses_project_id() {
        let store = SanityStore::new(&StoreConfig {
            project_id: Some("abc123".to_string()),
            dataset: Some("production".to_string()),
            token: Some("t".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            store.endpoint("query"),
            "https://abc123.api.sanity.io/v2023-08-01/data/query/production"
        );
        let debug = format!("{:?}", store);
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_list_slugs_skips_rows_without_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2023-08-01/data/query/production"))
            .and(query_param("query", SLUG_LISTING_QUERY))
            .and(header("Authorization", "Bearer sk-write"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [{"slug": "acme"}, {"slug": null}, {}, {"slug": "retail"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let slugs = store_for(&server).list_slugs().await.unwrap();
        assert_eq!(slugs, ["acme", "retail"]);
    }

    #[tokio::test]
    async fn test_fetch_by_slug_passes_json_encoded_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2023-08-01/data/query/production"))
            .and(query_param("$slug", "\"acme\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"_id": "sector-acme", "title": "AI for Retail"}
            })))
            .mount(&server)
            .await;

        let page = store_for(&server).fetch_by_slug("acme").await.unwrap().unwrap();
        assert_eq!(page["_id"], "sector-acme");
    }

    #[tokio::test]
    async fn test_fetch_missing_page_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": null})))
            .mount(&server)
            .await;

        assert!(store_for(&server).fetch_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_sends_create_or_replace() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2023-08-01/data/mutate/production"))
            .and(body_partial_json(json!({
                "mutations": [{"createOrReplace": {
                    "_id": "sector-acme",
                    "_type": "sector",
                    "slug": {"current": "acme"},
                    "pageIndex": "003"
                }}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"transactionId": "tx"})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = SectorPayload::from_value(sector_json("acme")).unwrap();
        let document = SectorDocument::assemble(payload, PageIndex::from_position(3));
        store_for(&server).upsert(&document).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_write_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("insufficient permissions"))
            .mount(&server)
            .await;

        let payload = SectorPayload::from_value(sector_json("acme")).unwrap();
        let document = SectorDocument::assemble(payload, PageIndex::from_position(1));
        let err = store_for(&server).upsert(&document).await.unwrap_err();
        assert_eq!(err.to_string(), "Sanity request failed: 403 insufficient permissions");
    }
}

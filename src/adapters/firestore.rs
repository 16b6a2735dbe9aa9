//! Cloud Firestore REST 實作的 `DocumentStore`
//!
//! `POST {endpoint}/v1/projects/{project}/databases/{database}/documents/{collection}?key=...`

use crate::config::FirebaseConfig;
use crate::domain::model::DocumentHandle;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{Result, SubmissionError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: Client,
    endpoint: String,
    project_id: String,
    database: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CreateDocumentResponse {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

impl FirestoreStore {
    pub fn new(config: &FirebaseConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &FirebaseConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            database: config.database().to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.endpoint, self.project_id, self.database, collection
        )
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn append(
        &self,
        collection: &str,
        document: Map<String, Value>,
    ) -> std::result::Result<DocumentHandle, SubmissionError> {
        let url = self.collection_url(collection);
        let body = json!({ "fields": encode_fields(document) });

        tracing::debug!("Making Firestore request to: {}", url);
        let mut request = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            request = request.query(&[("key", self.api_key.as_str())]);
        }
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("Firestore response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .map(|env| {
                    let status = env.error.status.unwrap_or_default();
                    let message = env.error.message.unwrap_or_default();
                    format!("{} {}", status, message).trim().to_string()
                })
                .unwrap_or(text);
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreateDocumentResponse = response
            .json()
            .await
            .map_err(|e| SubmissionError::InvalidResponse(e.to_string()))?;

        match created.name {
            Some(name) if !name.is_empty() => Ok(DocumentHandle::from_name(name)),
            _ => Err(SubmissionError::InvalidResponse(
                "response did not contain a document name".to_string(),
            )),
        }
    }
}

/// JSON 物件轉為 Firestore 的 `fields` 結構
pub fn encode_fields(document: Map<String, Value>) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (key, encode_value(value)))
        .collect()
}

fn encode_value(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore 的 integerValue 以字串傳送
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.into_iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

use crate::domain::model::{DocumentHandle, Registration, RegistrationDocument};
use crate::domain::ports::{Clock, DocumentStore, SystemClock};
use crate::utils::error::SubmissionError;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const DEFAULT_COLLECTION: &str = "registros";

/// 把通過驗證的報名資料寫入文件資料庫。
///
/// 每次呼叫只會發出一次 append；失敗不重試、不去重。
#[derive(Clone)]
pub struct SubmissionClient {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    collection: String,
}

impl SubmissionClient {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            collection: collection.into(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn submit(
        &self,
        registration: &Registration,
    ) -> Result<DocumentHandle, SubmissionError> {
        let document = RegistrationDocument::new(registration.clone(), self.clock.now());

        let fields = document_fields(serde_json::to_value(&document)?)?;

        tracing::debug!(
            "Appending registration to collection '{}' ({} fields)",
            self.collection,
            fields.len()
        );
        let handle = self.store.append(&self.collection, fields).await?;
        tracing::info!("📨 Registration stored as document {}", handle.id);

        Ok(handle)
    }
}

/// 文件必須是 JSON 物件才能當成欄位集合寫入
fn document_fields(value: Value) -> Result<Map<String, Value>, SubmissionError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SubmissionError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

impl std::fmt::Debug for SubmissionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionClient")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

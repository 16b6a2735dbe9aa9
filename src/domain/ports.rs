use crate::domain::model::DocumentHandle;
use crate::utils::error::SubmissionError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// 外部文件資料庫唯一使用到的能力：在集合中新增一份文件
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn append(
        &self,
        collection: &str,
        document: Map<String, Value>,
    ) -> Result<DocumentHandle, SubmissionError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

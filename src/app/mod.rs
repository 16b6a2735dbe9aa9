use crate::adapters::FirestoreStore;
use crate::config::AppConfig;
use crate::core::controller::FormController;
use crate::core::submission::SubmissionClient;
use crate::utils::error::Result;
use std::sync::Arc;

/// 依設定組出 Firestore store → 送出 client → 表單控制器
pub fn build_controller(config: &AppConfig) -> Result<FormController> {
    let store = FirestoreStore::new(&config.firebase, config.submission_timeout())?;
    let client = SubmissionClient::new(Arc::new(store), config.collection());

    tracing::debug!(
        "Form wired to project '{}', collection '{}'",
        config.firebase.project_id,
        config.collection()
    );
    Ok(FormController::with_success_window(
        client,
        config.success_window(),
    ))
}

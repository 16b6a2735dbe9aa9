//! 表單控制器：持有暫時的 UI 狀態，串接驗證與送出
//!
//! `Idle -> Submitting -> {Succeeded, Failed}`；`Succeeded` 在顯示時間結束後
//! 自動回到 `Idle`，`Failed` 則在使用者確認後回到 `Idle`。

use crate::core::submission::SubmissionClient;
use crate::core::validation::{validate, validate_field};
use crate::domain::model::{DocumentHandle, Field, FieldErrors, FormInput};
use crate::utils::error::GENERIC_SUBMISSION_NOTICE;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_SUCCESS_WINDOW: Duration = Duration::from_secs(5);

pub const SUCCESS_MESSAGE: &str = "¡Registro exitoso! Te hemos enviado un correo de confirmación. \
     Nos pondremos en contacto contigo en las próximas 48 horas.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 驗證失敗，狀態維持 `Idle`
    Invalid(FieldErrors),
    Succeeded(DocumentHandle),
    Failed,
    /// 目前狀態不接受送出，沒有任何副作用
    Ignored(FormState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Failure,
}

impl Banner {
    pub fn message(self) -> &'static str {
        match self {
            Banner::Success => SUCCESS_MESSAGE,
            Banner::Failure => GENERIC_SUBMISSION_NOTICE,
        }
    }
}

/// 給畫面渲染用的狀態快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub state: FormState,
    pub values: FormInput,
    pub errors: FieldErrors,
    pub banner: Option<Banner>,
}

impl FormView {
    pub fn submit_enabled(&self) -> bool {
        self.state == FormState::Idle
    }
}

#[derive(Debug, Default)]
struct Session {
    state: FormState,
    values: FormInput,
    errors: FieldErrors,
    // 第一次送出被驗證擋下後，修改欄位會立即重新驗證該欄位
    revalidate_on_change: bool,
}

/// 可複製的控制器 handle；複製品共用同一份表單狀態。
#[derive(Clone)]
pub struct FormController {
    client: SubmissionClient,
    success_window: Duration,
    session: Arc<Mutex<Session>>,
}

impl FormController {
    pub fn new(client: SubmissionClient) -> Self {
        Self::with_success_window(client, DEFAULT_SUCCESS_WINDOW)
    }

    pub fn with_success_window(client: SubmissionClient, success_window: Duration) -> Self {
        Self {
            client,
            success_window,
            session: Arc::new(Mutex::new(Session::default())),
        }
    }

    pub async fn state(&self) -> FormState {
        self.session.lock().await.state
    }

    pub async fn values(&self) -> FormInput {
        self.session.lock().await.values.clone()
    }

    pub async fn field_errors(&self) -> FieldErrors {
        self.session.lock().await.errors.clone()
    }

    pub async fn snapshot(&self) -> FormView {
        let session = self.session.lock().await;
        let state = session.state;
        let banner = match state {
            FormState::Succeeded => Some(Banner::Success),
            FormState::Failed => Some(Banner::Failure),
            FormState::Idle | FormState::Submitting => None,
        };
        FormView {
            state,
            values: session.values.clone(),
            errors: session.errors.clone(),
            banner,
        }
    }

    pub async fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut session = self.session.lock().await;
        session.values.set(field, value);

        if session.revalidate_on_change {
            match validate_field(field, session.values.get(field)) {
                Some(message) => session.errors.insert(field, message),
                None => session.errors.remove(field),
            }
        }
    }

    pub async fn set_values(&self, values: FormInput) {
        let mut session = self.session.lock().await;
        session.values = values;

        if session.revalidate_on_change {
            session.errors = validate(&session.values).err().unwrap_or_default();
        }
    }

    /// 驗證並送出目前的表單內容。
    ///
    /// 驗證失敗時不會進入 `Submitting`。送出期間不持有鎖，但狀態停在
    /// `Submitting`，因此重複送出會被忽略，不會發出第二次 append。
    pub async fn submit(&self) -> SubmitOutcome {
        let registration = {
            let mut session = self.session.lock().await;
            let state = session.state;
            if state != FormState::Idle {
                tracing::debug!("Submit ignored while form is {:?}", state);
                return SubmitOutcome::Ignored(state);
            }

            match validate(&session.values) {
                Ok(registration) => {
                    session.errors = FieldErrors::new();
                    session.state = FormState::Submitting;
                    registration
                }
                Err(errors) => {
                    tracing::debug!("Validation failed for fields: {:?}", errors.fields());
                    session.errors = errors.clone();
                    session.revalidate_on_change = true;
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        tracing::info!("📤 Submitting registration");
        let result = self.client.submit(&registration).await;

        let mut session = self.session.lock().await;
        match result {
            Ok(handle) => {
                session.state = FormState::Succeeded;
                session.values = FormInput::default();
                session.errors = FieldErrors::new();
                session.revalidate_on_change = false;
                drop(session);

                tracing::info!("✅ Registration submitted successfully");
                self.schedule_success_reset();
                SubmitOutcome::Succeeded(handle)
            }
            Err(e) => {
                session.state = FormState::Failed;
                tracing::error!("❌ Registration submission failed: {}", e);
                SubmitOutcome::Failed
            }
        }
    }

    /// 使用者確認錯誤訊息；表單內容保留以便修正後重新送出
    pub async fn acknowledge_failure(&self) -> bool {
        let mut session = self.session.lock().await;
        if session.state == FormState::Failed {
            session.state = FormState::Idle;
            true
        } else {
            false
        }
    }

    fn schedule_success_reset(&self) {
        let session = Arc::clone(&self.session);
        let window = self.success_window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut session = session.lock().await;
            if session.state == FormState::Succeeded {
                session.state = FormState::Idle;
                tracing::debug!("Success banner expired, form ready for a new registration");
            }
        });
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("client", &self.client)
            .field("success_window", &self.success_window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::DocumentStore;
    use crate::utils::error::SubmissionError;
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct FakeStore {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeStore {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl DocumentStore for FakeStore {
        async fn append(
            &self,
            collection: &str,
            _document: Map<String, Value>,
        ) -> Result<DocumentHandle, SubmissionError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(SubmissionError::InvalidResponse("boom".to_string()));
            }
            Ok(DocumentHandle::from_name(format!("{}/doc-{}", collection, n)))
        }
    }

    /// 在 append 中等待，直到測試放行
    struct GatedStore {
        entered: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for GatedStore {
        async fn append(
            &self,
            _collection: &str,
            _document: Map<String, Value>,
        ) -> Result<DocumentHandle, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(DocumentHandle::from_name("registros/gated"))
        }
    }

    fn valid_input() -> FormInput {
        FormInput {
            first_name: "Rosa".to_string(),
            last_name: "Martínez".to_string(),
            age: "18".to_string(),
            email: "rosa@example.com".to_string(),
            employment_status: "Estudiante".to_string(),
            reason: "Terminar mis estudios de preparatoria".to_string(),
        }
    }

    fn controller(store: Arc<dyn DocumentStore>, window: Duration) -> FormController {
        FormController::with_success_window(SubmissionClient::new(store, "registros"), window)
    }

    #[tokio::test]
    async fn test_successful_submit_clears_form() {
        let store = FakeStore::new(false);
        let form = controller(store.clone(), Duration::from_secs(60));
        form.set_values(valid_input()).await;

        let outcome = form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Succeeded(ref h) if h.id == "doc-1"));
        assert_eq!(form.state().await, FormState::Succeeded);
        assert!(form.values().await.is_empty());

        let view = form.snapshot().await;
        assert_eq!(view.banner, Some(Banner::Success));
        assert!(!view.submit_enabled());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_values() {
        let store = FakeStore::new(true);
        let form = controller(store.clone(), DEFAULT_SUCCESS_WINDOW);
        form.set_values(valid_input()).await;

        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        assert_eq!(form.state().await, FormState::Failed);
        assert_eq!(form.values().await, valid_input());
        assert_eq!(form.snapshot().await.banner, Some(Banner::Failure));

        assert!(form.acknowledge_failure().await);
        assert_eq!(form.state().await, FormState::Idle);
        assert_eq!(form.values().await, valid_input());
        assert!(!form.acknowledge_failure().await);
    }

    #[tokio::test]
    async fn test_manual_resubmit_after_failure_appends_again() {
        let store = FakeStore::new(true);
        let form = controller(store.clone(), DEFAULT_SUCCESS_WINDOW);
        form.set_values(valid_input()).await;

        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        assert_eq!(form.submit().await, SubmitOutcome::Ignored(FormState::Failed));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);

        form.acknowledge_failure().await;
        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_submit_stays_idle_without_append() {
        let store = FakeStore::new(false);
        let form = controller(store.clone(), DEFAULT_SUCCESS_WINDOW);
        form.set_field(Field::FirstName, "Rosa").await;

        let outcome = form.submit().await;

        let errors = match outcome {
            SubmitOutcome::Invalid(errors) => errors,
            other => panic!("expected validation errors, got {:?}", other),
        };
        assert_eq!(errors.len(), 5);
        assert!(!errors.contains(Field::FirstName));
        assert_eq!(form.state().await, FormState::Idle);
        assert_eq!(form.field_errors().await, errors);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_editing_revalidates_only_after_first_attempt() {
        let form = controller(FakeStore::new(false), DEFAULT_SUCCESS_WINDOW);

        form.set_field(Field::Age, "12").await;
        assert!(form.field_errors().await.is_empty());

        form.submit().await;
        assert!(form.field_errors().await.contains(Field::Age));

        form.set_field(Field::Age, "30").await;
        let errors = form.field_errors().await;
        assert!(!errors.contains(Field::Age));
        assert!(errors.contains(Field::Email));

        form.set_field(Field::Age, "101").await;
        assert_eq!(
            form.field_errors().await.get(Field::Age),
            Some(crate::core::validation::MSG_AGE_TOO_HIGH)
        );
    }

    #[tokio::test]
    async fn test_resubmit_while_submitting_has_no_side_effect() {
        let store = Arc::new(GatedStore {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let form = controller(store.clone(), Duration::from_secs(60));
        form.set_values(valid_input()).await;

        let in_flight = {
            let form = form.clone();
            tokio::spawn(async move { form.submit().await })
        };

        store.entered.notified().await;
        assert_eq!(form.state().await, FormState::Submitting);
        assert_eq!(form.submit().await, SubmitOutcome::Ignored(FormState::Submitting));

        store.release.notify_one();
        let outcome = in_flight.await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_reverts_to_idle_after_window() {
        let store = FakeStore::new(false);
        let form = controller(store.clone(), Duration::from_secs(5));
        form.set_values(valid_input()).await;

        form.submit().await;
        assert_eq!(form.state().await, FormState::Succeeded);
        assert_eq!(form.submit().await, SubmitOutcome::Ignored(FormState::Succeeded));

        // 讓計時工作先登記 sleep，之後只有 advance 會推進時間
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(4_999)).await;
        tokio::task::yield_now().await;
        assert_eq!(form.state().await, FormState::Succeeded);

        tokio::time::advance(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(form.state().await, FormState::Idle);
        assert_eq!(form.snapshot().await.banner, None);

        form.set_values(valid_input()).await;
        assert!(matches!(form.submit().await, SubmitOutcome::Succeeded(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }
}

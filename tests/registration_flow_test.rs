use adult_enrollment::adapters::FirestoreStore;
use adult_enrollment::config::FirebaseConfig;
use adult_enrollment::{
    AppConfig, Field, FormController, FormInput, FormState, SubmissionClient, SubmitOutcome,
};
use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const DOCUMENTS_PATH: &str = "/v1/projects/academia-it/databases/(default)/documents/registros";

fn firebase(server: &MockServer) -> FirebaseConfig {
    FirebaseConfig {
        project_id: "academia-it".to_string(),
        api_key: "it-key".to_string(),
        endpoint: Some(server.base_url()),
        database: None,
    }
}

fn controller(server: &MockServer, window: Duration) -> Result<FormController> {
    let store = FirestoreStore::new(&firebase(server), Duration::from_secs(5))?;
    let client = SubmissionClient::new(Arc::new(store), "registros");
    Ok(FormController::with_success_window(client, window))
}

fn filled_form() -> FormInput {
    FormInput {
        first_name: "Carmen".to_string(),
        last_name: "Gutiérrez Soto".to_string(),
        age: "47".to_string(),
        email: "carmen.gutierrez@example.com".to_string(),
        employment_status: "Desempleado/a".to_string(),
        reason: "Busco certificarme para volver al mercado laboral".to_string(),
    }
}

/// 完整流程：驗證 → 寫入 Firestore → 清空表單 → 顯示時間結束回到 Idle
#[tokio::test]
async fn test_successful_registration_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(DOCUMENTS_PATH)
            .query_param("key", "it-key")
            .body_contains("\"nombres\":{\"stringValue\":\"Carmen\"}")
            .body_contains("\"edad\":{\"integerValue\":\"47\"}")
            .body_contains("\"estatusLaboral\":{\"stringValue\":\"Desempleado/a\"}")
            .body_contains("\"procesado\":{\"booleanValue\":false}")
            .body_contains("\"fechaRegistro\":{\"stringValue\":\"");
        then.status(200).json_body(json!({
            "name": "projects/academia-it/databases/(default)/documents/registros/NEWDOC"
        }));
    });

    let form = controller(&server, Duration::from_millis(100))?;
    form.set_values(filled_form()).await;

    let outcome = form.submit().await;

    api_mock.assert();
    match outcome {
        SubmitOutcome::Succeeded(handle) => assert_eq!(handle.id, "NEWDOC"),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(form.state().await, FormState::Succeeded);
    assert!(form.values().await.is_empty());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(form.state().await, FormState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_remote_failure_keeps_values_for_retry() -> Result<()> {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(POST).path(DOCUMENTS_PATH);
        then.status(500).body("internal");
    });

    let form = controller(&server, Duration::from_secs(5))?;
    form.set_values(filled_form()).await;

    assert_eq!(form.submit().await, SubmitOutcome::Failed);
    failing.assert_hits(1);

    let view = form.snapshot().await;
    assert_eq!(view.state, FormState::Failed);
    assert_eq!(view.values, filled_form());
    assert!(view.errors.is_empty());

    assert!(form.acknowledge_failure().await);
    assert_eq!(form.state().await, FormState::Idle);

    // 使用者手動重送會再發出一次新的寫入
    failing.delete();
    let succeeding = server.mock(|when, then| {
        when.method(POST).path(DOCUMENTS_PATH);
        then.status(200).json_body(json!({
            "name": "projects/academia-it/databases/(default)/documents/registros/RETRY"
        }));
    });

    assert!(matches!(form.submit().await, SubmitOutcome::Succeeded(_)));
    succeeding.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_form_never_reaches_the_database() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({ "name": "unused/doc" }));
    });

    let form = controller(&server, Duration::from_secs(5))?;
    let mut input = filled_form();
    input.age = "17".to_string();
    input.email = "foo@".to_string();
    form.set_values(input.clone()).await;

    let outcome = form.submit().await;

    api_mock.assert_hits(0);
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors.fields(), vec![Field::Age, Field::Email]);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(form.state().await, FormState::Idle);
    assert_eq!(form.values().await, input);
    Ok(())
}

#[tokio::test]
async fn test_controller_built_from_config() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/projects/academia-it/databases/(default)/documents/inscripciones");
        then.status(200).json_body(json!({
            "name": "projects/academia-it/databases/(default)/documents/inscripciones/CFG"
        }));
    });

    let mut config = AppConfig::new(firebase(&server));
    config.submission.collection = Some("inscripciones".to_string());

    let form = adult_enrollment::app::build_controller(&config)?;
    form.set_values(filled_form()).await;

    assert!(matches!(form.submit().await, SubmitOutcome::Succeeded(ref h) if h.id == "CFG"));
    api_mock.assert();
    Ok(())
}

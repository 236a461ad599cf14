//! End-to-end pipeline tests against scripted port implementations.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Map};
use skylift::app::Orchestrator;
use skylift::domain::{RegistrationOutcome, RegistrationRequest};
use skylift::error::{Error, PublishError};
use skylift::port::PushRecord;
use skylift::testkit::{RecordingBuilder, ScriptedModelService, ScriptedRegistry, StaticCredentials};

struct Fixture {
    builder: Arc<RecordingBuilder>,
    registry: Arc<ScriptedRegistry>,
    models: Arc<ScriptedModelService>,
    orchestrator: Orchestrator,
}

fn fixture(
    credentials: StaticCredentials,
    push_script: Vec<PushRecord>,
    models: ScriptedModelService,
) -> Fixture {
    let builder = Arc::new(RecordingBuilder::new());
    let registry = Arc::new(ScriptedRegistry::new(push_script));
    let models = Arc::new(models);

    let orchestrator = Orchestrator::new(
        Arc::new(credentials),
        Arc::clone(&builder) as _,
        Arc::clone(&registry) as _,
        Arc::clone(&models) as _,
        "gcr.io",
    );

    Fixture {
        builder,
        registry,
        models,
        orchestrator,
    }
}

fn clean_push() -> Vec<PushRecord> {
    vec![
        PushRecord::status("Preparing"),
        PushRecord::status("Pushed"),
    ]
}

#[tokio::test]
async fn missing_project_without_credentials_fails_before_any_work() {
    let f = fixture(
        StaticCredentials::without_project(),
        clean_push(),
        ScriptedModelService::completing_with("demo"),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo").expect("request");
    let err = f.orchestrator.register_model(request).await.unwrap_err();

    assert!(matches!(err, Error::MissingProject { .. }));
    assert!(f.builder.calls().is_empty(), "no build may be attempted");
    assert!(f.registry.pushes().is_empty(), "no push may be attempted");
    assert!(f.models.uploads().is_empty(), "no RPC may be attempted");
}

#[tokio::test]
async fn destination_image_uri_defaults_to_registry_project_and_name() {
    let f = fixture(
        StaticCredentials::with_project("ambient-proj"),
        clean_push(),
        ScriptedModelService::completing_with("demo"),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo").expect("request");
    f.orchestrator.register_model(request).await.expect("register");

    assert_eq!(f.registry.pushes(), vec!["gcr.io/ambient-proj/demo"]);
    let calls = f.builder.calls();
    assert_eq!(calls[0].image_uri, "gcr.io/ambient-proj/demo");
}

#[tokio::test]
async fn push_error_record_gates_the_registrar() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        vec![
            PushRecord::status("Preparing"),
            PushRecord::error("denied: permission denied on resource"),
        ],
        ScriptedModelService::completing_with("demo"),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo").expect("request");
    let err = f.orchestrator.register_model(request).await.unwrap_err();

    match err {
        Error::Publish(PublishError::Push(message)) => {
            assert_eq!(message, "denied: permission denied on resource");
        }
        other => panic!("expected push error, got {other:?}"),
    }
    assert!(
        f.models.uploads().is_empty(),
        "registrar must never run after a failed push"
    );
}

#[tokio::test]
async fn status_only_push_invokes_registrar_exactly_once() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        clean_push(),
        ScriptedModelService::completing_with("demo"),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo")
        .expect("request")
        .with_destination_image_uri("gcr.io/proj1/custom:v1");
    f.orchestrator.register_model(request).await.expect("register");

    let uploads = f.models.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(
        uploads[0].model["container_spec"]["image_uri"],
        "gcr.io/proj1/custom:v1"
    );
}

#[tokio::test]
async fn model_options_replace_descriptor_keys_wholesale() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        clean_push(),
        ScriptedModelService::completing_with("demo"),
    );

    let mut options = Map::new();
    options.insert("container_spec".into(), json!({ "image_uri": "X" }));

    let request = RegistrationRequest::new("/tmp/model", "demo")
        .expect("request")
        .with_model_options(options);
    f.orchestrator.register_model(request).await.expect("register");

    let uploads = f.models.uploads();
    assert_eq!(uploads[0].model["container_spec"], json!({ "image_uri": "X" }));
}

#[tokio::test]
async fn synchronous_mode_returns_the_resolved_resource() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        clean_push(),
        ScriptedModelService::completing_with("demo"),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo").expect("request");
    let outcome = f.orchestrator.register_model(request).await.expect("register");

    match outcome {
        RegistrationOutcome::Completed(resource) => {
            assert_eq!(resource.display_name, "demo");
            assert!(resource.name.ends_with("/models/demo"));
        }
        RegistrationOutcome::Pending(_) => panic!("synchronous mode must resolve the operation"),
    }
}

#[tokio::test]
async fn asynchronous_mode_returns_the_handle_without_blocking() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        clean_push(),
        ScriptedModelService::stalling(),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo")
        .expect("request")
        .asynchronous()
        .with_wait_timeout(Duration::from_secs(1));

    // The stalled operation would outlive any wait_timeout; the call must
    // still return promptly because nothing awaits it.
    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        f.orchestrator.register_model(request),
    )
    .await
    .expect("must not block")
    .expect("register");

    match outcome {
        RegistrationOutcome::Pending(operation) => {
            assert!(operation.name().contains("operations/"));
        }
        RegistrationOutcome::Completed(_) => panic!("asynchronous mode must not await the result"),
    }
}

#[tokio::test]
async fn wait_timeout_is_distinct_from_upload_failure() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        clean_push(),
        ScriptedModelService::new(skylift::testkit::OperationScript::TimeOut),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo")
        .expect("request")
        .with_wait_timeout(Duration::from_secs(30));
    let err = f.orchestrator.register_model(request).await.unwrap_err();

    assert!(matches!(err, Error::WaitTimeout { seconds: 30 }));
}

#[tokio::test]
async fn remote_upload_failure_propagates_the_provider_message() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        clean_push(),
        ScriptedModelService::new(skylift::testkit::OperationScript::FailWith(
            "Permission 'aiplatform.models.upload' denied on resource".into(),
        )),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo").expect("request");
    let err = f.orchestrator.register_model(request).await.unwrap_err();

    match err {
        Error::Upload(message) => {
            assert_eq!(
                message,
                "Permission 'aiplatform.models.upload' denied on resource"
            );
        }
        other => panic!("expected upload failure, got {other:?}"),
    }
}

#[tokio::test]
async fn build_failure_aborts_before_push() {
    let builder = Arc::new(RecordingBuilder::failing_with("conda env create failed"));
    let registry = Arc::new(ScriptedRegistry::new(clean_push()));
    let models = Arc::new(ScriptedModelService::completing_with("demo"));

    let orchestrator = Orchestrator::new(
        Arc::new(StaticCredentials::with_project("proj1")),
        Arc::clone(&builder) as _,
        Arc::clone(&registry) as _,
        Arc::clone(&models) as _,
        "gcr.io",
    );

    let request = RegistrationRequest::new("/tmp/model", "demo").expect("request");
    let err = orchestrator.register_model(request).await.unwrap_err();

    assert!(matches!(err, Error::Publish(PublishError::Build(_))));
    assert!(registry.pushes().is_empty());
    assert!(models.uploads().is_empty());
}

#[tokio::test]
async fn end_to_end_scenario_matches_expected_calls() {
    let f = fixture(
        StaticCredentials::without_project(),
        clean_push(),
        ScriptedModelService::completing_with("demo"),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo")
        .expect("request")
        .with_project("proj1");
    let outcome = f.orchestrator.register_model(request).await.expect("register");

    assert_eq!(f.registry.pushes(), vec!["gcr.io/proj1/demo"]);

    let uploads = f.models.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].parent, "projects/proj1/locations/us-central1");
    assert_eq!(uploads[0].model["display_name"], "demo");

    assert!(matches!(outcome, RegistrationOutcome::Completed(_)));
}

#[tokio::test]
async fn source_override_reaches_the_packaging_backend() {
    let f = fixture(
        StaticCredentials::with_project("proj1"),
        clean_push(),
        ScriptedModelService::completing_with("demo"),
    );

    let request = RegistrationRequest::new("/tmp/model", "demo")
        .expect("request")
        .with_source_override("/src/serving-runtime");
    f.orchestrator.register_model(request).await.expect("register");

    let calls = f.builder.calls();
    assert!(calls[0].install_runtime);
    assert_eq!(
        calls[0].runtime_home.as_deref(),
        Some(std::path::Path::new("/src/serving-runtime"))
    );
}

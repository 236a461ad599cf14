//! Handler for the `register-model` command.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::info;

use crate::adapter::{CommandImageBuilder, DockerRegistry, GcloudCredentials, VertexModelService};
use crate::app::Orchestrator;
use crate::cli::{Cli, RegisterModelArgs};
use crate::config::Config;
use crate::domain::{RegistrationOutcome, RegistrationRequest};
use crate::error::{ConfigError, Result};
use crate::port::CredentialProvider;

/// Execute the register-model command.
pub async fn execute(cli: &Cli, args: &RegisterModelArgs) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    config.init_logging();

    let model_options = args
        .model_options
        .as_deref()
        .map(parse_model_options)
        .transpose()?;

    let location = args
        .location
        .clone()
        .unwrap_or_else(|| config.platform.default_location.clone());

    let mut request = RegistrationRequest::new(args.model_uri.as_str(), args.display_name.as_str())?
        .with_location(location)
        .with_wait_timeout(Duration::from_secs(args.wait_timeout));
    request.project = args.project.clone();
    request.destination_image_uri = args.destination_image_uri.clone();
    request.source_override = args.source_dir.clone();
    request.model_options = model_options;

    info!(
        model_uri = %request.model_uri,
        display_name = %request.display_name,
        location = %request.location,
        "skylift register-model starting"
    );

    let credentials: Arc<dyn CredentialProvider> = Arc::new(GcloudCredentials::new());

    let registry = DockerRegistry::new(&config.registry.docker_host)?
        .with_credentials(Arc::clone(&credentials));
    let builder = CommandImageBuilder::new(config.builder.program.clone());
    let models = VertexModelService::new(
        config.platform.api_host.clone(),
        Duration::from_secs(config.platform.poll_interval_secs),
        Arc::clone(&credentials),
    );

    let orchestrator = Orchestrator::new(
        credentials,
        Arc::new(builder),
        Arc::new(registry),
        Arc::new(models),
        config.registry.host.clone(),
    );

    match orchestrator.register_model(request).await? {
        RegistrationOutcome::Completed(resource) => {
            info!(
                model = %resource.name,
                display_name = %resource.display_name,
                "Registration complete"
            );
        }
        RegistrationOutcome::Pending(operation) => {
            info!(operation = %operation.name(), "Registration submitted");
        }
    }

    Ok(())
}

/// Parse the `--model-options` JSON object string.
fn parse_model_options(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ConfigError::InvalidValue {
        field: "model_options",
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::InvalidValue {
            field: "model_options",
            reason: "must be a JSON object".into(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_options_must_be_an_object() {
        assert!(parse_model_options("[1, 2]").is_err());
        assert!(parse_model_options("not json").is_err());

        let options = parse_model_options(r#"{"labels": {"team": "mlops"}}"#).expect("object");
        assert_eq!(options["labels"]["team"], "mlops");
    }
}

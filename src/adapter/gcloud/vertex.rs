//! Vertex AI model service client.
//!
//! Speaks the REST surface of the model service: `models:upload` returns a
//! long-running operation which is then polled until done. The regional
//! endpoint is derived per call as `<location>-<api_host>` from the
//! explicitly injected api-host suffix.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::domain::ModelResource;
use crate::error::{Error, Result};
use crate::port::{CredentialProvider, ModelService, UploadOperation};

/// Vertex AI model service over REST.
pub struct VertexModelService {
    http: HttpClient,
    credentials: Arc<dyn CredentialProvider>,
    /// API host suffix, e.g. `aiplatform.googleapis.com`.
    api_host: String,
    poll_interval: Duration,
}

#[derive(Debug, Deserialize)]
struct OperationBody {
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<OperationError>,
    #[serde(default)]
    response: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    #[serde(default)]
    message: String,
}

impl VertexModelService {
    #[must_use]
    pub fn new(
        api_host: impl Into<String>,
        poll_interval: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            http: HttpClient::new(),
            credentials,
            api_host: api_host.into(),
            poll_interval,
        }
    }

    fn endpoint(&self, location: &str) -> String {
        format!("https://{location}-{}", self.api_host)
    }
}

#[async_trait]
impl ModelService for VertexModelService {
    async fn upload_model(
        &self,
        location: &str,
        parent: &str,
        model: Value,
    ) -> Result<Box<dyn UploadOperation>> {
        let endpoint = self.endpoint(location);
        let url = format!("{endpoint}/v1/{parent}/models:upload");
        let token = self.credentials.access_token().await?;

        debug!(url = %url, "Submitting model upload");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "model": model }))
            .send()
            .await?
            .error_for_status()?;

        let body: OperationBody = response.json().await?;

        Ok(Box::new(VertexOperation {
            http: self.http.clone(),
            credentials: Arc::clone(&self.credentials),
            endpoint,
            name: body.name,
            poll_interval: self.poll_interval,
        }))
    }
}

/// Handle to a Vertex long-running operation.
pub struct VertexOperation {
    http: HttpClient,
    credentials: Arc<dyn CredentialProvider>,
    endpoint: String,
    name: String,
    poll_interval: Duration,
}

impl VertexOperation {
    async fn fetch(&self) -> Result<OperationBody> {
        let url = format!("{}/v1/{}", self.endpoint, self.name);
        let token = self.credentials.access_token().await?;

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    fn into_resource(body: OperationBody) -> Result<ModelResource> {
        if let Some(error) = body.error {
            return Err(Error::Upload(error.message));
        }

        let raw = body.response.unwrap_or(Value::Null);
        let name = raw
            .get("model")
            .or_else(|| raw.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let display_name = raw
            .get("displayName")
            .or_else(|| raw.get("display_name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(ModelResource {
            name,
            display_name,
            raw,
        })
    }
}

#[async_trait]
impl UploadOperation for VertexOperation {
    fn name(&self) -> &str {
        &self.name
    }

    async fn wait(self: Box<Self>, timeout: Duration) -> Result<ModelResource> {
        let deadline = Instant::now() + timeout;

        loop {
            let body = self.fetch().await?;

            if body.done {
                return Self::into_resource(body);
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(Error::WaitTimeout {
                    seconds: timeout.as_secs(),
                });
            }

            debug!(operation = %self.name, "Upload still running");
            sleep(self.poll_interval).await;
        }
    }
}

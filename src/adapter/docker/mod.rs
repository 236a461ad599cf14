//! Docker engine push client.
//!
//! Pushes through the engine HTTP API (`POST /images/{name}/push`) and
//! decodes the JSON-lines response body into [`PushRecord`]s. The engine
//! returns HTTP 200 even when the registry rejects the push; failures,
//! including auth failures, arrive as `errorDetail` records in the body.
//! The publisher inspects every record, so this adapter only decodes.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use futures_util::StreamExt;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ConfigError, Result};
use crate::port::{CredentialProvider, ImageRegistry, PushRecord, PushStream};

/// Engine API version pinned for the push endpoint.
const API_VERSION: &str = "v1.43";

/// Username the registry expects when the password is an OAuth token.
const TOKEN_USERNAME: &str = "oauth2accesstoken";

/// Push client for a docker engine endpoint.
pub struct DockerRegistry {
    http: reqwest::Client,
    /// Engine base URL, e.g. `http://127.0.0.1:2375`.
    host: String,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl DockerRegistry {
    /// Create a push client for the engine at `host`.
    ///
    /// Accepts `http://`, `https://`, and `tcp://` (treated as plain HTTP)
    /// endpoints.
    ///
    /// # Errors
    ///
    /// Returns a config error for unsupported schemes such as `unix://`.
    pub fn new(host: &str) -> Result<Self> {
        // DOCKER_HOST convention; the engine speaks HTTP over tcp sockets.
        let normalized = match host.strip_prefix("tcp://") {
            Some(rest) => format!("http://{rest}"),
            None => host.to_string(),
        };

        let url = Url::parse(&normalized)?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "registry.docker_host",
                    reason: format!("unsupported scheme '{other}'"),
                }
                .into());
            }
        }

        Ok(Self {
            http: reqwest::Client::new(),
            host: url.as_str().trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Attach a credential provider used to authenticate registry pushes.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// `X-Registry-Auth` header for `registry_host`, if credentials are
    /// available. An anonymous push is still attempted otherwise; the
    /// registry's rejection comes back in-band.
    async fn auth_header(&self, registry_host: &str) -> Option<String> {
        let credentials = self.credentials.as_ref()?;
        match credentials.access_token().await {
            Ok(token) => {
                let auth = json!({
                    "username": TOKEN_USERNAME,
                    "password": token,
                    "serveraddress": registry_host,
                });
                Some(URL_SAFE.encode(auth.to_string()))
            }
            Err(err) => {
                warn!(error = %err, "No registry credentials, pushing anonymously");
                None
            }
        }
    }
}

/// Split an image reference into repository and tag.
fn split_reference(image_uri: &str) -> (&str, &str) {
    match image_uri.rfind(':') {
        Some(pos) if !image_uri[pos..].contains('/') => (&image_uri[..pos], &image_uri[pos + 1..]),
        _ => (image_uri, "latest"),
    }
}

#[async_trait]
impl ImageRegistry for DockerRegistry {
    async fn push(&self, image_uri: &str) -> Result<PushStream> {
        let (repository, tag) = split_reference(image_uri);
        let registry_host = repository.split('/').next().unwrap_or(repository);
        let url = format!("{}/{API_VERSION}/images/{repository}/push", self.host);

        debug!(repository = %repository, tag = %tag, "Starting push");

        let mut request = self.http.post(&url).query(&[("tag", tag)]);
        if let Some(header) = self.auth_header(registry_host).await {
            request = request.header("X-Registry-Auth", header);
        } else {
            // The engine requires the header to be present.
            request = request.header("X-Registry-Auth", URL_SAFE.encode("{}"));
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.bytes_stream().boxed();

        let stream = futures_util::stream::try_unfold(
            (body, Vec::new(), false),
            |(mut body, mut buffer, mut exhausted)| async move {
                loop {
                    if let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                        let line: Vec<u8> = buffer.drain(..=pos).collect();
                        let line = &line[..line.len() - 1];
                        if line.iter().all(u8::is_ascii_whitespace) {
                            continue;
                        }
                        let record: PushRecord = serde_json::from_slice(line)?;
                        return Ok(Some((record, (body, buffer, exhausted))));
                    }

                    if exhausted {
                        if buffer.iter().all(u8::is_ascii_whitespace) {
                            return Ok(None);
                        }
                        let record: PushRecord = serde_json::from_slice(&buffer)?;
                        buffer.clear();
                        return Ok(Some((record, (body, buffer, exhausted))));
                    }

                    match body.next().await {
                        Some(chunk) => buffer.extend_from_slice(&chunk?),
                        None => exhausted = true,
                    }
                }
            },
        );

        Ok(Box::pin(stream))
    }
}

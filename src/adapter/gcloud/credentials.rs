//! Ambient Google Cloud credential discovery.
//!
//! Resolution order mirrors application default credentials:
//!
//! 1. `GOOGLE_CLOUD_PROJECT` / `GCLOUD_PROJECT` environment variables
//!    (project only).
//! 2. The application-default-credentials file under the gcloud config
//!    directory, exchanged for an access token at the OAuth endpoint.
//! 3. The `gcloud` CLI (`config get-value project`,
//!    `auth print-access-token`).

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::CredentialProvider;

const OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Credential provider backed by the local gcloud installation.
pub struct GcloudCredentials {
    http: HttpClient,
    token_url: String,
}

/// Relevant fields of `application_default_credentials.json`.
#[derive(Debug, Deserialize)]
struct AdcFile {
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    quota_project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GcloudCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
            token_url: OAUTH_TOKEN_URL.into(),
        }
    }

    fn adc_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GOOGLE_APPLICATION_CREDENTIALS") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("gcloud/application_default_credentials.json"))
    }

    fn read_adc() -> Option<AdcFile> {
        let path = Self::adc_path()?;
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(adc) => Some(adc),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Unparseable ADC file");
                None
            }
        }
    }

    async fn gcloud(args: &[&str]) -> Option<String> {
        let output = tokio::process::Command::new("gcloud")
            .args(args)
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() || value == "(unset)" {
            None
        } else {
            Some(value)
        }
    }

    async fn refresh_access_token(&self, adc: &AdcFile) -> Option<String> {
        let (client_id, client_secret, refresh_token) = match (
            adc.client_id.as_deref(),
            adc.client_secret.as_deref(),
            adc.refresh_token.as_deref(),
        ) {
            (Some(id), Some(secret), Some(token)) => (id, secret, token),
            _ => return None,
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;

        let token: TokenResponse = response.json().await.ok()?;
        Some(token.access_token)
    }
}

impl Default for GcloudCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for GcloudCredentials {
    async fn default_project(&self) -> Result<String> {
        for var in ["GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"] {
            if let Ok(project) = std::env::var(var) {
                if !project.is_empty() {
                    debug!(source = var, "Default project from environment");
                    return Ok(project);
                }
            }
        }

        if let Some(project) = Self::read_adc().and_then(|adc| adc.quota_project_id) {
            debug!("Default project from application default credentials");
            return Ok(project);
        }

        if let Some(project) = Self::gcloud(&["config", "get-value", "project"]).await {
            debug!("Default project from gcloud config");
            return Ok(project);
        }

        Err(Error::Credentials(
            "no project in GOOGLE_CLOUD_PROJECT, application default credentials, \
             or gcloud config"
                .into(),
        ))
    }

    async fn access_token(&self) -> Result<String> {
        if let Some(adc) = Self::read_adc() {
            if let Some(token) = self.refresh_access_token(&adc).await {
                return Ok(token);
            }
        }

        if let Some(token) = Self::gcloud(&["auth", "print-access-token"]).await {
            return Ok(token);
        }

        Err(Error::Credentials(
            "unable to mint an access token; run `gcloud auth application-default login`".into(),
        ))
    }
}

//! Deterministic credential stubs.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::CredentialProvider;

/// Credential provider with fixed answers.
pub struct StaticCredentials {
    project: Option<String>,
    token: String,
}

impl StaticCredentials {
    /// Credentials whose default project resolves to `project`.
    #[must_use]
    pub fn with_project(project: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            token: "test-token".into(),
        }
    }

    /// Credentials with no discoverable default project.
    #[must_use]
    pub fn without_project() -> Self {
        Self {
            project: None,
            token: "test-token".into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn default_project(&self) -> Result<String> {
        self.project
            .clone()
            .ok_or_else(|| Error::Credentials("no default project in test environment".into()))
    }

    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

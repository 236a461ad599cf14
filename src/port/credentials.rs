//! Credential discovery port.

use async_trait::async_trait;

use crate::error::Result;

/// Access to ambient cloud credentials.
///
/// Modeled as an explicit capability rather than a hidden library call so
/// the default-project lookup can be stubbed deterministically in tests.
///
/// # Errors
///
/// Both methods return [`crate::error::Error::Credentials`] when no
/// credentials are discoverable.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// The default project configured for the ambient credentials.
    async fn default_project(&self) -> Result<String>;

    /// A bearer token for the platform API and the container registry.
    async fn access_token(&self) -> Result<String>;
}

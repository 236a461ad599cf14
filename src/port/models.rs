//! Model upload RPC port.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ModelResource;
use crate::error::Result;

/// Handle to an in-flight model upload.
#[async_trait]
pub trait UploadOperation: Send + Sync {
    /// The provider's operation resource name.
    fn name(&self) -> &str;

    /// Block until the operation reaches a terminal state or `timeout`
    /// elapses.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::WaitTimeout`] on expiry and
    /// [`crate::error::Error::Upload`] if the operation finished with a
    /// remote failure.
    async fn wait(self: Box<Self>, timeout: Duration) -> Result<ModelResource>;
}

/// Port for the platform's model service.
///
/// Implementations derive the regional API endpoint from `location` and
/// the api-host suffix they were constructed with.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Submit `model` for upload under `parent`
    /// (`projects/<project>/locations/<location>`).
    ///
    /// Always returns the operation handle; the caller decides whether to
    /// await it.
    ///
    /// # Errors
    ///
    /// RPC failures propagate unmodified; this layer adds no retries or
    /// translation.
    async fn upload_model(
        &self,
        location: &str,
        parent: &str,
        model: Value,
    ) -> Result<Box<dyn UploadOperation>>;
}

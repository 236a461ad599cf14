//! Packaging backend port.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Port for the external packaging backend that turns a model artifact
/// into a serving container image.
#[async_trait]
pub trait ServingImageBuilder: Send + Sync {
    /// Build a serving image for `model_uri` tagged as `image_uri`.
    ///
    /// When `install_runtime` is set the backend installs the serving
    /// runtime from `runtime_home` (a local checkout) instead of the
    /// released package from the public index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PublishError::Build`] if the backend fails.
    async fn build_image(
        &self,
        model_uri: &str,
        image_uri: &str,
        install_runtime: bool,
        runtime_home: Option<&Path>,
    ) -> Result<()>;
}

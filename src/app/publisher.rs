//! Serving image build and push.

use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, info};

use crate::error::{Error, PublishError, Result};
use crate::port::{ImageRegistry, ServingImageBuilder};

/// Builds the serving image through the packaging backend and pushes it to
/// its registry. One build attempt, one push attempt; any failure aborts
/// the pipeline before the model upload.
pub struct ImagePublisher {
    builder: Arc<dyn ServingImageBuilder>,
    registry: Arc<dyn ImageRegistry>,
}

impl ImagePublisher {
    #[must_use]
    pub fn new(builder: Arc<dyn ServingImageBuilder>, registry: Arc<dyn ImageRegistry>) -> Self {
        Self { builder, registry }
    }

    /// Build `model_uri` into `image_uri` and push it.
    ///
    /// When `source_override` is given the serving runtime is installed
    /// into the image from that local checkout instead of the public index.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Build`] on a failed build and
    /// [`PublishError::Push`] when any record of the push stream carries an
    /// embedded error detail. The push client does not throw on
    /// authentication failures; they only appear in the stream payload, so
    /// every record is inspected even when the stream ends cleanly.
    pub async fn publish(
        &self,
        model_uri: &str,
        image_uri: &str,
        source_override: Option<&Path>,
    ) -> Result<()> {
        info!(model_uri = %model_uri, image_uri = %image_uri, "Building serving image");

        self.builder
            .build_image(model_uri, image_uri, source_override.is_some(), source_override)
            .await?;

        info!(image_uri = %image_uri, "Pushing image to registry");

        let mut stream = self.registry.push(image_uri).await?;

        while let Some(record) = stream.next().await {
            let record = record?;

            if let Some(detail) = record.error_detail {
                return Err(Error::Publish(PublishError::Push(detail.message)));
            }

            if let Some(status) = record.status {
                debug!(status = %status, "push progress");
            }
        }

        info!(image_uri = %image_uri, "Image pushed");
        Ok(())
    }
}

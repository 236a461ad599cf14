//! The registration pipeline.

use std::sync::Arc;

use tracing::info;

use crate::domain::{RegistrationOutcome, RegistrationRequest};
use crate::error::Result;
use crate::port::{CredentialProvider, ImageRegistry, ModelService, ServingImageBuilder};

use super::{IdentityResolver, ImagePublisher, ModelRegistrar};

/// Sequences resolve, publish, and register for one model.
///
/// Holds no mutable state; concurrent invocations are independent. All
/// collaborators are injected, so every step can be exercised against
/// stubs.
pub struct Orchestrator {
    identity: IdentityResolver,
    publisher: ImagePublisher,
    registrar: ModelRegistrar,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        builder: Arc<dyn ServingImageBuilder>,
        registry: Arc<dyn ImageRegistry>,
        models: Arc<dyn ModelService>,
        registry_host: impl Into<String>,
    ) -> Self {
        Self {
            identity: IdentityResolver::new(credentials, registry_host),
            publisher: ImagePublisher::new(builder, registry),
            registrar: ModelRegistrar::new(models),
        }
    }

    /// Build, push, and register one model.
    ///
    /// Strictly linear: identity resolution, then publish, then upload. A
    /// failed publish aborts before any RPC is made. The synchronous path
    /// delegates the bounded wait to the operation handle and returns the
    /// finished resource; the asynchronous path returns the handle
    /// immediately and never blocks.
    ///
    /// # Errors
    ///
    /// Each phase's errors propagate with their own variant; see
    /// [`crate::error::Error`].
    pub async fn register_model(&self, request: RegistrationRequest) -> Result<RegistrationOutcome> {
        let resolved = self
            .identity
            .resolve(
                request.project.as_deref(),
                &request.display_name,
                request.destination_image_uri.as_deref(),
            )
            .await?;

        self.publisher
            .publish(
                &request.model_uri,
                &resolved.image_uri,
                request.source_override.as_deref(),
            )
            .await?;

        let operation = self
            .registrar
            .register(
                &resolved.image_uri,
                &request.display_name,
                &resolved.project,
                &request.location,
                request.model_options.as_ref(),
            )
            .await?;

        if request.synchronous {
            let resource = operation.wait(request.wait_timeout).await?;
            info!(model = %resource.name, "Model registered");
            Ok(RegistrationOutcome::Completed(resource))
        } else {
            info!(operation = %operation.name(), "Model upload in flight");
            Ok(RegistrationOutcome::Pending(operation))
        }
    }
}

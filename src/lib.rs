//! Skylift - Build, push, and register ML model serving images.
//!
//! This crate packages a locally-stored model into a serving container
//! image via an external packaging backend, pushes the image to a
//! container registry through the docker engine API, and registers it as a
//! deployable model resource on Google Cloud Vertex AI.
//!
//! # Architecture
//!
//! A strictly linear pipeline behind injected port traits:
//!
//! - **Identity resolution** - fills in the target project (from ambient
//!   credentials) and the destination image URI when not supplied.
//! - **Image publishing** - builds the serving image and pushes it,
//!   inspecting every push stream record for in-band registry errors.
//! - **Model registration** - uploads the model resource descriptor and
//!   either awaits the operation or hands its handle back to the caller.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Request, descriptor, and outcome types
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for external collaborators
//! - [`adapter`] - gcloud, docker engine, and Vertex AI implementations
//! - [`app`] - Pipeline orchestration
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use skylift::adapter::{CommandImageBuilder, DockerRegistry, GcloudCredentials, VertexModelService};
//! use skylift::app::Orchestrator;
//! use skylift::domain::RegistrationRequest;
//! use skylift::port::CredentialProvider;
//!
//! # async fn run() -> skylift::error::Result<()> {
//! let credentials: Arc<dyn CredentialProvider> = Arc::new(GcloudCredentials::new());
//! let orchestrator = Orchestrator::new(
//!     Arc::clone(&credentials),
//!     Arc::new(CommandImageBuilder::new("modelpack")),
//!     Arc::new(DockerRegistry::new("http://127.0.0.1:2375")?.with_credentials(Arc::clone(&credentials))),
//!     Arc::new(VertexModelService::new(
//!         "aiplatform.googleapis.com",
//!         Duration::from_secs(5),
//!         credentials,
//!     )),
//!     "gcr.io",
//! );
//!
//! let request = RegistrationRequest::new("/path/to/model", "my-model")?;
//! let _outcome = orchestrator.register_model(request).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

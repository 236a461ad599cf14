//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Each external collaborator of the pipeline is an injected capability:
//! credential discovery, the packaging backend, the registry push client,
//! and the model upload RPC surface. Tests substitute deterministic stubs
//! from [`crate::testkit`] instead of monkeypatching anything global.

mod builder;
mod credentials;
mod models;
mod registry;

pub use builder::ServingImageBuilder;
pub use credentials::CredentialProvider;
pub use models::{ModelService, UploadOperation};
pub use registry::{ImageRegistry, PushErrorDetail, PushRecord, PushStream};

//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`credentials`] — Deterministic [`CredentialProvider`](crate::port::CredentialProvider) stubs.
//! - [`builder`] — Recording/failing [`ServingImageBuilder`](crate::port::ServingImageBuilder) mocks.
//! - [`registry`] — Scripted push streams for [`ImageRegistry`](crate::port::ImageRegistry).
//! - [`models`] — Scripted [`ModelService`](crate::port::ModelService) and operation handles.

pub mod builder;
pub mod credentials;
pub mod models;
pub mod registry;

pub use builder::{BuildCall, RecordingBuilder};
pub use credentials::StaticCredentials;
pub use models::{OperationScript, ScriptedModelService, UploadCall};
pub use registry::ScriptedRegistry;

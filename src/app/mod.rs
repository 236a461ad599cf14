//! Pipeline orchestration: resolve identity, publish the image, register
//! the model.
//!
//! Strictly linear, single attempt, no retries. A failed step aborts the
//! whole invocation; an image pushed before a failed registration is left
//! in the registry for the operator to clean up or re-run against.

mod identity;
mod orchestrator;
mod publisher;
mod registrar;

pub use identity::{IdentityResolver, ResolvedIdentity};
pub use orchestrator::Orchestrator;
pub use publisher::ImagePublisher;
pub use registrar::ModelRegistrar;

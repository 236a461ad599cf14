//! Result of a registration call.

use serde_json::Value;

use crate::port::UploadOperation;

/// The platform's record of a registered model.
#[derive(Debug, Clone)]
pub struct ModelResource {
    /// Fully-qualified resource name,
    /// e.g. `projects/p/locations/l/models/123`.
    pub name: String,

    /// Human-facing name the model was registered under.
    pub display_name: String,

    /// The provider's full response payload.
    pub raw: Value,
}

/// Exactly one of the two, chosen by `RegistrationRequest::synchronous`
/// at call time.
pub enum RegistrationOutcome {
    /// Synchronous path: the upload finished and this is the final record.
    Completed(ModelResource),

    /// Asynchronous path: the upload is in flight; the caller owns all
    /// further lifecycle management of the handle.
    Pending(Box<dyn UploadOperation>),
}

impl std::fmt::Debug for RegistrationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed(resource) => f.debug_tuple("Completed").field(resource).finish(),
            Self::Pending(op) => f.debug_tuple("Pending").field(&op.name()).finish(),
        }
    }
}

//! Provider-independent domain types: registration requests, the model resource
//! descriptor sent to the platform, and the outcome of a registration.
//!
//! Everything here is a plain value created, used, and dropped within a
//! single orchestration call.

mod descriptor;
mod outcome;
mod request;

pub use descriptor::{
    ContainerPort, ContainerSpec, EnvVar, ModelResourceDescriptor, HEALTH_ROUTE,
    OUTPUT_MODE_ENV, OUTPUT_MODE_VALUE, PREDICT_ROUTE, SERVING_PORT,
};
pub use outcome::{ModelResource, RegistrationOutcome};
pub use request::{RegistrationRequest, DEFAULT_LOCATION, DEFAULT_WAIT_TIMEOUT_SECS};

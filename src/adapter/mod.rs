//! Implementations of the outbound ports against real collaborators:
//! gcloud credential discovery, the docker engine push API, the packaging
//! backend CLI, and the Vertex AI model service.

pub mod docker;
pub mod gcloud;
pub mod packer;

pub use docker::DockerRegistry;
pub use gcloud::{GcloudCredentials, VertexModelService};
pub use packer::CommandImageBuilder;

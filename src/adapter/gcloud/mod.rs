//! Google Cloud adapters: ambient credential discovery and the Vertex AI
//! model service.

mod credentials;
mod vertex;

pub use credentials::GcloudCredentials;
pub use vertex::VertexModelService;

//! Model resource construction and upload submission.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::domain::ModelResourceDescriptor;
use crate::error::Result;
use crate::port::{ModelService, UploadOperation};

/// Builds the model resource descriptor and submits it through the model
/// service. Returns the operation handle unconditionally; whether to await
/// it is the orchestrator's call.
pub struct ModelRegistrar {
    models: Arc<dyn ModelService>,
}

impl ModelRegistrar {
    #[must_use]
    pub fn new(models: Arc<dyn ModelService>) -> Self {
        Self { models }
    }

    /// Submit a model resource for `image_uri` under
    /// `projects/<project>/locations/<location>`.
    ///
    /// `model_options` are shallow-merged over the generated descriptor;
    /// see [`ModelResourceDescriptor::into_payload`].
    ///
    /// # Errors
    ///
    /// RPC failures propagate unmodified. The service client already
    /// distinguishes transient from fatal; nothing here second-guesses it.
    pub async fn register(
        &self,
        image_uri: &str,
        display_name: &str,
        project: &str,
        location: &str,
        model_options: Option<&Map<String, Value>>,
    ) -> Result<Box<dyn UploadOperation>> {
        let payload =
            ModelResourceDescriptor::new(display_name, image_uri).into_payload(model_options)?;

        let parent = format!("projects/{project}/locations/{location}");

        info!(
            parent = %parent,
            display_name = %display_name,
            "Uploading model resource"
        );

        self.models.upload_model(location, &parent, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::ScriptedModelService;
    use serde_json::json;

    #[test]
    fn computes_parent_path_and_submits_descriptor() {
        let service = Arc::new(ScriptedModelService::completing_with("demo"));
        let registrar = ModelRegistrar::new(Arc::clone(&service) as _);

        let op = tokio_test::block_on(registrar.register(
            "gcr.io/proj1/demo",
            "demo",
            "proj1",
            "us-central1",
            None,
        ))
        .expect("register");
        assert!(!op.name().is_empty());

        let uploads = service.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].parent, "projects/proj1/locations/us-central1");
        assert_eq!(uploads[0].location, "us-central1");
        assert_eq!(uploads[0].model["container_spec"]["image_uri"], "gcr.io/proj1/demo");
    }

    #[test]
    fn model_options_reach_the_wire_payload() {
        let service = Arc::new(ScriptedModelService::completing_with("demo"));
        let registrar = ModelRegistrar::new(Arc::clone(&service) as _);

        let mut options = Map::new();
        options.insert("labels".into(), json!({ "env": "staging" }));

        tokio_test::block_on(registrar.register(
            "gcr.io/proj1/demo",
            "demo",
            "proj1",
            "europe-west4",
            Some(&options),
        ))
        .expect("register");

        let uploads = service.uploads();
        assert_eq!(uploads[0].model["labels"]["env"], "staging");
        assert_eq!(uploads[0].parent, "projects/proj1/locations/europe-west4");
    }
}

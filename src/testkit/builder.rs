//! Recording and failing image builder mocks.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{PublishError, Result};
use crate::port::ServingImageBuilder;

/// One recorded `build_image` invocation.
#[derive(Debug, Clone)]
pub struct BuildCall {
    pub model_uri: String,
    pub image_uri: String,
    pub install_runtime: bool,
    pub runtime_home: Option<PathBuf>,
}

/// Builder that records calls and optionally fails them.
#[derive(Default)]
pub struct RecordingBuilder {
    calls: Mutex<Vec<BuildCall>>,
    fail_with: Option<String>,
}

impl RecordingBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose every call fails with `message`.
    #[must_use]
    pub fn failing_with(message: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// All invocations recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<BuildCall> {
        self.calls.lock().expect("builder lock").clone()
    }
}

#[async_trait]
impl ServingImageBuilder for RecordingBuilder {
    async fn build_image(
        &self,
        model_uri: &str,
        image_uri: &str,
        install_runtime: bool,
        runtime_home: Option<&Path>,
    ) -> Result<()> {
        self.calls.lock().expect("builder lock").push(BuildCall {
            model_uri: model_uri.to_string(),
            image_uri: image_uri.to_string(),
            install_runtime,
            runtime_home: runtime_home.map(Path::to_path_buf),
        });

        match &self.fail_with {
            Some(message) => Err(PublishError::Build(message.clone()).into()),
            None => Ok(()),
        }
    }
}

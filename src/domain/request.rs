//! Registration request type and defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Region used when a request doesn't name one.
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Default bound on the synchronous wait (30 minutes).
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 1800;

/// Everything needed to build, push, and register one model.
///
/// Owned by the caller; the orchestrator never keeps a copy. Optional fields
/// left as `None` are resolved at run time (project from ambient
/// credentials, destination image from the registry host template).
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Locator of the model artifact, e.g. `/path/to/model` or
    /// `gs://bucket/path/to/model`.
    pub model_uri: String,

    /// Human-facing name of the model once registered.
    pub display_name: String,

    /// Full destination image reference. Synthesized as
    /// `<registry-host>/<project>/<display_name>` when absent.
    pub destination_image_uri: Option<String>,

    /// Local checkout of the serving runtime to install into the image
    /// instead of the released package.
    pub source_override: Option<PathBuf>,

    /// Extra attributes of the platform Model object (labels, schema, ...).
    /// Shallow-merged over the generated descriptor, last writer wins.
    pub model_options: Option<Map<String, Value>>,

    /// Google Cloud project. Discovered from ambient credentials when absent.
    pub project: Option<String>,

    /// Region the model resource is created in.
    pub location: String,

    /// Block until the upload operation completes.
    pub synchronous: bool,

    /// Bound on the synchronous wait.
    pub wait_timeout: Duration,
}

impl RegistrationRequest {
    /// Create a request with defaults for everything optional.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_uri` or `display_name` is empty.
    pub fn new(model_uri: impl Into<String>, display_name: impl Into<String>) -> Result<Self> {
        let model_uri = model_uri.into();
        let display_name = display_name.into();

        if model_uri.is_empty() {
            return Err(ConfigError::MissingField { field: "model_uri" }.into());
        }
        if display_name.is_empty() {
            return Err(ConfigError::MissingField {
                field: "display_name",
            }
            .into());
        }

        Ok(Self {
            model_uri,
            display_name,
            destination_image_uri: None,
            source_override: None,
            model_options: None,
            project: None,
            location: DEFAULT_LOCATION.into(),
            synchronous: true,
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_destination_image_uri(mut self, uri: impl Into<String>) -> Self {
        self.destination_image_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_source_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_override = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_model_options(mut self, options: Map<String, Value>) -> Self {
        self.model_options = Some(options);
        self
    }

    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Return immediately with an operation handle instead of waiting.
    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.synchronous = false;
        self
    }

    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_documented_defaults() {
        let request = RegistrationRequest::new("/tmp/model", "demo").expect("valid request");
        assert_eq!(request.location, "us-central1");
        assert!(request.synchronous);
        assert_eq!(request.wait_timeout, Duration::from_secs(1800));
        assert!(request.project.is_none());
        assert!(request.destination_image_uri.is_none());
    }

    #[test]
    fn rejects_empty_model_uri() {
        assert!(RegistrationRequest::new("", "demo").is_err());
    }

    #[test]
    fn rejects_empty_display_name() {
        assert!(RegistrationRequest::new("/tmp/model", "").is_err());
    }
}

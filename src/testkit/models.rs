//! Scripted model service and operation handles.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::ModelResource;
use crate::error::{Error, Result};
use crate::port::{ModelService, UploadOperation};

/// One recorded `upload_model` invocation.
#[derive(Debug, Clone)]
pub struct UploadCall {
    pub location: String,
    pub parent: String,
    pub model: Value,
}

/// What the operation returned by [`ScriptedModelService`] does when
/// awaited.
#[derive(Debug, Clone)]
pub enum OperationScript {
    /// `wait` resolves immediately with this resource.
    CompleteWith(ModelResource),
    /// `wait` fails with a remote upload error.
    FailWith(String),
    /// `wait` reports an expired deadline.
    TimeOut,
    /// `wait` never resolves within any realistic test run.
    Stall,
}

/// Model service that records uploads and hands out scripted operations.
pub struct ScriptedModelService {
    script: OperationScript,
    uploads: Mutex<Vec<UploadCall>>,
}

impl ScriptedModelService {
    #[must_use]
    pub fn new(script: OperationScript) -> Self {
        Self {
            script,
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// Service whose operations resolve immediately with a finished model
    /// record named after `display_name`.
    #[must_use]
    pub fn completing_with(display_name: &str) -> Self {
        let name = format!("projects/test/locations/us-central1/models/{display_name}");
        Self::new(OperationScript::CompleteWith(ModelResource {
            name: name.clone(),
            display_name: display_name.to_string(),
            raw: json!({ "model": name, "displayName": display_name }),
        }))
    }

    /// Service whose operations stall forever.
    #[must_use]
    pub fn stalling() -> Self {
        Self::new(OperationScript::Stall)
    }

    /// All uploads recorded so far.
    #[must_use]
    pub fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.lock().expect("model service lock").clone()
    }
}

#[async_trait]
impl ModelService for ScriptedModelService {
    async fn upload_model(
        &self,
        location: &str,
        parent: &str,
        model: Value,
    ) -> Result<Box<dyn UploadOperation>> {
        self.uploads
            .lock()
            .expect("model service lock")
            .push(UploadCall {
                location: location.to_string(),
                parent: parent.to_string(),
                model,
            });

        Ok(Box::new(ScriptedOperation {
            name: format!("{parent}/operations/op-1"),
            script: self.script.clone(),
        }))
    }
}

/// Operation handle driven by an [`OperationScript`].
pub struct ScriptedOperation {
    name: String,
    script: OperationScript,
}

#[async_trait]
impl UploadOperation for ScriptedOperation {
    fn name(&self) -> &str {
        &self.name
    }

    async fn wait(self: Box<Self>, timeout: Duration) -> Result<ModelResource> {
        match self.script {
            OperationScript::CompleteWith(resource) => Ok(resource),
            OperationScript::FailWith(message) => Err(Error::Upload(message)),
            OperationScript::TimeOut => Err(Error::WaitTimeout {
                seconds: timeout.as_secs(),
            }),
            OperationScript::Stall => {
                tokio::time::sleep(Duration::from_secs(86400)).await;
                Err(Error::WaitTimeout {
                    seconds: timeout.as_secs(),
                })
            }
        }
    }
}

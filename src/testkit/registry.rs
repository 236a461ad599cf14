//! Scripted push stream mock.

use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;

use crate::error::Result;
use crate::port::{ImageRegistry, PushRecord, PushStream};

/// Registry whose push stream replays a fixed script of records.
pub struct ScriptedRegistry {
    script: Mutex<Vec<PushRecord>>,
    pushes: Mutex<Vec<String>>,
}

impl ScriptedRegistry {
    /// Registry that replays `script` on the first push.
    #[must_use]
    pub fn new(script: Vec<PushRecord>) -> Self {
        Self {
            script: Mutex::new(script),
            pushes: Mutex::new(Vec::new()),
        }
    }

    /// Image URIs pushed so far, in order.
    #[must_use]
    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().expect("registry lock").clone()
    }
}

#[async_trait]
impl ImageRegistry for ScriptedRegistry {
    async fn push(&self, image_uri: &str) -> Result<PushStream> {
        self.pushes
            .lock()
            .expect("registry lock")
            .push(image_uri.to_string());

        let records = std::mem::take(&mut *self.script.lock().expect("registry lock"));
        Ok(Box::pin(stream::iter(records.into_iter().map(Ok))))
    }
}

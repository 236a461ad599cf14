//! Registry push port.
//!
//! The docker engine reports push progress as a stream of JSON records and
//! is known not to surface authentication failures as errors on its own;
//! they arrive as `errorDetail` records inside an otherwise successful
//! response body. Consumers must inspect every record before treating a
//! push as successful, even when the stream ends cleanly.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use serde::Deserialize;

use crate::error::Result;

/// One decoded record from the push progress stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushRecord {
    /// Progress/status text, informational only.
    #[serde(default)]
    pub status: Option<String>,

    /// In-band error report. Presence of this field means the push failed,
    /// regardless of how the stream terminates.
    #[serde(default, rename = "errorDetail")]
    pub error_detail: Option<PushErrorDetail>,
}

impl PushRecord {
    #[must_use]
    pub fn status(text: impl Into<String>) -> Self {
        Self {
            status: Some(text.into()),
            error_detail: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: None,
            error_detail: Some(PushErrorDetail {
                message: message.into(),
            }),
        }
    }
}

/// Error payload embedded in a push record.
#[derive(Debug, Clone, Deserialize)]
pub struct PushErrorDetail {
    #[serde(default)]
    pub message: String,
}

pub type PushStream = Pin<Box<dyn Stream<Item = Result<PushRecord>> + Send>>;

/// Port for pushing a built image to its registry.
#[async_trait]
pub trait ImageRegistry: Send + Sync {
    /// Start pushing `image_uri` and return the progress record stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the push cannot be started at all. Failures
    /// during the push arrive as `errorDetail` records on the stream.
    async fn push(&self, image_uri: &str) -> Result<PushStream>;
}

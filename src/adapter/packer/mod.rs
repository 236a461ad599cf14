//! Packaging backend adapter.
//!
//! Delegates serving-image builds to the external `modelpack` CLI (or
//! whatever program `[builder] program` names). The backend owns all build
//! internals; this adapter only shapes the invocation and translates a
//! non-zero exit into a build error.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PublishError, Result};
use crate::port::ServingImageBuilder;

/// Builds serving images by invoking the packaging backend CLI.
pub struct CommandImageBuilder {
    program: String,
}

impl CommandImageBuilder {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ServingImageBuilder for CommandImageBuilder {
    async fn build_image(
        &self,
        model_uri: &str,
        image_uri: &str,
        install_runtime: bool,
        runtime_home: Option<&Path>,
    ) -> Result<()> {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .arg("build-image")
            .arg("--model-uri")
            .arg(model_uri)
            .arg("--tag")
            .arg(image_uri)
            .stdin(Stdio::null());

        if install_runtime {
            command.arg("--install-runtime");
            if let Some(home) = runtime_home {
                command.arg("--runtime-home").arg(home);
            }
        }

        debug!(program = %self.program, image_uri = %image_uri, "Invoking packaging backend");

        let output = command
            .output()
            .await
            .map_err(|e| PublishError::Build(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.lines().next_back().unwrap_or("no output").to_string();
            return Err(PublishError::Build(format!(
                "{} exited with {}: {detail}",
                self.program, output.status
            ))
            .into());
        }

        Ok(())
    }
}

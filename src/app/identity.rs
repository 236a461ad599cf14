//! Target project and destination image resolution.

use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::port::CredentialProvider;

/// Project and image reference a registration will run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub project: String,
    pub image_uri: String,
}

/// Fills in the project and destination image URI when the request leaves
/// them out. Pure apart from the credential lookup; runs before any build
/// or RPC work so a misconfigured environment fails fast.
pub struct IdentityResolver {
    credentials: Arc<dyn CredentialProvider>,
    registry_host: String,
}

impl IdentityResolver {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialProvider>, registry_host: impl Into<String>) -> Self {
        Self {
            credentials,
            registry_host: registry_host.into(),
        }
    }

    /// Resolve the target project and destination image URI.
    ///
    /// A missing project is looked up from ambient credentials. A missing
    /// destination is synthesized as
    /// `<registry-host>/<project>/<display_name>`; no collision check is
    /// made, an existing image there is overwritten downstream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingProject`] when no project was given and
    /// credential discovery fails.
    pub async fn resolve(
        &self,
        project: Option<&str>,
        display_name: &str,
        destination_image_uri: Option<&str>,
    ) -> Result<ResolvedIdentity> {
        let project = match project {
            Some(project) => project.to_string(),
            None => {
                let project = self
                    .credentials
                    .default_project()
                    .await
                    .map_err(|e| Error::MissingProject {
                        reason: e.to_string(),
                    })?;
                info!(project = %project, "Project not set, using credential default");
                project
            }
        };

        let image_uri = match destination_image_uri {
            Some(uri) => uri.to_string(),
            None => {
                let uri = format!("{}/{}/{}", self.registry_host, project, display_name);
                info!(image_uri = %uri, "Destination image URI not set, synthesized default");
                uri
            }
        };

        Ok(ResolvedIdentity { project, image_uri })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::StaticCredentials;

    #[test]
    fn explicit_values_pass_through_untouched() {
        let resolver = IdentityResolver::new(Arc::new(StaticCredentials::without_project()), "gcr.io");

        let resolved = tokio_test::block_on(resolver.resolve(
            Some("proj1"),
            "demo",
            Some("eu.gcr.io/other/custom:v2"),
        ))
        .expect("resolve");

        assert_eq!(resolved.project, "proj1");
        assert_eq!(resolved.image_uri, "eu.gcr.io/other/custom:v2");
    }

    #[test]
    fn synthesizes_image_uri_from_resolved_project() {
        let resolver =
            IdentityResolver::new(Arc::new(StaticCredentials::with_project("ambient")), "gcr.io");

        let resolved =
            tokio_test::block_on(resolver.resolve(None, "demo", None)).expect("resolve");

        assert_eq!(resolved.project, "ambient");
        assert_eq!(resolved.image_uri, "gcr.io/ambient/demo");
    }

    #[test]
    fn missing_project_and_credentials_is_fatal() {
        let resolver = IdentityResolver::new(Arc::new(StaticCredentials::without_project()), "gcr.io");

        let err = tokio_test::block_on(resolver.resolve(None, "demo", None)).unwrap_err();
        assert!(matches!(err, Error::MissingProject { .. }));
    }
}

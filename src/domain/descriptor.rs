//! The model resource descriptor uploaded to the platform.
//!
//! The container contract is fixed: registered images are expected to run a
//! serving webserver on port 8080 that answers predictions on
//! `/invocations` and health checks on `/ping`. Caller-supplied
//! `model_options` are merged over the serialized descriptor at the top
//! level only; a key like `container_spec` replaces the whole generated
//! spec rather than being merged into it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Port the serving webserver listens on inside the container.
pub const SERVING_PORT: u16 = 8080;

/// Route the platform sends prediction requests to.
pub const PREDICT_ROUTE: &str = "/invocations";

/// Route the platform health-checks.
pub const HEALTH_ROUTE: &str = "/ping";

/// Environment variable forcing the serving runtime into the platform's
/// prediction response format. Always set; not user-configurable.
pub const OUTPUT_MODE_ENV: &str = "MODELPACK_OUTPUT_MODE";
pub const OUTPUT_MODE_VALUE: &str = "platform";

#[derive(Debug, Clone, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerPort {
    pub container_port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerSpec {
    pub image_uri: String,
    pub ports: Vec<ContainerPort>,
    pub predict_route: String,
    pub health_route: String,
    pub env: Vec<EnvVar>,
}

impl ContainerSpec {
    /// The fixed serving contract for `image_uri`.
    #[must_use]
    pub fn serving(image_uri: impl Into<String>) -> Self {
        Self {
            image_uri: image_uri.into(),
            ports: vec![ContainerPort {
                container_port: SERVING_PORT,
            }],
            predict_route: PREDICT_ROUTE.into(),
            health_route: HEALTH_ROUTE.into(),
            env: vec![EnvVar {
                name: OUTPUT_MODE_ENV.into(),
                value: OUTPUT_MODE_VALUE.into(),
            }],
        }
    }
}

/// Descriptor of the model resource to create, before option overrides.
#[derive(Debug, Clone, Serialize)]
pub struct ModelResourceDescriptor {
    pub display_name: String,
    pub container_spec: ContainerSpec,
}

impl ModelResourceDescriptor {
    #[must_use]
    pub fn new(display_name: impl Into<String>, image_uri: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            container_spec: ContainerSpec::serving(image_uri),
        }
    }

    /// Serialize the descriptor and shallow-merge `options` over it.
    ///
    /// Top-level keys from `options` overwrite descriptor keys wholesale.
    /// This permits replacing the entire `container_spec`, which callers
    /// must understand before using it.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor fails to serialize.
    pub fn into_payload(self, options: Option<&Map<String, Value>>) -> Result<Value> {
        let mut payload = serde_json::to_value(&self)?;

        if let (Some(object), Some(options)) = (payload.as_object_mut(), options) {
            for (key, value) in options {
                object.insert(key.clone(), value.clone());
            }
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_carries_fixed_serving_contract() {
        let payload = ModelResourceDescriptor::new("demo", "gcr.io/proj1/demo")
            .into_payload(None)
            .expect("serialize");

        assert_eq!(payload["display_name"], "demo");
        assert_eq!(payload["container_spec"]["image_uri"], "gcr.io/proj1/demo");
        assert_eq!(
            payload["container_spec"]["ports"],
            json!([{ "container_port": 8080 }])
        );
        assert_eq!(payload["container_spec"]["predict_route"], "/invocations");
        assert_eq!(payload["container_spec"]["health_route"], "/ping");
        assert_eq!(
            payload["container_spec"]["env"],
            json!([{ "name": "MODELPACK_OUTPUT_MODE", "value": "platform" }])
        );
    }

    #[test]
    fn options_merge_is_shallow_and_overwrites() {
        let mut options = Map::new();
        options.insert("container_spec".into(), json!({ "image_uri": "X" }));

        let payload = ModelResourceDescriptor::new("demo", "gcr.io/proj1/demo")
            .into_payload(Some(&options))
            .expect("serialize");

        // The whole generated container_spec is replaced, not deep-merged.
        assert_eq!(payload["container_spec"], json!({ "image_uri": "X" }));
        assert_eq!(payload["display_name"], "demo");
    }

    #[test]
    fn options_add_new_top_level_keys() {
        let mut options = Map::new();
        options.insert("labels".into(), json!({ "team": "mlops" }));

        let payload = ModelResourceDescriptor::new("demo", "gcr.io/proj1/demo")
            .into_payload(Some(&options))
            .expect("serialize");

        assert_eq!(payload["labels"]["team"], "mlops");
        assert_eq!(payload["container_spec"]["health_route"], "/ping");
    }
}

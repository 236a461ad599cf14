use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while building or pushing the serving image.
///
/// Any of these aborts the pipeline before the model upload is attempted.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("image build failed: {0}")]
    Build(String),

    /// The registry rejected the push. The message is the registry's own
    /// error text, taken from the in-band error record of the push stream.
    #[error("registry push failed: {0}")]
    Push(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    /// No project was given and none could be discovered from ambient
    /// credentials. Fatal; the remediation is in the message.
    #[error(
        "no Google Cloud project configured; pass --project or set a default \
         project (e.g. `gcloud config set project <PROJECT_ID>`): {reason}"
    )]
    MissingProject { reason: String },

    #[error("default credentials not found: {0}")]
    Credentials(String),

    /// Remote model upload reported a terminal failure. The provider's
    /// error text is preserved unmodified.
    #[error("model upload failed: {0}")]
    Upload(String),

    /// The synchronous wait on the upload operation expired. Distinct from
    /// a remote failure so callers can tell the two apart.
    #[error("timed out after {seconds}s waiting for model upload to complete")]
    WaitTimeout { seconds: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

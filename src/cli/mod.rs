//! Command-line interface definitions.

pub mod register;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skylift - Build, push, and register ML model serving images.
#[derive(Parser, Debug)]
#[command(name = "skylift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (optional; defaults apply if absent)
    #[arg(short, long, default_value = "skylift.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a serving container for a model, push it, and register it
    /// with Vertex AI
    RegisterModel(RegisterModelArgs),
}

/// Arguments for the `register-model` subcommand.
#[derive(Parser, Debug)]
pub struct RegisterModelArgs {
    /// Location, in URI format, of the model to build the image from
    /// (e.g. /path/to/model or gs://bucket/path/to/model)
    pub model_uri: String,

    /// Name of the model once registered on Vertex AI
    #[arg(short = 'n', long)]
    pub display_name: String,

    /// JSON object of extra Model attributes, like labels and schema
    #[arg(short = 'o', long)]
    pub model_options: Option<String>,

    /// Google Cloud project to build and register in; uses the default
    /// project from ambient credentials if not set
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Destination image reference, e.g. gcr.io/<REPO>/<IMAGE>:<TAG>;
    /// defaults to <registry-host>/<project>/<display-name>
    #[arg(short = 't', long)]
    pub destination_image_uri: Option<String>,

    /// Region the model is created in; defaults to the configured region
    /// (us-central1 unless overridden)
    #[arg(short = 'l', long)]
    pub location: Option<String>,

    /// How long to wait for registration to complete, in seconds
    #[arg(short = 'w', long, default_value_t = 1800)]
    pub wait_timeout: u64,

    /// Install the serving runtime from this local checkout instead of
    /// the public index
    #[arg(long)]
    pub source_dir: Option<PathBuf>,
}

//! Error types for the plugin binary

use protogen_core::GenerateError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a plugin run.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Model building or option parsing failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The request on stdin is not a valid `CodeGeneratorRequest`.
    #[error("failed to decode request: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The template could not be read.
    #[error("cannot read template {}: {source}", path.display())]
    TemplateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendering the content or output path template failed.
    #[error("template error: {0:#}")]
    Template(#[from] minijinja::Error),

    /// A file listed in `file_to_generate` is missing from `proto_file`.
    #[error("file `{0}` is listed for generation but not part of the request")]
    MissingFile(String),

    /// I/O error while reading the request or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for modelgen-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template directory does not exist or is not a directory.
    #[error("template directory '{path}' is not usable")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template file could not be read or decoded.
    #[error("cannot load template '{path}'")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template source failed to compile.
    #[error("template '{name}' is not a valid template")]
    Parse {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// Template evaluation failed (e.g. a reference to an undefined variable).
    #[error("template '{name}' failed to evaluate")]
    Evaluation {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// The render context could not be serialized.
    #[error("render context serialization failed")]
    Context(#[source] tera::Error),
}

//! Error types and the batch failure policy for modelgen-convert.
//!
//! Every failure is logged at error severity exactly once, when the
//! [`ConversionError`] is built; callers report outcomes without re-logging.
//! Whether a failure aborts a batch or only skips its config is decided by
//! [`FailureKind::aborts_batch`], a policy table the batch driver consults.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use modelgen_core::ModelParseError;
use modelgen_renderer::RenderError;

// ---------------------------------------------------------------------------
// ConversionError
// ---------------------------------------------------------------------------

/// All ways a single conversion can fail, one variant per failure category.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// A required config field is blank. Carries no cause.
    #[error("{0}")]
    MissingInput(String),

    /// No readable model description at the configured path.
    #[error("no model description found at '{path}'")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The model description does not conform to the model grammar.
    #[error("failed to parse model description at '{path}'")]
    MalformedModel {
        path: PathBuf,
        #[source]
        source: ModelParseError,
    },

    /// The template's directory cannot be used as a loading location.
    #[error("cannot use template directory '{path}'")]
    TemplateDirectoryInvalid {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No loadable template at the configured path.
    #[error("no template found at '{path}'")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template engine reported an evaluation fault.
    #[error("template '{name}' failed to evaluate")]
    TemplateEvaluation {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// The output file could not be created or written.
    #[error("cannot write output file '{path}'")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure category tags, used to look up the batch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MissingInput,
    InputNotFound,
    MalformedModel,
    TemplateDirectoryInvalid,
    TemplateNotFound,
    TemplateEvaluation,
    OutputWrite,
}

impl FailureKind {
    /// Batch policy: model-resolution failures abort the whole batch, every
    /// other category only skips the failing config.
    ///
    /// The asymmetry is deliberate, observable behavior; change it only
    /// with product-owner sign-off.
    pub const fn aborts_batch(self) -> bool {
        matches!(self, FailureKind::InputNotFound | FailureKind::MalformedModel)
    }
}

impl ConversionError {
    /// The failure category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ConversionError::MissingInput(_) => FailureKind::MissingInput,
            ConversionError::InputNotFound { .. } => FailureKind::InputNotFound,
            ConversionError::MalformedModel { .. } => FailureKind::MalformedModel,
            ConversionError::TemplateDirectoryInvalid { .. } => {
                FailureKind::TemplateDirectoryInvalid
            }
            ConversionError::TemplateNotFound { .. } => FailureKind::TemplateNotFound,
            ConversionError::TemplateEvaluation { .. } => FailureKind::TemplateEvaluation,
            ConversionError::OutputWrite { .. } => FailureKind::OutputWrite,
        }
    }

    /// Shorthand for `self.kind().aborts_batch()`.
    pub fn aborts_batch(&self) -> bool {
        self.kind().aborts_batch()
    }
}

// ---------------------------------------------------------------------------
// Logging constructors — the single logging point for every failure
// ---------------------------------------------------------------------------

fn report(err: ConversionError) -> ConversionError {
    match std::error::Error::source(&err) {
        Some(cause) => tracing::error!("{err}: {cause}"),
        None => tracing::error!("{err}"),
    }
    err
}

pub(crate) fn missing_input(message: impl Into<String>) -> ConversionError {
    report(ConversionError::MissingInput(message.into()))
}

pub(crate) fn input_not_found(path: impl Into<PathBuf>, source: io::Error) -> ConversionError {
    report(ConversionError::InputNotFound {
        path: path.into(),
        source,
    })
}

pub(crate) fn malformed_model(
    path: impl Into<PathBuf>,
    source: ModelParseError,
) -> ConversionError {
    report(ConversionError::MalformedModel {
        path: path.into(),
        source,
    })
}

/// A template path with no file-name component (e.g. `templates/..`).
pub(crate) fn template_not_found_at(path: impl Into<PathBuf>) -> ConversionError {
    report(ConversionError::TemplateNotFound {
        path: path.into(),
        source: io::Error::other("template path has no file name"),
    })
}

pub(crate) fn output_write(path: impl Into<PathBuf>, source: io::Error) -> ConversionError {
    report(ConversionError::OutputWrite {
        path: path.into(),
        source,
    })
}

/// Map renderer failures onto conversion categories.
impl From<RenderError> for ConversionError {
    fn from(err: RenderError) -> Self {
        report(match err {
            RenderError::Directory { path, source } => {
                ConversionError::TemplateDirectoryInvalid { path, source }
            }
            RenderError::Load { path, source } => {
                ConversionError::TemplateNotFound { path, source }
            }
            // Source-level template faults are engine-reported faults, same
            // as evaluation-time ones.
            RenderError::Parse { name, source } | RenderError::Evaluation { name, source } => {
                ConversionError::TemplateEvaluation { name, source }
            }
            RenderError::Context(source) => ConversionError::TemplateEvaluation {
                name: String::from("<render context>"),
                source,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Conversion configuration — one unit of generation work.

use modelgen_core::OutputEncoding;

/// Everything needed to generate one file: where the model description
/// lives, which template to evaluate, where the output goes, and which
/// charset to use.
///
/// A plain value object: equality and the logged representation are
/// structural. Built by the caller (CLI or batch planner) and consumed by
/// [`crate::ModelConverter`], which never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Path to the XML model description.
    pub source_model_path: String,
    /// Path to the template file. A bare file name resolves against the
    /// converter's default template directory.
    pub template_path: String,
    /// Path of the file to generate.
    pub output_file_path: String,
    /// Charset for the template source and the output; `None` uses the
    /// engine default.
    pub output_encoding: Option<OutputEncoding>,
}

impl ConversionConfig {
    pub fn new(
        source_model_path: impl Into<String>,
        template_path: impl Into<String>,
        output_file_path: impl Into<String>,
        output_encoding: Option<OutputEncoding>,
    ) -> Self {
        Self {
            source_model_path: source_model_path.into(),
            template_path: template_path.into(),
            output_file_path: output_file_path.into(),
            output_encoding,
        }
    }
}

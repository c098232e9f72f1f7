//! Conversion orchestration — [`ModelConverter`] and the batch driver.
//!
//! ## Batch failure policy
//!
//! `convert_batch` processes configs strictly in order. When a config fails,
//! the driver consults [`FailureKind::aborts_batch`]: model-resolution
//! failures (`InputNotFound`, `MalformedModel`) abort the whole batch,
//! everything else skips the failing config and continues. The failure has
//! already been logged when the error was built, so the driver only leaves a
//! debug-level continuation note.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use modelgen_core::{xml, Model};
use modelgen_renderer::{RenderContext, TemplateEngine, TemplateHandle};

use crate::config::ConversionConfig;
use crate::error::{
    self, input_not_found, malformed_model, missing_input, output_write, ConversionError,
};

// ---------------------------------------------------------------------------
// Model resolution
// ---------------------------------------------------------------------------

/// Parse the model description at `path`.
fn resolve_model(path: &str) -> Result<Model, ConversionError> {
    tracing::debug!("parsing model description from '{path}'");
    if path.trim().is_empty() {
        return Err(missing_input(
            "no model description path provided; cannot convert model",
        ));
    }
    let bytes = std::fs::read(path).map_err(|e| input_not_found(path, e))?;
    xml::parse_model_bytes(&bytes).map_err(|e| malformed_model(path, e))
}

/// Single-entry model cache keyed by the exact path string.
///
/// No path normalization happens: `m.xml` and `./m.xml` are distinct keys
/// even when they name the same file.
#[derive(Default)]
struct ModelCache {
    entry: Option<(String, Model)>,
}

impl ModelCache {
    /// Make sure the cache holds the model for `path`, parsing it only when
    /// the cached path string differs.
    fn ensure(&mut self, path: &str) -> Result<(), ConversionError> {
        if !matches!(&self.entry, Some((cached, _)) if cached == path) {
            let model = resolve_model(path)?;
            self.entry = Some((path.to_owned(), model));
        }
        Ok(())
    }

    /// The cached model, when the cached path string is exactly `path`.
    fn model(&self, path: &str) -> Option<&Model> {
        match &self.entry {
            Some((cached, model)) if cached == path => Some(model),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ModelConverter
// ---------------------------------------------------------------------------

/// Generates files from model descriptions by evaluating templates.
///
/// Create once and reuse; the converter holds no per-conversion state, so a
/// single instance can drive any number of conversions.
#[derive(Debug, Default)]
pub struct ModelConverter {
    engine: TemplateEngine,
}

impl ModelConverter {
    /// Converter with the preset engine configuration (UTF-8 default
    /// encoding, no default template directory).
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter with a default template directory, letting configs carry a
    /// bare template file name instead of a full path.
    pub fn with_templates_dir(dir: impl Into<PathBuf>) -> Result<Self, ConversionError> {
        let engine = TemplateEngine::with_templates_dir(dir)?;
        Ok(Self { engine })
    }

    /// Set the default template directory.
    pub fn set_templates_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), ConversionError> {
        Ok(self.engine.set_templates_dir(dir)?)
    }

    /// Generate one file from `config`, parsing the model fresh.
    ///
    /// Every failure propagates to the caller (already logged).
    pub fn convert(&self, config: &ConversionConfig) -> Result<PathBuf, ConversionError> {
        tracing::info!("generating file from configuration:\n{config:#?}");
        let model = resolve_model(&config.source_model_path)?;
        self.convert_with_model(&model, config)
    }

    /// Generate one file per config, strictly in order, reusing the parsed
    /// model across consecutive configs that name the same model path.
    ///
    /// Returns the successfully produced output paths; skipped configs are
    /// omitted. Model-resolution failures abort the batch (see module docs).
    pub fn convert_batch(
        &self,
        configs: &[ConversionConfig],
    ) -> Result<Vec<PathBuf>, ConversionError> {
        let mut cache = ModelCache::default();
        let mut outputs = Vec::with_capacity(configs.len());
        for config in configs {
            tracing::info!("generating file from configuration:\n{config:#?}");
            if let Err(err) = cache.ensure(&config.source_model_path) {
                if err.aborts_batch() {
                    return Err(err);
                }
                tracing::debug!(
                    "continuing batch after model failure for '{}'",
                    config.output_file_path
                );
                continue;
            }
            let Some(model) = cache.model(&config.source_model_path) else {
                continue;
            };
            match self.convert_with_model(model, config) {
                Ok(path) => outputs.push(path),
                Err(err) if err.aborts_batch() => return Err(err),
                Err(_) => {
                    tracing::debug!(
                        "continuing batch after failure for '{}'",
                        config.output_file_path
                    );
                }
            }
        }
        Ok(outputs)
    }

    /// Generate one file from an already-parsed model.
    pub fn convert_with_model(
        &self,
        model: &Model,
        config: &ConversionConfig,
    ) -> Result<PathBuf, ConversionError> {
        let template = self.resolve_template(config)?;
        let ctx = RenderContext::new(model).to_tera_context()?;

        if config.output_file_path.trim().is_empty() {
            return Err(missing_input(
                "no output file path provided; cannot perform model conversion",
            ));
        }
        let out_path = PathBuf::from(&config.output_file_path);

        // The destination is opened before evaluation and closed on every
        // exit path; an evaluation fault leaves an empty file behind.
        let mut file = File::create(&out_path).map_err(|e| output_write(&out_path, e))?;
        let rendered = template.evaluate(&ctx)?;
        let bytes = template
            .encoding()
            .encode(&rendered)
            .map_err(|e| {
                output_write(
                    &out_path,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                )
            })?;
        file.write_all(&bytes)
            .map_err(|e| output_write(&out_path, e))?;

        tracing::info!("wrote: {}", out_path.display());
        Ok(out_path)
    }

    /// Load the template named by `config`, binding it to the requested
    /// output encoding.
    ///
    /// A path with a parent directory loads from exactly that directory; a
    /// bare file name resolves against the engine's default directory.
    fn resolve_template(
        &self,
        config: &ConversionConfig,
    ) -> Result<TemplateHandle, ConversionError> {
        let template_path = config.template_path.as_str();
        tracing::debug!("loading template from '{template_path}'");
        if template_path.trim().is_empty() {
            return Err(missing_input(
                "no template file path provided; cannot convert model",
            ));
        }

        let path = Path::new(template_path);
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(error::template_not_found_at(path));
        };
        let handle = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                self.engine.load_from(dir, name, config.output_encoding)
            }
            _ => self.engine.load(name, config.output_encoding),
        };
        handle.map_err(ConversionError::from)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

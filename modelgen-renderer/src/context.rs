//! Render context — the payload handed to template evaluation.

use serde::Serialize;

use modelgen_core::Model;

use crate::error::RenderError;

/// Rendering payload exposing the parsed model under the single well-known
/// key `model`.
///
/// Templates address the model as `{{ model.name }}`, `{% for type in
/// model.types %}`, and so on. Nothing else is exposed; templates that
/// reference other top-level variables fail at evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub model: &'a Model,
}

impl<'a> RenderContext<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::Context)
    }
}

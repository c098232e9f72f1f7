//! # modelgen-renderer
//!
//! Tera-based template loading and evaluation for model conversion.
//!
//! Templates are plain files loaded from a directory named explicitly on
//! every lookup, compiled one at a time, and bound to the charset their
//! output should be written in.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use modelgen_core::xml::parse_model;
//! use modelgen_renderer::{RenderContext, TemplateEngine};
//!
//! fn render(source: &str) -> Result<String, Box<dyn std::error::Error>> {
//!     let model = parse_model(source)?;
//!     let engine = TemplateEngine::new();
//!     let template = engine.load_from("templates".as_ref(), "java.UTF-8.tera", None)?;
//!     let ctx = RenderContext::new(&model).to_tera_context()?;
//!     Ok(template.evaluate(&ctx)?)
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::RenderContext;
pub use engine::{TemplateEngine, TemplateHandle};
pub use error::RenderError;

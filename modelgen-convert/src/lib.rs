//! # modelgen-convert
//!
//! The conversion orchestrator: resolve a model description, resolve a
//! template, render, and write the output file.
//!
//! Call [`ModelConverter::convert`] for a single configuration or
//! [`ModelConverter::convert_batch`] to drive a sequence of configurations
//! with the asymmetric failure policy described in [`converter`].

pub mod config;
pub mod converter;
pub mod error;

pub use config::ConversionConfig;
pub use converter::ModelConverter;
pub use error::{ConversionError, FailureKind};

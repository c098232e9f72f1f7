//! # modelgen-core
//!
//! Domain types and parsing for XML model descriptions.
//!
//! Public API surface:
//! - [`types`] — the parsed model data structures
//! - [`xml`] — [`xml::parse_model`] / [`xml::parse_model_bytes`]
//! - [`encoding`] — [`encoding::OutputEncoding`]
//! - [`error`] — [`ModelParseError`], [`EncodingError`]

pub mod encoding;
pub mod error;
pub mod types;
pub mod xml;

pub use encoding::OutputEncoding;
pub use error::{EncodingError, ModelParseError};
pub use types::{ClassDef, Model, Namespace, PropertyDef, QName};

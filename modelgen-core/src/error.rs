//! Error types for modelgen-core.

use thiserror::Error;

use crate::encoding::OutputEncoding;

/// All errors that can arise while parsing a model description.
#[derive(Debug, Error)]
pub enum ModelParseError {
    /// The document is not well-formed XML.
    #[error("model description is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document is not valid UTF-8.
    #[error("model description is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    /// The root element is not `<model>`.
    #[error("unexpected root element <{found}>; expected <model>")]
    UnexpectedRoot { found: String },

    /// A required attribute is absent or empty.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// A boolean flag element holds something other than `true`/`false`.
    #[error("<{element}> must be 'true' or 'false', got '{value}'")]
    InvalidFlag { element: String, value: String },
}

/// All errors that can arise from charset handling.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The charset name is not one of the supported encodings.
    #[error("unsupported encoding '{name}'; expected UTF-8 or ISO-8859-1")]
    UnknownName { name: String },

    /// Bytes claimed to be UTF-8 are not.
    #[error("input is not valid UTF-8")]
    InvalidUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },

    /// A char in the rendered output has no representation in the target charset.
    #[error("char '{ch}' cannot be encoded as {encoding}")]
    Unmappable { ch: char, encoding: OutputEncoding },
}

//! Domain types for parsed model descriptions.
//!
//! All types are serializable via serde so a parsed model can be handed to
//! the template engine as render-context data without an intermediate
//! representation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A qualified name, usually of the form `prefix:local` (e.g. `acme:book`).
///
/// The prefix refers to one of the model's declared [`Namespace`]s. No
/// resolution happens here; templates receive the name verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName(pub String);

impl QName {
    /// The part after the first `:`, or the whole name if there is no prefix.
    pub fn local_name(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, local)) => local,
            None => &self.0,
        }
    }

    /// The part before the first `:`, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.0.split_once(':').map(|(prefix, _)| prefix)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for QName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for QName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A namespace declaration or import: binds a prefix to a URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub prefix: String,
    pub uri: String,
}

/// A single property of a type or aspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: QName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Data-type reference, itself a qualified name (e.g. `d:text`).
    pub data_type: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A class-like model member. `<type>` and `<aspect>` share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: QName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<QName>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

/// A parsed model description.
///
/// Immutable once produced by [`crate::xml::parse_model`]; the conversion
/// layer may cache and reuse a value across a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub name: QName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub imports: Vec<Namespace>,
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
    #[serde(default)]
    pub types: Vec<ClassDef>,
    #[serde(default)]
    pub aspects: Vec<ClassDef>,
}

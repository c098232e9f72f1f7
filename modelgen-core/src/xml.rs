//! XML model-description parser.
//!
//! Turns a model description document into a [`Model`]. Element matching is
//! on local names only, so documents may carry a default namespace or prefix
//! their elements freely. Unknown elements are skipped.

use roxmltree::{Document, Node};

use crate::error::ModelParseError;
use crate::types::{ClassDef, Model, Namespace, PropertyDef, QName};

/// Parse a model description from raw bytes.
///
/// Convenience over [`parse_model`] for callers holding file contents.
pub fn parse_model_bytes(bytes: &[u8]) -> Result<Model, ModelParseError> {
    let source = std::str::from_utf8(bytes)?;
    parse_model(source)
}

/// Parse a model description document.
pub fn parse_model(source: &str) -> Result<Model, ModelParseError> {
    let doc = Document::parse(source)?;
    let root = doc.root_element();
    if root.tag_name().name() != "model" {
        return Err(ModelParseError::UnexpectedRoot {
            found: root.tag_name().name().to_owned(),
        });
    }

    Ok(Model {
        name: required_attr(root, "name").map(QName::from)?,
        description: child_text(root, "description"),
        author: child_text(root, "author"),
        version: child_text(root, "version"),
        imports: parse_namespaces(root, "imports", "import")?,
        namespaces: parse_namespaces(root, "namespaces", "namespace")?,
        types: parse_classes(root, "types", "type")?,
        aspects: parse_classes(root, "aspects", "aspect")?,
    })
}

// ---------------------------------------------------------------------------
// Section parsers
// ---------------------------------------------------------------------------

fn parse_namespaces(
    parent: Node<'_, '_>,
    section: &str,
    entry: &str,
) -> Result<Vec<Namespace>, ModelParseError> {
    let Some(container) = child_element(parent, section) else {
        return Ok(vec![]);
    };
    child_elements(container, entry)
        .map(|node| {
            Ok(Namespace {
                prefix: required_attr(node, "prefix")?,
                uri: required_attr(node, "uri")?,
            })
        })
        .collect()
}

fn parse_classes(
    parent: Node<'_, '_>,
    section: &str,
    entry: &str,
) -> Result<Vec<ClassDef>, ModelParseError> {
    let Some(container) = child_element(parent, section) else {
        return Ok(vec![]);
    };
    child_elements(container, entry).map(parse_class).collect()
}

fn parse_class(node: Node<'_, '_>) -> Result<ClassDef, ModelParseError> {
    let properties = match child_element(node, "properties") {
        Some(container) => child_elements(container, "property")
            .map(parse_property)
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![],
    };

    Ok(ClassDef {
        name: required_attr(node, "name").map(QName::from)?,
        title: child_text(node, "title"),
        description: child_text(node, "description"),
        parent: child_text(node, "parent").map(QName::from),
        properties,
    })
}

fn parse_property(node: Node<'_, '_>) -> Result<PropertyDef, ModelParseError> {
    Ok(PropertyDef {
        name: required_attr(node, "name").map(QName::from)?,
        title: child_text(node, "title"),
        data_type: child_text(node, "type").unwrap_or_default(),
        mandatory: flag_text(node, "mandatory")?,
        multiple: flag_text(node, "multiple")?,
        default_value: child_text(node, "default"),
    })
}

// ---------------------------------------------------------------------------
// Node helpers
// ---------------------------------------------------------------------------

fn child_element<'a, 'i>(parent: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    parent
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn child_elements<'a, 'i>(
    parent: Node<'a, 'i>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'i>> {
    parent
        .children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text content of a named child element; `None` when the element is
/// absent or empty.
fn child_text(parent: Node<'_, '_>, name: &str) -> Option<String> {
    child_element(parent, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

fn flag_text(parent: Node<'_, '_>, name: &str) -> Result<bool, ModelParseError> {
    match child_text(parent, name) {
        None => Ok(false),
        Some(text) => match text.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ModelParseError::InvalidFlag {
                element: name.to_owned(),
                value: other.to_owned(),
            }),
        },
    }
}

fn required_attr(node: Node<'_, '_>, name: &str) -> Result<String, ModelParseError> {
    node.attribute(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ModelParseError::MissingAttribute {
            element: node.tag_name().name().to_owned(),
            attribute: name.to_owned(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const LIBRARY_MODEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model name="acme:library" xmlns="http://acme.example/model/1.0">
    <description>Library content model</description>
    <author>Acme</author>
    <version>1.2</version>
    <imports>
        <import uri="http://acme.example/dictionary" prefix="d"/>
    </imports>
    <namespaces>
        <namespace uri="http://acme.example/library" prefix="acme"/>
    </namespaces>
    <types>
        <type name="acme:book">
            <title>Book</title>
            <parent>acme:item</parent>
            <properties>
                <property name="acme:isbn">
                    <title>ISBN</title>
                    <type>d:text</type>
                    <mandatory>true</mandatory>
                </property>
                <property name="acme:tags">
                    <type>d:text</type>
                    <multiple>true</multiple>
                    <default>unfiled</default>
                </property>
            </properties>
        </type>
    </types>
    <aspects>
        <aspect name="acme:loanable">
            <title>Loanable</title>
            <properties>
                <property name="acme:dueDate">
                    <type>d:date</type>
                </property>
            </properties>
        </aspect>
    </aspects>
</model>
"#;

    #[test]
    fn parses_full_model() {
        let model = parse_model(LIBRARY_MODEL).unwrap();
        assert_eq!(model.name, QName::from("acme:library"));
        assert_eq!(model.description.as_deref(), Some("Library content model"));
        assert_eq!(model.version.as_deref(), Some("1.2"));
        assert_eq!(model.imports.len(), 1);
        assert_eq!(model.namespaces[0].prefix, "acme");
        assert_eq!(model.types.len(), 1);
        assert_eq!(model.aspects.len(), 1);

        let book = &model.types[0];
        assert_eq!(book.parent, Some(QName::from("acme:item")));
        assert_eq!(book.properties.len(), 2);
        assert!(book.properties[0].mandatory);
        assert!(!book.properties[0].multiple);
        assert!(book.properties[1].multiple);
        assert_eq!(book.properties[1].default_value.as_deref(), Some("unfiled"));
    }

    #[test]
    fn minimal_model_needs_only_a_name() {
        let model = parse_model(r#"<model name="acme:empty"/>"#).unwrap();
        assert_eq!(model.name, QName::from("acme:empty"));
        assert!(model.types.is_empty());
        assert!(model.aspects.is_empty());
    }

    #[test]
    fn rejects_non_xml_input() {
        let err = parse_model("this is not a model").unwrap_err();
        assert!(matches!(err, ModelParseError::Xml(_)));
    }

    #[test]
    fn rejects_wrong_root_element() {
        let err = parse_model(r#"<registry name="x"/>"#).unwrap_err();
        assert!(matches!(
            err,
            ModelParseError::UnexpectedRoot { found } if found == "registry"
        ));
    }

    #[rstest]
    #[case(r#"<model/>"#, "model")]
    #[case(r#"<model name="m"><types><type/></types></model>"#, "type")]
    #[case(
        r#"<model name="m"><namespaces><namespace prefix="p"/></namespaces></model>"#,
        "namespace"
    )]
    fn rejects_missing_required_attributes(#[case] source: &str, #[case] element: &str) {
        let err = parse_model(source).unwrap_err();
        assert!(matches!(
            err,
            ModelParseError::MissingAttribute { element: e, .. } if e == element
        ));
    }

    #[test]
    fn rejects_bad_boolean_flag() {
        let source = r#"<model name="m"><types><type name="t"><properties>
            <property name="p"><mandatory>yes</mandatory></property>
        </properties></type></types></model>"#;
        let err = parse_model(source).unwrap_err();
        assert!(matches!(
            err,
            ModelParseError::InvalidFlag { value, .. } if value == "yes"
        ));
    }

    #[test]
    fn bytes_must_be_utf8() {
        let err = parse_model_bytes(&[0xFF, 0xFE, 0x00]).unwrap_err();
        assert!(matches!(err, ModelParseError::Utf8(_)));
    }

    #[test]
    fn empty_name_attribute_counts_as_missing() {
        let err = parse_model(r#"<model name="  "/>"#).unwrap_err();
        assert!(matches!(err, ModelParseError::MissingAttribute { .. }));
    }
}

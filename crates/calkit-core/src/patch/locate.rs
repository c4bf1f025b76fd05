//! Structural search for the object property a patch should land on
//!
//! Config files are authored freely: flat-config formats wrap several
//! config objects in a top-level array, plugin presets nest objects
//! arbitrarily. There is no fixed path to `content`, `rules`, or
//! `extends`, so the locator scans every object literal in document
//! order instead of assuming a shape.

use tree_sitter::Node;

use super::document::{walk_preorder, ConfigDocument};
use super::PatchError;

/// Where a patch lands: an object that already declares the property,
/// or the first object literal when nothing declares it yet.
#[derive(Debug, Clone, Copy)]
pub enum Target<'tree> {
    Declared {
        object: Node<'tree>,
        pair: Node<'tree>,
    },
    Absent {
        object: Node<'tree>,
    },
}

/// Unquoted name of a pair's key, when it is a plain or quoted key
pub(crate) fn key_name<'doc>(doc: &'doc ConfigDocument, pair: Node<'_>) -> Option<&'doc str> {
    let key = pair.child_by_field_name("key")?;
    let text = doc.text_of(key);
    match key.kind() {
        "string" => Some(text.trim_matches(|c| c == '"' || c == '\'')),
        "property_identifier" => Some(text),
        _ => None,
    }
}

/// The pair directly declaring `name` on `object`, if any
pub(crate) fn property_of<'tree>(
    doc: &ConfigDocument,
    object: Node<'tree>,
    name: &str,
) -> Option<Node<'tree>> {
    let mut cursor = object.walk();
    let found = object
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "pair")
        .find(|pair| key_name(doc, *pair) == Some(name));
    found
}

/// Find the object literal that should receive `property`.
///
/// The first object in document order that directly declares the
/// property wins. When no object declares it, the first object literal
/// becomes the insertion point and the property is synthesized fresh.
/// A document with no object literal at all is a fatal input-shape
/// error; nothing is written in that case.
pub fn locate_property<'doc>(
    doc: &'doc ConfigDocument,
    property: &str,
) -> Result<Target<'doc>, PatchError> {
    let mut first_object = None;
    for node in walk_preorder(doc.root()) {
        if node.kind() != "object" {
            continue;
        }
        if first_object.is_none() {
            first_object = Some(node);
        }
        if let Some(pair) = property_of(doc, node, property) {
            return Ok(Target::Declared { object: node, pair });
        }
    }
    match first_object {
        Some(object) => Ok(Target::Absent { object }),
        None => Err(PatchError::StructuralNotFound {
            property: property.to_string(),
            path: doc.path().to_path_buf(),
        }),
    }
}

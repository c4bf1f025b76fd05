//! Repeat-safe edit planning against a located config property
//!
//! Each invocation plans at most one text edit. Planning no edit when
//! the desired state is already present is what makes a re-run of the
//! CLI leave the file byte-identical.

use tree_sitter::Node;

use super::document::{ConfigDocument, Edit, QuoteStyle};
use super::locate::{property_of, Target};
use super::PatchError;

/// What the caller wants present on the target property
#[derive(Debug, Clone)]
pub enum Desired {
    /// Entries that must appear in an array-valued property, such as
    /// the `content` globs of a Tailwind config
    ArrayEntries(Vec<String>),

    /// Entries for a property that historically may be a bare string
    /// or an array (`extends`); synthesized fresh as a plain string
    /// when there is exactly one entry
    StringOrArray(Vec<String>),

    /// A key/value upsert into a map-valued property (`rules`); an
    /// existing value for the key is overwritten, not duplicated
    Rule { key: String, value: String },
}

/// Outcome of one patch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The desired state was already present; nothing was written
    Unchanged,
    /// The document was edited
    Patched,
    /// A best-effort patch gave up and told the user to hand-edit
    Skipped,
}

/// Plan the single edit (if any) that brings `target` to the desired
/// state, quoting synthesized strings with the document's style.
pub fn plan(
    doc: &ConfigDocument,
    target: &Target<'_>,
    property: &str,
    desired: &Desired,
    quotes: QuoteStyle,
) -> Result<Option<Edit>, PatchError> {
    match target {
        Target::Absent { object } => {
            let pair_text = format!("{}: {}", property, initializer_text(desired, quotes));
            Ok(Some(insert_pair(doc, *object, &pair_text)))
        }
        Target::Declared { pair, .. } => {
            let value = pair
                .child_by_field_name("value")
                .ok_or_else(|| unsupported(doc, property))?;
            match desired {
                Desired::ArrayEntries(entries) | Desired::StringOrArray(entries) => {
                    plan_entries(doc, value, property, entries, quotes)
                }
                Desired::Rule { key, value: rule_value } => {
                    plan_rule(doc, value, property, key, rule_value, quotes)
                }
            }
        }
    }
}

fn unsupported(doc: &ConfigDocument, property: &str) -> PatchError {
    PatchError::UnsupportedShape {
        property: property.to_string(),
        path: doc.path().to_path_buf(),
    }
}

/// Initializer for a property synthesized from scratch
fn initializer_text(desired: &Desired, quotes: QuoteStyle) -> String {
    match desired {
        Desired::ArrayEntries(entries) => array_literal(entries, quotes),
        Desired::StringOrArray(entries) => match entries.as_slice() {
            [single] => quotes.quote(single),
            _ => array_literal(entries, quotes),
        },
        Desired::Rule { key, value } => {
            format!("{{ {}: {} }}", quotes.quote(key), quotes.quote(value))
        }
    }
}

fn array_literal(entries: &[String], quotes: QuoteStyle) -> String {
    let quoted: Vec<String> = entries.iter().map(|e| quotes.quote(e)).collect();
    format!("[{}]", quoted.join(", "))
}

fn array_elements(array: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = array.walk();
    array
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// Append-only handling for array-valued properties, plus the
/// string-to-array upgrade for the bare-string `extends` form.
fn plan_entries(
    doc: &ConfigDocument,
    value: Node<'_>,
    property: &str,
    entries: &[String],
    quotes: QuoteStyle,
) -> Result<Option<Edit>, PatchError> {
    match value.kind() {
        "array" => {
            let elements = array_elements(value);
            // Membership is substring containment against existing
            // element source text: historical entries may be quoted
            // differently than what we would synthesize today.
            let missing: Vec<&String> = entries
                .iter()
                .filter(|entry| {
                    !elements
                        .iter()
                        .any(|el| doc.text_of(*el).contains(entry.as_str()))
                })
                .collect();
            if missing.is_empty() {
                return Ok(None);
            }
            let appended: Vec<String> = missing.iter().map(|e| quotes.quote(e)).collect();
            let edit = match elements.last() {
                Some(last) => Edit::insert(last.end_byte(), format!(", {}", appended.join(", "))),
                None => Edit::insert(value.start_byte() + 1, appended.join(", ")),
            };
            Ok(Some(edit))
        }
        "string" => {
            // Upgrade `extends: "x"` to `extends: ["x", "y"]`, keeping
            // the original literal verbatim and de-duplicating on
            // exact source text.
            let mut parts: Vec<String> = vec![doc.text_of(value).to_string()];
            for entry in entries {
                let quoted = quotes.quote(entry);
                if !parts.contains(&quoted) && !parts[0].contains(entry.as_str()) {
                    parts.push(quoted);
                }
            }
            if parts.len() == 1 {
                return Ok(None);
            }
            Ok(Some(Edit::replace(
                value.byte_range(),
                format!("[{}]", parts.join(", ")),
            )))
        }
        _ => Err(unsupported(doc, property)),
    }
}

/// Pure upsert for map-valued properties: overwrite the value when the
/// key exists, insert a new pair otherwise.
fn plan_rule(
    doc: &ConfigDocument,
    value: Node<'_>,
    property: &str,
    key: &str,
    rule_value: &str,
    quotes: QuoteStyle,
) -> Result<Option<Edit>, PatchError> {
    if value.kind() != "object" {
        return Err(unsupported(doc, property));
    }
    let desired_value = quotes.quote(rule_value);
    match property_of(doc, value, key) {
        Some(pair) => {
            let current = pair
                .child_by_field_name("value")
                .ok_or_else(|| unsupported(doc, property))?;
            let current_text = doc.text_of(current);
            if current_text.trim_matches(|c| c == '"' || c == '\'') == rule_value {
                return Ok(None);
            }
            Ok(Some(Edit::replace(current.byte_range(), desired_value)))
        }
        None => {
            let pair_text = format!("{}: {}", quotes.quote(key), desired_value);
            Ok(Some(insert_pair(doc, value, &pair_text)))
        }
    }
}

/// Insert a `name: value` pair into an object literal, matching the
/// object's layout: inline objects stay inline, multiline objects get
/// the new pair on its own line at the last property's indentation.
fn insert_pair(doc: &ConfigDocument, object: Node<'_>, pair_text: &str) -> Edit {
    let members: Vec<Node<'_>> = {
        let mut cursor = object.walk();
        object
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect()
    };
    match members.last() {
        None => Edit::replace(object.byte_range(), format!("{{ {} }}", pair_text)),
        Some(last) => {
            if doc.text_of(object).contains('\n') {
                let indent = line_indent(doc.source(), last.start_byte());
                Edit::insert(last.end_byte(), format!(",\n{}{}", indent, pair_text))
            } else {
                Edit::insert(last.end_byte(), format!(", {}", pair_text))
            }
        }
    }
}

/// Leading whitespace of the line containing byte offset `at`
fn line_indent(source: &str, at: usize) -> String {
    let line_start = source[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    source[line_start..at]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::apply_desired;
    use std::path::PathBuf;

    fn doc(source: &str) -> ConfigDocument {
        ConfigDocument::parse(PathBuf::from("test.config.js"), source.to_string()).unwrap()
    }

    fn run(source: &str, property: &str, desired: &Desired) -> (String, Mutation) {
        let mut d = doc(source);
        let mutation = apply_desired(&mut d, property, desired).unwrap();
        (d.source().to_string(), mutation)
    }

    fn globs(entries: &[&str]) -> Desired {
        Desired::ArrayEntries(entries.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_appends_missing_array_entry() {
        let (out, mutation) = run(
            "module.exports = { content: [\"./index.html\"] }",
            "content",
            &globs(&["./src/**/*.tsx"]),
        );
        assert_eq!(mutation, Mutation::Patched);
        assert_eq!(
            out,
            "module.exports = { content: [\"./index.html\", \"./src/**/*.tsx\"] }"
        );
    }

    #[test]
    fn test_array_upsert_does_not_duplicate() {
        let source = "module.exports = { content: [\"./src/**/*.tsx\"] }";
        let (out, mutation) = run(source, "content", &globs(&["./src/**/*.tsx"]));
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(out, source);
        assert_eq!(out.matches("./src/**/*.tsx").count(), 1);
    }

    #[test]
    fn test_second_run_is_identical() {
        let (first, _) = run(
            "module.exports = { content: [\"./index.html\"] }",
            "content",
            &globs(&["./src/**/*.tsx"]),
        );
        let (second, mutation) = run(&first, "content", &globs(&["./src/**/*.tsx"]));
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(second, first);
    }

    #[test]
    fn test_inserted_strings_match_single_quote_style() {
        let (out, _) = run(
            "module.exports = { content: ['./index.html'] }",
            "content",
            &globs(&["./src/**/*.tsx"]),
        );
        assert!(out.contains("'./src/**/*.tsx'"));
        assert!(!out.contains('"'));
    }

    #[test]
    fn test_appends_into_empty_array() {
        let (out, _) = run(
            "module.exports = { content: [] }",
            "content",
            &globs(&["./a", "./b"]),
        );
        assert_eq!(out, "module.exports = { content: [\"./a\", \"./b\"] }");
    }

    #[test]
    fn test_appends_after_last_element_of_multiline_array() {
        let source = "module.exports = {\n  content: [\n    \"./index.html\",\n  ],\n}\n";
        let (out, _) = run(source, "content", &globs(&["./src/**/*.tsx"]));
        assert!(out.contains("\"./index.html\", \"./src/**/*.tsx\","));
        // untouched regions survive byte-for-byte
        assert!(out.ends_with("],\n}\n"));
    }

    #[test]
    fn test_upgrades_extends_string_to_array() {
        let (out, mutation) = run(
            "module.exports = { extends: \"next/core-web-vitals\" }",
            "extends",
            &Desired::StringOrArray(vec!["next/babel".to_string()]),
        );
        assert_eq!(mutation, Mutation::Patched);
        assert_eq!(
            out,
            "module.exports = { extends: [\"next/core-web-vitals\", \"next/babel\"] }"
        );
        assert_eq!(out.matches("next/babel").count(), 1);
        assert_eq!(out.matches("next/core-web-vitals").count(), 1);
    }

    #[test]
    fn test_extends_string_already_present_is_unchanged() {
        let source = "module.exports = { extends: \"next/babel\" }";
        let (out, mutation) = run(
            source,
            "extends",
            &Desired::StringOrArray(vec!["next/babel".to_string()]),
        );
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(out, source);
    }

    #[test]
    fn test_extends_array_appends_once() {
        let (out, _) = run(
            "module.exports = { extends: [\"eslint:recommended\"] }",
            "extends",
            &Desired::StringOrArray(vec!["next/babel".to_string()]),
        );
        let (again, mutation) = run(
            &out,
            "extends",
            &Desired::StringOrArray(vec!["next/babel".to_string()]),
        );
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(again, out);
    }

    #[test]
    fn test_rule_upsert_overwrites_existing_value() {
        let (out, mutation) = run(
            "module.exports = { rules: { \"react/prop-types\": \"warn\" } }",
            "rules",
            &Desired::Rule {
                key: "react/prop-types".to_string(),
                value: "off".to_string(),
            },
        );
        assert_eq!(mutation, Mutation::Patched);
        assert_eq!(
            out,
            "module.exports = { rules: { \"react/prop-types\": \"off\" } }"
        );
        assert_eq!(out.matches("react/prop-types").count(), 1);
    }

    #[test]
    fn test_rule_upsert_inserts_missing_key() {
        let (out, _) = run(
            "module.exports = { rules: { semi: \"error\" } }",
            "rules",
            &Desired::Rule {
                key: "react/prop-types".to_string(),
                value: "off".to_string(),
            },
        );
        assert_eq!(
            out,
            "module.exports = { rules: { semi: \"error\", \"react/prop-types\": \"off\" } }"
        );
    }

    #[test]
    fn test_rule_upsert_is_idempotent() {
        let source = "module.exports = { rules: { \"react/prop-types\": \"off\" } }";
        let (out, mutation) = run(
            source,
            "rules",
            &Desired::Rule {
                key: "react/prop-types".to_string(),
                value: "off".to_string(),
            },
        );
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(out, source);
    }

    #[test]
    fn test_synthesizes_rules_into_bare_object() {
        let (out, _) = run(
            "module.exports = { plugins: [] }",
            "rules",
            &Desired::Rule {
                key: "react/prop-types".to_string(),
                value: "off".to_string(),
            },
        );
        assert_eq!(
            out,
            "module.exports = { plugins: [], rules: { \"react/prop-types\": \"off\" } }"
        );
    }

    #[test]
    fn test_synthesizes_extends_as_bare_string() {
        let (out, _) = run(
            "module.exports = { root: true }",
            "extends",
            &Desired::StringOrArray(vec!["next/babel".to_string()]),
        );
        assert_eq!(out, "module.exports = { root: true, extends: \"next/babel\" }");
    }

    #[test]
    fn test_synthesizes_into_multiline_object_with_indentation() {
        let source = "module.exports = {\n  theme: {\n    extend: {},\n  },\n  plugins: [],\n}\n";
        let (out, _) = run(source, "content", &globs(&["./src/**/*.tsx"]));
        assert!(out.contains("  plugins: [],\n  content: [\"./src/**/*.tsx\"],\n}\n"));
    }

    #[test]
    fn test_synthesizes_into_empty_object() {
        let (out, _) = run(
            "module.exports = {}",
            "content",
            &globs(&["./a"]),
        );
        assert_eq!(out, "module.exports = { content: [\"./a\"] }");
    }

    #[test]
    fn test_patches_rules_inside_flat_config_array() {
        let source =
            "export default [\n  { files: ['**/*.js'] },\n  { rules: { semi: 'error' } },\n];\n";
        let (out, _) = run(
            source,
            "rules",
            &Desired::Rule {
                key: "react/prop-types".to_string(),
                value: "off".to_string(),
            },
        );
        assert!(out.contains("{ rules: { semi: 'error', 'react/prop-types': 'off' } }"));
        // the first config object is left alone
        assert!(out.contains("{ files: ['**/*.js'] },"));
    }

    #[test]
    fn test_unsupported_initializer_shape() {
        let mut d = doc("module.exports = { content: resolveContent() }");
        let err = apply_desired(&mut d, "content", &globs(&["./a"])).unwrap_err();
        assert!(matches!(err, PatchError::UnsupportedShape { .. }));
    }
}

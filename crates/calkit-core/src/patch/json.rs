//! JSON-form ESLint config upserts
//!
//! `.eslintrc.json` files are structured data rather than scripts, so
//! they skip the tree-sitter path entirely: read, upsert the value,
//! and rewrite pretty-printed with two-space indent. The file is only
//! rewritten when a change is actually needed, which keeps a re-run
//! byte-identical.

use std::path::Path;

use serde_json::{Map, Value};

use super::{Mutation, PatchError};

fn read_value(path: &Path) -> Result<Value, PatchError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| PatchError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_value(path: &Path, value: &Value) -> Result<(), PatchError> {
    let mut rendered = serde_json::to_string_pretty(value).map_err(|source| PatchError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    rendered.push('\n');
    std::fs::write(path, rendered)?;
    Ok(())
}

fn root_object<'v>(
    value: &'v mut Value,
    property: &str,
    path: &Path,
) -> Result<&'v mut Map<String, Value>, PatchError> {
    value
        .as_object_mut()
        .ok_or_else(|| PatchError::StructuralNotFound {
            property: property.to_string(),
            path: path.to_path_buf(),
        })
}

/// Upsert a single rule value, overwriting any existing entry for the
/// key. The `rules` map is created when the config lacks one.
pub fn upsert_rule(path: &Path, key: &str, rule_value: &str) -> Result<Mutation, PatchError> {
    let mut config = read_value(path)?;
    let root = root_object(&mut config, "rules", path)?;
    let rules = root
        .entry("rules")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| PatchError::UnsupportedShape {
            property: "rules".to_string(),
            path: path.to_path_buf(),
        })?;
    if rules.get(key).and_then(Value::as_str) == Some(rule_value) {
        return Ok(Mutation::Unchanged);
    }
    rules.insert(key.to_string(), Value::String(rule_value.to_string()));
    write_value(path, &config)?;
    Ok(Mutation::Patched)
}

/// Ensure `entry` is present in `extends`, upgrading a bare string to
/// an array and never duplicating an existing entry.
pub fn add_extends(path: &Path, entry: &str) -> Result<Mutation, PatchError> {
    let mut config = read_value(path)?;
    let root = root_object(&mut config, "extends", path)?;
    let mut values: Vec<String> = match root.get("extends") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(_) => {
            return Err(PatchError::UnsupportedShape {
                property: "extends".to_string(),
                path: path.to_path_buf(),
            })
        }
    };
    if values.iter().any(|v| v == entry) {
        return Ok(Mutation::Unchanged);
    }
    values.push(entry.to_string());
    root.insert(
        "extends".to_string(),
        Value::Array(values.into_iter().map(Value::String).collect()),
    );
    write_value(path, &config)?;
    Ok(Mutation::Patched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".eslintrc.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_upsert_rule_overwrites() {
        let (_dir, path) = fixture("{\n  \"rules\": { \"react/prop-types\": \"warn\" }\n}\n");
        let mutation = upsert_rule(&path, "react/prop-types", "off").unwrap();
        assert_eq!(mutation, Mutation::Patched);
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("\"react/prop-types\": \"off\""));
        assert_eq!(saved.matches("react/prop-types").count(), 1);
    }

    #[test]
    fn test_upsert_rule_creates_rules_map() {
        let (_dir, path) = fixture("{\n  \"root\": true\n}\n");
        upsert_rule(&path, "react/prop-types", "off").unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("\"rules\""));
        assert!(saved.contains("\"react/prop-types\": \"off\""));
        assert!(saved.contains("\"root\": true"));
    }

    #[test]
    fn test_upsert_rule_second_run_is_byte_identical() {
        let (_dir, path) = fixture("{ \"rules\": {} }");
        upsert_rule(&path, "react/prop-types", "off").unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        let mutation = upsert_rule(&path, "react/prop-types", "off").unwrap();
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_add_extends_upgrades_string() {
        let (_dir, path) = fixture("{ \"extends\": \"next/core-web-vitals\" }");
        add_extends(&path, "next/babel").unwrap();
        let saved: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            saved["extends"],
            serde_json::json!(["next/core-web-vitals", "next/babel"])
        );
    }

    #[test]
    fn test_add_extends_skips_present_entry() {
        let (_dir, path) = fixture("{ \"extends\": [\"next/babel\"] }");
        let before = std::fs::read_to_string(&path).unwrap();
        let mutation = add_extends(&path, "next/babel").unwrap();
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_non_object_root_is_structural_error() {
        let (_dir, path) = fixture("[1, 2, 3]");
        let err = add_extends(&path, "next/babel").unwrap_err();
        assert!(matches!(err, PatchError::StructuralNotFound { .. }));
    }
}

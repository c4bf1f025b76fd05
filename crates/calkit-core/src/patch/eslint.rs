//! ESLint config patching for the installed calendar component
//!
//! Two concrete edits cover what the component needs:
//! - plain React projects get `react/prop-types: "off"` (the shipped
//!   component does not declare PropTypes)
//! - Next.js projects get `"next/babel"` in `extends`
//!
//! Both dispatch on file extension: `.json` configs go through the
//! serde upserts, script configs through the tree-sitter patcher.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::document::ConfigDocument;
use super::mutate::{Desired, Mutation};
use super::{apply_desired, json, PatchError, PatchSeverity};

const PROP_TYPES_RULE: &str = "react/prop-types";
const NEXT_BABEL_PRESET: &str = "next/babel";

/// An ESLint config file discovered in the consuming project
#[derive(Debug, Clone)]
pub struct EslintConfig {
    pub path: PathBuf,
}

impl EslintConfig {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn is_json(&self) -> bool {
        self.path.extension().is_some_and(|ext| ext == "json")
    }
}

/// Turn off `react/prop-types` for plain React projects
pub fn disable_prop_types(
    config: &EslintConfig,
    severity: PatchSeverity,
) -> Result<Mutation, PatchError> {
    run(severity, &config.path, || {
        if config.is_json() {
            return json::upsert_rule(&config.path, PROP_TYPES_RULE, "off");
        }
        let mut doc = ConfigDocument::load(&config.path)?;
        let mutation = apply_desired(
            &mut doc,
            "rules",
            &Desired::Rule {
                key: PROP_TYPES_RULE.to_string(),
                value: "off".to_string(),
            },
        )?;
        if mutation == Mutation::Patched {
            doc.save()?;
        }
        Ok(mutation)
    })
}

/// Add the `next/babel` preset for Next.js projects
pub fn add_next_babel(
    config: &EslintConfig,
    severity: PatchSeverity,
) -> Result<Mutation, PatchError> {
    run(severity, &config.path, || {
        if config.is_json() {
            return json::add_extends(&config.path, NEXT_BABEL_PRESET);
        }
        let mut doc = ConfigDocument::load(&config.path)?;
        let mutation = apply_desired(
            &mut doc,
            "extends",
            &Desired::StringOrArray(vec![NEXT_BABEL_PRESET.to_string()]),
        )?;
        if mutation == Mutation::Patched {
            doc.save()?;
        }
        Ok(mutation)
    })
}

fn run<F>(severity: PatchSeverity, path: &Path, patch: F) -> Result<Mutation, PatchError>
where
    F: FnOnce() -> Result<Mutation, PatchError>,
{
    match patch() {
        Ok(mutation) => Ok(mutation),
        Err(err) if severity == PatchSeverity::BestEffort => {
            eprintln!(
                "{} could not update {} automatically ({}). Edit your ESLint config by hand.",
                "Warning:".yellow(),
                path.display(),
                err
            );
            Ok(Mutation::Skipped)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str, contents: &str) -> (tempfile::TempDir, EslintConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        (dir, EslintConfig::new(path))
    }

    #[test]
    fn test_script_config_rule_patch_round_trip() {
        let (_dir, config) = fixture(
            ".eslintrc.cjs",
            "module.exports = {\n  rules: {\n    semi: 'error',\n  },\n};\n",
        );
        let mutation = disable_prop_types(&config, PatchSeverity::Fatal).unwrap();
        assert_eq!(mutation, Mutation::Patched);
        let first = std::fs::read_to_string(&config.path).unwrap();
        assert!(first.contains("'react/prop-types': 'off'"));

        let mutation = disable_prop_types(&config, PatchSeverity::Fatal).unwrap();
        assert_eq!(mutation, Mutation::Unchanged);
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), first);
    }

    #[test]
    fn test_json_config_dispatches_to_json_patch() {
        let (_dir, config) = fixture(".eslintrc.json", "{ \"extends\": \"next/core-web-vitals\" }");
        let mutation = add_next_babel(&config, PatchSeverity::Fatal).unwrap();
        assert_eq!(mutation, Mutation::Patched);
        let saved = std::fs::read_to_string(&config.path).unwrap();
        assert!(saved.contains("next/babel"));
    }

    #[test]
    fn test_best_effort_skips_on_structural_error() {
        let (_dir, config) = fixture("eslint.config.js", "export default 42;\n");
        let before = std::fs::read_to_string(&config.path).unwrap();
        let mutation = add_next_babel(&config, PatchSeverity::BestEffort).unwrap();
        assert_eq!(mutation, Mutation::Skipped);
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), before);
    }

    #[test]
    fn test_fatal_severity_propagates_structural_error() {
        let (_dir, config) = fixture("eslint.config.js", "export default 42;\n");
        let err = add_next_babel(&config, PatchSeverity::Fatal).unwrap_err();
        assert!(matches!(err, PatchError::StructuralNotFound { .. }));
    }
}

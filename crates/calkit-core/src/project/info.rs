//! Project layout detection and config file discovery
//!
//! Everything the installer needs to decide where files land and which
//! config files to patch: package manager, TypeScript usage, Next.js
//! routing flavor, src-dir layout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::package_manager::PackageManager;

/// ESLint config filenames, in discovery order
const ESLINT_SEARCH_PLACES: &[&str] = &[
    ".eslintrc.json",
    ".eslintrc.cjs",
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
    ".eslintrc.js",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub package_manager: PackageManager,
    pub is_src_dir: bool,
    pub is_tsx: bool,
    pub is_next: bool,
    pub is_using_app_dir: bool,
}

/// Detect project characteristics under `cwd`.
///
/// `Ok(None)` means no supported package manager could be found; the
/// caller reports that as a setup error.
pub fn detect(cwd: &Path) -> Result<Option<ProjectInfo>> {
    let Some(package_manager) = PackageManager::detect(cwd) else {
        return Ok(None);
    };

    let is_src_dir = cwd.join("src").is_dir();
    // Vite projects carry several tsconfig.* files; any of them marks
    // the project as TypeScript.
    let is_tsx = first_file_with_prefix(cwd, "tsconfig.")?.is_some();
    let is_next = first_file_with_prefix(cwd, "next.config.")?.is_some();
    let is_using_app_dir = is_next
        && if is_src_dir {
            cwd.join("src").join("app").is_dir()
        } else {
            cwd.join("app").is_dir()
        };

    Ok(Some(ProjectInfo {
        package_manager,
        is_src_dir,
        is_tsx,
        is_next,
        is_using_app_dir,
    }))
}

/// First `tailwind.config.*` directly under `cwd`, if any
pub fn tailwind_config_path(cwd: &Path) -> Result<Option<PathBuf>> {
    first_file_with_prefix(cwd, "tailwind.config.")
}

/// First ESLint config under `cwd`, following the search-places order
pub fn eslint_config_path(cwd: &Path) -> Option<PathBuf> {
    ESLINT_SEARCH_PLACES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.is_file())
}

fn first_file_with_prefix(cwd: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    let entries =
        std::fs::read_dir(cwd).with_context(|| format!("Failed to read {}", cwd.display()))?;
    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file()
            && entry.file_name().to_string_lossy().starts_with(prefix)
        {
            matches.push(entry.path());
        }
    }
    // read_dir order is platform-dependent
    matches.sort();
    Ok(matches.into_iter().next())
}

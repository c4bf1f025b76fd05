//! The `module.json` manifest written by `init` and read by `add`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::project::{PackageManager, ProjectInfo};

/// Manifest filename at the project root
pub const MODULE_MANIFEST: &str = "module.json";

/// Default remote the component sources are fetched from
pub const DEFAULT_COMPONENT_URL: &str =
    "https://raw.githubusercontent.com/calkit-dev/calendar-components/main/src/components";

/// Environment variable overriding the component source URL
pub const COMPONENT_URL_ENV: &str = "CALKIT_COMPONENT_URL";

/// Styling flavor of the installed component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleChoice {
    #[serde(rename = "CSS Modules")]
    CssModules,
    Tailwind,
}

impl StyleChoice {
    pub fn display_name(&self) -> &'static str {
        match self {
            StyleChoice::CssModules => "CSS Modules",
            StyleChoice::Tailwind => "Tailwind",
        }
    }

    /// Component folder for this flavor in the source repository
    pub fn folder(&self) -> &'static str {
        match self {
            StyleChoice::CssModules => "calendar-css-module",
            StyleChoice::Tailwind => "calendar-tw",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub package_manager: PackageManager,
    pub is_src_dir: bool,
    pub is_tsx: bool,
    pub is_next: bool,
    pub is_using_app_dir: bool,
    pub style_type: StyleChoice,
    pub path_resolve: String,
}

impl ModuleManifest {
    /// Build the manifest `init` writes for a detected project
    pub fn new(info: &ProjectInfo, style: StyleChoice, cli_version: &str) -> Self {
        let language = language_folder(info.is_tsx);
        Self {
            name: "Calendar".to_string(),
            version: cli_version.to_string(),
            description: "A customizable calendar component using Day.js".to_string(),
            package_manager: info.package_manager,
            is_src_dir: info.is_src_dir,
            is_tsx: info.is_tsx,
            is_next: info.is_next,
            is_using_app_dir: info.is_using_app_dir,
            style_type: style,
            path_resolve: format!("{}/{}/{}", component_base_url(), language, style.folder()),
        }
    }

    /// `<language>/<style>` folder the component variant lives under
    pub fn variant_path(&self) -> String {
        format!("{}/{}", language_folder(self.is_tsx), self.style_type.folder())
    }

    /// Directory the component files are installed into
    pub fn install_dir(&self, cwd: &Path) -> PathBuf {
        let base = if self.is_src_dir {
            cwd.join("src")
        } else {
            cwd.to_path_buf()
        };
        base.join("module").join("calendar")
    }

    pub fn manifest_path(cwd: &Path) -> PathBuf {
        cwd.join(MODULE_MANIFEST)
    }

    /// Read `<cwd>/module.json`, the marker that `init` has run
    pub fn load(cwd: &Path) -> Result<Self> {
        let path = Self::manifest_path(cwd);
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("{} not found. Run `calkit init` first.", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the manifest, pretty-printed, overwriting any existing one
    pub fn write(&self, cwd: &Path) -> Result<PathBuf> {
        let path = Self::manifest_path(cwd);
        let mut rendered =
            serde_json::to_string_pretty(self).context("Failed to serialize module.json")?;
        rendered.push('\n');
        std::fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

fn language_folder(is_tsx: bool) -> &'static str {
    if is_tsx {
        "typescript"
    } else {
        "javascript"
    }
}

/// Component source base URL (env override, then the built-in default)
pub fn component_base_url() -> String {
    std::env::var(COMPONENT_URL_ENV).unwrap_or_else(|_| DEFAULT_COMPONENT_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::PackageManager;

    fn info() -> ProjectInfo {
        ProjectInfo {
            package_manager: PackageManager::Pnpm,
            is_src_dir: true,
            is_tsx: true,
            is_next: true,
            is_using_app_dir: true,
        }
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = ModuleManifest::new(&info(), StyleChoice::Tailwind, "0.1.0");
        manifest.write(dir.path()).unwrap();

        let loaded = ModuleManifest::load(dir.path()).unwrap();
        assert_eq!(loaded.name, "Calendar");
        assert_eq!(loaded.package_manager, PackageManager::Pnpm);
        assert_eq!(loaded.style_type, StyleChoice::Tailwind);
        assert!(loaded.is_using_app_dir);
    }

    #[test]
    fn test_written_json_uses_original_field_casing() {
        let dir = tempfile::tempdir().unwrap();
        ModuleManifest::new(&info(), StyleChoice::CssModules, "0.1.0")
            .write(dir.path())
            .unwrap();
        let raw = std::fs::read_to_string(dir.path().join(MODULE_MANIFEST)).unwrap();
        assert!(raw.contains("\"packageManager\": \"pnpm\""));
        assert!(raw.contains("\"isSrcDir\": true"));
        assert!(raw.contains("\"styleType\": \"CSS Modules\""));
        assert!(raw.contains("\"pathResolve\""));
    }

    #[test]
    fn test_variant_path_and_install_dir() {
        let manifest = ModuleManifest::new(&info(), StyleChoice::Tailwind, "0.1.0");
        assert_eq!(manifest.variant_path(), "typescript/calendar-tw");
        assert_eq!(
            manifest.install_dir(Path::new("/proj")),
            PathBuf::from("/proj/src/module/calendar")
        );

        let mut flat = manifest.clone();
        flat.is_src_dir = false;
        flat.is_tsx = false;
        assert_eq!(flat.variant_path(), "javascript/calendar-tw");
        assert_eq!(
            flat.install_dir(Path::new("/proj")),
            PathBuf::from("/proj/module/calendar")
        );
    }

    #[test]
    fn test_load_without_init_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModuleManifest::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("calkit init"));
    }
}

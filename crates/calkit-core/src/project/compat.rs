//! Environment and dependency compatibility checks

use std::process::Command;

use anyhow::Result;
use semver::{Version, VersionReq};

use super::package_json::PackageJson;

/// Oldest Node.js the component toolchain supports
pub const MIN_NODE_VERSION: &str = "14.0.0";

/// dayjs range the calendar component is written against
pub const REQUIRED_DAYJS_VERSION: &str = "^1.10.4";

/// State of a dependency the component needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    Missing,
    Outdated { installed: String },
    Satisfied,
}

/// Result of probing the local Node.js runtime
#[derive(Debug, Clone)]
pub enum NodeStatus {
    /// node responds and satisfies [`MIN_NODE_VERSION`]
    Supported { version: String },
    /// node responds but is older than [`MIN_NODE_VERSION`]
    TooOld { version: String },
    /// node is not on PATH or did not report a parseable version
    NotFound,
}

/// Frameworks the component can be installed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    NextApp,
    NextPages,
    React,
}

impl Framework {
    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::NextApp => "app-router",
            Framework::NextPages => "pages-router",
            Framework::React => "react",
        }
    }

    /// Whether components may render as React Server Components
    pub fn is_rsc(&self) -> bool {
        matches!(self, Framework::NextApp)
    }
}

/// Resolve the project's framework, failing when it is neither a React
/// nor a Next.js project.
pub fn resolve_framework(
    pkg: &PackageJson,
    is_next: bool,
    is_using_app_dir: bool,
) -> Result<Framework> {
    if pkg.has_dependency("next") || is_next {
        return Ok(if is_using_app_dir {
            Framework::NextApp
        } else {
            Framework::NextPages
        });
    }
    if pkg.has_dependency("react") {
        return Ok(Framework::React);
    }
    anyhow::bail!("Incompatible project: the target must be a React or Next.js project.")
}

/// Probe `node --version` and compare against [`MIN_NODE_VERSION`]
pub fn check_node() -> NodeStatus {
    let output = match Command::new("node").arg("--version").output() {
        Ok(out) if out.status.success() => out,
        _ => return NodeStatus::NotFound,
    };
    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let version = match Version::parse(raw.strip_prefix('v').unwrap_or(&raw)) {
        Ok(v) => v,
        Err(_) => return NodeStatus::NotFound,
    };
    if version < Version::new(14, 0, 0) {
        NodeStatus::TooOld { version: raw }
    } else {
        NodeStatus::Supported { version: raw }
    }
}

/// Compare the project's declared dayjs against [`REQUIRED_DAYJS_VERSION`]
pub fn dayjs_status(pkg: &PackageJson) -> DependencyStatus {
    let Some(declared) = pkg.dependency("dayjs") else {
        return DependencyStatus::Missing;
    };
    let cleaned = declared.trim_start_matches(['^', '~', '>', '=', ' ']);
    let Ok(installed) = Version::parse(cleaned) else {
        // unrecognized range ("latest", workspace aliases): leave alone
        return DependencyStatus::Satisfied;
    };
    let Ok(required) = VersionReq::parse(REQUIRED_DAYJS_VERSION) else {
        return DependencyStatus::Satisfied;
    };
    if required.matches(&installed) {
        DependencyStatus::Satisfied
    } else {
        DependencyStatus::Outdated {
            installed: declared.to_string(),
        }
    }
}

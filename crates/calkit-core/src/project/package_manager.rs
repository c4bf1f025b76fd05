//! Package manager detection for the consuming project

use std::fmt;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

/// Package managers the installer knows how to talk about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// The verb this manager uses to add a dependency
    pub fn install_verb(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            PackageManager::Pnpm | PackageManager::Yarn => "add",
        }
    }

    fn dev_flag(&self) -> &'static str {
        match self {
            PackageManager::Npm => "--save-dev",
            PackageManager::Pnpm => "-D",
            PackageManager::Yarn => "--dev",
        }
    }

    /// Shell line that would add `packages` to the project
    pub fn add_command(&self, packages: &str, dev: bool) -> String {
        if dev {
            format!(
                "{} {} {} {}",
                self.display_name(),
                self.install_verb(),
                self.dev_flag(),
                packages
            )
        } else {
            format!("{} {} {}", self.display_name(), self.install_verb(), packages)
        }
    }

    /// Detect the project's manager: lockfiles first, then PATH probing
    pub fn detect(cwd: &Path) -> Option<Self> {
        for (lockfile, manager) in [
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("package-lock.json", PackageManager::Npm),
        ] {
            if cwd.join(lockfile).exists() {
                return Some(manager);
            }
        }
        [PackageManager::Npm, PackageManager::Pnpm, PackageManager::Yarn]
            .into_iter()
            .find(PackageManager::is_available)
    }

    /// Check the manager responds on PATH
    pub fn is_available(&self) -> bool {
        Command::new(self.display_name())
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

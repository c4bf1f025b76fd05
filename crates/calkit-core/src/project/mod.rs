//! Target project inspection
//!
//! This module provides:
//! - Package manager detection (lockfiles, PATH probing)
//! - Project layout flags (src dir, TypeScript, Next.js router)
//! - Config file discovery (tailwind.config.*, ESLint search places)
//! - Environment and dependency compatibility checks

pub mod compat;
pub mod info;
pub mod package_json;
pub mod package_manager;

pub use compat::{
    check_node, dayjs_status, resolve_framework, DependencyStatus, Framework, NodeStatus,
};
pub use info::{detect, eslint_config_path, tailwind_config_path, ProjectInfo};
pub use package_json::{read_package_json, PackageJson};
pub use package_manager::PackageManager;

//! Idempotent patching of user-authored config files
//!
//! This module provides:
//! - Parsed config documents with quote-style detection (`document`)
//! - Structural property search over arbitrary config shapes (`locate`)
//! - Repeat-safe edit planning (`mutate`)
//! - JSON-form upserts for `.eslintrc.json` style files (`json`)
//! - The two concrete patchers the installer needs (`tailwind`, `eslint`)
//!
//! A patch either completes and is saved, or fails before any write:
//! all mutation happens in memory on the parsed tree, and the one
//! write-back is the sole observable side effect.

pub mod document;
pub mod eslint;
pub mod json;
pub mod locate;
pub mod mutate;
pub mod tailwind;

use std::path::PathBuf;

use thiserror::Error;

pub use document::{detect_quote_style, ConfigDocument, Edit, QuoteStyle};
pub use locate::{locate_property, Target};
pub use mutate::{Desired, Mutation};

/// How a failed patch is reported to the user.
///
/// The Tailwind patch is always fatal; the ESLint patch defaults to
/// best-effort because a stale lint config is recoverable by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchSeverity {
    /// Abort the whole operation on failure
    Fatal,
    /// Warn, tell the user to hand-edit, and continue
    BestEffort,
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("no object literal in {} can receive `{property}`", .path.display())]
    StructuralNotFound { property: String, path: PathBuf },

    #[error("`{property}` in {} has an initializer this tool cannot patch", .path.display())]
    UnsupportedShape { property: String, path: PathBuf },

    #[error("failed to parse {} as a JavaScript module", .path.display())]
    Parse { path: PathBuf },

    #[error("{} is not valid JSON", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Locate `property` in `doc` and bring it to the desired state.
///
/// Runs the full detect-locate-plan-splice sequence in memory; the
/// caller decides when to [`ConfigDocument::save`]. Invoking this again
/// with the same desired entries on the patched document plans no edit.
pub fn apply_desired(
    doc: &mut ConfigDocument,
    property: &str,
    desired: &Desired,
) -> Result<Mutation, PatchError> {
    let quotes = detect_quote_style(doc);
    let planned = {
        let target = locate_property(doc, property)?;
        mutate::plan(doc, &target, property, desired, quotes)?
    };
    match planned {
        Some(edit) => {
            doc.apply(edit)?;
            Ok(Mutation::Patched)
        }
        None => Ok(Mutation::Unchanged),
    }
}

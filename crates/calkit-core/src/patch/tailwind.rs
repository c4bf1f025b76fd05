//! Tailwind config patching: register the calendar sources in `content`

use std::path::Path;

use super::mutate::{Desired, Mutation};
use super::{apply_desired, ConfigDocument, PatchError};

/// Glob the installed component's sources live under
pub fn calendar_content_glob(is_src_dir: bool) -> &'static str {
    if is_src_dir {
        "./src/module/calendar/**/*.{js,ts,jsx,tsx}"
    } else {
        "./module/calendar/**/*.{js,ts,jsx,tsx}"
    }
}

/// Append `globs` to the config's `content` array and save.
///
/// There is no best-effort mode here: failures propagate to the
/// caller, and an unsaved failure leaves the original file intact.
pub fn add_content_globs(path: &Path, globs: &[String]) -> Result<Mutation, PatchError> {
    let mut doc = ConfigDocument::load(path)?;
    let mutation = apply_desired(&mut doc, "content", &Desired::ArrayEntries(globs.to_vec()))?;
    if mutation == Mutation::Patched {
        doc.save()?;
    }
    Ok(mutation)
}

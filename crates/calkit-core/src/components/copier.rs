//! Writing fetched component files into the target project

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

use super::fetcher::ComponentFetcher;

/// Fetch every file of `variant` and write it under `target_dir`,
/// creating intermediate directories as needed. Returns the relative
/// paths written.
pub async fn install_component(
    fetcher: &ComponentFetcher,
    variant: &str,
    files: &[&str],
    target_dir: &Path,
) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create component directory")?;

    let mut written = Vec::new();
    for file in files {
        let target_path = target_dir.join(file);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = fetcher.fetch_file(variant, file).await?;
        fs::write(&target_path, &content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        written.push((*file).to_string());
    }

    Ok(written)
}

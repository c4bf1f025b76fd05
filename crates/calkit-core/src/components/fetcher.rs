//! Component source fetching from remote raw files or a local directory
//!
//! Remote sources serve the component files individually (raw-file
//! host); local sources point at a checkout of the component
//! repository for development. Both address files the same way:
//! `<variant>/<relative file>`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use url::Url;

use crate::manifest::component_base_url;

/// Where component files come from
#[derive(Debug, Clone)]
pub enum ComponentSource {
    Remote(Url),
    Local(PathBuf),
}

impl ComponentSource {
    /// Remote source from the env override or the built-in default
    pub fn from_env() -> Result<Self> {
        let url_str = component_base_url();
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid component URL: {}", url_str))?;
        Ok(Self::Remote(url))
    }

    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Fetches individual component files by variant-relative path
pub struct ComponentFetcher {
    source: ComponentSource,
    client: reqwest::Client,
}

impl ComponentFetcher {
    pub fn new(source: ComponentSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Build a URL by appending slash-separated path segments,
    /// preserving query parameters
    fn build_url(base: &Url, relative: &str) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?;
            segments.pop_if_empty();
            for part in relative.split('/') {
                segments.push(part);
            }
        }
        Ok(url)
    }

    /// Fetch one file of a component variant, e.g. variant
    /// `typescript/calendar-tw` and file `body/CalendarBody.tsx`
    pub async fn fetch_file(&self, variant: &str, file: &str) -> Result<Vec<u8>> {
        let relative = format!("{}/{}", variant, file);
        match &self.source {
            ComponentSource::Remote(base) => {
                let url = Self::build_url(base, &relative)?;
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch {}", url))?;
                if !response.status().is_success() {
                    anyhow::bail!("Failed to fetch {}: HTTP {}", url, response.status());
                }
                Ok(response.bytes().await?.to_vec())
            }
            ComponentSource::Local(dir) => {
                let path = dir.join(&relative);
                fs::read(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_appends_segments() {
        let base = Url::parse("https://raw.example.com/components?ref=main").unwrap();
        let url =
            ComponentFetcher::build_url(&base, "typescript/calendar-tw/Calendar.tsx").unwrap();
        assert_eq!(
            url.as_str(),
            "https://raw.example.com/components/typescript/calendar-tw/Calendar.tsx?ref=main"
        );
    }

    #[tokio::test]
    async fn test_local_source_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let variant_dir = dir.path().join("javascript/calendar-tw");
        std::fs::create_dir_all(&variant_dir).unwrap();
        std::fs::write(variant_dir.join("Calendar.jsx"), "export default 1;\n").unwrap();

        let fetcher = ComponentFetcher::new(
            ComponentSource::local(dir.path().to_path_buf()),
            "calkit-test",
        );
        let bytes = fetcher
            .fetch_file("javascript/calendar-tw", "Calendar.jsx")
            .await
            .unwrap();
        assert_eq!(bytes, b"export default 1;\n");
    }

    #[tokio::test]
    async fn test_local_source_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = ComponentFetcher::new(
            ComponentSource::local(dir.path().to_path_buf()),
            "calkit-test",
        );
        let err = fetcher
            .fetch_file("javascript/calendar-tw", "Calendar.jsx")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}

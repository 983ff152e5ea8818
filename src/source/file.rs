//! File-based metrics source.
//!
//! Reads a [`MetricsBundle`] from a JSON file, typically one written by
//! `metrics-dashboard --export`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::{MetricsBundle, MetricsSource};

/// A source that re-reads a bundle file on every fetch.
///
/// The file is read as-is; requested trend metrics the file lacks are simply
/// absent from the result.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MetricsSource for FileSource {
    async fn fetch(&self, _trend_metrics: &[&str], _days: u32) -> anyhow::Result<MetricsBundle> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Read error: {}", self.path.display()))?;
        let bundle: MetricsBundle = serde_json::from_str(&content)
            .with_context(|| format!("Parse error: {}", self.path.display()))?;
        debug!(path = %self.path.display(), "read metrics bundle");
        Ok(bundle)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::generate_bundle;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/metrics.json");
        assert_eq!(source.path(), Path::new("/tmp/metrics.json"));
        assert_eq!(source.description(), "file: /tmp/metrics.json");
    }

    #[tokio::test]
    async fn test_file_source_reads_bundle() {
        let bundle = generate_bundle(&mut rand::thread_rng(), &["qaAccuracy"], 3);
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string_pretty(&bundle).unwrap()).unwrap();

        let source = FileSource::new(file.path());
        let read = source.fetch(&["qaAccuracy"], 3).await.unwrap();
        assert_eq!(read, bundle);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/metrics.json");
        let err = source.fetch(&[], 30).await.unwrap_err();
        assert!(err.to_string().contains("Read error"));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let source = FileSource::new(file.path());
        let err = source.fetch(&[], 30).await.unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }
}

//! Asynchronous retrieval of part bytes.
//!
//! Part listings reference their printable files by URL (object storage) or
//! by local path during upload preview. Fetches run on a tokio runtime and
//! completed results cross back to the UI thread over a channel drained once
//! per frame. An in-flight fetch is never cancelled when a new part is
//! opened; the session's mesh slot is last-writer-wins on arrival.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Where the part bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartSource {
    Url(String),
    File(PathBuf),
}

impl PartSource {
    /// Classify a CLI/user-entered string: anything with an http(s) scheme
    /// is a URL, the rest is a filesystem path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for PartSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartSource::Url(url) => write!(f, "{url}"),
            PartSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A completed fetch, successful or not
pub struct FetchedPart {
    pub source: PartSource,
    pub result: Result<Vec<u8>, String>,
}

/// Spawns part downloads and hands results back to the UI thread.
pub struct PartFetcher {
    runtime: tokio::runtime::Runtime,
    tx: Sender<FetchedPart>,
    rx: Receiver<FetchedPart>,
}

impl PartFetcher {
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to start fetch runtime");
        let (tx, rx) = channel();
        Self { runtime, tx, rx }
    }

    /// Start fetching `source` in the background.
    pub fn request(&self, source: PartSource) {
        tracing::info!("fetching part bytes from {source}");
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = fetch_bytes(&source).await;
            if let Err(ref e) = result {
                tracing::warn!("fetch of {source} failed: {e}");
            }
            let _ = tx.send(FetchedPart { source, result });
        });
    }

    /// Drain one completed fetch, if any. Called once per UI frame.
    pub fn poll(&mut self) -> Option<FetchedPart> {
        self.rx.try_recv().ok()
    }
}

impl Default for PartFetcher {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_bytes(source: &PartSource) -> Result<Vec<u8>, String> {
    match source {
        PartSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .map_err(|e| format!("request failed: {e}"))?
                .error_for_status()
                .map_err(|e| format!("server error: {e}"))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| format!("download failed: {e}"))?;
            Ok(bytes.to_vec())
        }
        PartSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|e| format!("could not read {}: {e}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_sources() {
        assert_eq!(
            PartSource::parse("https://cdn.whiplab.io/parts/bracket.stl"),
            PartSource::Url("https://cdn.whiplab.io/parts/bracket.stl".to_string())
        );
        assert_eq!(
            PartSource::parse("http://localhost:9000/bucket/part.stl"),
            PartSource::Url("http://localhost:9000/bucket/part.stl".to_string())
        );
        assert_eq!(
            PartSource::parse("/tmp/part.stl"),
            PartSource::File(PathBuf::from("/tmp/part.stl"))
        );
    }

    #[test]
    fn test_display_shows_path_or_url() {
        assert_eq!(
            PartSource::parse("https://a/b.stl").to_string(),
            "https://a/b.stl"
        );
        assert_eq!(PartSource::parse("b.stl").to_string(), "b.stl");
    }
}

//! Image references that can produce a base64 payload on demand.
//!
//! Two sources exist: an image fetched over the network, cached after its
//! first successful encode, and an image read from the local filesystem.
//! Both hide behind [`ImageSource`] so message and embedding constructors
//! accept either.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::prelude::*;
use tokio::sync::OnceCell;

use crate::client::{classify_status, ClientError};

/// Anything that can produce a base64 encoding of image bytes.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Produce the base64-encoded image bytes.
    async fn encode_base64(&self) -> Result<String, ClientError>;
}

/// An image fetched from a URL, downloaded lazily and cached after the
/// first successful encode.
///
/// The cache is write-once: concurrent first encodes serialize on the
/// cell, and later calls return the stored string without touching the
/// network again.
#[derive(Debug)]
pub struct NetworkImage {
    url: String,
    cached: OnceCell<String>,
}

impl NetworkImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cached: OnceCell::new(),
        }
    }

    /// The source URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ImageSource for NetworkImage {
    async fn encode_base64(&self) -> Result<String, ClientError> {
        self.cached
            .get_or_try_init(|| async {
                let response = reqwest::get(&self.url).await?;
                let status = response.status();

                if status != reqwest::StatusCode::OK {
                    let raw = response.bytes().await.unwrap_or_default();
                    return Err(classify_status(status, &raw));
                }

                let raw = response.bytes().await?;
                Ok(BASE64_STANDARD.encode(&raw))
            })
            .await
            .cloned()
    }
}

/// An image read from the local filesystem on each encode.
#[derive(Debug, Clone)]
pub struct FileImage {
    path: PathBuf,
}

impl FileImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The source path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImageSource for FileImage {
    async fn encode_base64(&self) -> Result<String, ClientError> {
        let raw = tokio::fs::read(&self.path).await?;
        Ok(BASE64_STANDARD.encode(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_image_encodes_contents() {
        let path = std::env::temp_dir().join("guardrail_file_image_test.bin");
        std::fs::write(&path, b"image bytes").unwrap();

        let image = FileImage::new(&path);
        let encoded = image.encode_base64().await.unwrap();
        assert_eq!(encoded, BASE64_STANDARD.encode(b"image bytes"));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_file_image_missing_file_is_io_error() {
        let image = FileImage::new("/nonexistent/guardrail.png");
        let err = image.encode_base64().await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[test]
    fn test_network_image_keeps_url() {
        let image = NetworkImage::new("https://example.com/cat.jpg");
        assert_eq!(image.url(), "https://example.com/cat.jpg");
    }
}

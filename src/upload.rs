//! File sources for the multipart endpoints.

use std::path::PathBuf;

use reqwest::multipart::Part;

use crate::client::ClientError;

/// A file destined for a multipart form: a filesystem path read into
/// memory at request time, or an in-memory named byte buffer.
#[derive(Debug, Clone)]
pub enum FileUpload {
    Path(PathBuf),
    Memory { filename: String, bytes: Vec<u8> },
}

impl FileUpload {
    /// Upload the file at `path`; the form filename is taken from the
    /// path's final component.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        FileUpload::Path(path.into())
    }

    /// Upload an in-memory buffer under the given filename.
    pub fn memory(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileUpload::Memory {
            filename: filename.into(),
            bytes,
        }
    }

    /// Resolve into a named multipart part.
    pub(crate) async fn into_part(self) -> Result<Part, ClientError> {
        match self {
            FileUpload::Path(path) => {
                let bytes = tokio::fs::read(&path).await?;
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file")
                    .to_string();
                Ok(Part::bytes(bytes).file_name(filename))
            }
            FileUpload::Memory { filename, bytes } => Ok(Part::bytes(bytes).file_name(filename)),
        }
    }
}

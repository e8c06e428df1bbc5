/// File storage capability
///
/// Files are exchanged as base64 strings. A write returns the durable URI of
/// the file; a read returns its base64 payload.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::CapabilityError;

/// Storage areas a file can be written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    /// App-private persistent data
    Data,
    /// App-private cache, may be purged by the OS
    Cache,
    /// User-visible documents
    Documents,
}

impl Directory {
    pub fn name(self) -> &'static str {
        match self {
            Directory::Data => "data",
            Directory::Cache => "cache",
            Directory::Documents => "documents",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFileResult {
    /// Durable URI of the written file
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFileResult {
    /// Base64 payload
    pub data: String,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write base64 `data` (or a `data:` URL) to `path` inside `directory`.
    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<WriteFileResult, CapabilityError>;

    /// Read a file as base64. Without a directory, `path` is an absolute path or file URI.
    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<ReadFileResult, CapabilityError>;

    async fn delete_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<(), CapabilityError>;
}

/// Strip a `data:<mime>;base64,` header, leaving the payload
pub fn strip_data_url_prefix(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some((_, payload)) = data.split_once(',') {
            return payload;
        }
    }
    data
}

/// Build a `file://` URI for an absolute path
pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Turn a `file://` URI (or a plain path) back into a path
pub fn path_from_uri(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url_prefix("AAAA"), "AAAA");
        assert_eq!(strip_data_url_prefix("data:broken"), "data:broken");
    }

    #[test]
    fn test_file_uri() {
        let path = Path::new("/data/app/1.jpeg");
        assert_eq!(file_uri(path), "file:///data/app/1.jpeg");
        assert_eq!(path_from_uri("file:///data/app/1.jpeg"), path);
        assert_eq!(path_from_uri("/data/app/1.jpeg"), path);
    }
}

/// File storage on the local disk
///
/// Each `Directory` maps to a root folder. Payloads arrive as base64 and are
/// stored as decoded bytes, so the files on disk are real images.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Component, Path, PathBuf};

use crate::capability::filesystem::{file_uri, path_from_uri, strip_data_url_prefix};
use crate::capability::{Directory, FileStorage, ReadFileResult, WriteFileResult};
use crate::error::CapabilityError;

#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    data_dir: PathBuf,
    cache_dir: PathBuf,
    documents_dir: PathBuf,
}

impl LocalFilesystem {
    /// Lay out all directories under a single app root:
    /// `<root>/files`, `<root>/cache`, `<root>/documents`
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.join("files"),
            cache_dir: root.join("cache"),
            documents_dir: root.join("documents"),
        }
    }

    pub fn dir(&self, directory: Directory) -> &Path {
        match directory {
            Directory::Data => &self.data_dir,
            Directory::Cache => &self.cache_dir,
            Directory::Documents => &self.documents_dir,
        }
    }

    /// Resolve a request to a path on disk. Relative paths must stay inside their directory.
    fn resolve(&self, path: &str, directory: Option<Directory>) -> Result<PathBuf, CapabilityError> {
        match directory {
            Some(dir) => {
                let relative = Path::new(path);
                let escapes = relative
                    .components()
                    .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
                if escapes {
                    return Err(CapabilityError::InvalidData(format!(
                        "path {} is not inside the {} directory",
                        path,
                        dir.name()
                    )));
                }
                Ok(self.dir(dir).join(relative))
            }
            None => {
                let absolute = path_from_uri(path);
                if !absolute.is_absolute() {
                    return Err(CapabilityError::InvalidData(format!(
                        "path {} must be absolute when no directory is given",
                        path
                    )));
                }
                Ok(absolute)
            }
        }
    }
}

fn not_found_or_io(err: std::io::Error, path: &Path) -> CapabilityError {
    if err.kind() == std::io::ErrorKind::NotFound {
        CapabilityError::NotFound(path.display().to_string())
    } else {
        CapabilityError::Io(err)
    }
}

#[async_trait]
impl FileStorage for LocalFilesystem {
    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<WriteFileResult, CapabilityError> {
        let target = self.resolve(path, Some(directory))?;
        let bytes = STANDARD.decode(strip_data_url_prefix(data))?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        log::debug!("wrote {} bytes to {}", bytes.len(), target.display());
        Ok(WriteFileResult {
            uri: file_uri(&target),
        })
    }

    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<ReadFileResult, CapabilityError> {
        let target = self.resolve(path, directory)?;
        let bytes = tokio::fs::read(&target)
            .await
            .map_err(|e| not_found_or_io(e, &target))?;

        Ok(ReadFileResult {
            data: STANDARD.encode(bytes),
        })
    }

    async fn delete_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<(), CapabilityError> {
        let target = self.resolve(path, directory)?;
        tokio::fs::remove_file(&target)
            .await
            .map_err(|e| not_found_or_io(e, &target))
    }
}

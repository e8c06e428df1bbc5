/// Fetches web paths that point at local files (`file://` URIs or plain paths)

use async_trait::async_trait;

use crate::capability::filesystem::path_from_uri;
use crate::capability::web::mime_from_path;
use crate::capability::{Blob, WebFetcher};
use crate::error::CapabilityError;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFetcher;

#[async_trait]
impl WebFetcher for LocalFetcher {
    async fn fetch(&self, web_path: &str) -> Result<Blob, CapabilityError> {
        let path = path_from_uri(web_path);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CapabilityError::NotFound(web_path.to_string())
            } else {
                CapabilityError::Io(e)
            }
        })?;

        Ok(Blob {
            bytes,
            mime: mime_from_path(web_path).to_string(),
        })
    }
}

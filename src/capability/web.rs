/// Web fetch capability (browser context)
///
/// In a browser the camera hands back a transient web path. Its bytes are
/// fetched as a `Blob` and converted to a `data:` URL before being stored.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::CapabilityError;

/// Binary response body with its mime type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime: String,
}

#[async_trait]
pub trait WebFetcher: Send + Sync {
    async fn fetch(&self, web_path: &str) -> Result<Blob, CapabilityError>;
}

/// Encode a blob as a `data:<mime>;base64,<payload>` URL.
///
/// Encoding runs on a blocking task so large photos don't stall the caller.
pub async fn blob_to_data_url(blob: Blob) -> Result<String, CapabilityError> {
    tokio::task::spawn_blocking(move || {
        format!("data:{};base64,{}", blob.mime, STANDARD.encode(&blob.bytes))
    })
    .await
    .map_err(|e| CapabilityError::InvalidData(format!("blob conversion aborted: {}", e)))
}

/// Guess an image mime type from a path's extension
pub fn mime_from_path(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

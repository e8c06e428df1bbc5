/// Hybrid and browser behavior of the gallery
///
/// The two contexts differ in where captured bytes come from, what a record's
/// `filepath` points at, and how display sources are produced.

use async_trait::async_trait;
use std::sync::Arc;

use super::{PlatformName, Platforms};
use crate::capability::web::blob_to_data_url;
use crate::capability::{Directory, FileStorage, Photo, WebFetcher, WriteFileResult};
use crate::error::{CapabilityError, GalleryError, Result};
use crate::state::data::PhotoRecord;

/// Path segment native files are served under by the web view
const FILE_SERVER_PREFIX: &str = "/_capacitor_file_";
/// Path segment content provider URIs are served under
const CONTENT_SERVER_PREFIX: &str = "/_capacitor_content_";

/// Prefix of display sources produced on browser reload
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[async_trait]
pub trait PlatformStrategy: Send + Sync {
    fn is_hybrid(&self) -> bool;

    /// Base64 (or data URL) bytes of a freshly captured photo.
    async fn read_as_base64(&self, files: &dyn FileStorage, photo: &Photo) -> Result<String>;

    /// Record for a photo that was written to storage as `file_name`.
    fn finish_record(&self, saved: WriteFileResult, file_name: String, photo: &Photo)
        -> PhotoRecord;

    /// Fill in `display_source` for a record loaded from the store.
    async fn resolve_display(&self, files: &dyn FileStorage, record: &mut PhotoRecord)
        -> Result<()>;

    /// Remove the stored bytes of a record.
    async fn delete_file(
        &self,
        files: &dyn FileStorage,
        record: &PhotoRecord,
    ) -> Result<(), CapabilityError>;
}

/// Rewrite a native file reference so the web view can load it over HTTP.
///
/// `file:///data/1.jpeg` and `/data/1.jpeg` become
/// `<server_url>/_capacitor_file_/data/1.jpeg`; `content://media/1` becomes
/// `<server_url>/_capacitor_content_/media/1`. Anything else is returned unchanged.
pub fn convert_file_src(uri: &str, server_url: &str) -> String {
    let server = server_url.trim_end_matches('/');
    if let Some(path) = uri.strip_prefix("file://") {
        format!("{}{}{}", server, FILE_SERVER_PREFIX, path)
    } else if let Some(rest) = uri.strip_prefix("content://") {
        format!("{}{}/{}", server, CONTENT_SERVER_PREFIX, rest)
    } else if uri.starts_with('/') {
        format!("{}{}{}", server, FILE_SERVER_PREFIX, uri)
    } else {
        uri.to_string()
    }
}

/// Inside a native container
#[derive(Debug, Clone)]
pub struct HybridStrategy {
    server_url: String,
}

impl HybridStrategy {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }
}

#[async_trait]
impl PlatformStrategy for HybridStrategy {
    fn is_hybrid(&self) -> bool {
        true
    }

    async fn read_as_base64(&self, files: &dyn FileStorage, photo: &Photo) -> Result<String> {
        let path = photo.path.as_deref().ok_or_else(|| {
            GalleryError::read(
                "<none>",
                CapabilityError::NotFound("captured photo has no native path".to_string()),
            )
        })?;

        let file = files
            .read_file(path, None)
            .await
            .map_err(|e| GalleryError::read(path, e))?;
        Ok(file.data)
    }

    fn finish_record(
        &self,
        saved: WriteFileResult,
        _file_name: String,
        _photo: &Photo,
    ) -> PhotoRecord {
        let display = convert_file_src(&saved.uri, &self.server_url);
        PhotoRecord::new(saved.uri).with_display_source(display)
    }

    async fn resolve_display(
        &self,
        _files: &dyn FileStorage,
        _record: &mut PhotoRecord,
    ) -> Result<()> {
        // Display sources for native files are only set at capture time
        Ok(())
    }

    async fn delete_file(
        &self,
        files: &dyn FileStorage,
        record: &PhotoRecord,
    ) -> Result<(), CapabilityError> {
        files.delete_file(&record.filepath, None).await
    }
}

/// In a plain browser tab
#[derive(Clone)]
pub struct BrowserStrategy {
    fetcher: Arc<dyn WebFetcher>,
}

impl BrowserStrategy {
    pub fn new(fetcher: Arc<dyn WebFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PlatformStrategy for BrowserStrategy {
    fn is_hybrid(&self) -> bool {
        false
    }

    async fn read_as_base64(&self, _files: &dyn FileStorage, photo: &Photo) -> Result<String> {
        let web_path = photo.web_path.as_deref().ok_or_else(|| {
            GalleryError::read(
                "<none>",
                CapabilityError::NotFound("captured photo has no web path".to_string()),
            )
        })?;

        let blob = self
            .fetcher
            .fetch(web_path)
            .await
            .map_err(|e| GalleryError::read(web_path, e))?;

        blob_to_data_url(blob)
            .await
            .map_err(|e| GalleryError::read(web_path, e))
    }

    fn finish_record(
        &self,
        _saved: WriteFileResult,
        file_name: String,
        photo: &Photo,
    ) -> PhotoRecord {
        // The web path is already loaded in memory, so display it directly
        PhotoRecord {
            filepath: file_name,
            display_source: photo.web_path.clone(),
        }
    }

    async fn resolve_display(&self, files: &dyn FileStorage, record: &mut PhotoRecord)
        -> Result<()> {
        let file = files
            .read_file(&record.filepath, Some(Directory::Data))
            .await
            .map_err(|e| GalleryError::read(record.filepath.as_str(), e))?;

        record.display_source = Some(format!("{}{}", JPEG_DATA_URL_PREFIX, file.data));
        Ok(())
    }

    async fn delete_file(
        &self,
        files: &dyn FileStorage,
        record: &PhotoRecord,
    ) -> Result<(), CapabilityError> {
        files
            .delete_file(&record.filepath, Some(Directory::Data))
            .await
    }
}

/// Pick the strategy for the detected platforms.
pub fn select_strategy(
    platforms: &Platforms,
    server_url: &str,
    fetcher: Arc<dyn WebFetcher>,
) -> Box<dyn PlatformStrategy> {
    if platforms.is(PlatformName::Hybrid) {
        log::info!("running in a native container");
        Box::new(HybridStrategy::new(server_url))
    } else {
        log::info!("running in a browser context");
        Box::new(BrowserStrategy::new(fetcher))
    }
}

/// The photo gallery coordinator
///
/// Owns the ordered photo list and keeps it in sync with the preferences
/// store. Every operation is a sequential chain of capability calls; the list
/// lock is only held while the list itself is read or changed, never across a
/// capability call. Two overlapping captures can therefore complete in any
/// order, and whichever writes the store last wins.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::adapters::{LocalFetcher, LocalFilesystem};
use crate::capability::{
    Camera, Clock, Directory, FileStorage, ImageOptions, Photo, Preferences, SystemClock,
};
use crate::config::GalleryConfig;
use crate::error::{CapabilityError, GalleryError, Result};
use crate::platform::{select_strategy, Platforms, PlatformStrategy};
use crate::state::data::{GalleryState, PhotoRecord};
use crate::state::preferences::SqlitePreferences;

pub struct PhotoGallery {
    camera: Arc<dyn Camera>,
    files: Arc<dyn FileStorage>,
    preferences: Arc<dyn Preferences>,
    strategy: Box<dyn PlatformStrategy>,
    clock: Arc<dyn Clock>,
    config: GalleryConfig,
    state: Mutex<GalleryState>,
}

impl PhotoGallery {
    /// Assemble a gallery from explicit capabilities. The strategy is fixed for its lifetime.
    pub fn new(
        camera: Arc<dyn Camera>,
        files: Arc<dyn FileStorage>,
        preferences: Arc<dyn Preferences>,
        strategy: Box<dyn PlatformStrategy>,
        config: GalleryConfig,
    ) -> Self {
        Self {
            camera,
            files,
            preferences,
            strategy,
            clock: Arc::new(SystemClock),
            config,
            state: Mutex::new(GalleryState::new()),
        }
    }

    /// Replace the clock used to name captured files
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Wire the on-disk adapters under the configured data root and detect the platform.
    pub fn open(config: GalleryConfig, camera: Arc<dyn Camera>) -> Result<Self> {
        let root = config.data_root()?;
        let preferences =
            SqlitePreferences::open(&config.preferences_path()?, config.storage_group.clone())
                .map_err(|e| GalleryError::persistence("preferences database", e))?;
        let files = LocalFilesystem::new(&root);

        let platforms = Platforms::detect_with_override(config.hybrid);
        let strategy = select_strategy(&platforms, &config.server_url, Arc::new(LocalFetcher));

        Ok(Self::new(
            camera,
            Arc::new(files),
            Arc::new(preferences),
            strategy,
            config,
        ))
    }

    pub fn is_hybrid(&self) -> bool {
        self.strategy.is_hybrid()
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Snapshot of the current list, newest first
    pub async fn photos(&self) -> Vec<PhotoRecord> {
        self.state.lock().await.photos.clone()
    }

    /// Capture a photo, store its bytes, and put it at the head of the gallery.
    ///
    /// The whole list is then written to the store. If that write fails the
    /// new record stays in memory; reload to reconcile.
    pub async fn add_new_to_gallery(&self) -> Result<PhotoRecord> {
        let options = ImageOptions::capture(self.config.capture_quality());
        let captured = self
            .camera
            .get_photo(&options)
            .await
            .map_err(GalleryError::CaptureFailed)?;

        let record = self.save_picture(&captured).await?;

        let snapshot = {
            let mut state = self.state.lock().await;
            state.prepend(record.clone());
            snapshot_of(&state)?
        };

        self.persist(&snapshot).await?;

        log::info!("added {} to the gallery", record.filepath);
        Ok(record)
    }

    /// Replace the in-memory list with the stored one.
    ///
    /// In a browser every record gets a JPEG data URL as its display source;
    /// the first unreadable file stops the load. In a native container display
    /// sources are left unset.
    pub async fn load_saved(&self) -> Result<Vec<PhotoRecord>> {
        let stored = self
            .preferences
            .get(&self.config.storage_key)
            .await
            .map_err(|e| GalleryError::read(self.config.storage_key.as_str(), e))?;

        // An empty value counts as nothing stored
        let mut loaded = match stored.filter(|json| !json.is_empty()) {
            None => GalleryState::new(),
            Some(json) => match GalleryState::from_json(&json) {
                Ok(state) => state,
                Err(e) => {
                    *self.state.lock().await = GalleryState::new();
                    return Err(GalleryError::DeserializationFailed(e));
                }
            },
        };

        let mut outcome = Ok(());
        for record in loaded.photos.iter_mut() {
            if let Err(e) = self.strategy.resolve_display(self.files.as_ref(), record).await {
                log::warn!("stopped loading photos: {}", e);
                outcome = Err(e);
                break;
            }
        }

        let photos = loaded.photos.clone();
        *self.state.lock().await = loaded;
        outcome?;

        log::info!("loaded {} photos", photos.len());
        Ok(photos)
    }

    /// Remove a photo from the gallery, the store, and file storage.
    pub async fn delete_picture(&self, filepath: &str) -> Result<()> {
        let (record, snapshot) = {
            let mut state = self.state.lock().await;
            let record = state
                .remove(filepath)
                .ok_or_else(|| GalleryError::NotFound(filepath.to_string()))?;
            (record, snapshot_of(&state)?)
        };

        self.persist(&snapshot).await?;

        self.strategy
            .delete_file(self.files.as_ref(), &record)
            .await
            .map_err(|e| GalleryError::persistence(format!("deletion of {}", filepath), e))?;

        log::info!("deleted {} from the gallery", filepath);
        Ok(())
    }

    /// Store the photo's bytes under a timestamp filename and build its record.
    ///
    /// Two captures within the same millisecond get the same filename.
    pub(crate) async fn save_picture(&self, photo: &Photo) -> Result<PhotoRecord> {
        let data = self.read_as_base64(photo).await?;
        let file_name = format!(
            "{}.{}",
            self.clock.now_millis(),
            self.config.file_extension
        );

        let saved = self
            .files
            .write_file(&file_name, &data, Directory::Data)
            .await
            .map_err(|e| GalleryError::persistence(file_name.as_str(), e))?;
        log::debug!("saved capture as {}", saved.uri);

        Ok(self.strategy.finish_record(saved, file_name, photo))
    }

    pub(crate) async fn read_as_base64(&self, photo: &Photo) -> Result<String> {
        self.strategy
            .read_as_base64(self.files.as_ref(), photo)
            .await
    }

    async fn persist(&self, snapshot: &str) -> Result<()> {
        self.preferences
            .set(&self.config.storage_key, snapshot)
            .await
            .map_err(|e| GalleryError::persistence("photo list", e))
    }
}

/// Serialized durable fields of the whole list
fn snapshot_of(state: &GalleryState) -> Result<String> {
    state.to_json().map_err(|e| {
        GalleryError::persistence("photo list", CapabilityError::InvalidData(e.to_string()))
    })
}

impl std::fmt::Debug for PhotoGallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoGallery")
            .field("hybrid", &self.strategy.is_hybrid())
            .field("config", &self.config)
            .finish()
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex, Notify};

use photo_gallery::adapters::{MemoryFilesystem, MemoryPreferences};
use photo_gallery::{
    Blob, BrowserStrategy, Camera, CapabilityError, Clock, Directory, FileStorage, GalleryConfig,
    HybridStrategy, ImageOptions, Photo, PhotoGallery, PlatformStrategy, Preferences,
    WebFetcher,
};
use photo_gallery::capability::{ReadFileResult, WriteFileResult};
use photo_gallery::platform::convert_file_src;

/// Base64 of three zero bytes
pub const PAYLOAD: &str = "AAAA";

pub fn hybrid() -> Box<dyn PlatformStrategy> {
    Box::new(HybridStrategy::new("http://localhost"))
}

pub fn browser() -> Box<dyn PlatformStrategy> {
    Box::new(BrowserStrategy::new(Arc::new(ZeroFetcher)))
}

pub fn browser_photo(n: usize) -> Photo {
    Photo {
        web_path: Some(format!("blob:http://localhost/{}", n)),
        format: "jpeg".to_string(),
        ..Default::default()
    }
}

pub fn native_photo(path: &str) -> Photo {
    Photo {
        path: Some(path.to_string()),
        web_path: Some(convert_file_src(path, "http://localhost")),
        format: "jpeg".to_string(),
        ..Default::default()
    }
}

pub fn gallery(
    camera: Arc<dyn Camera>,
    files: Arc<dyn FileStorage>,
    preferences: Arc<dyn Preferences>,
    strategy: Box<dyn PlatformStrategy>,
) -> PhotoGallery {
    PhotoGallery::new(camera, files, preferences, strategy, GalleryConfig::default())
        .with_clock(Arc::new(StepClock::new(1_700_000_000_000)))
}

/// Clock that advances one millisecond per reading
pub struct StepClock(AtomicI64);

impl StepClock {
    pub fn new(start: i64) -> Self {
        Self(AtomicI64::new(start))
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

pub struct FrozenClock(pub i64);

impl Clock for FrozenClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Every fetch yields three zero bytes as a JPEG
pub struct ZeroFetcher;

#[async_trait]
impl WebFetcher for ZeroFetcher {
    async fn fetch(&self, _web_path: &str) -> Result<Blob, CapabilityError> {
        Ok(Blob {
            bytes: vec![0, 0, 0],
            mime: "image/jpeg".to_string(),
        })
    }
}

/// Camera answering from a queue; an empty queue means the user cancelled
#[derive(Default)]
pub struct ScriptedCamera {
    results: Mutex<VecDeque<Result<Photo, CapabilityError>>>,
    requests: Mutex<Vec<ImageOptions>>,
}

impl ScriptedCamera {
    pub fn new(photos: impl IntoIterator<Item = Photo>) -> Self {
        Self {
            results: Mutex::new(photos.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CapabilityError) -> Self {
        Self {
            results: Mutex::new(VecDeque::from([Err(error)])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn requests(&self) -> Vec<ImageOptions> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Camera for ScriptedCamera {
    async fn get_photo(&self, options: &ImageOptions) -> Result<Photo, CapabilityError> {
        self.requests.lock().await.push(options.clone());
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(CapabilityError::Cancelled("User cancelled photos app".into())))
    }
}

/// Camera whose n-th call resolves when the n-th gate is opened
pub struct GatedCamera {
    gates: Mutex<VecDeque<oneshot::Receiver<Photo>>>,
}

impl GatedCamera {
    pub fn new(count: usize) -> (Self, Vec<oneshot::Sender<Photo>>) {
        let mut senders = Vec::new();
        let mut gates = VecDeque::new();
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            gates.push_back(rx);
        }
        (
            Self {
                gates: Mutex::new(gates),
            },
            senders,
        )
    }
}

#[async_trait]
impl Camera for GatedCamera {
    async fn get_photo(&self, _options: &ImageOptions) -> Result<Photo, CapabilityError> {
        let gate = self
            .gates
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| CapabilityError::Cancelled("no more captures".into()))?;
        gate.await
            .map_err(|_| CapabilityError::Cancelled("capture abandoned".into()))
    }
}

/// Preferences that record every completed write and can hold writes at gates
#[derive(Default)]
pub struct RecordingPreferences {
    inner: MemoryPreferences,
    gates: Mutex<VecDeque<Option<oneshot::Receiver<()>>>>,
    writes: Mutex<Vec<String>>,
    written: Notify,
    fail_writes: bool,
    fail_reads: bool,
}

impl RecordingPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    /// Hold the writes marked `true` until their sender fires
    pub fn gated(pattern: &[bool]) -> (Self, Vec<oneshot::Sender<()>>) {
        let mut senders = Vec::new();
        let mut gates = VecDeque::new();
        for &held in pattern {
            if held {
                let (tx, rx) = oneshot::channel();
                senders.push(tx);
                gates.push_back(Some(rx));
            } else {
                gates.push_back(None);
            }
        }
        (
            Self {
                gates: Mutex::new(gates),
                ..Default::default()
            },
            senders,
        )
    }

    pub async fn writes(&self) -> Vec<String> {
        self.writes.lock().await.clone()
    }

    pub async fn wait_for_writes(&self, count: usize) {
        loop {
            if self.writes.lock().await.len() >= count {
                return;
            }
            self.written.notified().await;
        }
    }
}

#[async_trait]
impl Preferences for RecordingPreferences {
    async fn get(&self, key: &str) -> Result<Option<String>, CapabilityError> {
        if self.fail_reads {
            return Err(CapabilityError::Io(std::io::Error::other("storage locked")));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CapabilityError> {
        if self.fail_writes {
            return Err(CapabilityError::Io(std::io::Error::other("disk full")));
        }

        let gate = self.gates.lock().await.pop_front().flatten();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.inner.set(key, value).await?;
        self.writes.lock().await.push(value.to_string());
        self.written.notify_one();
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CapabilityError> {
        self.inner.remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>, CapabilityError> {
        self.inner.keys().await
    }

    async fn clear(&self) -> Result<(), CapabilityError> {
        self.inner.clear().await
    }
}

/// Memory storage that refuses writes
#[derive(Default)]
pub struct ReadOnlyFilesystem {
    pub inner: MemoryFilesystem,
}

#[async_trait]
impl FileStorage for ReadOnlyFilesystem {
    async fn write_file(
        &self,
        _path: &str,
        _data: &str,
        _directory: Directory,
    ) -> Result<WriteFileResult, CapabilityError> {
        Err(CapabilityError::Io(std::io::Error::other("read-only storage")))
    }

    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<ReadFileResult, CapabilityError> {
        self.inner.read_file(path, directory).await
    }

    async fn delete_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<(), CapabilityError> {
        self.inner.delete_file(path, directory).await
    }
}

pub fn filepaths(records: &[photo_gallery::PhotoRecord]) -> Vec<String> {
    records.iter().map(|r| r.filepath.clone()).collect()
}

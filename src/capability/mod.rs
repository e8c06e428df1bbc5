/// Platform capabilities consumed by the gallery
///
/// Each capability is an object-safe async trait so the host can plug in
/// native, browser, or in-process implementations:
/// - Camera capture (camera.rs)
/// - File storage (filesystem.rs)
/// - Web fetch for browser paths (web.rs)
/// - Key-value preferences and a clock (here)

use async_trait::async_trait;

use crate::error::CapabilityError;

pub mod camera;
pub mod filesystem;
pub mod web;

pub use camera::{Camera, CameraResultType, CameraSource, ImageOptions, Photo};
pub use filesystem::{Directory, FileStorage, ReadFileResult, WriteFileResult};
pub use web::{Blob, WebFetcher};

/// Durable string key-value store
#[async_trait]
pub trait Preferences: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CapabilityError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), CapabilityError>;
    async fn remove(&self, key: &str) -> Result<(), CapabilityError>;
    async fn keys(&self) -> Result<Vec<String>, CapabilityError>;
    async fn clear(&self) -> Result<(), CapabilityError>;
}

/// Source of capture timestamps
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}

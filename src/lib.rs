//! Photo gallery core for hybrid mobile apps.
//!
//! A [`PhotoGallery`] captures photos through a [`Camera`], stores their bytes
//! through [`FileStorage`], and keeps the ordered list of photos in a
//! [`Preferences`] store so it can be reloaded on the next start. Whether the
//! app runs inside a native container or a plain browser is decided once and
//! captured in a [`PlatformStrategy`].

pub mod adapters;
pub mod capability;
pub mod config;
pub mod error;
pub mod gallery;
pub mod platform;
pub mod state;

pub use capability::{
    Blob, Camera, CameraResultType, CameraSource, Clock, Directory, FileStorage, ImageOptions,
    Photo, Preferences, SystemClock, WebFetcher,
};
pub use config::GalleryConfig;
pub use error::{CapabilityError, ConfigError, GalleryError};
pub use gallery::PhotoGallery;
pub use platform::{
    BrowserStrategy, HybridStrategy, PlatformName, PlatformStrategy, Platforms,
};
pub use state::{GalleryState, PhotoRecord, SqlitePreferences};

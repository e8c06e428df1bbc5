/// State management module
///
/// This module handles the gallery's durable and in-memory state:
/// - Photo records and the ordered gallery list (data.rs)
/// - The SQLite-backed preferences store the list is persisted in (preferences.rs)

pub mod data;
pub mod preferences;

pub use data::{GalleryState, PhotoRecord};
pub use preferences::SqlitePreferences;

/// Concrete capability implementations for desktop hosts and tests
///
/// - Capture folder camera (directory_camera.rs)
/// - Local disk file storage (local_filesystem.rs)
/// - Local web path fetcher (local_fetcher.rs)
/// - In-process storage and preferences (memory.rs)
///
/// The SQLite preferences store lives with the rest of the state in `state::preferences`.

pub mod directory_camera;
pub mod local_fetcher;
pub mod local_filesystem;
pub mod memory;

pub use directory_camera::DirectoryCamera;
pub use local_fetcher::LocalFetcher;
pub use local_filesystem::LocalFilesystem;
pub use memory::{MemoryFilesystem, MemoryPreferences};

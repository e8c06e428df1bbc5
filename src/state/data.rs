/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the coordinator, the preferences store and the UI layer.

use serde::{Deserialize, Serialize};

/// Represents a single photo in the gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Durable file URI (hybrid) or generated filename (browser)
    pub filepath: String,
    /// Renderable image reference; computed at capture or reload, never persisted
    #[serde(skip_serializing, default)]
    pub display_source: Option<String>,
}

impl PhotoRecord {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            display_source: None,
        }
    }

    pub fn with_display_source(mut self, source: impl Into<String>) -> Self {
        self.display_source = Some(source.into());
        self
    }
}

/// The ordered photo list owned by a gallery, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    pub photos: Vec<PhotoRecord>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly captured photo at the head of the list
    pub fn prepend(&mut self, record: PhotoRecord) {
        self.photos.insert(0, record);
    }

    /// Remove the record with the given filepath, returning it
    pub fn remove(&mut self, filepath: &str) -> Option<PhotoRecord> {
        let index = self.photos.iter().position(|p| p.filepath == filepath)?;
        Some(self.photos.remove(index))
    }

    /// Serialize the durable fields of every record (filepath only)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.photos)
    }

    /// Parse a stored list; order is kept as stored
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            photos: serde_json::from_str(json)?,
        })
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_source_is_not_persisted() {
        let mut state = GalleryState::new();
        state.prepend(PhotoRecord::new("a.jpeg").with_display_source("blob:x"));

        let json = state.to_json().unwrap();

        assert_eq!(json, r#"[{"filepath":"a.jpeg"}]"#);
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let mut state = GalleryState::new();
        state.prepend(PhotoRecord::new("1.jpeg"));
        state.prepend(PhotoRecord::new("2.jpeg"));
        state.prepend(PhotoRecord::new("3.jpeg"));

        let paths: Vec<_> = state.photos.iter().map(|p| p.filepath.as_str()).collect();
        assert_eq!(paths, ["3.jpeg", "2.jpeg", "1.jpeg"]);
    }

    #[test]
    fn test_serialization_preserves_order() {
        let mut state = GalleryState::new();
        for name in ["a.jpeg", "b.jpeg", "c.jpeg"] {
            state.prepend(PhotoRecord::new(name).with_display_source("x"));
        }

        let restored = GalleryState::from_json(&state.to_json().unwrap()).unwrap();

        assert_eq!(restored.len(), 3);
        let original: Vec<_> = state.photos.iter().map(|p| &p.filepath).collect();
        let reloaded: Vec<_> = restored.photos.iter().map(|p| &p.filepath).collect();
        assert_eq!(original, reloaded);
        assert!(restored.photos.iter().all(|p| p.display_source.is_none()));
    }

    #[test]
    fn test_extra_stored_fields_are_ignored() {
        let state =
            GalleryState::from_json(r#"[{"filepath":"a.jpeg","webviewPath":"blob:1"}]"#).unwrap();
        assert_eq!(state.photos, vec![PhotoRecord::new("a.jpeg")]);
    }

    #[test]
    fn test_remove() {
        let mut state = GalleryState::new();
        state.prepend(PhotoRecord::new("a.jpeg"));
        state.prepend(PhotoRecord::new("b.jpeg"));

        assert_eq!(state.remove("a.jpeg"), Some(PhotoRecord::new("a.jpeg")));
        assert_eq!(state.remove("missing"), None);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(GalleryState::from_json(r#"{"filepath":"a"}"#).is_err());
        assert!(GalleryState::from_json(r#"[{"path":"a"}]"#).is_err());
    }
}

/// Camera capability
///
/// The camera produces a `Photo` describing where the captured image lives,
/// or its encoded bytes, depending on the requested result type.

use async_trait::async_trait;

use crate::error::CapabilityError;

/// How the camera should hand back the captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraResultType {
    /// A file path plus a web-accessible path
    #[default]
    Uri,
    /// Raw base64 payload
    Base64,
    /// A `data:` URL
    DataUrl,
}

/// Where the image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraSource {
    /// Let the user choose between camera and photo library
    Prompt,
    #[default]
    Camera,
    /// Pick an existing photo from the library
    Photos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    /// JPEG quality (0-100)
    pub quality: u8,
    pub result_type: CameraResultType,
    pub source: CameraSource,
    /// Maximum output width, keeping aspect ratio
    pub width: Option<u32>,
    /// Maximum output height, keeping aspect ratio
    pub height: Option<u32>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            quality: 90,
            result_type: CameraResultType::Uri,
            source: CameraSource::Prompt,
            width: None,
            height: None,
        }
    }
}

impl ImageOptions {
    /// Options used for gallery captures: file result, physical camera, given quality
    pub fn capture(quality: u8) -> Self {
        Self {
            quality: quality.min(100),
            result_type: CameraResultType::Uri,
            source: CameraSource::Camera,
            ..Default::default()
        }
    }
}

/// A captured photo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Photo {
    /// Native file path (set for `Uri` results)
    pub path: Option<String>,
    /// Path loadable by the web view (set for `Uri` results)
    pub web_path: Option<String>,
    /// Base64 payload (set for `Base64` results)
    pub base64_string: Option<String>,
    /// `data:` URL (set for `DataUrl` results)
    pub data_url: Option<String>,
    /// Image format, e.g. "jpeg"
    pub format: String,
    /// Whether the image was also saved to the user's photo library
    pub saved: bool,
}

#[async_trait]
pub trait Camera: Send + Sync {
    /// Capture a photo. A dismissed capture fails with `CapabilityError::Cancelled`.
    async fn get_photo(&self, options: &ImageOptions) -> Result<Photo, CapabilityError>;
}

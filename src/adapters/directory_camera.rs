/// Camera backed by a capture folder
///
/// A tethered camera or a scanner drops images into a folder. Each capture
/// takes the newest image found there, re-encodes it as JPEG at the
/// requested quality and hands it back in the requested result form.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, DynamicImage};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use walkdir::WalkDir;

use crate::capability::filesystem::file_uri;
use crate::capability::{Camera, CameraResultType, CameraSource, ImageOptions, Photo};
use crate::error::CapabilityError;

/// Image extensions picked up from the capture folder
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug)]
pub struct DirectoryCamera {
    capture_dir: PathBuf,
    output_dir: PathBuf,
    captures: AtomicU64,
}

impl DirectoryCamera {
    /// `capture_dir` is scanned recursively; encoded captures go to `output_dir`.
    pub fn new(capture_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            capture_dir: capture_dir.into(),
            output_dir: output_dir.into(),
            captures: AtomicU64::new(0),
        }
    }
}

/// Find the most recently modified image under `dir`
fn newest_image(dir: &Path) -> Option<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        })
        .filter_map(|entry| {
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((modified, entry.into_path()))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}

/// Decode, optionally shrink, and re-encode as JPEG
fn encode_capture(source: &Path, options: &ImageOptions) -> Result<Vec<u8>, CapabilityError> {
    let mut img = image::open(source)?;

    if options.width.is_some() || options.height.is_some() {
        let width = options.width.unwrap_or(img.width());
        let height = options.height.unwrap_or(img.height());
        img = img.resize(width, height, FilterType::Lanczos3);
    }

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        &mut jpeg,
        options.quality.clamp(1, 100),
    ))?;

    Ok(jpeg)
}

#[async_trait]
impl Camera for DirectoryCamera {
    async fn get_photo(&self, options: &ImageOptions) -> Result<Photo, CapabilityError> {
        if options.source == CameraSource::Photos {
            return Err(CapabilityError::Unsupported(
                "a capture folder has no photo library".to_string(),
            ));
        }

        let capture_dir = self.capture_dir.clone();
        let blocking_options = options.clone();
        let jpeg = tokio::task::spawn_blocking(move || {
            let source = newest_image(&capture_dir).ok_or_else(|| {
                CapabilityError::Cancelled(format!(
                    "no image in capture folder {}",
                    capture_dir.display()
                ))
            })?;
            log::debug!("capturing {}", source.display());
            encode_capture(&source, &blocking_options)
        })
        .await
        .map_err(|e| CapabilityError::InvalidData(format!("capture task failed: {}", e)))??;

        let mut photo = Photo {
            format: "jpeg".to_string(),
            ..Default::default()
        };

        match options.result_type {
            CameraResultType::Uri => {
                let n = self.captures.fetch_add(1, Ordering::Relaxed);
                let name = format!(
                    "capture_{}_{}.jpeg",
                    chrono::Utc::now().timestamp_millis(),
                    n
                );
                tokio::fs::create_dir_all(&self.output_dir).await?;
                let target = self.output_dir.join(name);
                tokio::fs::write(&target, &jpeg).await?;

                photo.path = Some(target.display().to_string());
                photo.web_path = Some(file_uri(&target));
            }
            CameraResultType::Base64 => {
                photo.base64_string = Some(STANDARD.encode(&jpeg));
            }
            CameraResultType::DataUrl => {
                photo.data_url = Some(format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)));
            }
        }

        Ok(photo)
    }
}

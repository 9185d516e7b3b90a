/// Image intake and encoding
///
/// Both input channels (native file picker and window drag-drop) funnel
/// through `load_image`, so one validation predicate covers them. The
/// file is read off the UI thread, content-sniffed, and base64-encoded;
/// the result only becomes the selected image if its load generation is
/// still current when it completes.

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

use crate::state::data::SelectedImage;

/// Shown when either channel receives something that is not a supported image.
pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Only PNG, JPEG, or WEBP images are supported. Please choose a different file.";

/// File extensions offered in the picker dialog.
pub const PICKER_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Tracks in-flight image loads so a slow read finishing after a newer
/// selection (or a clear) is thrown away instead of winning the race.
pub struct UploadController {
    generation: u64,
}

impl UploadController {
    pub fn new() -> Self {
        Self { generation: 0 }
    }

    /// Start a new load. The returned generation tags the async read;
    /// any load started earlier is now stale.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether a completed load is still the one we are waiting for.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Invalidate all in-flight loads (on clear).
    pub fn reset(&mut self) {
        self.generation += 1;
    }
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared validation predicate: sniff the content and map it to a
/// MIME type. Extension is deliberately ignored; a renamed text file
/// must not slip through the picker channel.
pub fn sniff_mime(bytes: &[u8]) -> Result<&'static str, String> {
    let format = image::guess_format(bytes).map_err(|_| UNSUPPORTED_FILE_MESSAGE.to_string())?;

    match format {
        ImageFormat::Png => Ok("image/png"),
        ImageFormat::Jpeg => Ok("image/jpeg"),
        ImageFormat::WebP => Ok("image/webp"),
        _ => Err(UNSUPPORTED_FILE_MESSAGE.to_string()),
    }
}

/// Read, validate, and encode a file from either input channel.
pub async fn load_image(path: PathBuf) -> Result<SelectedImage, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let mime_type = sniff_mime(&bytes)?;
    let encoded_data = STANDARD.encode(&bytes);

    println!(
        "🖼️  Accepted {} ({}, {} bytes)",
        path.display(),
        mime_type,
        bytes.len()
    );

    Ok(SelectedImage {
        bytes,
        mime_type: mime_type.to_string(),
        encoded_data,
    })
}

/// Decode the payload of a `data:` URL back to raw bytes.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, String> {
    let payload = url
        .split_once(',')
        .map(|(_, payload)| payload)
        .ok_or_else(|| "Not a data URL".to_string())?;

    STANDARD
        .decode(payload)
        .map_err(|e| format!("Invalid base64 payload: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

    #[test]
    fn test_sniff_accepts_supported_formats() {
        assert_eq!(sniff_mime(&PNG_MAGIC), Ok("image/png"));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Ok("image/jpeg"));

        let mut webp = Vec::from(*b"RIFF");
        webp.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        webp.extend_from_slice(b"WEBP");
        assert_eq!(sniff_mime(&webp), Ok("image/webp"));
    }

    #[test]
    fn test_sniff_rejects_non_images() {
        let result = sniff_mime(b"just some plain text, not an image");
        assert_eq!(result, Err(UNSUPPORTED_FILE_MESSAGE.to_string()));
    }

    #[test]
    fn test_data_url_round_trip_reproduces_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let image = SelectedImage {
            mime_type: "image/png".to_string(),
            encoded_data: STANDARD.encode(&bytes),
            bytes: bytes.clone(),
        };

        let decoded = decode_data_url(&image.data_url()).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_stale_load_generations() {
        let mut uploads = UploadController::new();
        let first = uploads.begin();
        let second = uploads.begin();

        // Only the most recent load may win
        assert!(!uploads.is_current(first));
        assert!(uploads.is_current(second));

        uploads.reset();
        assert!(!uploads.is_current(second));
    }

    #[tokio::test]
    async fn test_load_image_missing_file() {
        let result = load_image(PathBuf::from("/nonexistent/photo.png")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_image_reads_and_encodes() {
        let path = std::env::temp_dir().join("skin_analyzer_test_load.png");
        let mut content = Vec::from(PNG_MAGIC);
        content.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
        std::fs::write(&path, &content).unwrap();

        let image = load_image(path.clone()).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, content);
        assert_eq!(decode_data_url(&image.data_url()).unwrap(), content);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_image_rejects_text_file() {
        let path = std::env::temp_dir().join("skin_analyzer_test_load.txt");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = load_image(path.clone()).await;
        assert_eq!(result, Err(UNSUPPORTED_FILE_MESSAGE.to_string()));

        let _ = std::fs::remove_file(&path);
    }
}

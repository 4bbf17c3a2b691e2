use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;

/// Largest accepted upload (5MB), matching the settings panel's limit.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Validate uploaded bytes and return them as a `data:` URL.
///
/// Checks run in the order the settings panel reports them: format first,
/// then size, then a full decode. The data URL carries the original bytes,
/// not the decoded pixels. Errors are the user-facing messages.
pub fn to_data_url(bytes: &[u8]) -> Result<String, String> {
    let mime = match image::guess_format(bytes).ok() {
        Some(ImageFormat::Jpeg) => "image/jpeg",
        Some(ImageFormat::Png) => "image/png",
        Some(ImageFormat::Gif) => "image/gif",
        Some(ImageFormat::WebP) => "image/webp",
        _ => return Err("Please upload a valid image file (JPEG, PNG, GIF, or WebP)".to_string()),
    };

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err("Image file size must be less than 5MB".to_string());
    }

    // A recognized magic number can still head a truncated or damaged file.
    if image::load_from_memory(bytes).is_err() {
        return Err("Failed to process the image. Please try again with a different file.".to_string());
    }

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// A 1x1 transparent PNG, for exercising upload paths in tests.
#[cfg(test)]
pub(crate) const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

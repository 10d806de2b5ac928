//! Asset model
//!
//! An [`Asset`] is an immutable snapshot of one content item, taken when the
//! request is resolved. The packaging engine only reads it; the content store
//! owns the underlying binaries.

/// Immutable snapshot of a content item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Path of the asset directory in the content store
    pub path: String,
    /// Display name, e.g. `test.png`
    pub name: String,
    /// File extension of the original binary, e.g. `png`
    pub extension: String,
    /// MIME type of the original binary, e.g. `image/png`
    pub mime_type: String,
}

impl Asset {
    /// Primary component of the MIME type, e.g. `image` for `image/png`
    ///
    /// Dispatchers declare the asset types they support in these terms.
    pub fn asset_type(&self) -> &str {
        self.mime_type
            .split_once('/')
            .map(|(primary, _)| primary)
            .unwrap_or(&self.mime_type)
    }
}

/// Map a file extension to its MIME type
///
/// Covers the formats the content store serves. Unknown extensions fall back
/// to `application/octet-stream`.
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "txt" => "text/plain",
        "html" => "text/html",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Map a MIME type back to a file extension, if known
///
/// Used by the naming engine to derive the entry extension from the resolved
/// rendition's MIME type; `None` means the asset's native extension applies.
pub fn extension_for_mime_type(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpeg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/tiff" => Some("tiff"),
        "image/svg+xml" => Some("svg"),
        "video/mp4" => Some("mp4"),
        "video/webm" => Some("webm"),
        "video/quicktime" => Some("mov"),
        "audio/mpeg" => Some("mp3"),
        "audio/wav" => Some("wav"),
        "application/pdf" => Some("pdf"),
        "application/zip" => Some("zip"),
        "text/plain" => Some("txt"),
        "text/html" => Some("html"),
        "application/json" => Some("json"),
        _ => None,
    }
}

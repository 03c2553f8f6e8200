/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the upload surface, the restoration pipeline and the viewer.
use std::path::PathBuf;

use iced::widget::image::Handle;

/// The photo the user picked or dropped
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// Full path to the file on disk
    pub path: PathBuf,
    /// Declared media type, e.g. "image/jpeg"
    pub media_type: String,
    /// Display handle for the original photo
    pub preview: Handle,
}

impl SelectedImage {
    pub fn new(path: PathBuf, media_type: impl Into<String>) -> Self {
        let preview = Handle::from_path(&path);
        Self {
            path,
            media_type: media_type.into(),
            preview,
        }
    }

    /// Filename only (e.g., "grandma_1952.jpg")
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// File content ready to be sent inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Standard base64 with padding
    pub base64: String,
    pub media_type: String,
}

/// An image returned by the restoration service
#[derive(Debug, Clone)]
pub struct RestoredImage {
    /// Base64 text exactly as the service returned it
    pub base64: String,
    pub media_type: String,
    /// Decoded image bytes
    pub bytes: Vec<u8>,
    /// Display handle built once from `bytes`
    pub handle: Handle,
}

impl RestoredImage {
    pub fn new(base64: String, media_type: String, bytes: Vec<u8>) -> Self {
        let handle = Handle::from_bytes(bytes.clone());
        Self {
            base64,
            media_type,
            bytes,
            handle,
        }
    }
}

/// File-to-payload encoder
///
/// Reads a photo from disk and turns it into base64 text the image
/// service accepts as inline data.
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::state::data::EncodedPayload;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file is empty, nothing to encode")]
    Empty,
}

/// Read a file and encode its content
///
/// # Arguments
/// * `path` - Path to the photo
/// * `media_type` - Declared media type, passed through unchanged
pub async fn encode_file(path: &Path, media_type: &str) -> Result<EncodedPayload, EncodeError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| EncodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), size = bytes.len(), "read image for encoding");
    encode_bytes(&bytes, media_type)
}

/// Encode raw bytes. An empty buffer yields no payload and is an error.
pub fn encode_bytes(bytes: &[u8], media_type: &str) -> Result<EncodedPayload, EncodeError> {
    if bytes.is_empty() {
        return Err(EncodeError::Empty);
    }

    Ok(EncodedPayload {
        base64: STANDARD.encode(bytes),
        media_type: media_type.to_string(),
    })
}

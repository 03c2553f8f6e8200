/// Photo restoration pipeline
///
/// This module handles:
/// - Encoding the selected file as base64 (encoder.rs)
/// - The generateContent wire format (wire.rs)
/// - Talking to the image service (client.rs)
///
/// `restore_photo` chains them: read, encode, send, decode.

pub mod client;
pub mod encoder;
pub mod wire;

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::RestoreError;
use crate::state::data::RestoredImage;

pub use client::RestorationClient;

/// Run one full restoration for the file at `path`
pub async fn restore_photo(
    client: &RestorationClient,
    path: &Path,
    media_type: &str,
) -> Result<RestoredImage, RestoreError> {
    let payload = encoder::encode_file(path, media_type).await?;
    let output = client.restore(&payload).await?;
    let bytes = STANDARD.decode(&output.base64)?;

    tracing::info!(
        path = %path.display(),
        restored_bytes = bytes.len(),
        media_type = %output.media_type,
        "restoration complete"
    );

    Ok(RestoredImage::new(output.base64, output.media_type, bytes))
}

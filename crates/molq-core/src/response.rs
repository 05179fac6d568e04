//! Response interpretation — turns a raw HTTP response into a display
//! artifact, guided by the shape the query declared.
//!
//! The interpreter owns every parsing decision: CID-list tokenisation, JSON
//! parsing, image decode + resize, and SDF passthrough. Non-200 statuses stop
//! interpretation before any shape-specific handling runs.

use crate::error::ApiError;
use crate::types::{Artifact, Cid, ResponseShape, STRUCTURE_SIZE};
use image::imageops::FilterType;

/// Status, reason phrase, and body of one completed HTTP exchange.
///
/// Produced by the transport; consumed exactly once by [`interpret`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

/// Interpret `resp` according to `shape`.
///
/// A non-200 status yields [`ApiError::Http`] with the original status and
/// reason — no artifact is produced, and nothing retries. An empty CID list
/// is the [`Artifact::NoMatches`] outcome, not an error.
pub fn interpret(shape: ResponseShape, resp: RawResponse) -> Result<Artifact, ApiError> {
    if resp.status != 200 {
        return Err(ApiError::Http {
            status: resp.status,
            reason: resp.reason,
        });
    }

    match shape {
        ResponseShape::CidList => {
            let text = String::from_utf8_lossy(&resp.body);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(Artifact::NoMatches)
            } else {
                Ok(Artifact::Identifiers(
                    trimmed.split_whitespace().map(Cid::from).collect(),
                ))
            }
        }
        ResponseShape::Json => Ok(Artifact::Record(serde_json::from_slice(&resp.body)?)),
        ResponseShape::Png => Ok(Artifact::Structure(decode_structure(&resp.body)?)),
        ResponseShape::Sdf => Ok(Artifact::Document(resp.body)),
    }
}

/// Decode an image body and resize it onto the fixed square canvas.
///
/// The resize target is a presentation contract: the UI always receives a
/// [`STRUCTURE_SIZE`]×[`STRUCTURE_SIZE`] bitmap regardless of what the
/// service rendered.
pub fn decode_structure(body: &[u8]) -> Result<image::RgbaImage, ApiError> {
    let img = image::load_from_memory(body).map_err(|e| ApiError::ImageDecode(e.to_string()))?;
    Ok(img
        .resize_exact(STRUCTURE_SIZE, STRUCTURE_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}

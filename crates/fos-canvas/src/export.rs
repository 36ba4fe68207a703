//! Canvas export (`toDataURL` / `toBlob`)
//!
//! Only PNG encoding is available; any other requested type falls back to
//! `image/png`, matching browsers for unsupported types.

use base64::Engine as _;

use crate::{CanvasError, CanvasRenderingContext2D};

pub const PNG_MIME: &str = "image/png";

/// Encoded image bytes with their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl CanvasRenderingContext2D {
    /// PNG bytes of the current backing store
    pub fn encode_png(&self) -> Result<Vec<u8>, CanvasError> {
        let pixmap = self.pixmap().ok_or(CanvasError::EmptyCanvas {
            width: self.width(),
            height: self.height(),
        })?;
        pixmap
            .encode_png()
            .map_err(|e| CanvasError::Encode(e.to_string()))
    }

    /// `data:` URL of the canvas; `"data:,"` for a zero-sized canvas
    pub fn to_data_url(&self, mime: Option<&str>) -> Result<String, CanvasError> {
        if self.pixmap().is_none() {
            return Ok("data:,".to_string());
        }
        log_fallback(mime);
        let png = self.encode_png()?;
        Ok(format!(
            "data:{PNG_MIME};base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }

    pub fn to_blob(&self, mime: Option<&str>) -> Result<Blob, CanvasError> {
        log_fallback(mime);
        Ok(Blob {
            mime: PNG_MIME.to_string(),
            bytes: self.encode_png()?,
        })
    }
}

fn log_fallback(mime: Option<&str>) {
    if let Some(mime) = mime.filter(|m| !m.eq_ignore_ascii_case(PNG_MIME)) {
        tracing::trace!(requested = mime, "unsupported export type, using png");
    }
}

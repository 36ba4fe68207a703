//! fOS Canvas - 2D drawing contexts
//!
//! `CanvasRenderingContext2D` rasterizes into a tiny-skia pixmap and exports
//! PNG data URLs and blobs. [`ContextHandle`] is the shared, clonable handle
//! a document hands out for each `<canvas>` element.

mod color;
mod context2d;
mod export;
mod image_data;
mod path;
mod text;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

pub use color::Color;
pub use context2d::{
    CanvasRenderingContext2D, CanvasState, CompositeOperation, LineCap, LineJoin, TextAlign,
    TextBaseline,
};
pub use export::{Blob, PNG_MIME};
pub use image_data::ImageData;
pub use path::Path2D;
pub use text::{font_size_px, TextMetrics, TextRun};

/// Canvas errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    /// Export requested from a canvas with no pixels
    #[error("canvas is empty ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("invalid image data length: expected {expected}, got {actual}")]
    InvalidImageData { expected: usize, actual: usize },
}

/// Shared handle to one 2D context
#[derive(Clone)]
pub struct ContextHandle(Rc<RefCell<CanvasRenderingContext2D>>);

impl ContextHandle {
    pub fn new(width: u32, height: u32) -> Self {
        Self(Rc::new(RefCell::new(CanvasRenderingContext2D::new(width, height))))
    }

    pub fn borrow(&self) -> Ref<'_, CanvasRenderingContext2D> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, CanvasRenderingContext2D> {
        self.0.borrow_mut()
    }

    /// True when both handles point at the same context
    pub fn ptr_eq(&self, other: &ContextHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ContextHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl std::fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_borrow() {
            Ok(ctx) => write!(f, "ContextHandle({}x{})", ctx.width(), ctx.height()),
            Err(_) => f.write_str("ContextHandle(<borrowed>)"),
        }
    }
}

//! Query error types

use fos_canvas::CanvasError;
use fos_css::CssError;
use fos_dom::{DomError, SelectorError};
use fos_html::ParseError;

/// Result type for collection operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Collection operation errors
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Operation needs at least one target
    #[error("`{operation}` needs at least one target")]
    EmptySelection { operation: &'static str },

    #[error("index {index} out of range for collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Content channel name other than `html`/`text`
    #[error("unsupported content channel `{0}`")]
    UnsupportedChannel(String),

    /// Upward walk reached the document root without a match
    #[error("no ancestor matching `{selector}`")]
    NoMatchingAncestor { selector: String },

    #[error("target {0} has no parent")]
    Orphan(fos_dom::NodeId),

    #[error("target {0} is not a canvas element")]
    NotACanvas(fos_dom::NodeId),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Css(#[from] CssError),
}

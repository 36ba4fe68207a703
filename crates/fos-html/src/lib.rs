//! fOS HTML Parser
//!
//! HTML5 parsing built on html5ever, plus the serializer behind
//! `innerHTML`/`outerHTML`.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{inner_html, outer_html, set_inner_html};

use fos_dom::{Document, DomError};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read html input: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsed fragment has no root element")]
    MissingFragmentRoot,

    #[error(transparent)]
    Dom(#[from] DomError),
}

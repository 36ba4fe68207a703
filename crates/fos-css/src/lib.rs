//! fOS CSS Parser
//!
//! Lowers stylesheets into the author rules a [`fos_dom::Document`]
//! cascades over.

mod parser;
mod stylesheet;

pub use parser::CssParser;
pub use stylesheet::attach_stylesheets;

use fos_dom::StyleRule;

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Vec<StyleRule>, CssError> {
    CssParser::new().parse(css)
}

/// CSS parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("parse error{}: {message}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse { line: Option<u32>, message: String },

    #[error("failed to print css: {0}")]
    Print(String),
}

//! `<style>` element collection

use fos_dom::{Document, NodeId};

use crate::{CssError, CssParser};

/// Parse every `<style>` element in `document` and register its rules.
/// Returns the number of rules added.
pub fn attach_stylesheets(document: &mut Document) -> Result<usize, CssError> {
    let styles = match document.query_selector_all(NodeId::ROOT, "style") {
        Ok(nodes) => nodes,
        Err(_) => return Ok(0),
    };

    let parser = CssParser::new();
    let mut added = 0;
    for style in styles {
        let css = document.tree().text_content(style);
        let rules = parser.parse(&css)?;
        added += rules.len();
        document.add_style_rules(rules);
    }

    tracing::debug!(rules = added, "attached stylesheets");
    Ok(added)
}

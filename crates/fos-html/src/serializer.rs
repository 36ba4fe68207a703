//! HTML serialization (`innerHTML` / `outerHTML`)

use fos_dom::{Document, DomTree, NodeData, NodeId};

use crate::{HtmlParser, ParseError};

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Serialized children of `node`
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    let raw = tree
        .element(node)
        .is_some_and(|e| RAW_TEXT_ELEMENTS.contains(&e.tag_name.as_str()));
    for child in tree.children(node) {
        serialize(tree, child, raw, &mut out);
    }
    out
}

/// Serialized `node` including its own tags
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    let raw = tree
        .parent(node)
        .and_then(|p| tree.element(p))
        .is_some_and(|e| RAW_TEXT_ELEMENTS.contains(&e.tag_name.as_str()));
    let mut out = String::new();
    serialize(tree, node, raw, &mut out);
    out
}

/// Replace the children of `node` with `markup` parsed in `node`'s context
pub fn set_inner_html(document: &mut Document, node: NodeId, markup: &str) -> Result<(), ParseError> {
    document.tree().node(node)?;
    let context = document
        .tree()
        .element(node)
        .map_or_else(|| "body".to_string(), |e| e.tag_name.clone());
    let nodes = HtmlParser::new().parse_fragment_in(document, &context, markup)?;
    let tree = document.tree_mut();
    tree.remove_children(node);
    for child in nodes {
        tree.append_child(node, child)?;
    }
    Ok(())
}

fn serialize(tree: &DomTree, node: NodeId, raw_parent: bool, out: &mut String) {
    let Some(data) = tree.get(node).map(|n| &n.data) else {
        return;
    };
    match data {
        NodeData::Document => {
            for child in tree.children(node) {
                serialize(tree, child, false, out);
            }
        }
        NodeData::Doctype { name } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Text(text) if raw_parent => out.push_str(text),
        NodeData::Text(text) => escape(text, false, out),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag_name);
            for attr in elem.attributes().iter() {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape(&attr.value, true, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&elem.tag_name.as_str()) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&elem.tag_name.as_str());
            for child in tree.children(node) {
                serialize(tree, child, raw, out);
            }
            out.push_str("</");
            out.push_str(&elem.tag_name);
            out.push('>');
        }
    }
}

fn escape(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

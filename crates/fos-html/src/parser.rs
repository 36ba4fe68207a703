//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and copies the result into the fOS arena.

use fos_dom::{Document, DomTree, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, parse_fragment, LocalName, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!(url, bytes = html.len(), "parsing html document");

        let dom = Self::parse_rc(html)?;
        let mut document = Document::empty(url);
        for child in dom.document.children.borrow().iter() {
            if let Some(id) = Self::convert_node(child, document.tree_mut()) {
                document.tree_mut().append_child(NodeId::ROOT, id)?;
            }
        }
        document.finalize();

        tracing::debug!(nodes = document.tree().len(), "parsed html document");
        Ok(document)
    }

    /// Parse markup as the children of a `<body>`, returning detached nodes
    /// owned by `document`, in order
    pub fn parse_fragment(&self, document: &mut Document, markup: &str) -> Result<Vec<NodeId>, ParseError> {
        self.parse_fragment_in(document, "body", markup)
    }

    /// Parse markup as the children of a `context` element, so that
    /// `<tr>` survives under `tbody` and `<b>` stays text under `textarea`
    pub fn parse_fragment_in(
        &self,
        document: &mut Document,
        context: &str,
        markup: &str,
    ) -> Result<Vec<NodeId>, ParseError> {
        if markup.is_empty() {
            return Ok(Vec::new());
        }
        let context_name = QualName::new(None, ns!(html), LocalName::from(context));
        let dom = parse_fragment(RcDom::default(), Default::default(), context_name, Vec::new(), false)
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;
        // Fragment nodes hang off a synthetic <html> root
        let root = dom
            .document
            .children
            .borrow()
            .first()
            .cloned()
            .ok_or(ParseError::MissingFragmentRoot)?;

        let tree = document.tree_mut();
        let nodes: Vec<NodeId> = root
            .children
            .borrow()
            .iter()
            .filter_map(|child| Self::convert_node(child, tree))
            .collect();
        tracing::trace!(context, nodes = nodes.len(), "parsed html fragment");
        Ok(nodes)
    }

    fn parse_rc(html: &str) -> Result<RcDom, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    /// Copy one RcDom subtree into the arena, detached
    fn convert_node(handle: &Handle, tree: &mut DomTree) -> Option<NodeId> {
        let id = match &handle.data {
            RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => return None,
            RcNodeData::Doctype { name, .. } => return Some(tree.create_doctype(name)),
            RcNodeData::Text { contents } => return Some(tree.create_text(&contents.borrow())),
            RcNodeData::Comment { contents } => return Some(tree.create_comment(contents)),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                if let Some(elem) = tree.element_mut(id) {
                    for attr in attrs.borrow().iter() {
                        elem.set_attribute(&attr.name.local, &attr.value);
                    }
                }
                id
            }
        };

        for child in handle.children.borrow().iter() {
            if let Some(child_id) = Self::convert_node(child, tree) {
                // Both nodes are fresh, so the hierarchy is always valid
                let _ = tree.append_child(id, child_id);
            }
        }
        Some(id)
    }
}

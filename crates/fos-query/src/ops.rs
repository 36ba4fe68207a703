//! Per-target primitives
//!
//! Every collection operation reaches the host document through a
//! [`TargetOps`] strategy. All methods have working defaults against
//! [`Window`]; an implementation overrides only what it needs to replace,
//! and a `Query` built with it hands the replacement to every collection it
//! creates.

use fos_canvas::ContextHandle;
use fos_dom::{DomError, EventListener, NodeId, Window};
use indexmap::IndexMap;

use crate::{QueryError, QueryResult};

/// Inner content channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Serialized child markup (`innerHTML`)
    Html,
    /// Concatenated descendant text (`textContent`)
    Text,
}

impl ContentKind {
    /// Resolve a channel by its script-facing or short name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "html" | "innerHTML" => Some(Self::Html),
            "text" | "textContent" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "innerHTML",
            Self::Text => "textContent",
        }
    }
}

/// Where inserted content lands among a target's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Start,
    End,
}

/// One class-list edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOp<'a> {
    Add(&'a str),
    Remove(&'a str),
    Toggle(&'a str),
    Clear,
}

/// Per-target primitives behind every collection operation
pub trait TargetOps {
    fn query_all(&self, window: &Window, root: NodeId, selector: &str) -> QueryResult<Vec<NodeId>> {
        Ok(window.document().query_selector_all(root, selector)?)
    }

    fn query_first(&self, window: &Window, root: NodeId, selector: &str) -> QueryResult<Option<NodeId>> {
        Ok(window.document().query_selector(root, selector)?)
    }

    fn parent(&self, window: &Window, node: NodeId) -> Option<NodeId> {
        window.document().tree().parent(node)
    }

    fn attribute(&self, window: &Window, node: NodeId, name: &str) -> Option<String> {
        window.document().get_attribute(node, name).map(str::to_string)
    }

    fn set_attribute(&self, window: &Window, node: NodeId, name: &str, value: &str) -> QueryResult<()> {
        Ok(window.document_mut().set_attribute(node, name, value)?)
    }

    fn data(&self, window: &Window, node: NodeId, key: &str) -> Option<String> {
        window.document().dataset_get(node, key).map(str::to_string)
    }

    fn set_data(&self, window: &Window, node: NodeId, key: &str, value: &str) -> QueryResult<()> {
        Ok(window.document_mut().dataset_set(node, key, value)?)
    }

    fn dataset(&self, window: &Window, node: NodeId) -> IndexMap<String, String> {
        window.document().dataset(node).into_iter().collect()
    }

    fn value(&self, window: &Window, node: NodeId) -> Option<String> {
        window.document().value(node)
    }

    fn set_value(&self, window: &Window, node: NodeId, value: &str) -> QueryResult<()> {
        Ok(window.document_mut().set_value(node, value)?)
    }

    fn content(&self, window: &Window, node: NodeId, kind: ContentKind) -> String {
        let doc = window.document();
        match kind {
            ContentKind::Html => fos_html::inner_html(doc.tree(), node),
            ContentKind::Text => doc.tree().text_content(node),
        }
    }

    fn set_content(&self, window: &Window, node: NodeId, kind: ContentKind, value: &str) -> QueryResult<()> {
        let mut doc = window.document_mut();
        match kind {
            ContentKind::Html => fos_html::set_inner_html(&mut doc, node, value)?,
            ContentKind::Text => doc.tree_mut().set_text_content(node, value)?,
        }
        Ok(())
    }

    /// Deep-clone `source` and insert the copy into `node`
    fn insert_clone(&self, window: &Window, node: NodeId, source: NodeId, position: Position) -> QueryResult<()> {
        let mut doc = window.document_mut();
        let tree = doc.tree_mut();
        tree.node(node)?;
        let copy = tree.clone_node(source, true)?;
        let reference = match position {
            Position::Start => tree.children(node).next(),
            Position::End => None,
        };
        tree.insert_before(node, copy, reference)?;
        Ok(())
    }

    fn detach(&self, window: &Window, node: NodeId) -> QueryResult<()> {
        Ok(window.document_mut().tree_mut().detach(node)?)
    }

    fn set_style(&self, window: &Window, node: NodeId, property: &str, value: &str) -> QueryResult<()> {
        Ok(window.document_mut().set_style_property(node, property, value)?)
    }

    fn computed_style(&self, window: &Window, node: NodeId, property: &str) -> String {
        window.document().computed_style(node, property)
    }

    fn remembered_display(&self, window: &Window, node: NodeId) -> Option<String> {
        window.document().remembered_display(node).map(str::to_string)
    }

    fn set_remembered_display(&self, window: &Window, node: NodeId, display: Option<&str>) -> QueryResult<()> {
        Ok(window.document_mut().set_remembered_display(node, display)?)
    }

    fn modify_class(&self, window: &Window, node: NodeId, op: ClassOp<'_>) -> QueryResult<()> {
        window.document_mut().with_class_list(node, |list| match op {
            ClassOp::Add(name) => {
                list.add(name);
            }
            ClassOp::Remove(name) => {
                list.remove(name);
            }
            ClassOp::Toggle(name) => {
                list.toggle(name);
            }
            ClassOp::Clear => list.clear(),
        })?;
        Ok(())
    }

    fn has_class(&self, window: &Window, node: NodeId, name: &str) -> bool {
        window
            .document()
            .class_list(node)
            .is_some_and(|list| list.contains(name))
    }

    fn add_listener(&self, window: &Window, node: NodeId, event: &str, listener: EventListener, capture: bool) -> bool {
        window.add_event_listener(node, event, listener, capture)
    }

    fn remove_listener(&self, window: &Window, node: NodeId, event: &str, listener: &EventListener, capture: bool) -> bool {
        window.remove_event_listener(node, event, listener, capture)
    }

    fn context_2d(&self, window: &Window, node: NodeId) -> QueryResult<ContextHandle> {
        window.document_mut().context_2d(node).map_err(|e| match e {
            DomError::NotACanvas(node) => QueryError::NotACanvas(node),
            other => QueryError::Dom(other),
        })
    }
}

/// The host's own behavior for every primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOps;

impl TargetOps for DefaultOps {}

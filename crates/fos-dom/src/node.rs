//! DOM Node
//!
//! Nodes link to each other through [`NodeId`]s rather than pointers; the
//! arena in [`crate::DomTree`] owns every node, attached or not.

use crate::{DOMTokenList, NamedNodeMap, NodeId, StyleDeclaration};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Upper-case node name, as `nodeName` reports it
    pub fn node_name(&self) -> String {
        match &self.data {
            NodeData::Document => "#document".to_string(),
            NodeData::Doctype { name } => name.clone(),
            NodeData::Element(e) => e.tag_name.to_ascii_uppercase(),
            NodeData::Text(_) => "#text".to_string(),
            NodeData::Comment(_) => "#comment".to_string(),
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lower-case local tag name
    pub tag_name: String,
    attrs: NamedNodeMap,
    class_list: DOMTokenList,
    style: StyleDeclaration,
    /// Dirty form value; `None` means "read from markup"
    pub(crate) value: Option<String>,
    /// Display value remembered by a hide so a later show can restore it
    pub(crate) remembered_display: Option<String>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            class_list: DOMTokenList::new(),
            style: StyleDeclaration::new(),
            value: None,
            remembered_display: None,
        }
    }

    pub fn attributes(&self) -> &NamedNodeMap {
        &self.attrs
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    /// Set an attribute, keeping `class` and `style` views in sync
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attrs.set_attribute(name, value);
        match name.to_ascii_lowercase().as_str() {
            "class" => self.class_list = DOMTokenList::parse(value),
            "style" => self.style = StyleDeclaration::parse(value),
            _ => {}
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let removed = self.attrs.remove_attribute(name).is_some();
        match name.to_ascii_lowercase().as_str() {
            "class" => self.class_list.clear(),
            "style" => self.style = StyleDeclaration::new(),
            _ => {}
        }
        removed
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.get_attribute("id")
    }

    pub fn class_list(&self) -> &DOMTokenList {
        &self.class_list
    }

    /// Mutate the class list; the `class` attribute is rewritten afterwards
    pub fn with_class_list<R>(&mut self, f: impl FnOnce(&mut DOMTokenList) -> R) -> R {
        let result = f(&mut self.class_list);
        let value = self.class_list.value();
        self.attrs.set_attribute("class", &value);
        result
    }

    pub fn style(&self) -> &StyleDeclaration {
        &self.style
    }

    /// Mutate the inline style; the `style` attribute is rewritten afterwards
    pub fn with_style<R>(&mut self, f: impl FnOnce(&mut StyleDeclaration) -> R) -> R {
        let result = f(&mut self.style);
        let text = self.style.css_text();
        self.attrs.set_attribute("style", &text);
        result
    }

    pub fn remembered_display(&self) -> Option<&str> {
        self.remembered_display.as_deref()
    }
}

//! Document - High-level document API
//!
//! Wraps the arena with the per-document state collections read and write:
//! author style rules, event listeners, and canvas contexts.

use std::collections::HashMap;

use fos_canvas::ContextHandle;

use crate::cascade::{self, StyleRule};
use crate::events::ListenerRegistry;
use crate::{
    to_attribute_name, to_dataset_key, DOMTokenList, DomError, DomResult, DomTree, EventListener,
    ListenerId, NodeId, SelectorError, SelectorList, StyleDeclaration,
};

/// Canvas size when `width`/`height` are absent or invalid
const DEFAULT_CANVAS_SIZE: (u32, u32) = (300, 150);

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    rules: Vec<StyleRule>,
    listeners: ListenerRegistry,
    contexts: HashMap<NodeId, ContextHandle>,
}

impl Document {
    /// Create a document with empty `<html>`, `<head>` and `<body>`
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        // Fresh nodes under a fresh root cannot violate hierarchy rules
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);
        doc.finalize();
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            rules: Vec::new(),
            listeners: ListenerRegistry::new(),
            contexts: HashMap::new(),
        }
    }

    /// Locate `<html>`, `<head>` and `<body>` after the tree was built
    pub fn finalize(&mut self) {
        let tag_of = |tree: &DomTree, id: NodeId| tree.element(id).map(|e| e.tag_name.clone());
        self.html_element = self
            .tree
            .element_children(NodeId::ROOT)
            .find(|&c| tag_of(&self.tree, c).as_deref() == Some("html"))
            .unwrap_or(NodeId::NONE);
        self.head_element = NodeId::NONE;
        self.body_element = NodeId::NONE;
        if self.html_element.is_valid() {
            for child in self.tree.element_children(self.html_element) {
                match tag_of(&self.tree, child).as_deref() {
                    Some("head") if !self.head_element.is_valid() => self.head_element = child,
                    Some("body") if !self.body_element.is_valid() => self.body_element = child,
                    _ => {}
                }
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self) -> String {
        self.tree
            .element_children(self.head_element)
            .find(|&c| self.tree.element(c).is_some_and(|e| e.tag_name == "title"))
            .map(|t| self.tree.text_content(t).trim().to_string())
            .unwrap_or_default()
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    // === Selectors ===

    /// Matching elements below `root` in document order
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(SelectorList::parse(selector)?.query_all(&self.tree, root))
    }

    pub fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(SelectorList::parse(selector)?.query_first(&self.tree, root))
    }

    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
        Ok(SelectorList::parse(selector)?.matches(&self.tree, node))
    }

    // === Attributes ===

    fn element_mut(&mut self, node: NodeId) -> DomResult<&mut crate::ElementData> {
        self.tree.node(node)?;
        self.tree.element_mut(node).ok_or(DomError::NotAnElement(node))
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree.element(node)?.get_attribute(name)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(node)?.set_attribute(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.element_mut(node)?.remove_attribute(name))
    }

    pub fn class_list(&self, node: NodeId) -> Option<&DOMTokenList> {
        self.tree.element(node).map(|e| e.class_list())
    }

    /// Mutate the class list of `node`, keeping the `class` attribute in sync
    pub fn with_class_list<R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut DOMTokenList) -> R,
    ) -> DomResult<R> {
        Ok(self.element_mut(node)?.with_class_list(f))
    }

    // === Dataset ===

    pub fn dataset_get(&self, node: NodeId, key: &str) -> Option<&str> {
        self.get_attribute(node, &to_attribute_name(key))
    }

    pub fn dataset_set(&mut self, node: NodeId, key: &str, value: &str) -> DomResult<()> {
        self.set_attribute(node, &to_attribute_name(key), value)
    }

    /// Every `data-*` attribute as `(camelCaseKey, value)`, in attribute order
    pub fn dataset(&self, node: NodeId) -> Vec<(String, String)> {
        let Some(elem) = self.tree.element(node) else {
            return Vec::new();
        };
        elem.attributes()
            .iter()
            .filter_map(|attr| Some((to_dataset_key(&attr.name)?, attr.value.clone())))
            .collect()
    }

    // === Form values ===

    /// Current value of a form control, or a value previously assigned to
    /// any other element
    pub fn value(&self, node: NodeId) -> Option<String> {
        let elem = self.tree.element(node)?;
        if let Some(value) = &elem.value {
            return Some(value.clone());
        }
        match elem.tag_name.as_str() {
            "input" | "option" | "button" => Some(match elem.get_attribute("value") {
                Some(value) => value.to_string(),
                None if elem.tag_name == "option" => self.tree.text_content(node),
                None => String::new(),
            }),
            "textarea" => Some(self.tree.text_content(node)),
            "select" => Some(self.selected_option_value(node).unwrap_or_default()),
            _ => None,
        }
    }

    fn selected_option_value(&self, select: NodeId) -> Option<String> {
        let options: Vec<NodeId> = self
            .tree
            .descendants(select)
            .into_iter()
            .filter(|&n| self.tree.element(n).is_some_and(|e| e.tag_name == "option"))
            .collect();
        let chosen = options
            .iter()
            .copied()
            .find(|&o| self.get_attribute(o, "selected").is_some())
            .or_else(|| options.first().copied())?;
        self.value(chosen)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(node)?.value = Some(value.to_string());
        Ok(())
    }

    // === Style ===

    pub fn inline_style(&self, node: NodeId) -> Option<&StyleDeclaration> {
        self.tree.element(node).map(|e| e.style())
    }

    /// Set one inline property (CSSOM or CSS name); empty value removes it
    pub fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(node)?
            .with_style(|style| style.set_property(name, value));
        Ok(())
    }

    /// Resolved value of `property` for `node`
    pub fn computed_style(&self, node: NodeId, property: &str) -> String {
        cascade::computed_value(&self.tree, &self.rules, node, property)
    }

    pub fn remembered_display(&self, node: NodeId) -> Option<&str> {
        self.tree.element(node)?.remembered_display()
    }

    pub fn set_remembered_display(&mut self, node: NodeId, display: Option<&str>) -> DomResult<()> {
        self.element_mut(node)?.remembered_display = display.map(str::to_string);
        Ok(())
    }

    /// Append author rules after every rule already installed
    pub fn add_style_rules(&mut self, rules: impl IntoIterator<Item = StyleRule>) {
        for mut rule in rules {
            rule.order = self.rules.len();
            self.rules.push(rule);
        }
    }

    pub fn style_rules(&self) -> &[StyleRule] {
        &self.rules
    }

    // === Events ===

    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: EventListener,
        capture: bool,
    ) -> DomResult<bool> {
        self.tree.node(node)?;
        Ok(self.listeners.add(node, event_type, listener, capture))
    }

    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        id: ListenerId,
        capture: bool,
    ) -> bool {
        self.listeners.remove(node, event_type, id, capture)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    // === Canvas ===

    /// The 2D context of a `<canvas>` element, created on first use
    pub fn context_2d(&mut self, node: NodeId) -> DomResult<ContextHandle> {
        if let Some(handle) = self.contexts.get(&node) {
            return Ok(handle.clone());
        }
        let elem = self.tree.element(node).ok_or(DomError::NotACanvas(node))?;
        if elem.tag_name != "canvas" {
            return Err(DomError::NotACanvas(node));
        }
        let dimension = |name: &str, default: u32| {
            elem.get_attribute(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(default)
        };
        let width = dimension("width", DEFAULT_CANVAS_SIZE.0);
        let height = dimension("height", DEFAULT_CANVAS_SIZE.1);
        tracing::debug!(%node, width, height, "creating 2d context");
        let handle = ContextHandle::new(width, height);
        self.contexts.insert(node, handle.clone());
        Ok(handle)
    }

    /// Node kind name as `nodeName` reports it
    pub fn node_name(&self, node: NodeId) -> String {
        self.tree.get(node).map(|n| n.node_name()).unwrap_or_default()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .field("rules", &self.rules.len())
            .field("contexts", &self.contexts.len())
            .finish()
    }
}

//! Collection factory

use std::rc::Rc;

use fos_dom::{NodeId, Window};

use crate::events::PendingCompletions;
use crate::ops::{DefaultOps, TargetOps};
use crate::{QueryConfig, QueryResult, Selection};

/// Anything a selection can be built from
#[derive(Debug, Clone)]
pub enum Source {
    /// Selector evaluated against the document (or a scope root)
    Selector(String),
    /// An existing selection, returned as is
    Selection(Selection),
    /// A native node list
    Nodes(Vec<NodeId>),
    /// One node, including the document node
    Node(NodeId),
}

impl From<&str> for Source {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Source {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<Selection> for Source {
    fn from(selection: Selection) -> Self {
        Self::Selection(selection)
    }
}

impl From<&Selection> for Source {
    fn from(selection: &Selection) -> Self {
        Self::Selection(selection.clone())
    }
}

impl From<Vec<NodeId>> for Source {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<&[NodeId]> for Source {
    fn from(nodes: &[NodeId]) -> Self {
        Self::Nodes(nodes.to_vec())
    }
}

impl From<NodeId> for Source {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Entry point: resolves sources into selections over one window
#[derive(Clone)]
pub struct Query {
    inner: Rc<QueryInner>,
}

struct QueryInner {
    window: Window,
    config: QueryConfig,
    ops: Rc<dyn TargetOps>,
    completions: PendingCompletions,
}

impl Query {
    pub fn new(window: Window) -> Self {
        Self::with_config(window, QueryConfig::default())
    }

    pub fn with_config(window: Window, config: QueryConfig) -> Self {
        Self {
            inner: Rc::new(QueryInner {
                window,
                config,
                ops: Rc::new(DefaultOps),
                completions: PendingCompletions::default(),
            }),
        }
    }

    /// Replace the per-target primitives for every collection this query
    /// creates from now on
    pub fn with_ops(self, ops: impl TargetOps + 'static) -> Self {
        Self {
            inner: Rc::new(QueryInner {
                window: self.inner.window.clone(),
                config: self.inner.config.clone(),
                ops: Rc::new(ops),
                completions: self.inner.completions.clone(),
            }),
        }
    }

    /// Parse `html`, install its `<style>` rules and wrap it in a window
    pub fn from_html(html: &str) -> QueryResult<Self> {
        let mut document = fos_html::parse(html)?;
        fos_css::attach_stylesheets(&mut document)?;
        Ok(Self::new(Window::new(document)))
    }

    pub fn window(&self) -> &Window {
        &self.inner.window
    }

    pub fn config(&self) -> &QueryConfig {
        &self.inner.config
    }

    pub fn ops(&self) -> &dyn TargetOps {
        self.inner.ops.as_ref()
    }

    pub(crate) fn shared_ops(&self) -> Rc<dyn TargetOps> {
        Rc::clone(&self.inner.ops)
    }

    pub(crate) fn completions(&self) -> &PendingCompletions {
        &self.inner.completions
    }

    /// Build a selection; selectors are evaluated against the whole document
    pub fn select(&self, source: impl Into<Source>) -> QueryResult<Selection> {
        self.select_in(source, NodeId::ROOT)
    }

    /// Build a selection; selectors are evaluated under `root`
    pub fn select_in(&self, source: impl Into<Source>, root: NodeId) -> QueryResult<Selection> {
        match source.into() {
            Source::Selection(selection) => Ok(selection),
            Source::Nodes(nodes) => self.selection(nodes),
            Source::Node(node) => self.selection(vec![node]),
            Source::Selector(selector) => {
                let nodes = self.ops().query_all(self.window(), root, &selector)?;
                tracing::debug!(%selector, %root, matched = nodes.len(), "selection built");
                Ok(Selection::new(self.clone(), nodes))
            }
        }
    }

    /// Wrap `nodes`; every id must name a live node of this document
    pub fn selection(&self, nodes: Vec<NodeId>) -> QueryResult<Selection> {
        {
            let doc = self.window().document();
            for &node in &nodes {
                doc.tree().node(node)?;
            }
        }
        Ok(Selection::new(self.clone(), nodes))
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("window", &self.inner.window)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryError;
    use fos_dom::DomError;

    const PAGE: &str = "<div id=\"container\"><h3>a</h3><h3>b</h3></div><h3>c</h3>";

    #[test]
    fn test_select_by_selector() {
        let q = Query::from_html(PAGE).unwrap();
        assert_eq!(q.select("h3").unwrap().len(), 3);
        assert_eq!(q.select("#container").unwrap().len(), 1);
    }

    #[test]
    fn test_select_scoped() {
        let q = Query::from_html(PAGE).unwrap();
        let container = q.window().document().get_element_by_id("container").unwrap();
        assert_eq!(q.select_in("h3", container).unwrap().len(), 2);
    }

    #[test]
    fn test_select_existing_selection_is_identity() {
        let q = Query::from_html(PAGE).unwrap();
        let h3 = q.select("h3").unwrap();
        assert_eq!(q.select(&h3).unwrap(), h3);
    }

    #[test]
    fn test_select_nodes_and_document() {
        let q = Query::from_html(PAGE).unwrap();
        let nodes = q.window().document().query_selector_all(NodeId::ROOT, "h3").unwrap();
        assert_eq!(q.select(nodes).unwrap().len(), 3);
        assert_eq!(q.select(NodeId::ROOT).unwrap().len(), 1);
    }

    #[test]
    fn test_select_rejects_unknown_nodes() {
        let q = Query::from_html(PAGE).unwrap();
        assert!(matches!(
            q.select(NodeId::NONE),
            Err(QueryError::Dom(DomError::NotFound(n))) if n == NodeId::NONE
        ));
        let mut nodes = q.window().document().query_selector_all(NodeId::ROOT, "h3").unwrap();
        nodes.push(NodeId::NONE);
        assert!(q.select(nodes).is_err());
        assert!(q.selection(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selector() {
        let q = Query::from_html(PAGE).unwrap();
        assert!(matches!(q.select("h3["), Err(QueryError::Selector(_))));
    }

    #[test]
    fn test_with_ops_replaces_primitives() {
        struct NoAttributes;
        impl TargetOps for NoAttributes {
            fn attribute(&self, _: &Window, _: NodeId, _: &str) -> Option<String> {
                None
            }
        }

        let q = Query::from_html("<p id=\"x\" title=\"t\"></p>").unwrap();
        assert_eq!(q.select("#x").unwrap().attr("title").into_single(), Some(Some("t".to_string())));

        let patched = q.with_ops(NoAttributes);
        assert_eq!(patched.select("#x").unwrap().attr("title").into_single(), Some(None));
    }
}

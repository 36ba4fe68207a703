//! fOS DOM - Document Object Model
//!
//! Arena-backed host document that fOS Query collections operate on.
//! Nodes are addressed by [`NodeId`]; the shared [`Window`] handle couples a
//! [`Document`] with the timer loop that drives deferred work and event
//! dispatch.

mod attributes;
mod cascade;
mod classlist;
mod dataset;
mod document;
mod error;
mod event_loop;
mod events;
mod node;
mod selector;
mod style;
mod tree;
mod window;

pub use attributes::{Attr, NamedNodeMap};
pub use cascade::{user_agent_display, Declaration, StyleRule};
pub use classlist::DOMTokenList;
pub use dataset::{to_attribute_name, to_camel_case, to_dataset_key, to_kebab_case};
pub use document::Document;
pub use error::{DomError, DomResult, SelectorError};
pub use event_loop::{EventLoop, Task, TimerId};
pub use events::{Event, EventListener, EventPhase, ListenerId, ListenerRegistry};
pub use node::{ElementData, Node, NodeData};
pub use selector::{Selector, SelectorList, Specificity};
pub use style::{css_to_property_name, property_to_css_name, StyleDeclaration};
pub use tree::{Children, DomTree};
pub use window::{WeakWindow, Window};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

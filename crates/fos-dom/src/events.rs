//! DOM Events
//!
//! Event objects, listener handles, and the per-node listener registry.
//! Dispatch itself lives on [`crate::Window`] because it must release the
//! document borrow around every callback.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::NodeId;

static LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Listener identity; two handles with the same id are the same listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn next() -> Self {
        Self(LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Virtual time at dispatch (ms)
    pub timestamp: u64,
    /// Transitioned property for `transitionend`-style events
    pub property_name: Option<String>,
    target: Cell<NodeId>,
    current_target: Cell<NodeId>,
    phase: Cell<EventPhase>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
}

impl Event {
    /// Bubbling, cancelable event
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            bubbles: true,
            cancelable: true,
            timestamp: 0,
            property_name: None,
            target: Cell::new(NodeId::NONE),
            current_target: Cell::new(NodeId::NONE),
            phase: Cell::new(EventPhase::None),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
        }
    }

    /// Create transition end event for one property
    pub fn transition_end(event_type: &str, property_name: &str) -> Self {
        Self {
            cancelable: false,
            property_name: Some(property_name.to_string()),
            ..Self::new(event_type)
        }
    }

    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    pub fn target(&self) -> NodeId {
        self.target.get()
    }

    /// Node whose listener is currently running
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    pub fn phase(&self) -> EventPhase {
        self.phase.get()
    }

    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn stop_immediate_propagation(&self) {
        self.propagation_stopped.set(true);
        self.immediate_propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get()
    }

    pub(crate) fn begin(&self, target: NodeId, timestamp: u64) -> Self {
        let event = Self {
            timestamp,
            ..self.clone()
        };
        event.target.set(target);
        event
    }

    pub(crate) fn enter(&self, node: NodeId, phase: EventPhase) {
        self.current_target.set(node);
        self.phase.set(phase);
    }

    pub(crate) fn finish(&self) {
        self.current_target.set(NodeId::NONE);
        self.phase.set(EventPhase::None);
    }
}

/// Event listener handle
#[derive(Clone)]
pub struct EventListener {
    id: ListenerId,
    callback: Rc<dyn Fn(&Event)>,
}

impl EventListener {
    pub fn new(callback: impl Fn(&Event) + 'static) -> Self {
        Self::with_id(ListenerId::next(), callback)
    }

    /// Build a handle with a pre-allocated id, so the callback can refer
    /// to its own registration
    pub fn with_id(id: ListenerId, callback: impl Fn(&Event) + 'static) -> Self {
        Self {
            id,
            callback: Rc::new(callback),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn call(&self, event: &Event) {
        (self.callback)(event)
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventListener {}

impl std::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EventListener").field(&self.id).finish()
    }
}

#[derive(Debug, Clone)]
struct Registration {
    event_type: String,
    capture: bool,
    listener: EventListener,
}

/// Listeners keyed by node
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    by_node: HashMap<NodeId, Vec<Registration>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register; a duplicate (type, listener, capture) is ignored
    pub fn add(&mut self, node: NodeId, event_type: &str, listener: EventListener, capture: bool) -> bool {
        let list = self.by_node.entry(node).or_default();
        if list
            .iter()
            .any(|r| r.event_type == event_type && r.capture == capture && r.listener == listener)
        {
            return false;
        }
        list.push(Registration {
            event_type: event_type.to_string(),
            capture,
            listener,
        });
        true
    }

    pub fn remove(&mut self, node: NodeId, event_type: &str, id: ListenerId, capture: bool) -> bool {
        let Some(list) = self.by_node.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|r| !(r.event_type == event_type && r.capture == capture && r.listener.id == id));
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_node.remove(&node);
        }
        removed
    }

    pub fn contains(&self, node: NodeId, event_type: &str, id: ListenerId, capture: bool) -> bool {
        self.by_node.get(&node).is_some_and(|list| {
            list.iter()
                .any(|r| r.event_type == event_type && r.capture == capture && r.listener.id == id)
        })
    }

    /// Snapshot of matching listeners in registration order
    pub fn matching(&self, node: NodeId, event_type: &str, capture: bool) -> Vec<EventListener> {
        self.by_node
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|r| r.event_type == event_type && r.capture == capture)
                    .map(|r| r.listener.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of registrations on `node`, optionally for one event type
    pub fn count(&self, node: NodeId, event_type: Option<&str>) -> usize {
        self.by_node.get(&node).map_or(0, |list| {
            list.iter()
                .filter(|r| event_type.is_none_or(|t| r.event_type == t))
                .count()
        })
    }
}

//! Window - shared document handle plus the timer loop
//!
//! Everything that can run user code (timers, event listeners) goes through
//! here so that no `RefCell` borrow of the document is alive while it runs.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::{Document, Event, EventListener, EventLoop, EventPhase, NodeId, TimerId};

/// Upper bound on tasks drained by one [`Window::run_until_idle`]
const MAX_IDLE_TASKS: usize = 10_000;

struct WindowInner {
    document: RefCell<Document>,
    event_loop: RefCell<EventLoop>,
}

/// Cheaply clonable handle to a document and its event loop
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

/// Non-owning handle, for callbacks stored inside the document
#[derive(Clone)]
pub struct WeakWindow {
    inner: Weak<WindowInner>,
}

impl Window {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Rc::new(WindowInner {
                document: RefCell::new(document),
                event_loop: RefCell::new(EventLoop::new()),
            }),
        }
    }

    /// Borrow the document; do not hold across calls that run callbacks
    pub fn document(&self) -> Ref<'_, Document> {
        self.inner.document.borrow()
    }

    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.inner.document.borrow_mut()
    }

    pub fn downgrade(&self) -> WeakWindow {
        WeakWindow {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Window) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // === Timers ===

    pub fn set_timeout(&self, task: impl FnOnce() + 'static, delay_ms: u64) -> TimerId {
        let id = self.inner.event_loop.borrow_mut().set_timeout(Box::new(task), delay_ms);
        tracing::trace!(?id, delay_ms, "timer scheduled");
        id
    }

    pub fn clear_timeout(&self, id: TimerId) -> bool {
        self.inner.event_loop.borrow_mut().clear_timeout(id)
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.inner.event_loop.borrow().current_time()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.event_loop.borrow().pending_timers()
    }

    /// Move virtual time forward by `ms`, running every task that falls due
    pub fn advance(&self, ms: u64) -> usize {
        let deadline = self.now() + ms;
        let mut ran = 0;
        loop {
            let task = self.inner.event_loop.borrow_mut().next_due(deadline);
            let Some(task) = task else { break };
            task();
            ran += 1;
        }
        self.inner.event_loop.borrow_mut().set_time(deadline);
        if ran > 0 {
            tracing::trace!(ran, now = deadline, "timers executed");
        }
        ran
    }

    /// Run timers in due order until none remain
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while ran < MAX_IDLE_TASKS {
            let deadline = self.inner.event_loop.borrow().next_deadline();
            let Some(deadline) = deadline else { break };
            let task = self.inner.event_loop.borrow_mut().next_due(deadline);
            let Some(task) = task else { break };
            task();
            ran += 1;
        }
        if ran == MAX_IDLE_TASKS {
            tracing::warn!(ran, "event loop still busy after task limit");
        }
        ran
    }

    // === Events ===

    pub fn add_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: EventListener,
        capture: bool,
    ) -> bool {
        self.document_mut()
            .add_event_listener(node, event_type, listener, capture)
            .unwrap_or(false)
    }

    pub fn remove_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: &EventListener,
        capture: bool,
    ) -> bool {
        self.document_mut()
            .remove_event_listener(node, event_type, listener.id(), capture)
    }

    /// Dispatch `event` at `target` through capture, target and bubble
    /// phases; returns false when a listener prevented the default action
    pub fn dispatch_event(&self, target: NodeId, event: &Event) -> bool {
        let event = event.begin(target, self.now());
        let path: Vec<NodeId> = {
            let doc = self.document();
            std::iter::once(target).chain(doc.tree.ancestors(target)).collect()
        };
        tracing::debug!(event = %event.event_type, %target, depth = path.len(), "dispatching event");

        for &node in path.iter().skip(1).rev() {
            if event.propagation_stopped() {
                break;
            }
            event.enter(node, EventPhase::Capturing);
            self.invoke(node, &event, true);
        }
        if !event.propagation_stopped() {
            event.enter(target, EventPhase::AtTarget);
            self.invoke(target, &event, true);
            if !event.immediate_propagation_stopped() {
                self.invoke(target, &event, false);
            }
        }
        if event.bubbles {
            for &node in path.iter().skip(1) {
                if event.propagation_stopped() {
                    break;
                }
                event.enter(node, EventPhase::Bubbling);
                self.invoke(node, &event, false);
            }
        }
        event.finish();
        !event.default_prevented()
    }

    fn invoke(&self, node: NodeId, event: &Event, capture: bool) {
        let listeners = self
            .document()
            .listeners()
            .matching(node, &event.event_type, capture);
        for listener in listeners {
            // Removed by an earlier listener during this dispatch
            let live = self
                .document()
                .listeners()
                .contains(node, &event.event_type, listener.id(), capture);
            if !live {
                continue;
            }
            listener.call(event);
            if event.immediate_propagation_stopped() {
                break;
            }
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("now", &self.inner.event_loop.borrow().current_time())
            .finish_non_exhaustive()
    }
}

impl WeakWindow {
    pub fn upgrade(&self) -> Option<Window> {
        self.inner.upgrade().map(|inner| Window { inner })
    }
}

impl std::fmt::Debug for WeakWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WeakWindow")
    }
}

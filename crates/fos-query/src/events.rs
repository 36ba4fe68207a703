//! Listeners and timed transitions

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use fos_dom::{EventListener, ListenerId, NodeId};

use crate::selection::write_declarations;
use crate::{QueryResult, Selection};

/// Canonical event fired when a CSS transition completes
pub const TRANSITION_END: &str = "transitionEnd";

/// Completion wrappers still installed, keyed by the caller's listener id
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingCompletions {
    inner: Rc<RefCell<HashMap<ListenerId, Vec<(NodeId, ListenerId)>>>>,
}

impl PendingCompletions {
    fn track(&self, callback: ListenerId, nodes: &[NodeId], wrapper: ListenerId) {
        self.inner
            .borrow_mut()
            .entry(callback)
            .or_default()
            .extend(nodes.iter().map(|&node| (node, wrapper)));
    }

    fn forget(&self, callback: ListenerId, node: NodeId, wrapper: ListenerId) {
        let mut pending = self.inner.borrow_mut();
        if let Some(entries) = pending.get_mut(&callback) {
            entries.retain(|&entry| entry != (node, wrapper));
            if entries.is_empty() {
                pending.remove(&callback);
            }
        }
    }

    /// Remove and return the wrappers of `callback` installed on `nodes`
    fn take(&self, callback: ListenerId, nodes: &[NodeId]) -> Vec<(NodeId, ListenerId)> {
        let mut pending = self.inner.borrow_mut();
        let Some(entries) = pending.remove(&callback) else {
            return Vec::new();
        };
        let (taken, kept): (Vec<_>, Vec<_>) = entries.into_iter().partition(|(node, _)| nodes.contains(node));
        if !kept.is_empty() {
            pending.insert(callback, kept);
        }
        taken
    }
}

impl Selection {
    /// Register `listener` on every target, under every alias of `event`
    pub fn listen(&self, event: &str, listener: &EventListener, capture: bool) -> &Self {
        let names = self.query().config().vendor.event_names(event);
        for &node in self.iter() {
            for name in &names {
                self.ops().add_listener(self.window(), node, name, listener.clone(), capture);
            }
        }
        self
    }

    /// Remove `listener` from every target, under every alias of `event`.
    /// For `transitionEnd` this also cancels completions pending for it.
    pub fn unlisten(&self, event: &str, listener: &EventListener, capture: bool) -> &Self {
        let names = self.query().config().vendor.event_names(event);
        let cancelled = if event == TRANSITION_END {
            self.query().completions().take(listener.id(), self.targets())
        } else {
            Vec::new()
        };
        for &node in self.iter() {
            for name in &names {
                self.ops().remove_listener(self.window(), node, name, listener, capture);
            }
        }
        for (node, wrapper) in cancelled {
            let handle = EventListener::with_id(wrapper, |_| {});
            for name in &names {
                self.ops().remove_listener(self.window(), node, name, &handle, false);
            }
        }
        self
    }

    /// Write `declarations` on a later tick so the change can animate.
    ///
    /// Option keys naming a `transition*` property (`duration`, `delay`,
    /// `timingFunction`, `property`) join the delta; other keys are ignored.
    /// Each call installs its own one-shot wrapper around `on_complete`: it
    /// runs once per target, on the first transition-end alias that reaches
    /// it, after every alias of that wrapper has been removed from the
    /// target. Unlistening `transitionEnd` with the same listener before that
    /// cancels it.
    pub fn transition<K: AsRef<str>, V: AsRef<str>>(
        &self,
        declarations: &[(K, V)],
        options: &[(&str, &str)],
        on_complete: Option<&EventListener>,
    ) -> QueryResult<&Self> {
        let config = self.query().config();
        let mut delta: Vec<(String, String)> = declarations
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        for (key, value) in options {
            match config.vendor.transition_property(key) {
                Some(property) => delta.push((property, value.to_string())),
                None => tracing::trace!(option = key, "ignoring transition option"),
            }
        }

        if let Some(callback) = on_complete {
            let wrapper = self.completion_listener(callback);
            self.listen(TRANSITION_END, &wrapper, false);
            self.query()
                .completions()
                .track(callback.id(), self.targets(), wrapper.id());
        }

        let window = self.window().downgrade();
        let ops = self.query().shared_ops();
        let vendor = config.vendor;
        let targets: Vec<NodeId> = self.targets().to_vec();
        self.window().set_timeout(
            move || {
                let Some(window) = window.upgrade() else {
                    return;
                };
                for node in targets {
                    if let Err(error) = write_declarations(ops.as_ref(), &window, vendor, node, &delta) {
                        tracing::warn!(%node, %error, "deferred transition write failed");
                    }
                }
            },
            config.transition_delay_ms,
        );
        tracing::debug!(targets = self.len(), delay_ms = config.transition_delay_ms, "transition scheduled");
        Ok(self)
    }

    /// Fresh one-shot wrapper around `callback`
    fn completion_listener(&self, callback: &EventListener) -> EventListener {
        let id = ListenerId::next();
        let callback = callback.clone();
        let window = self.window().downgrade();
        let ops = self.query().shared_ops();
        let completions = self.query().completions().clone();
        let aliases: Rc<[&'static str]> = self
            .query()
            .config()
            .vendor
            .event_names(TRANSITION_END)
            .into();

        EventListener::with_id(id, move |event| {
            let node = event.current_target();
            if let Some(window) = window.upgrade() {
                let handle = EventListener::with_id(id, |_| {});
                for alias in aliases.iter() {
                    ops.remove_listener(&window, node, alias, &handle, false);
                }
            }
            completions.forget(callback.id(), node, id);
            callback.call(event);
        })
    }
}

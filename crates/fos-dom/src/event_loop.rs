//! Event Loop Implementation
//!
//! Timer queue driven by a virtual clock. Nothing runs until the owner
//! advances time, which keeps deferred work deterministic under test.

use std::collections::VecDeque;

/// Timer handle returned by [`EventLoop::set_timeout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Deferred callback
pub type Task = Box<dyn FnOnce()>;

struct Timer {
    id: TimerId,
    due_at: u64,
    task: Task,
}

/// Single-threaded timer loop
#[derive(Default)]
pub struct EventLoop {
    /// Pending timers, unordered
    timers: Vec<Timer>,
    /// Tasks queued for immediate execution
    ready: VecDeque<Task>,
    next_timer_id: u32,
    /// Current timestamp (ms)
    current_time: u64,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run once `delay_ms` of virtual time has passed
    pub fn set_timeout(&mut self, task: Task, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.timers.push(Timer {
            id,
            due_at: self.current_time + delay_ms,
            task,
        });
        id
    }

    /// Queue a task ahead of every timer
    pub fn queue_task(&mut self, task: Task) {
        self.ready.push_back(task);
    }

    /// Cancel a pending timer; returns false if it already ran
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Pop the next task due at or before `deadline`, moving the clock to it
    pub fn next_due(&mut self, deadline: u64) -> Option<Task> {
        if let Some(task) = self.ready.pop_front() {
            return Some(task);
        }
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= deadline)
            .min_by_key(|(_, t)| (t.due_at, t.id))
            .map(|(i, _)| i)?;
        let timer = self.timers.swap_remove(index);
        self.current_time = self.current_time.max(timer.due_at);
        Some(timer.task)
    }

    /// Due time of the earliest pending timer
    pub fn next_deadline(&self) -> Option<u64> {
        if !self.ready.is_empty() {
            return Some(self.current_time);
        }
        self.timers.iter().map(|t| t.due_at).min()
    }

    /// Move the clock forward without running anything
    pub fn set_time(&mut self, now: u64) {
        self.current_time = self.current_time.max(now);
    }

    pub fn has_pending_work(&self) -> bool {
        !self.ready.is_empty() || !self.timers.is_empty()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("timers", &self.timers.len())
            .field("ready", &self.ready.len())
            .field("current_time", &self.current_time)
            .finish()
    }
}

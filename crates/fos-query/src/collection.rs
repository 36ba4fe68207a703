//! Collection core
//!
//! An ordered, fixed-membership group of targets. Every derived collection
//! (`filter`, `find`, `parent`, `nth`) is a new value; the source is never
//! mutated. Cloning is cheap: targets live in a shared slice.

use std::rc::Rc;

use fos_canvas::ContextHandle;
use fos_dom::NodeId;

use crate::{Normalized, Query, QueryError, QueryResult};

/// Ordered group of targets bound to the `Query` that produced it
#[derive(Clone)]
pub struct Collection<T> {
    query: Query,
    items: Rc<[T]>,
}

/// Collection of DOM nodes
pub type Selection = Collection<NodeId>;

/// Collection of 2D drawing contexts
pub type ContextSet = Collection<ContextHandle>;

impl<T: Clone> Collection<T> {
    pub(crate) fn new(query: Query, items: Vec<T>) -> Self {
        Self {
            query,
            items: items.into(),
        }
    }

    pub(crate) fn derive(&self, items: Vec<T>) -> Self {
        Self::new(self.query.clone(), items)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Targets in collection order
    pub fn targets(&self) -> &[T] {
        &self.items
    }

    /// Call `f(target, index)` for every target in order
    pub fn each(&self, mut f: impl FnMut(&T, usize)) -> &Self {
        for (index, target) in self.items.iter().enumerate() {
            f(target, index);
        }
        self
    }

    /// Like [`each`](Self::each), stopping at the first error
    pub fn try_each(&self, mut f: impl FnMut(&T, usize) -> QueryResult<()>) -> QueryResult<&Self> {
        for (index, target) in self.items.iter().enumerate() {
            f(target, index)?;
        }
        Ok(self)
    }

    /// Targets for which `predicate(target, index)` holds, order preserved
    pub fn filter(&self, mut predicate: impl FnMut(&T, usize) -> bool) -> Self {
        let kept = self
            .items
            .iter()
            .enumerate()
            .filter(|(index, target)| predicate(target, *index))
            .map(|(_, target)| target.clone())
            .collect();
        self.derive(kept)
    }

    /// Run `f` per target for its side effects. Membership never changes;
    /// whatever `f` returns is discarded.
    pub fn map<R>(&self, mut f: impl FnMut(&T, usize) -> R) -> &Self {
        for (index, target) in self.items.iter().enumerate() {
            let _ = f(target, index);
        }
        self
    }

    /// The target at `index` wrapped in a new collection, or the whole
    /// collection when no index is given
    pub fn nth(&self, index: Option<usize>) -> QueryResult<Self> {
        match index {
            None => Ok(self.clone()),
            Some(i) => Ok(self.derive(vec![self.at(i)?.clone()])),
        }
    }

    pub fn first(&self) -> QueryResult<Self> {
        let target = self.require("first")?;
        Ok(self.derive(vec![target.clone()]))
    }

    pub fn last(&self) -> QueryResult<Self> {
        let target = self
            .items
            .last()
            .ok_or(QueryError::EmptySelection { operation: "last" })?;
        Ok(self.derive(vec![target.clone()]))
    }

    /// Raw targets: the one at `index`, or the sole target of a one-target
    /// collection, or the backing sequence
    pub fn native(&self, index: Option<usize>) -> QueryResult<Normalized<T>> {
        match index {
            Some(i) => Ok(Normalized::Single(self.at(i)?.clone())),
            None => Ok(Normalized::from_vec(self.items.to_vec())),
        }
    }

    pub(crate) fn at(&self, index: usize) -> QueryResult<&T> {
        self.items.get(index).ok_or(QueryError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// First target, or `EmptySelection` naming `operation`
    pub(crate) fn require(&self, operation: &'static str) -> QueryResult<&T> {
        self.items
            .first()
            .ok_or(QueryError::EmptySelection { operation })
    }

    /// Per-target values under the single-or-many rule
    pub(crate) fn normalize<U>(&self, f: impl FnMut(&T) -> U) -> Normalized<U> {
        Normalized::from_vec(self.items.iter().map(f).collect())
    }

    pub(crate) fn try_normalize<U>(&self, f: impl FnMut(&T) -> QueryResult<U>) -> QueryResult<Normalized<U>> {
        let values = self.items.iter().map(f).collect::<QueryResult<Vec<U>>>()?;
        Ok(Normalized::from_vec(values))
    }
}

impl<'a, T: Clone> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    /// Same targets in the same order, over the same window
    fn eq(&self, other: &Self) -> bool {
        self.query.window().ptr_eq(other.query.window()) && self.items == other.items
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("len", &self.items.len())
            .field("items", &self.items)
            .finish()
    }
}

//! # Subscription registry.
//!
//! Maps event names to their subscription lists. Each list is kept sorted by
//! descending priority; a new subscription is inserted after every existing
//! one of equal or higher priority, which is the same order a stable sort
//! would produce after appending.
//!
//! ## Rules
//! - Entries are created on first insert and removed once they become empty.
//! - Subscriptions are stored behind `Arc`; a snapshot is a vector of clones.
//! - The registry itself is not synchronized; the bus wraps it in a mutex and
//!   never holds that mutex while a listener runs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::listeners::{Listener, Subscription, SubscriptionId};

#[derive(Default)]
pub(crate) struct Registry {
    events: HashMap<Arc<str>, Vec<Arc<Subscription>>>,
}

impl Registry {
    /// Inserts `sub` under `event`, keeping priority order stable.
    pub(crate) fn insert(&mut self, event: &str, sub: Subscription) -> SubscriptionId {
        let id = sub.id;
        let list = self.events.entry(Arc::from(event)).or_default();
        let pos = list.partition_point(|s| s.priority >= sub.priority);
        list.insert(pos, Arc::new(sub));
        id
    }

    /// Removes every subscription of `listener` under `event` (persistent and once).
    ///
    /// Returns how many were removed.
    pub(crate) fn remove_listener(&mut self, event: &str, listener: &Listener) -> usize {
        let Some(list) = self.events.get_mut(event) else {
            return 0;
        };
        let before = list.len();
        list.retain(|s| !s.listener.same_as(listener));
        let removed = before - list.len();
        if list.is_empty() {
            self.events.remove(event);
        }
        removed
    }

    /// Removes the subscription `id` under `event`.
    ///
    /// Returns `false` if it was already gone.
    pub(crate) fn remove(&mut self, event: &str, id: SubscriptionId) -> bool {
        let Some(list) = self.events.get_mut(event) else {
            return false;
        };
        let Some(pos) = list.iter().position(|s| s.id == id) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.events.remove(event);
        }
        true
    }

    /// Clears one event, or everything when `event` is `None`.
    ///
    /// Returns how many subscriptions were dropped.
    pub(crate) fn clear(&mut self, event: Option<&str>) -> usize {
        match event {
            Some(event) => self.events.remove(event).map_or(0, |list| list.len()),
            None => {
                let total = self.events.values().map(Vec::len).sum();
                self.events.clear();
                total
            }
        }
    }

    #[inline]
    pub(crate) fn count(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, Vec::len)
    }

    /// Copy of the current list for `event`, or `None` if nothing is registered.
    pub(crate) fn snapshot(&self, event: &str) -> Option<Vec<Arc<Subscription>>> {
        self.events
            .get(event)
            .filter(|list| !list.is_empty())
            .map(|list| list.to_vec())
    }

    /// Names that currently have at least one subscription, sorted.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.keys().map(|k| k.to_string()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::{Kind, ListenOptions};

    fn sub(listener: &Listener, priority: i32) -> Subscription {
        Subscription::new(
            listener.clone(),
            ListenOptions::with_priority(priority),
            Kind::Persistent,
        )
    }

    fn priorities(reg: &Registry, event: &str) -> Vec<i32> {
        reg.snapshot(event)
            .unwrap_or_default()
            .iter()
            .map(|s| s.priority)
            .collect()
    }

    #[test]
    fn insert_keeps_descending_stable_order() {
        let mut reg = Registry::default();
        let a = Listener::infallible(|_| {});
        let b = Listener::infallible(|_| {});
        let c = Listener::infallible(|_| {});

        let ia = reg.insert("x", sub(&a, 1));
        let ib = reg.insert("x", sub(&b, 5));
        let ic = reg.insert("x", sub(&c, 1));

        let ids: Vec<_> = reg.snapshot("x").unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![ib, ia, ic]);
    }

    #[test]
    fn negative_priorities_go_last() {
        let mut reg = Registry::default();
        let l = Listener::infallible(|_| {});
        reg.insert("x", sub(&l, -3));
        reg.insert("x", sub(&l, 0));
        reg.insert("x", sub(&l, 2));
        reg.insert("x", sub(&l, -3));
        assert_eq!(priorities(&reg, "x"), vec![2, 0, -3, -3]);
    }

    #[test]
    fn remove_listener_drops_all_matches_and_empty_entry() {
        let mut reg = Registry::default();
        let a = Listener::infallible(|_| {});
        let b = Listener::infallible(|_| {});
        reg.insert("x", sub(&a, 0));
        reg.insert("x", sub(&a, 3));
        reg.insert("x", sub(&b, 0));

        assert_eq!(reg.remove_listener("x", &a), 2);
        assert_eq!(reg.count("x"), 1);
        assert_eq!(reg.remove_listener("x", &b), 1);
        assert!(reg.names().is_empty());
        assert_eq!(reg.remove_listener("x", &b), 0);
    }

    #[test]
    fn remove_by_id_is_idempotent() {
        let mut reg = Registry::default();
        let l = Listener::infallible(|_| {});
        let id = reg.insert("x", sub(&l, 0));
        assert!(reg.remove("x", id));
        assert!(!reg.remove("x", id));
        assert_eq!(reg.count("x"), 0);
    }

    #[test]
    fn clear_one_or_all() {
        let mut reg = Registry::default();
        let l = Listener::infallible(|_| {});
        reg.insert("x", sub(&l, 0));
        reg.insert("y", sub(&l, 0));
        reg.insert("y", sub(&l, 0));

        assert_eq!(reg.clear(Some("y")), 2);
        assert_eq!(reg.names(), vec!["x".to_string()]);
        assert_eq!(reg.clear(None), 1);
        assert!(reg.snapshot("x").is_none());
    }
}

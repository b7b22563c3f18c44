//! # Subscription records.
//!
//! A [`Subscription`] is one registered listener together with its priority,
//! bound context and kind. The pairing is fixed at registration and never
//! mutated; the only state is the fired flag of once-subscriptions. The registry stores subscriptions behind `Arc` so that taking a
//! dispatch snapshot only bumps reference counts.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};

use super::listener::Listener;
use super::options::ListenOptions;
use crate::events::Arg;

/// Global sequence counter for subscription ids.
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-unique, monotonically increasing subscription id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(SUBSCRIPTION_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How long a subscription stays registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    /// Until removed by `off` / `remove_all_listeners`.
    Persistent,
    /// Until its first invocation.
    Once,
}

#[derive(Debug)]
pub(crate) struct Subscription {
    pub(crate) id: SubscriptionId,
    pub(crate) listener: Listener,
    pub(crate) priority: i32,
    pub(crate) context: Option<Arg>,
    pub(crate) kind: Kind,
    fired: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(listener: Listener, options: ListenOptions, kind: Kind) -> Self {
        Self {
            id: SubscriptionId::next(),
            listener,
            priority: options.priority,
            context: options.context,
            kind,
            fired: AtomicBool::new(false),
        }
    }

    #[inline]
    pub(crate) fn is_once(&self) -> bool {
        self.kind == Kind::Once
    }

    /// Marks a once-subscription as fired.
    ///
    /// Returns `true` for exactly one caller, however many dispatches hold
    /// this subscription in their snapshot.
    #[inline]
    pub(crate) fn try_fire(&self) -> bool {
        !self.fired.swap(true, AtomicOrdering::AcqRel)
    }
}

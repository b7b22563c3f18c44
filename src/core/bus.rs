//! # EventBus: named-event publish/subscribe.
//!
//! [`EventBus`] maps event names to priority-ordered listener lists and
//! notifies them synchronously on [`emit`](EventBus::emit), or on a later
//! turn of the tokio scheduler via [`emit_async`](EventBus::emit_async).
//!
//! ## Key properties
//! - **Ordering**: descending priority; equal priorities in registration order.
//! - **Snapshot dispatch**: the listeners notified by one `emit` are exactly
//!   those registered when it began.
//! - **Failure isolation**: a failing listener is logged and reported on
//!   [`ERROR_EVENT`](crate::ERROR_EVENT); the remaining listeners still run and `emit` succeeds.
//! - **Wildcard**: listeners on [`WILDCARD`](crate::WILDCARD) see every emission first.
//! - **Re-entrancy**: the registry lock is never held while a listener runs,
//!   so listeners may call `on`/`off`/`emit` on the same bus.
//!
//! ## Sharing
//! `EventBus` is a cheap handle (`Arc` inside); clone it to share. Wire one
//! instance through your application, or use [`EventBus::global`] when a
//! single process-wide bus is wanted.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventbus::{args, EventBus, ListenOptions, Listener};
//!
//! # fn main() -> Result<(), eventbus::BusError> {
//! let bus = EventBus::default();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let s = seen.clone();
//! let low = Listener::infallible(move |em| s.lock().unwrap().push(("low", *em.arg::<i32>(0).unwrap())));
//! let s = seen.clone();
//! let high = Listener::infallible(move |em| s.lock().unwrap().push(("high", *em.arg::<i32>(0).unwrap())));
//!
//! bus.on("tick", low.clone())?
//!     .on_with("tick", high, ListenOptions::with_priority(5))?
//!     .emit("tick", args![1])?;
//!
//! bus.off("tick", &low).emit("tick", args![2])?;
//!
//! assert_eq!(*seen.lock().unwrap(), vec![("high", 1), ("low", 1), ("high", 2)]);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::config::BusConfig;
use super::dispatch::Origin;
use super::queue::{DispatchQueue, Job};
use super::registry::Registry;
use crate::error::BusError;
use crate::events::Args;
use crate::listeners::{Kind, ListenOptions, Listener, Subscription};

static GLOBAL: Lazy<EventBus> = Lazy::new(EventBus::default);

/// State shared by every handle to one bus.
pub(crate) struct Shared {
    pub(super) config: BusConfig,
    pub(super) registry: Mutex<Registry>,
    queue: Mutex<Option<DispatchQueue>>,
}

impl Shared {
    /// Validated synchronous emission; the body of `emit` and of every async job.
    pub(crate) fn emit_checked(&self, event: &str, args: &Args) -> Result<(), BusError> {
        validate(event)?;
        self.emit_all(event, args, None, Origin::Caller);
        Ok(())
    }
}

/// In-process event bus.
#[derive(Clone)]
pub struct EventBus {
    shared: Arc<Shared>,
}

impl EventBus {
    /// Creates an empty bus with the given configuration.
    pub fn new(config: BusConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                registry: Mutex::new(Registry::default()),
                queue: Mutex::new(None),
            }),
        }
    }

    /// Process-wide shared bus, created with [`BusConfig::default`] on first use.
    pub fn global() -> &'static EventBus {
        &GLOBAL
    }

    /// Configuration this bus was created with.
    pub fn config(&self) -> &BusConfig {
        &self.shared.config
    }

    /// Subscribes `listener` to `event` with default options.
    ///
    /// # Errors
    /// `BusError::InvalidArgument` if `event` is empty.
    pub fn on(&self, event: &str, listener: Listener) -> Result<&Self, BusError> {
        self.on_with(event, listener, ListenOptions::default())
    }

    /// Subscribes `listener` to `event` with the given priority and context.
    ///
    /// Subscribing the same listener twice creates two subscriptions; it is
    /// then notified twice per emission.
    pub fn on_with(
        &self,
        event: &str,
        listener: Listener,
        options: ListenOptions,
    ) -> Result<&Self, BusError> {
        self.subscribe(event, listener, options, Kind::Persistent)
    }

    /// Subscribes `listener` for a single notification.
    ///
    /// The subscription is removed before the listener runs, so an emit
    /// triggered from inside the listener does not reach it again.
    pub fn once(&self, event: &str, listener: Listener) -> Result<&Self, BusError> {
        self.once_with(event, listener, ListenOptions::default())
    }

    /// Like [`once`](Self::once), with a priority and bound context.
    pub fn once_with(
        &self,
        event: &str,
        listener: Listener,
        options: ListenOptions,
    ) -> Result<&Self, BusError> {
        self.subscribe(event, listener, options, Kind::Once)
    }

    fn subscribe(
        &self,
        event: &str,
        listener: Listener,
        options: ListenOptions,
        kind: Kind,
    ) -> Result<&Self, BusError> {
        validate(event)?;
        let name = listener.name().to_owned();
        let sub = Subscription::new(listener, options, kind);
        let priority = sub.priority;
        let id = self.shared.registry.lock().insert(event, sub);
        tracing::trace!(event, listener = %name, subscription = %id, priority, ?kind, "subscribed");
        Ok(self)
    }

    /// Removes every subscription of `listener` under `event`, once-subscriptions included.
    ///
    /// Unknown events or listeners are a no-op.
    pub fn off(&self, event: &str, listener: &Listener) -> &Self {
        let removed = self.shared.registry.lock().remove_listener(event, listener);
        if removed > 0 {
            tracing::trace!(event, listener = listener.name(), removed, "unsubscribed");
        }
        self
    }

    /// Notifies the wildcard listeners, then the listeners of `event`.
    ///
    /// Listener failures are isolated (see the module docs); they are never
    /// returned here.
    ///
    /// # Errors
    /// `BusError::InvalidArgument` if `event` is empty.
    pub fn emit(&self, event: &str, args: impl Into<Args>) -> Result<&Self, BusError> {
        self.shared.emit_checked(event, &args.into())?;
        Ok(self)
    }

    /// Schedules `emit(event, args)` on the bus's FIFO dispatch worker.
    ///
    /// The job is queued before this returns, so dispatches happen in the
    /// order `emit_async` was called. The returned future resolves once that
    /// dispatch finished; awaiting it is optional, the dispatch runs either way.
    ///
    /// # Errors
    /// The future resolves to:
    /// - `BusError::InvalidArgument` if `event` is empty (reported by the deferred emit),
    /// - `BusError::NoRuntime` when called outside a tokio runtime,
    /// - `BusError::DispatcherClosed` when the worker went away.
    pub fn emit_async(
        &self,
        event: &str,
        args: Args,
    ) -> impl Future<Output = Result<(), BusError>> + Send + 'static {
        let (done, rx) = oneshot::channel();
        let job = Job {
            event: event.to_owned(),
            args,
            done,
        };
        let scheduled = self.schedule(job);

        async move {
            scheduled?;
            rx.await.map_err(|_| BusError::DispatcherClosed)?
        }
    }

    fn schedule(&self, job: Job) -> Result<(), BusError> {
        let mut slot = self.shared.queue.lock();
        let stale = slot.as_ref().map_or(true, DispatchQueue::is_closed);
        if stale {
            *slot = Some(DispatchQueue::spawn(Arc::downgrade(&self.shared))?);
        }
        match slot.as_ref() {
            Some(queue) => queue.enqueue(job),
            None => Err(BusError::DispatcherClosed),
        }
    }

    /// Clears the listeners of `event`, or of every event (wildcard included) for `None`.
    pub fn remove_all_listeners(&self, event: Option<&str>) -> &Self {
        let removed = self.shared.registry.lock().clear(event);
        tracing::debug!(event = event.unwrap_or("<all>"), removed, "listeners cleared");
        self
    }

    /// Number of subscriptions on exactly `event` (the wildcard is counted separately).
    pub fn listener_count(&self, event: &str) -> usize {
        self.shared.registry.lock().count(event)
    }

    /// True if `event` has at least one subscription.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Event names that currently have listeners, sorted.
    pub fn event_names(&self) -> Vec<String> {
        self.shared.registry.lock().names()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(BusConfig::default())
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("config", &self.shared.config)
            .field("events", &self.event_names())
            .finish()
    }
}

#[inline]
fn validate(event: &str) -> Result<(), BusError> {
    if event.is_empty() {
        return Err(BusError::empty_event());
    }
    Ok(())
}

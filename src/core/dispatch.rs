//! # Dispatch loop: snapshot, invoke, isolate, report.
//!
//! ## Flow for `emit(event, args)`
//! ```text
//! emit_all(event)
//!   ├─► deliver("*")      (skipped when event == "*")
//!   └─► deliver(event)
//!
//! deliver(channel):
//!   snapshot = registry[channel].clone()        (lock released before any call)
//!   for sub in snapshot:
//!     ├─ once?  sub.try_fire() ── false ─► Outcome::Skipped
//!     │         └ true ─► registry.remove(sub.id)   (already gone is fine)
//!     ├─ invoke(sub) ── Ok  ─► Outcome::Delivered
//!     └─               └ Err ─► Outcome::Failed ─► report()
//!
//! report(failure):
//!   ├─ secondary (raised while reporting, or by an "error" listener) ─► warn!, stop
//!   └─ primary ─► error! ─► "error" has listeners? ─► emit_all("error", failure)
//! ```
//!
//! ## Rules
//! - Listeners added or removed during a dispatch do not change the snapshot,
//!   once-subscriptions included.
//! - A failing listener never stops the rest of the snapshot.
//! - A failure report is re-emitted at most one level deep.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::bus::Shared;
use crate::error::{ListenerError, ListenerFailure};
use crate::events::{Args, Emission, ERROR_EVENT, WILDCARD};
use crate::listeners::{ListenerResult, Subscription};

/// Why a dispatch is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// Called by user code (`emit` / `emit_async`).
    Caller,
    /// Re-emission of a captured failure on `"error"`.
    FailureReport,
}

/// Result of offering one emission to one subscription.
#[derive(Debug)]
pub(crate) enum Outcome {
    Delivered,
    /// Once-subscription already fired in another dispatch.
    Skipped,
    Failed(ListenerError),
}

impl Shared {
    /// Dispatches to the wildcard channel (unless `event` is the wildcard) and then to `event`.
    pub(crate) fn emit_all(
        &self,
        event: &str,
        args: &Args,
        failure: Option<&ListenerFailure>,
        origin: Origin,
    ) {
        if event != WILDCARD {
            self.deliver(WILDCARD, event, args, failure, origin);
        }
        self.deliver(event, event, args, failure, origin);
    }

    fn deliver(
        &self,
        channel: &str,
        event: &str,
        args: &Args,
        failure: Option<&ListenerFailure>,
        origin: Origin,
    ) {
        let Some(snapshot) = self.registry.lock().snapshot(channel) else {
            return;
        };

        for sub in &snapshot {
            match self.offer(channel, event, sub, args, failure) {
                Outcome::Delivered | Outcome::Skipped => {}
                Outcome::Failed(error) => {
                    let failed = ListenerFailure {
                        event: Arc::from(event),
                        channel: Arc::from(channel),
                        subscription: sub.id,
                        error,
                    };
                    self.report(sub.listener.name(), failed, args, origin);
                }
            }
        }
    }

    fn offer(
        &self,
        channel: &str,
        event: &str,
        sub: &Subscription,
        args: &Args,
        failure: Option<&ListenerFailure>,
    ) -> Outcome {
        if sub.is_once() {
            if !sub.try_fire() {
                return Outcome::Skipped;
            }
            // Unregister before running; `off` may have removed it already.
            self.registry.lock().remove(channel, sub.id);
        }

        let emission = Emission::new(event, args, sub.context.as_ref(), failure);
        match invoke(sub, &emission, self.config.catch_panics) {
            Ok(()) => Outcome::Delivered,
            Err(error) => Outcome::Failed(error),
        }
    }

    fn report(&self, listener: &str, failure: ListenerFailure, args: &Args, origin: Origin) {
        let secondary = origin == Origin::FailureReport || &*failure.channel == ERROR_EVENT;
        if secondary {
            tracing::warn!(
                event = %failure.event,
                channel = %failure.channel,
                subscription = %failure.subscription,
                listener,
                label = failure.error.as_label(),
                "listener failed while handling a failure report: {}",
                failure.error.as_message()
            );
            return;
        }

        tracing::error!(
            event = %failure.event,
            channel = %failure.channel,
            subscription = %failure.subscription,
            listener,
            label = failure.error.as_label(),
            "listener failed: {}",
            failure.error.as_message()
        );

        if self.registry.lock().count(ERROR_EVENT) == 0 {
            return;
        }
        self.emit_all(ERROR_EVENT, args, Some(&failure), Origin::FailureReport);
    }
}

/// Runs one listener, turning a panic into [`ListenerError::Panicked`] when asked to.
pub(crate) fn invoke(
    sub: &Subscription,
    emission: &Emission<'_>,
    catch_panics: bool,
) -> ListenerResult {
    if !catch_panics {
        return sub.listener.call(emission);
    }
    match panic::catch_unwind(AssertUnwindSafe(|| sub.listener.call(emission))) {
        Ok(result) => result,
        Err(payload) => Err(ListenerError::Panicked {
            info: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

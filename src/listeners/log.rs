//! # LogWriter — emission tracer
//!
//! A minimal wildcard listener that traces every emission through `tracing`.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! DEBUG eventbus: [emit] event="saved" args=2
//! DEBUG eventbus: [emit] event="error" args=1 failed_event="saved" err="listener failed: disk full"
//! ```

use std::sync::Arc;

use crate::error::BusError;
use crate::events::{Emission, WILDCARD};
use crate::listeners::{Handler, ListenOptions, Listener, ListenerResult};
use crate::EventBus;

/// Emission writer listener.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registers a `LogWriter` on the wildcard channel of `bus`.
    ///
    /// Uses the highest priority so the trace line precedes other wildcard
    /// listeners. Returns the handle for a later `off`.
    pub fn attach(bus: &EventBus) -> Result<Listener, BusError> {
        let listener = Listener::from_handler(Arc::new(Self::new()));
        bus.on_with(
            WILDCARD,
            listener.clone(),
            ListenOptions::with_priority(i32::MAX),
        )?;
        Ok(listener)
    }
}

impl Handler for LogWriter {
    fn handle(&self, e: &Emission<'_>) -> ListenerResult {
        match e.failure() {
            Some(failure) => {
                tracing::debug!(
                    target: "eventbus",
                    "[emit] event={:?} args={} failed_event={:?} err={:?}",
                    e.event(),
                    e.args().len(),
                    failure.event,
                    failure.error.to_string(),
                );
            }
            None => {
                tracing::debug!(
                    target: "eventbus",
                    "[emit] event={:?} args={}",
                    e.event(),
                    e.args().len(),
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaches_to_wildcard() {
        let bus = EventBus::default();
        let l = LogWriter::attach(&bus).unwrap();
        assert_eq!(bus.listener_count(WILDCARD), 1);
        bus.emit("saved", crate::args![1]).unwrap();
        bus.off(WILDCARD, &l);
        assert_eq!(bus.listener_count(WILDCARD), 0);
    }
}

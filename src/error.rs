//! Error types used by the event bus and its listeners.
//!
//! This module defines two main error enums:
//!
//! - [`BusError`] — errors returned by bus operations to their caller.
//! - [`ListenerError`] — errors raised by an individual listener invocation.
//!
//! A [`ListenerError`] never reaches the caller of `emit`: the dispatch loop
//! captures it into a [`ListenerFailure`], logs it and, when someone listens
//! on [`ERROR_EVENT`](crate::ERROR_EVENT), re-emits it there.
//!
//! Both enums provide helper methods (`as_label`, `as_message`) for logging.

use std::sync::Arc;

use thiserror::Error;

use crate::listeners::SubscriptionId;

/// # Errors produced by bus operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// An argument was rejected (e.g. an empty event name).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// The async dispatch worker is gone (bus dropped or worker panicked).
    #[error("async dispatcher closed")]
    DispatcherClosed,

    /// `emit_async` was called outside of a tokio runtime.
    #[error("no tokio runtime available for async dispatch")]
    NoRuntime,
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventbus::BusError;
    ///
    /// let err = BusError::NoRuntime;
    /// assert_eq!(err.as_label(), "bus_no_runtime");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::InvalidArgument { .. } => "bus_invalid_argument",
            BusError::DispatcherClosed => "bus_dispatcher_closed",
            BusError::NoRuntime => "bus_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::InvalidArgument { reason } => format!("invalid argument: {reason}"),
            BusError::DispatcherClosed => "dispatcher closed".to_string(),
            BusError::NoRuntime => "no runtime".to_string(),
        }
    }

    pub(crate) fn empty_event() -> Self {
        BusError::InvalidArgument {
            reason: "event name must be a non-empty string",
        }
    }
}

/// # Errors produced by a listener invocation.
///
/// Listeners return `Result<(), ListenerError>`. Any `anyhow::Error` converts
/// into [`ListenerError::Failed`], so listener bodies can use `?` freely.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Listener returned an error.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Listener panicked; the unwind was caught by the dispatch loop.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Failed`].
    ///
    /// # Example
    /// ```
    /// use eventbus::ListenerError;
    ///
    /// let err = ListenerError::fail("boom");
    /// assert_eq!(err.to_string(), "listener failed: boom");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        ListenerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }

    /// True if the failure came from a caught panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, ListenerError::Panicked { .. })
    }
}

impl From<anyhow::Error> for ListenerError {
    fn from(err: anyhow::Error) -> Self {
        ListenerError::Failed {
            error: format!("{err:#}"),
        }
    }
}

/// A listener failure captured during one dispatch.
///
/// This is what listeners on [`ERROR_EVENT`](crate::ERROR_EVENT) receive via
/// [`Emission::failure`](crate::Emission::failure).
#[derive(Debug, Clone)]
pub struct ListenerFailure {
    /// Name the failing emission was published under.
    pub event: Arc<str>,
    /// List the failing listener was registered on (`"*"` for wildcard listeners).
    pub channel: Arc<str>,
    /// Subscription that failed.
    pub subscription: SubscriptionId,
    /// The captured error.
    pub error: ListenerError,
}

impl std::fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "listener {} on \"{}\" failed for \"{}\": {}",
            self.subscription, self.channel, self.event, self.error
        )
    }
}

impl std::error::Error for ListenerFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_errors_become_failed() {
        let err: ListenerError = anyhow::anyhow!("disk gone").into();
        assert_eq!(err, ListenerError::fail("disk gone"));
        assert_eq!(err.as_label(), "listener_failed");
        assert!(!err.is_panic());
    }

    #[test]
    fn context_chain_is_kept() {
        let err: ListenerError = anyhow::anyhow!("root")
            .context("while saving")
            .into();
        assert_eq!(err.as_message(), "error: while saving: root");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(BusError::empty_event().as_label(), "bus_invalid_argument");
        assert_eq!(BusError::DispatcherClosed.as_label(), "bus_dispatcher_closed");
        assert_eq!(BusError::NoRuntime.as_label(), "bus_no_runtime");
        assert_eq!(
            ListenerError::Panicked { info: "x".into() }.as_label(),
            "listener_panicked"
        );
    }

    #[test]
    fn failure_display_names_channel_and_event() {
        let failure = ListenerFailure {
            event: Arc::from("saved"),
            channel: Arc::from("*"),
            subscription: SubscriptionId(7),
            error: ListenerError::fail("nope"),
        };
        assert_eq!(
            failure.to_string(),
            "listener #7 on \"*\" failed for \"saved\": listener failed: nope"
        );
    }
}

//! # Listeners and their subscriptions.
//!
//! ## Contents
//! - [`Listener`] shared, identity-carrying handle to a callable
//! - [`Handler`] trait for struct-based listeners
//! - [`ListenOptions`] priority and bound context for one registration
//! - [`SubscriptionId`] id assigned to every registration
//! - `LogWriter` (feature `logging`) wildcard listener that traces emissions

mod listener;
mod options;
mod subscription;

#[cfg(feature = "logging")]
mod log;

pub use listener::{Handler, Listener, ListenerResult};
pub use options::ListenOptions;
pub use subscription::SubscriptionId;

pub(crate) use subscription::{Kind, Subscription};

#[cfg(feature = "logging")]
pub use log::LogWriter;

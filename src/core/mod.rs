//! Bus core: registry, dispatch and async scheduling.
//!
//! The public API from this module is [`EventBus`] and its [`BusConfig`].
//!
//! Internal modules:
//! - [`registry`]: event name → priority-ordered subscriptions;
//! - [`dispatch`]: snapshot iteration, per-listener isolation, failure reporting;
//! - [`queue`]: FIFO worker behind `emit_async`;
//! - [`bus`]: the public handle tying them together.

mod bus;
mod config;
mod dispatch;
mod queue;
mod registry;

pub use bus::EventBus;
pub use config::BusConfig;

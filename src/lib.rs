//! # eventbus
//!
//! **eventbus** is an in-process publish/subscribe dispatcher for Rust.
//!
//! Listeners subscribe to named events with a priority and an optional bound
//! context; emitters publish an event name plus an argument list. Dispatch is
//! synchronous and deterministic, failures are isolated per listener, and an
//! async mode defers emissions onto a FIFO worker.
//!
//! ## Architecture
//! ```text
//!   on / once / off                       emit(event, args)          emit_async(event, args)
//!        │                                       │                           │
//!        ▼                                       │                           ▼
//! ┌──────────────────────────────┐               │               ┌──────────────────────┐
//! │ Registry (mutex)             │◄── snapshot ──┤               │ DispatchQueue (FIFO) │
//! │  "*"     → [sub, sub, ...]   │               │               │  unbounded mpsc      │
//! │  "error" → [sub, ...]        │               │               └──────────┬───────────┘
//! │  "saved" → [sub(p=5), sub]   │               │                          ▼
//! └──────────────────────────────┘               │                   worker task ──► emit
//!                                                ▼
//!                          ┌──────────────────────────────────────┐
//!                          │ dispatch: "*" first, then event      │
//!                          │  per listener: Ok │ Failed(err)      │
//!                          └──────────────┬───────────────────────┘
//!                                         │ Failed
//!                                         ▼
//!                          tracing::error! ──► emit("error", failure)   (one level only)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types                                  |
//! |-------------------|--------------------------------------------------------------|--------------------------------------------|
//! | **Bus**           | Subscribe, publish, introspect, async publish.               | [`EventBus`]                               |
//! | **Listeners**     | Identity-carrying callables, struct handlers, options.       | [`Listener`], [`Handler`], [`ListenOptions`] |
//! | **Emissions**     | Type-erased args, per-call view, reserved channels.          | [`Args`], [`Emission`], [`WILDCARD`], [`ERROR_EVENT`] |
//! | **Errors**        | Typed errors for callers and for listeners.                  | [`BusError`], [`ListenerError`], [`ListenerFailure`] |
//! | **Configuration** | Panic isolation.                                             | [`BusConfig`]                              |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] wildcard listener _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use eventbus::{args, EventBus, Listener, ListenerError, ERROR_EVENT};
//!
//! # fn main() -> Result<(), eventbus::BusError> {
//! let bus = EventBus::default();
//! let failures = Arc::new(AtomicUsize::new(0));
//!
//! let f = failures.clone();
//! bus.on(ERROR_EVENT, Listener::infallible(move |em| {
//!     let failure = em.failure().expect("set on the error channel");
//!     assert_eq!(&*failure.event, "saved");
//!     f.fetch_add(1, Ordering::SeqCst);
//! }))?;
//!
//! bus.on("saved", Listener::new(|_| Err(ListenerError::fail("disk full"))))?
//!     .once("saved", Listener::infallible(|em| {
//!         assert_eq!(em.arg::<&str>(0), Some(&"report.pdf"));
//!     }))?;
//!
//! bus.emit("saved", args!["report.pdf"])?;
//! bus.emit("saved", args!["report.pdf"])?;
//!
//! assert_eq!(failures.load(Ordering::SeqCst), 2);
//! assert_eq!(bus.listener_count("saved"), 1);
//! # Ok(())
//! # }
//! ```
mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use self::core::{BusConfig, EventBus};
pub use error::{BusError, ListenerError, ListenerFailure};
pub use events::{Arg, Args, Emission, ERROR_EVENT, WILDCARD};
pub use listeners::{Handler, ListenOptions, Listener, ListenerResult, SubscriptionId};

// Optional: expose a simple built-in tracing listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;

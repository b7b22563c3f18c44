//! Emission data: arguments, the per-invocation view and reserved names.
//!
//! ## Contents
//! - [`Args`], [`Arg`] type-erased argument list carried by every emission
//! - [`Emission`] what a listener receives for one invocation
//! - [`WILDCARD`], [`ERROR_EVENT`] reserved channel names

mod args;
mod emission;

pub use args::{Arg, Args};
pub use emission::{Emission, ERROR_EVENT, WILDCARD};

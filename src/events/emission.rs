//! # The view a listener receives for one invocation.
//!
//! An [`Emission`] borrows everything from the running dispatch: the name the
//! event was published under, its [`Args`], the context bound to the
//! listener's subscription and, on the `"error"` channel, the captured
//! [`ListenerFailure`].
//!
//! ## What each channel sees
//! ```text
//! emit("y", [1, 2])
//!   ├─► "*" listeners      event="y"      args=[1, 2]   failure=None
//!   └─► "y" listeners      event="y"      args=[1, 2]   failure=None
//!
//! listener on "x" fails while handling args=[a]
//!   └─► "error" listeners  event="error"  args=[a]      failure=Some(event="x", ..)
//! ```

use std::any::Any;

use super::args::{Arg, Args};
use crate::error::ListenerFailure;

/// Reserved event name whose listeners observe every emission.
pub const WILDCARD: &str = "*";

/// Reserved event name that receives captured listener failures.
pub const ERROR_EVENT: &str = "error";

/// Borrowed data for a single listener invocation.
#[derive(Debug, Clone, Copy)]
pub struct Emission<'a> {
    event: &'a str,
    args: &'a Args,
    context: Option<&'a Arg>,
    failure: Option<&'a ListenerFailure>,
}

impl<'a> Emission<'a> {
    pub(crate) fn new(
        event: &'a str,
        args: &'a Args,
        context: Option<&'a Arg>,
        failure: Option<&'a ListenerFailure>,
    ) -> Self {
        Self {
            event,
            args,
            context,
            failure,
        }
    }

    /// Name the event was published under.
    ///
    /// Wildcard listeners use this to tell emissions apart.
    #[inline]
    pub fn event(&self) -> &'a str {
        self.event
    }

    #[inline]
    pub fn args(&self) -> &'a Args {
        self.args
    }

    /// Typed access to one argument; see [`Args::get`].
    #[inline]
    pub fn arg<T: Any>(&self, index: usize) -> Option<&'a T> {
        self.args.get(index)
    }

    /// Context bound at registration, downcast to `C`.
    pub fn context<C: Any>(&self) -> Option<&'a C> {
        self.context.and_then(|c| c.downcast_ref::<C>())
    }

    /// Failure being reported; set only for emissions on [`ERROR_EVENT`]
    /// produced by the dispatch loop.
    #[inline]
    pub fn failure(&self) -> Option<&'a ListenerFailure> {
        self.failure
    }
}

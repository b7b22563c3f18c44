//! # Listener handles.
//!
//! A [`Listener`] wraps a callable `Fn(&Emission) -> Result<(), ListenerError>`
//! behind an `Arc`. The handle **is** the listener's identity: clones of one
//! handle refer to the same listener, so keep a clone around to pass to
//! [`EventBus::off`](crate::EventBus::off) later. Two handles built from
//! separate calls to [`Listener::new`] never compare equal, even when the
//! closures look the same.
//!
//! Struct-based listeners implement [`Handler`] and are wrapped with
//! [`Listener::from_handler`].
//!
//! ## Example
//! ```rust
//! use eventbus::{Emission, Listener, ListenerError};
//!
//! let l = Listener::new(|em: &Emission<'_>| {
//!     let n = em.arg::<i32>(0).ok_or_else(|| ListenerError::fail("missing count"))?;
//!     println!("count={n}");
//!     Ok(())
//! })
//! .named("counter");
//!
//! let same = l.clone();
//! assert!(l.same_as(&same));
//! assert_eq!(l.name(), "counter");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::ListenerError;
use crate::events::Emission;

/// Result of one listener invocation.
pub type ListenerResult = Result<(), ListenerError>;

type ListenerFn = dyn Fn(&Emission<'_>) -> ListenerResult + Send + Sync;

/// Struct-based listener.
///
/// # Example
/// ```
/// use eventbus::{Emission, Handler, Listener, ListenerResult};
///
/// struct Audit;
///
/// impl Handler for Audit {
///     fn handle(&self, em: &Emission<'_>) -> ListenerResult {
///         println!("audit: {}", em.event());
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str { "audit" }
/// }
///
/// let l = Listener::from_handler(std::sync::Arc::new(Audit));
/// assert_eq!(l.name(), "audit");
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Processes one emission.
    ///
    /// Called synchronously from the dispatch loop; an `Err` (or a panic, when
    /// caught) is isolated to this invocation.
    fn handle(&self, emission: &Emission<'_>) -> ListenerResult;

    /// Name used in failure logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared, identity-carrying handle to a listener callable.
#[derive(Clone)]
pub struct Listener {
    name: Cow<'static, str>,
    f: Arc<ListenerFn>,
}

impl Listener {
    /// Wraps a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Emission<'_>) -> ListenerResult + Send + Sync + 'static,
    {
        Self {
            name: Cow::Borrowed("anonymous"),
            f: Arc::new(f),
        }
    }

    /// Wraps a closure that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&Emission<'_>) + Send + Sync + 'static,
    {
        Self::new(move |em: &Emission<'_>| {
            f(em);
            Ok(())
        })
    }

    /// Wraps a [`Handler`] implementation.
    pub fn from_handler<H: Handler>(handler: Arc<H>) -> Self {
        let name = handler.name();
        Self {
            name: Cow::Borrowed(name),
            f: Arc::new(move |em: &Emission<'_>| handler.handle(em)),
        }
    }

    /// Sets the name reported in failure logs. Identity is unaffected.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if both handles refer to the same listener.
    #[inline]
    pub fn same_as(&self, other: &Listener) -> bool {
        // Compare data pointers only; vtable pointers are not unique per type.
        std::ptr::addr_eq(Arc::as_ptr(&self.f), Arc::as_ptr(&other.f))
    }

    #[inline]
    pub(crate) fn call(&self, emission: &Emission<'_>) -> ListenerResult {
        (self.f)(emission)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name)
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Args;

    #[test]
    fn clones_share_identity() {
        let a = Listener::infallible(|_| {});
        let b = a.clone().named("renamed");
        assert!(a.same_as(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn separate_listeners_differ() {
        let a = Listener::infallible(|_| {});
        let b = Listener::infallible(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn handler_errors_pass_through() {
        struct Strict;
        impl Handler for Strict {
            fn handle(&self, em: &Emission<'_>) -> ListenerResult {
                if em.args().is_empty() {
                    return Err(ListenerError::fail("no args"));
                }
                Ok(())
            }
            fn name(&self) -> &'static str {
                "strict"
            }
        }

        let l = Listener::from_handler(Arc::new(Strict));
        let args = Args::new();
        let err = l.call(&Emission::new("x", &args, None, None)).unwrap_err();
        assert_eq!(err, ListenerError::fail("no args"));
        assert_eq!(l.name(), "strict");
    }
}

//! # Emission arguments.
//!
//! [`Args`] is the ordered argument list passed along with an emission. Values
//! are type-erased ([`Arg`] = `Arc<dyn Any + Send + Sync>`) so one bus can carry
//! any payload shape; listeners read them back with [`Args::get`].
//!
//! Cloning an [`Args`] is cheap (one `Arc` bump), which matters because the
//! same list is handed to the wildcard channel, the event's own listeners and,
//! on failure, the `"error"` channel.
//!
//! ## Example
//! ```rust
//! use eventbus::{args, Args};
//!
//! let a: Args = args![1_i32, "two"];
//! assert_eq!(a.len(), 2);
//! assert_eq!(a.get::<i32>(0), Some(&1));
//! assert_eq!(a.get::<&str>(1), Some(&"two"));
//! assert_eq!(a.get::<String>(1), None);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A single type-erased argument value.
pub type Arg = Arc<dyn Any + Send + Sync>;

/// Ordered, immutable, cheaply cloneable argument list.
#[derive(Clone)]
pub struct Args(Arc<[Arg]>);

impl Args {
    /// Empty argument list.
    pub fn new() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Wraps a single value.
    pub fn one<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::from(vec![Arc::new(value) as Arg]))
    }

    /// Returns a new list with `value` appended.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut values: Vec<Arg> = self.0.to_vec();
        values.push(Arc::new(value));
        Self(Arc::from(values))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Typed access to the argument at `index`.
    ///
    /// Returns `None` when the index is out of range or the value is of another type.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.0.get(index).and_then(|v| v.downcast_ref::<T>())
    }

    /// Untyped access to the argument at `index`.
    pub fn raw(&self, index: usize) -> Option<&Arg> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.0.iter()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Vec<Arg>> for Args {
    fn from(values: Vec<Arg>) -> Self {
        Self(Arc::from(values))
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}

/// Builds an [`Args`] list from plain values.
///
/// ```rust
/// let a = eventbus::args!["saved", 42_u64];
/// assert_eq!(a.get::<u64>(1), Some(&42));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::from(::std::vec![
            $(::std::sync::Arc::new($value) as $crate::Arg),+
        ])
    };
}

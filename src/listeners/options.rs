//! # Registration options.
//!
//! [`ListenOptions`] carries the per-subscription knobs accepted by
//! [`EventBus::on`](crate::EventBus::on) and [`EventBus::once`](crate::EventBus::once):
//! - `priority`: higher runs first; equal priorities keep registration order (default `0`)
//! - `context`: owner value bound to the subscription and handed back on every call
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventbus::ListenOptions;
//!
//! struct Panel { id: u32 }
//!
//! let opts = ListenOptions::default()
//!     .priority(10)
//!     .context(Arc::new(Panel { id: 3 }));
//! assert_eq!(opts.priority, 10);
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::events::Arg;

/// Options applied when registering a listener.
#[derive(Clone, Debug, Default)]
pub struct ListenOptions {
    /// Dispatch priority; higher runs first.
    pub priority: i32,
    /// Value bound to the subscription, readable via [`Emission::context`](crate::Emission::context).
    pub context: Option<Arg>,
}

impl ListenOptions {
    /// Options with the given priority and no context.
    #[inline]
    pub fn with_priority(priority: i32) -> Self {
        Self {
            priority,
            context: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Binds `context` to the subscription.
    #[must_use]
    pub fn context<C: Any + Send + Sync>(mut self, context: Arc<C>) -> Self {
        self.context = Some(context);
        self
    }
}

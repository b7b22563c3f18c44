//! # Bus configuration.
//!
//! Provides [`BusConfig`], the settings a bus is constructed with
//! (`EventBus::new(config)`); [`EventBus::global`](crate::EventBus::global)
//! uses [`BusConfig::default`].

/// Configuration for an [`EventBus`](crate::EventBus).
///
/// ## Field semantics
/// - `catch_panics`: turn listener panics into isolated failures instead of unwinding
///
/// ## Notes
/// All fields are public for flexibility; start from [`BusConfig::default`]
/// and override what you need.
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Catch panics raised by listeners.
    ///
    /// - `true`: a panic becomes `ListenerError::Panicked` and is handled like
    ///   any other listener failure (logged, reported on `"error"`).
    /// - `false`: the panic unwinds through `emit` to the caller.
    pub catch_panics: bool,
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `catch_panics = true`
    fn default() -> Self {
        Self { catch_panics: true }
    }
}

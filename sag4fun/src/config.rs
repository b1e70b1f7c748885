//! Engine configuration.

use crate::reshape::ReshapeStrategy;

/// Configuration held by an [`crate::Engine`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Emits a `tracing` event for every stage of every network pass.
    pub debug_trace: bool,

    /// Strategy used to reshape containers between stages.
    pub reshape: ReshapeStrategy,
}

impl Config {
    /// Sets `debug_trace`.
    pub fn with_debug_trace(self, debug_trace: bool) -> Self { Self { debug_trace, ..self } }

    /// Sets `reshape`.
    pub fn with_reshape(self, reshape: ReshapeStrategy) -> Self { Self { reshape, ..self } }
}

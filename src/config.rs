//! # Emitter configuration.
//!
//! Provides [`Config`], centralized allocation settings for an [`Emitter`](crate::Emitter).
//!
//! Config only shapes memory reservation; it never changes dispatch semantics.
//!
//! ## Sentinel values
//! - `listener_capacity = 0` → no reservation (sequence grows on demand)
//! - `event_capacity = 0` → no reservation (event map grows on demand)

/// Allocation settings for an emitter.
///
/// ## Field semantics
/// - `listener_capacity`: slots reserved when an event gets its first listener
/// - `event_capacity`: event names reserved when the emitter is created
///
/// ## Example
/// ```rust
/// use reemit::{Config, Emitter};
///
/// let cfg = Config {
///     listener_capacity: 4,
///     ..Config::default()
/// };
/// let em: Emitter<()> = Emitter::with_config(cfg);
/// assert_eq!(em.config().listener_capacity, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Initial capacity of a newly created listener sequence.
    ///
    /// Most events carry one or two listeners, so the default keeps this small.
    pub listener_capacity: usize,

    /// Initial capacity of the event map.
    pub event_capacity: usize,
}

impl Config {
    /// Returns the per-event reservation as an `Option`.
    ///
    /// - `None` → no reservation
    /// - `Some(n)` → reserve `n` slots up front
    #[inline]
    pub fn listener_reservation(&self) -> Option<usize> {
        if self.listener_capacity == 0 {
            None
        } else {
            Some(self.listener_capacity)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `listener_capacity = 2`
    /// - `event_capacity = 0` (no reservation)
    fn default() -> Self {
        Self {
            listener_capacity: 2,
            event_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_means_no_reservation() {
        let cfg = Config {
            listener_capacity: 0,
            event_capacity: 0,
        };
        assert_eq!(cfg.listener_reservation(), None);
    }

    #[test]
    fn test_default_reserves_small_sequences() {
        let cfg = Config::default();
        assert_eq!(cfg.listener_reservation(), Some(2));
        assert_eq!(cfg.event_capacity, 0);
    }
}

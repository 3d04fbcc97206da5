//! Lifetime countdown for targets that should not wait forever.
//!
//! The target spawner attaches a [`Ttl`] when `target_lifetime_seconds` is
//! positive. [`crate::systems::ttl::ttl_system`] burns it down with the
//! scaled frame delta and despawns the entity once it runs out, so a frozen
//! pause freezes lifetimes too. The owning spawner is never told; it drops
//! the handle on its next compaction.

use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Ttl {
    /// Seconds left. Zero or less means expired.
    pub remaining: f64,
}

impl Ttl {
    pub fn new(seconds: f64) -> Self {
        Ttl { remaining: seconds }
    }

    /// Burn `dt` seconds and report whether the lifetime is over.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.remaining -= dt.max(0.0);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_exactly_at_zero() {
        let mut ttl = Ttl::new(1.0);
        assert!(!ttl.tick(0.5));
        assert!(ttl.tick(0.5));
        assert_eq!(ttl.remaining, 0.0);
    }

    #[test]
    fn test_negative_delta_does_not_extend_life() {
        let mut ttl = Ttl::new(1.0);
        ttl.tick(-3.0);
        assert_eq!(ttl.remaining, 1.0);
    }

    #[test]
    fn test_zero_lifetime_is_already_expired() {
        assert!(Ttl::new(0.0).is_expired());
    }
}

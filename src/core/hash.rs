//! State Hashing for Verification
//!
//! Deterministic hashing of game state for:
//! - Replay validation (same inputs must give the same hash)
//! - Cheap equality checks between two runs of a session

use sha2::{Sha256, Digest};
use super::rect::BoundingBox;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for game state.
///
/// Wraps SHA-256 with helpers for the integer types the simulation uses.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for game state.
    pub fn for_game_state() -> Self {
        Self::new(b"SIDESCROLL_STATE_V1")
    }

    /// Create hasher for input recordings.
    pub fn for_input_recording() -> Self {
        Self::new(b"SIDESCROLL_INPUTS_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a bounding box (x, y, width, height).
    #[inline]
    pub fn update_rect(&mut self, rect: &BoundingBox) {
        self.update_i32(rect.x);
        self.update_i32(rect.y);
        self.update_i32(rect.width);
        self.update_i32(rect.height);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for a game at a given tick.
///
/// The closure adds the game-specific fields after the tick.
pub fn compute_state_hash<F>(tick: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_game_state();

    hasher.update_u32(tick);
    add_state(&mut hasher);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_game_state();
            hasher.update_u32(100);
            hasher.update_i32(-7);
            hasher.update_rect(&BoundingBox::new(1, 2, 3, 4));
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let mut a = StateHasher::for_game_state();
        let mut b = StateHasher::for_input_recording();
        a.update_u32(5);
        b.update_u32(5);
        assert_ne!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_compute_state_hash() {
        let hash = compute_state_hash(100, |hasher| {
            hasher.update_i32(5);
            hasher.update_bool(true);
        });
        let hash2 = compute_state_hash(100, |hasher| {
            hasher.update_i32(5);
            hasher.update_bool(true);
        });
        assert_eq!(hash, hash2);

        let hash3 = compute_state_hash(101, |hasher| {
            hasher.update_i32(5);
            hasher.update_bool(true);
        });
        assert_ne!(hash, hash3);
    }
}

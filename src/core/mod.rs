//! Core deterministic primitives.
//!
//! Integer geometry and state hashing. Nothing in here touches floats,
//! clocks or global state.

pub mod rect;
pub mod hash;

// Re-export core types
pub use rect::{BoundingBox, MidEdges};
pub use hash::{StateHash, StateHasher, compute_state_hash};

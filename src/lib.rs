//! # Sidescroll
//!
//! Deterministic core of a side-scrolling platformer: static level geometry,
//! exact-contact collision detection and the per-frame state machine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SIDESCROLL                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  config.rs       - Tunables + JSON loading                   │
//! │                                                              │
//! │  core/           - Deterministic primitives                  │
//! │  ├── rect.rs     - Integer bounding boxes, mid-edges         │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── collision.rs- Contact flags and gap distances           │
//! │  ├── level.rs    - Ground segments, holes, platforms         │
//! │  ├── player.rs   - Player movement primitives                │
//! │  ├── input.rs    - Bindings, snapshots, recordings           │
//! │  ├── state.rs    - Game status, timed states                 │
//! │  ├── events.rs   - Events emitted by the frame loop          │
//! │  ├── render.rs   - Render sink seam                          │
//! │  └── tick.rs     - Per-frame update                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! - Integer coordinates only
//! - No HashMap (BTreeMap for sorted iteration)
//! - No clocks; the host drives one `update` per frame
//!
//! Given the same config, levels and input recording, a session produces
//! the same state hash on every run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::config::{ConfigError, GameConfig};
pub use crate::core::rect::BoundingBox;
pub use crate::game::collision::{CollisionSet, CollisionSide};
pub use crate::game::input::{InputFrame, InputRecording, Key};
pub use crate::game::level::{LevelCatalog, LevelSpec};
pub use crate::game::state::GameState;
pub use crate::game::tick::{Game, GameError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal frame rate the host is expected to drive `update` at (Hz)
pub const TICK_RATE: u32 = 300;

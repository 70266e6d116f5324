//! Game Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `collision`: Contact flags and gap distances against static geometry
//! - `level`: Level specs, catalogs and constructed obstacle sets
//! - `player`: The player sprite and its movement primitives
//! - `input`: Keys, bindings, input snapshots and recordings
//! - `state`: Game status and timed player states
//! - `events`: Game events for hosts and replay
//! - `render`: Seam for the external renderer
//! - `tick`: The per-frame update loop

pub mod collision;
pub mod level;
pub mod player;
pub mod input;
pub mod state;
pub mod events;
pub mod render;
pub mod tick;

// Re-export key types
pub use collision::{CollisionSet, CollisionSide, GapDistances};
pub use level::{Level, LevelCatalog, LevelError, LevelSpec, Obstacle, ObstacleKind};
pub use player::Player;
pub use input::{Bindings, Command, InputFrame, InputRecording, Key};
pub use state::{GameState, TimedState, TimedStates};
pub use events::{GameEvent, GameEventData};
pub use render::RenderSink;
pub use tick::{Game, GameError, FrameSnapshot, replay_session};

//! Render Seam
//!
//! The simulation never draws. Hosts implement [`RenderSink`] and hand it to
//! `Game::render` after each update.

use crate::core::rect::BoundingBox;
use crate::game::level::ObstacleKind;

/// Receiver for the draw calls of one frame.
pub trait RenderSink {
    /// Draw one static obstacle.
    fn draw_obstacle(&mut self, kind: ObstacleKind, rect: &BoundingBox);

    /// Draw the player sprite. `facing_right` selects the sprite orientation.
    fn draw_player(&mut self, rect: &BoundingBox, facing_right: bool);

    /// Draw the remaining-lives indicator.
    fn draw_lives(&mut self, lives: u32);
}

/// Sink that records draw calls, for tests and headless hosts.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Obstacles drawn, in call order
    pub obstacles: Vec<(ObstacleKind, BoundingBox)>,
    /// Player draws, in call order
    pub players: Vec<(BoundingBox, bool)>,
    /// Last lives count drawn
    pub lives: Option<u32>,
}

impl RenderSink for RecordingSink {
    fn draw_obstacle(&mut self, kind: ObstacleKind, rect: &BoundingBox) {
        self.obstacles.push((kind, *rect));
    }

    fn draw_player(&mut self, rect: &BoundingBox, facing_right: bool) {
        self.players.push((*rect, facing_right));
    }

    fn draw_lives(&mut self, lives: u32) {
        self.lives = Some(lives);
    }
}

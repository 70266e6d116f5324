//! Player Entity
//!
//! Position, size and facing. The player has no collision awareness of its
//! own; the frame loop decides which moves are legal.

use serde::{Serialize, Deserialize};
use crate::config::GameConfig;
use crate::core::rect::BoundingBox;

/// The controllable sprite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    spawn_x: i32,
    spawn_y: i32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    step: i32,
    facing_right: bool,
}

impl Player {
    /// Create a player at its spawn point, facing right.
    pub fn new(spawn_x: i32, spawn_y: i32, config: &GameConfig) -> Self {
        Self {
            spawn_x,
            spawn_y,
            x: spawn_x,
            y: spawn_y,
            width: config.player_width.max(0),
            height: config.player_height.max(0),
            step: config.step_size,
            facing_right: true,
        }
    }

    /// Return to the spawn point. Facing is kept.
    pub fn reset_position(&mut self) {
        self.x = self.spawn_x;
        self.y = self.spawn_y;
    }

    /// Top-left corner.
    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Spawn point.
    #[inline]
    pub fn spawn(&self) -> (i32, i32) {
        (self.spawn_x, self.spawn_y)
    }

    /// Place the player somewhere else without touching the spawn point.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Current bounding box.
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }

    /// Whether the sprite faces right.
    #[inline]
    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    /// Step left, turning to face left.
    pub fn go_left(&mut self) {
        self.x -= self.step;
        if self.facing_right {
            self.facing_right = false;
        }
    }

    /// Step right, turning to face right.
    pub fn go_right(&mut self) {
        self.x += self.step;
        if !self.facing_right {
            self.facing_right = true;
        }
    }

    /// Jump ascent: twice the step.
    pub fn go_up(&mut self) {
        self.y -= self.step * 2;
    }

    /// Gravity: one step.
    pub fn go_down(&mut self) {
        self.y += self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(10, 20, &GameConfig::default())
    }

    #[test]
    fn test_steps() {
        let mut p = player();
        p.go_right();
        assert_eq!(p.position(), (11, 20));
        p.go_left();
        p.go_left();
        assert_eq!(p.position(), (9, 20));
        p.go_up();
        assert_eq!(p.position(), (9, 18));
        p.go_down();
        assert_eq!(p.position(), (9, 19));
    }

    #[test]
    fn test_facing_flips_only_on_direction_change() {
        let mut p = player();
        assert!(p.is_facing_right());
        p.go_right();
        assert!(p.is_facing_right());
        p.go_left();
        assert!(!p.is_facing_right());
        p.go_left();
        assert!(!p.is_facing_right());
        p.go_right();
        assert!(p.is_facing_right());
    }

    #[test]
    fn test_reset_returns_to_spawn() {
        let mut p = player();
        p.set_position(300, 700);
        p.reset_position();
        assert_eq!(p.position(), p.spawn());
        assert_eq!(p.position(), (10, 20));
    }

    #[test]
    fn test_bounds_track_position() {
        let mut p = player();
        p.go_down();
        assert_eq!(p.bounds(), BoundingBox::new(10, 21, 48, 48));
    }

    #[test]
    fn test_step_size_from_config() {
        let config = GameConfig { step_size: 4, ..GameConfig::default() };
        let mut p = Player::new(0, 0, &config);
        p.go_up();
        p.go_right();
        assert_eq!(p.position(), (4, -8));
    }
}

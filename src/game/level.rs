//! Level Geometry
//!
//! Builds the static obstacles of one stage from a declarative spec:
//! ground segments everywhere except the holes, plus floating platforms.
//! A constructed level never changes shape.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, GameConfig};
use crate::core::rect::BoundingBox;
use crate::game::collision::{contact_sides, gap_distances, CollisionSet, GapDistances};
use crate::game::player::Player;
use crate::game::render::RenderSink;

/// Declarative description of one level.
///
/// Holes are `(x_start, x_end)` gaps in the ground, platforms are
/// `(x_start, x_end, y_offset)` with the offset measured up from the ground top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Gap ranges in the ground, ascending
    #[serde(default)]
    pub holes: Vec<(i32, i32)>,
    /// Floating platforms
    #[serde(default)]
    pub platforms: Vec<(i32, i32, i32)>,
}

/// Level construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// Hole does not span a positive range.
    #[error("hole {index} ({start}, {end}) has start >= end")]
    InvertedHole { index: usize, start: i32, end: i32 },

    /// Hole extends past the world.
    #[error("hole {index} ({start}, {end}) is outside the world 0..{world_width}")]
    HoleOutOfBounds { index: usize, start: i32, end: i32, world_width: i32 },

    /// Hole starts before the previous one ended.
    #[error("hole {index} starts at {start}, before the previous hole ends at {previous_end}")]
    OverlappingHoles { index: usize, start: i32, previous_end: i32 },

    /// Platform does not span a positive range.
    #[error("platform {index} ({start}, {end}) has start >= end")]
    InvertedPlatform { index: usize, start: i32, end: i32 },

    /// Platform extends past the world.
    #[error("platform {index} ({start}, {end}) is outside the world 0..{world_width}")]
    PlatformOutOfBounds { index: usize, start: i32, end: i32, world_width: i32 },

    /// Platform sits below the ground top.
    #[error("platform {index} has negative y offset {offset}")]
    NegativePlatformOffset { index: usize, offset: i32 },
}

/// What an obstacle is, for rendering only. Collision treats all alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground segment
    Ground,
    /// Floating platform
    Platform,
}

/// One piece of static geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Kind tag
    pub kind: ObstacleKind,
    /// Collision box
    pub rect: BoundingBox,
}

/// A constructed stage.
#[derive(Clone, Debug)]
pub struct Level {
    ground: Vec<Obstacle>,
    platforms: Vec<Obstacle>,
    ground_height: i32,
}

impl Level {
    /// Build a level, rejecting malformed specs.
    pub fn new(spec: &LevelSpec, config: &GameConfig) -> Result<Self, LevelError> {
        validate(spec, config.screen_width)?;

        let ground_top = config.screen_height - config.ground_height;

        // Fill every range not covered by a hole
        let mut ground = Vec::with_capacity(spec.holes.len() + 1);
        let mut last_x = 0;
        for &(start, end) in &spec.holes {
            push_ground(&mut ground, last_x, start, ground_top, config.ground_height);
            last_x = end;
        }
        push_ground(&mut ground, last_x, config.screen_width, ground_top, config.ground_height);

        let platforms = spec
            .platforms
            .iter()
            .map(|&(start, end, offset)| Obstacle {
                kind: ObstacleKind::Platform,
                rect: BoundingBox::new(
                    start,
                    ground_top - offset,
                    end - start,
                    config.platform_height,
                ),
            })
            .collect::<Vec<_>>();

        debug!(
            "Built level: {} ground segments, {} platforms",
            ground.len(),
            platforms.len()
        );

        Ok(Self {
            ground,
            platforms,
            ground_height: config.ground_height,
        })
    }

    /// Ground thickness, used to compute the spawn height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.ground_height
    }

    /// Ground segments.
    pub fn ground(&self) -> &[Obstacle] {
        &self.ground
    }

    /// Floating platforms.
    pub fn platforms(&self) -> &[Obstacle] {
        &self.platforms
    }

    /// Every obstacle box, ground first.
    pub fn obstacle_rects(&self) -> impl Iterator<Item = &BoundingBox> + Clone + '_ {
        self.ground
            .iter()
            .chain(self.platforms.iter())
            .map(|o| &o.rect)
    }

    /// Sides of the player currently flush against ground or platforms.
    pub fn compute_collisions(&self, player: &Player) -> CollisionSet {
        let bounds = player.bounds();
        let on_ground = contact_sides(&bounds, self.ground.iter().map(|o| &o.rect));
        let on_platforms = contact_sides(&bounds, self.platforms.iter().map(|o| &o.rect));
        on_ground.union(on_platforms)
    }

    /// Gap distances from the player to the nearest geometry.
    pub fn gap_distances(&self, player: &Player) -> GapDistances {
        gap_distances(&player.bounds(), self.obstacle_rects())
    }

    /// Hand every obstacle to the render sink.
    pub fn draw<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for obstacle in self.ground.iter().chain(self.platforms.iter()) {
            sink.draw_obstacle(obstacle.kind, &obstacle.rect);
        }
    }
}

fn push_ground(out: &mut Vec<Obstacle>, start: i32, end: i32, top: i32, height: i32) {
    // Zero-width segments (hole at a world edge) carry no geometry
    if end <= start {
        return;
    }
    out.push(Obstacle {
        kind: ObstacleKind::Ground,
        rect: BoundingBox::new(start, top, end - start, height),
    });
}

fn validate(spec: &LevelSpec, world_width: i32) -> Result<(), LevelError> {
    let mut previous_end = 0;
    for (index, &(start, end)) in spec.holes.iter().enumerate() {
        if start >= end {
            return Err(LevelError::InvertedHole { index, start, end });
        }
        if start < 0 || end > world_width {
            return Err(LevelError::HoleOutOfBounds { index, start, end, world_width });
        }
        if start < previous_end {
            return Err(LevelError::OverlappingHoles { index, start, previous_end });
        }
        previous_end = end;
    }

    for (index, &(start, end, offset)) in spec.platforms.iter().enumerate() {
        if start >= end {
            return Err(LevelError::InvertedPlatform { index, start, end });
        }
        if start < 0 || end > world_width {
            return Err(LevelError::PlatformOutOfBounds { index, start, end, world_width });
        }
        if offset < 0 {
            return Err(LevelError::NegativePlatformOffset { index, offset });
        }
    }

    Ok(())
}

/// Ordered set of level specs keyed by level index (1-based, contiguous).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelCatalog {
    levels: BTreeMap<u32, LevelSpec>,
}

impl LevelCatalog {
    /// Create from an explicit map.
    pub fn new(levels: BTreeMap<u32, LevelSpec>) -> Self {
        Self { levels }
    }

    /// Two short levels used when no file is given.
    pub fn builtin() -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(
            1,
            LevelSpec {
                holes: vec![(300, 380)],
                platforms: vec![(250, 420, 90)],
            },
        );
        levels.insert(
            2,
            LevelSpec {
                holes: vec![(200, 260), (520, 600)],
                platforms: vec![(160, 300, 80), (480, 640, 80)],
            },
        );
        Self { levels }
    }

    /// Parse a JSON catalog: `{"1": {"holes": [[a, b]], "platforms": [[a, b, y]]}}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let catalog: LevelCatalog = serde_json::from_str(json)?;
        catalog.validate_indices()?;
        Ok(catalog)
    }

    /// Read and parse a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Spec for a level index, `None` when past the last level.
    pub fn get(&self, index: u32) -> Option<&LevelSpec> {
        self.levels.get(&index)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when there are no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn validate_indices(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::Invalid("level catalog is empty".into()));
        }
        for (expected, index) in (1u32..).zip(self.levels.keys()) {
            if *index != expected {
                return Err(ConfigError::Invalid(format!(
                    "level indices must be contiguous from 1, found {} where {} was expected",
                    index, expected
                )));
            }
        }
        Ok(())
    }
}

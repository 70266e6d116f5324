//! Collision Detection
//!
//! Deterministic contact and gap queries between the player box and static
//! level geometry. All comparisons are on mid-edge coordinates.
//!
//! Two kinds of query:
//! - gap distances (`distance_down`, `distance_left`, `distance_right`): how far
//!   the nearest obstacle is in one direction, among obstacles whose span
//!   overlaps the player's on the perpendicular axis
//! - contact flags (`contact_sides`): which sides of the player are exactly
//!   flush against an obstacle right now

use serde::{Serialize, Deserialize};
use crate::core::rect::BoundingBox;

/// Proximity tolerance used when gathering contact candidates.
pub const CONTACT_MARGIN: i32 = 1;

/// A side of the player's bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CollisionSide {
    /// Left side flush against an obstacle's right side
    Left = 0,
    /// Feet resting on an obstacle's top
    Bottom = 1,
    /// Right side flush against an obstacle's left side
    Right = 2,
    /// Head against an obstacle's underside
    Top = 3,
}

impl CollisionSide {
    /// All sides in declaration order.
    pub const ALL: [CollisionSide; 4] = [
        CollisionSide::Left,
        CollisionSide::Bottom,
        CollisionSide::Right,
        CollisionSide::Top,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of sides currently in contact (packed bits).
///
/// Recomputed from scratch every frame; duplicates collapse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionSet {
    bits: u8,
}

impl CollisionSet {
    /// Empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Add a side.
    #[inline]
    pub fn insert(&mut self, side: CollisionSide) {
        self.bits |= side.bit();
    }

    /// Check whether a side is present.
    #[inline]
    pub const fn contains(&self, side: CollisionSide) -> bool {
        self.bits & side.bit() != 0
    }

    /// True when no side is in contact.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of sides in contact.
    #[inline]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Union of two sets.
    #[inline]
    pub const fn union(self, other: CollisionSet) -> CollisionSet {
        CollisionSet { bits: self.bits | other.bits }
    }

    /// Raw bits (for hashing).
    #[inline]
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Iterate sides in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = CollisionSide> + '_ {
        CollisionSide::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<CollisionSide> for CollisionSet {
    fn from_iter<I: IntoIterator<Item = CollisionSide>>(iter: I) -> Self {
        let mut set = CollisionSet::empty();
        for side in iter {
            set.insert(side);
        }
        set
    }
}

/// Gap distances to the nearest obstacle in each tracked direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapDistances {
    /// Distance to the nearest obstacle below
    pub down: i32,
    /// Distance to the nearest obstacle on the left
    pub left: i32,
    /// Distance to the nearest obstacle on the right
    pub right: i32,
}

/// Distance from the player's feet to the nearest obstacle top below it.
///
/// Only obstacles overlapping the player horizontally count. Returns 0 when
/// none qualifies.
pub fn distance_down<'a, I>(player: &BoundingBox, obstacles: I) -> i32
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let p = player.mid_edges();
    let nearest = obstacles
        .into_iter()
        .map(BoundingBox::mid_edges)
        .filter(|o| o.left < p.right && o.right > p.left)
        .map(|o| o.top - p.bottom)
        .filter(|d| *d >= 0)
        .min();
    nearest.unwrap_or(0).max(0)
}

/// Distance from the player's right side to the nearest obstacle on its right.
///
/// Only obstacles overlapping the player vertically count. Returns 0 when
/// none qualifies.
pub fn distance_right<'a, I>(player: &BoundingBox, obstacles: I) -> i32
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let p = player.mid_edges();
    let nearest = obstacles
        .into_iter()
        .map(BoundingBox::mid_edges)
        .filter(|o| o.top < p.bottom && o.bottom > p.top)
        .map(|o| o.left - p.right)
        .filter(|d| *d >= 0)
        .min();
    nearest.unwrap_or(0).max(0)
}

/// Distance from the player's left side to the nearest obstacle on its left.
///
/// Only obstacles overlapping the player vertically count. Returns 0 when
/// none qualifies.
pub fn distance_left<'a, I>(player: &BoundingBox, obstacles: I) -> i32
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let p = player.mid_edges();
    let nearest = obstacles
        .into_iter()
        .map(BoundingBox::mid_edges)
        .filter(|o| o.top < p.bottom && o.bottom > p.top)
        .map(|o| p.left - o.right)
        .filter(|d| *d >= 0)
        .min();
    nearest.unwrap_or(0).max(0)
}

/// All three gap distances at once.
pub fn gap_distances<'a, I>(player: &BoundingBox, obstacles: I) -> GapDistances
where
    I: IntoIterator<Item = &'a BoundingBox>,
    I::IntoIter: Clone,
{
    let iter = obstacles.into_iter();
    GapDistances {
        down: distance_down(player, iter.clone()),
        left: distance_left(player, iter.clone()),
        right: distance_right(player, iter),
    }
}

/// Contact sides between one sprite box and one obstacle.
///
/// Assumes the obstacle is already known to be near the sprite. BOTTOM and
/// TOP are exclusive, as are LEFT and RIGHT.
pub fn contact_with(sprite: &BoundingBox, obstacle: &BoundingBox) -> CollisionSet {
    let s = sprite.mid_edges();
    let o = obstacle.mid_edges();
    let mut set = CollisionSet::empty();

    if s.bottom == o.top {
        set.insert(CollisionSide::Bottom);
    } else if s.top == o.bottom {
        set.insert(CollisionSide::Top);
    }

    if s.left == o.right {
        set.insert(CollisionSide::Left);
    } else if s.right == o.left {
        set.insert(CollisionSide::Right);
    }

    set
}

/// Compute which sides of `sprite` are flush against any of `obstacles`.
///
/// Candidates are obstacles overlapping the sprite box grown by
/// [`CONTACT_MARGIN`]; each candidate is then tested for exact mid-edge
/// equality. Flags from different obstacles accumulate.
pub fn contact_sides<'a, I>(sprite: &BoundingBox, obstacles: I) -> CollisionSet
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let probe = sprite.inflate(CONTACT_MARGIN);
    obstacles
        .into_iter()
        .filter(|o| probe.overlaps(o))
        .fold(CollisionSet::empty(), |acc, o| acc.union(contact_with(sprite, o)))
}

//! The level model: a static description of a tile world.
//!
//! A [`Level`] is pure data. It is constructed once per session through
//! [`parser::LevelBuilder`] (which validates it) and is never mutated during
//! play except for draining the collectible sets.

use std::collections::HashSet;

use bevy_ecs::prelude::*;
use glam::{IVec2, UVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::TILE_SIZE;

pub mod library;
pub mod parser;

/// An axis-aligned rectangle in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }
}

/// Static description of one hazard, spawned into the world at session start.
#[derive(Debug, Clone, PartialEq)]
pub enum HazardSpec {
    /// A platformer enemy oscillating between two tile columns.
    Oscillator {
        tile: UVec2,
        left: u32,
        right: u32,
        speed: f32,
    },
    /// A stealth guard walking a cyclic waypoint path, watching a cone.
    ///
    /// Waypoints are anchor positions in world pixels; `fov` is the cone
    /// radius in pixels and `arc` the half-angle in radians.
    Sentry {
        path: SmallVec<[Vec2; 8]>,
        speed: f32,
        fov: f32,
        arc: f32,
    },
}

/// An immutable tile world plus its session-drainable collectible sets.
#[derive(Resource, Debug, Clone)]
pub struct Level {
    width: u32,
    height: u32,
    /// Row-major solidity bitmap; index = `y * width + x`.
    solids: Vec<u8>,
    pub spawn: UVec2,
    pub finish: UVec2,
    collectibles: HashSet<UVec2>,
    batteries: HashSet<UVec2>,
    pub checkpoints: Vec<UVec2>,
    pub noise_zones: Vec<Rect>,
    pub hazards: Vec<HazardSpec>,
}

impl Level {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    /// The tile containing a world-pixel point (may be out of range).
    pub fn tile_of(point: Vec2) -> IVec2 {
        (point / TILE_SIZE).floor().as_ivec2()
    }

    /// Top-left corner of a tile, in world pixels.
    pub fn tile_origin(tile: UVec2) -> Vec2 {
        tile.as_vec2() * TILE_SIZE
    }

    /// Center of a tile, in world pixels.
    pub fn tile_center(tile: UVec2) -> Vec2 {
        Self::tile_origin(tile) + Vec2::splat(TILE_SIZE / 2.0)
    }

    /// Whether the tile under a world-pixel point is solid.
    ///
    /// Anything outside `[0, width) × [0, height)` is solid: the world is
    /// closed, and out-of-grid lookups are defined rather than an error.
    pub fn is_solid(&self, point: Vec2) -> bool {
        let tile = Self::tile_of(point);
        if tile.x < 0 || tile.y < 0 || tile.x >= self.width as i32 || tile.y >= self.height as i32 {
            return true;
        }
        self.solids[(tile.y as u32 * self.width + tile.x as u32) as usize] == 1
    }

    pub fn is_solid_tile(&self, tile: UVec2) -> bool {
        tile.x >= self.width
            || tile.y >= self.height
            || self.solids[(tile.y * self.width + tile.x) as usize] == 1
    }

    pub fn collectibles(&self) -> impl Iterator<Item = &UVec2> {
        self.collectibles.iter()
    }

    pub fn collectibles_remaining(&self) -> usize {
        self.collectibles.len()
    }

    pub fn batteries(&self) -> impl Iterator<Item = &UVec2> {
        self.batteries.iter()
    }

    /// Removes a collectible from the set. Returns whether one was present.
    pub fn take_collectible(&mut self, tile: UVec2) -> bool {
        self.collectibles.remove(&tile)
    }

    /// Removes a battery pack from the set. Returns whether one was present.
    pub fn take_battery(&mut self, tile: UVec2) -> bool {
        self.batteries.remove(&tile)
    }

    pub fn is_checkpoint(&self, tile: UVec2) -> bool {
        self.checkpoints.contains(&tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::parser::LevelBuilder;

    fn tiny_level() -> Level {
        LevelBuilder::from_board(&["####", "#P.#", "#cF#", "####"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let level = tiny_level();
        assert!(level.is_solid(Vec2::new(-1.0, 10.0)));
        assert!(level.is_solid(Vec2::new(10.0, -1.0)));
        assert!(level.is_solid(Vec2::new(4.0 * TILE_SIZE + 1.0, 10.0)));
        assert!(level.is_solid(Vec2::new(10.0, 4.0 * TILE_SIZE + 1.0)));
    }

    #[test]
    fn test_pixel_to_tile_floor() {
        assert_eq!(Level::tile_of(Vec2::new(0.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(Level::tile_of(Vec2::new(63.9, 63.9)), IVec2::new(0, 0));
        assert_eq!(Level::tile_of(Vec2::new(64.0, 64.0)), IVec2::new(1, 1));
        assert_eq!(Level::tile_of(Vec2::new(-0.1, 0.0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_take_collectible_drains_once() {
        let mut level = tiny_level();
        let tile = UVec2::new(1, 2);
        assert_eq!(level.collectibles_remaining(), 1);
        assert!(level.take_collectible(tile));
        assert!(!level.take_collectible(tile));
        assert_eq!(level.collectibles_remaining(), 0);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(20.0, 20.0)));
        assert!(!r.contains(Vec2::new(10.0, 20.0))); // boundary is outside
        assert!(!r.contains(Vec2::new(31.0, 20.0)));
    }
}

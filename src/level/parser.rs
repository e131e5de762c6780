//! Board parsing: converts an ASCII level layout plus declared hazard data
//! into a validated [`Level`].
//!
//! Legend: `.` empty, `#` solid, `P` spawn, `F` finish, `c` collectible,
//! `b` battery pack. Checkpoints, hazards and noise zones carry more data
//! than one character can, so they are declared on the builder instead.
//! Malformed level data fails at build time with a [`LevelError`] rather
//! than producing silent out-of-bounds reads later.

use std::collections::HashSet;

use glam::{UVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::TILE_SIZE;
use crate::error::LevelError;
use crate::level::{HazardSpec, Level, Rect};

/// What a single board character means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTile {
    Empty,
    Solid,
    Spawn,
    Finish,
    Collectible,
    Battery,
}

/// Parses a single character of the board.
pub fn parse_character(c: char) -> Result<BoardTile, LevelError> {
    match c {
        '.' => Ok(BoardTile::Empty),
        '#' => Ok(BoardTile::Solid),
        'P' => Ok(BoardTile::Spawn),
        'F' => Ok(BoardTile::Finish),
        'c' => Ok(BoardTile::Collectible),
        'b' => Ok(BoardTile::Battery),
        _ => Err(LevelError::UnknownCharacter(c)),
    }
}

/// Assembles a [`Level`] from an ASCII board and declared entity data.
#[derive(Debug, Clone, Default)]
pub struct LevelBuilder {
    rows: Vec<String>,
    checkpoints: Vec<UVec2>,
    hazards: Vec<HazardSpec>,
    noise_zones: Vec<Rect>,
}

impl LevelBuilder {
    pub fn from_board(board: &[&str]) -> Self {
        Self {
            rows: board.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Declares a checkpoint tile (platformer). Checkpoints may share a tile
    /// with a collectible.
    pub fn checkpoint(mut self, tile: (u32, u32)) -> Self {
        self.checkpoints.push(UVec2::new(tile.0, tile.1));
        self
    }

    /// Declares an enemy oscillating between the `left` and `right` tile
    /// columns (inclusive, in tiles) at `speed` px/s.
    pub fn oscillator(mut self, tile: (u32, u32), left: u32, right: u32, speed: f32) -> Self {
        self.hazards.push(HazardSpec::Oscillator {
            tile: UVec2::new(tile.0, tile.1),
            left,
            right,
            speed,
        });
        self
    }

    /// Declares a guard walking a cyclic path of tile waypoints, with a
    /// vision cone of radius `fov` pixels and half-angle `arc` radians.
    pub fn sentry(mut self, path: &[(u32, u32)], speed: f32, fov: f32, arc: f32) -> Self {
        self.hazards.push(HazardSpec::Sentry {
            path: path
                .iter()
                .map(|&(x, y)| Vec2::new(x as f32, y as f32) * TILE_SIZE)
                .collect::<SmallVec<[Vec2; 8]>>(),
            speed,
            fov,
            arc,
        });
        self
    }

    /// Declares a noise zone covering `w × h` tiles from a tile origin.
    pub fn noise_zone(mut self, tile: (u32, u32), w: u32, h: u32) -> Self {
        self.noise_zones.push(Rect::new(
            tile.0 as f32 * TILE_SIZE,
            tile.1 as f32 * TILE_SIZE,
            w as f32 * TILE_SIZE,
            h as f32 * TILE_SIZE,
        ));
        self
    }

    /// Parses and validates the level.
    pub fn build(self) -> Result<Level, LevelError> {
        let height = self.rows.len();
        if height == 0 {
            return Err(LevelError::EmptyBoard);
        }
        let width = self.rows[0].chars().count();
        if width == 0 {
            return Err(LevelError::EmptyBoard);
        }

        let mut solids = vec![0u8; width * height];
        let mut collectibles = HashSet::new();
        let mut batteries = HashSet::new();
        let mut spawns = Vec::new();
        let mut finishes = Vec::new();

        for (y, row) in self.rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row_width,
                });
            }
            for (x, character) in row.chars().enumerate() {
                let tile = UVec2::new(x as u32, y as u32);
                match parse_character(character)? {
                    BoardTile::Empty => {}
                    BoardTile::Solid => solids[y * width + x] = 1,
                    BoardTile::Spawn => spawns.push(tile),
                    BoardTile::Finish => finishes.push(tile),
                    BoardTile::Collectible => {
                        collectibles.insert(tile);
                    }
                    BoardTile::Battery => {
                        batteries.insert(tile);
                    }
                }
            }
        }

        if spawns.len() != 1 {
            return Err(LevelError::SpawnCount(spawns.len()));
        }
        if finishes.len() != 1 {
            return Err(LevelError::FinishCount(finishes.len()));
        }

        let level = Level {
            width: width as u32,
            height: height as u32,
            solids,
            spawn: spawns[0],
            finish: finishes[0],
            collectibles,
            batteries,
            checkpoints: self.checkpoints,
            noise_zones: self.noise_zones,
            hazards: self.hazards,
        };

        validate(&level)?;
        Ok(level)
    }
}

fn validate(level: &Level) -> Result<(), LevelError> {
    let world = level.pixel_size();
    let in_world = |p: Vec2| p.x >= 0.0 && p.y >= 0.0 && p.x <= world.x && p.y <= world.y;

    for &tile in &level.checkpoints {
        if tile.x >= level.width() || tile.y >= level.height() {
            return Err(LevelError::OutOfBounds {
                what: "checkpoint",
                x: tile.x as f32,
                y: tile.y as f32,
            });
        }
        if level.is_solid_tile(tile) {
            return Err(LevelError::OnSolidTile {
                what: "checkpoint",
                x: tile.x,
                y: tile.y,
            });
        }
    }

    for hazard in &level.hazards {
        match hazard {
            HazardSpec::Oscillator {
                tile, left, right, ..
            } => {
                if left > right {
                    return Err(LevelError::InvertedBounds {
                        left: *left,
                        right: *right,
                    });
                }
                if *right >= level.width() || tile.y >= level.height() {
                    return Err(LevelError::OutOfBounds {
                        what: "oscillator",
                        x: *right as f32,
                        y: tile.y as f32,
                    });
                }
            }
            HazardSpec::Sentry { path, .. } => {
                if path.is_empty() {
                    return Err(LevelError::EmptyPatrolPath);
                }
                for waypoint in path {
                    if !in_world(*waypoint) {
                        return Err(LevelError::OutOfBounds {
                            what: "waypoint",
                            x: waypoint.x,
                            y: waypoint.y,
                        });
                    }
                }
            }
        }
    }

    for zone in &level.noise_zones {
        if !in_world(Vec2::new(zone.x, zone.y)) || !in_world(Vec2::new(zone.x + zone.w, zone.y + zone.h)) {
            return Err(LevelError::OutOfBounds {
                what: "noise zone",
                x: zone.x,
                y: zone.y,
            });
        }
    }

    Ok(())
}

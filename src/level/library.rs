//! The shipped levels, authored as ASCII boards plus declared hazard data.

use std::f32::consts::FRAC_PI_3;

use crate::constants::runner::ENEMY_SPEED;
use crate::error::LevelError;
use crate::level::parser::LevelBuilder;
use crate::level::Level;

/// The platformer level: a floor with columns, two plateaus, a stair, ten
/// coins, three patrolling enemies and three checkpoints.
pub const RUNNER_BOARD: [&str; 20] = [
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    ".........................ccc............",
    "........c...............####............",
    ".......c.......c.c......................",
    "......c.......#####.....................",
    "...P...........................c.c....F.",
    ".......#..#...........#.......#.........",
    "......#...#...........#.......#.........",
    ".....#....#...........#.......#.........",
    "....#.....#...........#.......#.........",
    "########################################",
    "########################################",
];

/// The stealth level: a sound stage with prop walls, four shots to collect,
/// two battery packs, two noise zones and one guard on a rectangular patrol.
pub const STUDIO_BOARD: [&str; 18] = [
    "..............................",
    "..............................",
    "............#..............F..",
    "....##......#.................",
    "..........c...................",
    "..............................",
    "......c.......................",
    "......................c.......",
    "..........................##..",
    "....###.............b.........",
    "..............................",
    "...............c..............",
    "........................##....",
    "........b...............##....",
    "..P...........................",
    "..............................",
    "..............................",
    "..............................",
];

/// Guard vision radius, in pixels.
pub const GUARD_FOV: f32 = 160.0;
/// Guard vision half-angle, in radians (~60°).
pub const GUARD_ARC: f32 = FRAC_PI_3;
/// Guard walking speed, px/s.
pub const GUARD_SPEED: f32 = 90.0;

pub fn runner_level() -> Result<Level, LevelError> {
    LevelBuilder::from_board(&RUNNER_BOARD)
        .checkpoint((18, 11))
        .checkpoint((27, 9))
        .checkpoint((33, 13))
        .oscillator((12, 14), 11, 16, ENEMY_SPEED)
        .oscillator((23, 14), 22, 26, ENEMY_SPEED)
        .oscillator((31, 14), 30, 34, ENEMY_SPEED)
        .build()
}

pub fn studio_level() -> Result<Level, LevelError> {
    LevelBuilder::from_board(&STUDIO_BOARD)
        .noise_zone((9, 10), 5, 2)
        .noise_zone((18, 5), 3, 3)
        .sentry(
            &[(14, 11), (22, 11), (22, 6), (14, 6)],
            GUARD_SPEED,
            GUARD_FOV,
            GUARD_ARC,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;

    #[test]
    fn test_runner_level_builds() {
        let level = runner_level().unwrap();
        assert_eq!(level.width(), 40);
        assert_eq!(level.height(), 20);
        assert_eq!(level.spawn, UVec2::new(3, 13));
        assert_eq!(level.finish, UVec2::new(38, 13));
        assert_eq!(level.collectibles_remaining(), 10);
        assert_eq!(level.checkpoints.len(), 3);
        assert_eq!(level.hazards.len(), 3);
    }

    #[test]
    fn test_runner_floor_is_solid() {
        let level = runner_level().unwrap();
        for x in 0..level.width() {
            assert!(level.is_solid_tile(UVec2::new(x, 18)));
            assert!(level.is_solid_tile(UVec2::new(x, 19)));
        }
    }

    #[test]
    fn test_studio_level_builds() {
        let level = studio_level().unwrap();
        assert_eq!(level.width(), 30);
        assert_eq!(level.height(), 18);
        assert_eq!(level.spawn, UVec2::new(2, 14));
        assert_eq!(level.finish, UVec2::new(27, 2));
        assert_eq!(level.collectibles_remaining(), 4);
        assert_eq!(level.batteries().count(), 2);
        assert_eq!(level.noise_zones.len(), 2);
        assert_eq!(level.hazards.len(), 1);
    }

    #[test]
    fn test_studio_props_stay_clear_of_patrol_and_items() {
        let level = studio_level().unwrap();
        // Patrol rectangle edges in tiles: x 14..=22 at y 6 and 11, y 6..=11
        // at x 14 and 22. Props must not sit on the walked line.
        for x in 14..=22 {
            assert!(!level.is_solid_tile(UVec2::new(x, 6)));
            assert!(!level.is_solid_tile(UVec2::new(x, 11)));
        }
        for y in 6..=11 {
            assert!(!level.is_solid_tile(UVec2::new(14, y)));
            assert!(!level.is_solid_tile(UVec2::new(22, y)));
        }
        for tile in level.collectibles().chain(level.batteries()) {
            assert!(!level.is_solid_tile(*tile));
        }
    }
}

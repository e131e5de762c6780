//! This module contains the engine-wide constants and tuned gameplay
//! parameters shared by both arcade modes.
//!
//! Values that the stealth meters and the scoring formula depend on live in
//! the runtime `Tuning` resources instead (see [`crate::systems::components`]);
//! the constants here are structural.

/// The size of one level tile, in pixels.
pub const TILE_SIZE: f32 = 64.0;

/// Per-frame delta time cap, in seconds.
///
/// Bounds the distance any entity can travel in one step so a frame hitch
/// cannot carry it through a solid tile.
pub const MAX_FRAME_DT: f32 = 0.033;

/// Hard per-axis speed cap, in pixels per second, applied before
/// integration. Together with [`MAX_FRAME_DT`] it keeps one step strictly
/// inside one tile.
pub const SPEED_LIMIT: f32 = 1900.0;

/// Margin left between an entity and the tile face it was snapped to.
pub const COLLISION_EPSILON: f32 = 0.01;

/// Distance at which a patrol counts as having reached its waypoint.
pub const WAYPOINT_EPSILON: f32 = 2.0;

/// Device pixel ratios above this are clamped (oversampling past 2x is
/// wasted work on a canvas this size).
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;

/// Joystick drag radius, in pixels, at which the intent vector saturates.
pub const JOYSTICK_RADIUS: f32 = 40.0;

/// Upward intent beyond this magnitude counts as a jump request.
pub const JUMP_AXIS_THRESHOLD: f32 = 0.6;

/// Per-update velocity retention factor for particles.
pub const PARTICLE_FRICTION: f32 = 0.96;

/// Multiplicative zoom change per wheel step.
pub const ZOOM_STEP: f32 = 1.1;

/// Camera smoothing: fraction of the remaining distance covered per update.
pub const CAMERA_SMOOTHING: f32 = 0.12;

/// Number of parallax backdrop stars.
pub const STAR_COUNT: u32 = 120;

/// Platformer-mode movement and combat parameters.
pub mod runner {
    /// Side length of the player's square hit-box, in pixels.
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Horizontal acceleration, px/s².
    pub const ACCEL: f32 = 2000.0;
    /// Per-update horizontal velocity retention factor.
    pub const FRICTION: f32 = 0.86;
    /// Downward acceleration, px/s².
    pub const GRAVITY: f32 = 1800.0;
    /// Instantaneous upward velocity applied on jump, px/s.
    pub const JUMP_IMPULSE: f32 = 1520.0;
    /// Instantaneous horizontal velocity applied on dash, px/s.
    pub const DASH_IMPULSE: f32 = 800.0;
    /// Seconds between dashes.
    pub const DASH_COOLDOWN: f32 = 0.35;
    /// Health restored on (re)spawn.
    pub const MAX_HEALTH: u32 = 3;
    /// Seconds of invulnerability after taking a hit.
    pub const INVULN_WINDOW: f32 = 0.6;
    /// Side length of an enemy's square hit-box, in pixels.
    pub const ENEMY_SIZE: f32 = 44.0;
    /// Enemy oscillation speed, px/s.
    pub const ENEMY_SPEED: f32 = 120.0;
}

/// Stealth-mode movement parameters.
pub mod studio {
    /// Side length of the player's square hit-box, in pixels.
    pub const PLAYER_SIZE: f32 = 42.0;
    /// Horizontal acceleration, px/s².
    pub const ACCEL: f32 = 1800.0;
    /// Vertical acceleration as a fraction of [`ACCEL`].
    pub const VERTICAL_ACCEL: f32 = 0.75;
    /// Per-update velocity retention factor, both axes.
    pub const FRICTION: f32 = 0.88;
    /// Instantaneous horizontal velocity applied on boost, px/s.
    pub const BOOST_IMPULSE: f32 = 900.0;
    /// Seconds between boosts.
    pub const BOOST_COOLDOWN: f32 = 0.35;
    /// Guard square side, in pixels (render size; guards have no contact
    /// hit-box, only a vision cone).
    pub const GUARD_SIZE: f32 = 20.0;
}

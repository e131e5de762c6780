//! Components, bundles and shared resources for the arcade ECS.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::rngs::SmallRng;
use smallvec::SmallVec;

use crate::constants;

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// Top-left corner of an entity's square hit-box, in world pixels.
///
/// Sentries are the exception: their position is the patrol anchor that the
/// vision cone originates from (they have no contact hit-box).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Velocity in pixels per second.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Side length of the square hit-box, in pixels.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodySize(pub f32);

impl BodySize {
    pub fn half(&self) -> f32 {
        self.0 / 2.0
    }

    /// Center of the hit-box given its top-left position.
    pub fn center(&self, position: Vec2) -> Vec2 {
        position + Vec2::splat(self.half())
    }
}

/// Marks an entity that collides with the solid tile grid.
#[derive(Component)]
pub struct TileCollider;

/// Marks an entity affected by gravity (platformer mode).
#[derive(Component)]
pub struct Gravity;

/// Horizontal orientation; decides dash/boost direction and sprite flip.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Whether the last downward sweep was blocked; recomputed every frame.
#[derive(Component, Debug, Default)]
pub struct OnGround(pub bool);

#[derive(Component, Debug)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    /// Seconds of invulnerability remaining after a hit.
    pub invuln_remaining: f32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            invuln_remaining: 0.0,
        }
    }
}

/// Cooldown gating the dash/boost impulse; seconds remaining.
#[derive(Component, Debug, Default)]
pub struct DashTimer(pub f32);

/// How a hazard moves.
#[derive(Component, Debug)]
pub enum Patrol {
    /// 1-D oscillation between two x bounds in pixels, reversing on contact.
    Oscillate {
        left: f32,
        right: f32,
        speed: f32,
        dir: f32,
    },
    /// Cyclic waypoint walk; `target` indexes the waypoint being approached.
    Waypoints {
        path: SmallVec<[Vec2; 8]>,
        target: usize,
        speed: f32,
    },
}

/// A detection cone attached to a sentry.
#[derive(Component, Debug)]
pub struct VisionCone {
    /// Detection radius, pixels.
    pub radius: f32,
    /// Half-angle of the cone, radians.
    pub half_angle: f32,
}

/// Unit vector of a sentry's current walking direction.
#[derive(Component, Debug)]
pub struct Heading(pub Vec2);

/// Marks a hazard that damages the player on AABB contact (platformer).
#[derive(Component)]
pub struct HazardContact;

#[derive(Bundle)]
pub struct RunnerPlayerBundle {
    pub marker: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub size: BodySize,
    pub facing: Facing,
    pub on_ground: OnGround,
    pub gravity: Gravity,
    pub collider: TileCollider,
    pub health: Health,
    pub dash: DashTimer,
}

#[derive(Bundle)]
pub struct StudioPlayerBundle {
    pub marker: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub size: BodySize,
    pub facing: Facing,
    pub collider: TileCollider,
    pub dash: DashTimer,
}

#[derive(Bundle)]
pub struct OscillatorBundle {
    pub position: Position,
    pub size: BodySize,
    pub patrol: Patrol,
    pub contact: HazardContact,
}

#[derive(Bundle)]
pub struct SentryBundle {
    pub position: Position,
    pub patrol: Patrol,
    pub cone: VisionCone,
    pub heading: Heading,
}

/// Which content and rules a session runs.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// The platformer ("Runner Pro").
    Runner,
    /// The stealth collect-'em-up ("KinoSet").
    Studio,
}

/// Why a stealth session was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    BatteryDrained,
    Detected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost(LossCause),
}

/// The session state machine: `Running ⇄ Paused`, `Running → Finished`
/// (terminal — a restart constructs a fresh session).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum SessionStatus {
    Running,
    Paused,
    Finished { outcome: Outcome, score: i32 },
}

impl SessionStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionStatus::Running)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Finished { .. })
    }
}

/// Seconds elapsed since the previous frame, already clamped by the clock.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime(pub f32);

/// Stealth-mode resource meters.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Meters {
    /// Depletes over time and on boosts; empty ends the session.
    pub battery: f32,
    /// Accumulates near guards and in noise zones; full ends the session.
    pub noise: f32,
}

/// Stealth meter rates. Tuned values with no derivation beyond feel; kept as
/// data so content can override them per session.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MeterTuning {
    pub battery_max: f32,
    /// Passive battery drain, units/s.
    pub battery_drain: f32,
    /// Noise gained inside a noise zone, units/s.
    pub zone_noise_rate: f32,
    /// Noise gained inside a guard's vision cone, units/s.
    pub cone_noise_rate: f32,
    /// Battery restored by one pickup.
    pub battery_pickup: f32,
    /// Battery cost of one boost; boosting needs more than this in reserve.
    pub boost_cost: f32,
    pub noise_max: f32,
}

impl Default for MeterTuning {
    fn default() -> Self {
        Self {
            battery_max: 100.0,
            battery_drain: 1.1,
            zone_noise_rate: 22.0,
            cone_noise_rate: 35.0,
            battery_pickup: 25.0,
            boost_cost: 3.0,
            noise_max: 100.0,
        }
    }
}

/// Terminal-score weights.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ScoringTuning {
    pub collectible_weight: i32,
    pub battery_weight: i32,
    pub noise_weight: i32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            collectible_weight: 100,
            battery_weight: 2,
            noise_weight: 1,
        }
    }
}

/// Per-mode camera bounds.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraTuning {
    pub smoothing: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

/// Per-mode particle burst shape.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ParticleTuning {
    pub burst: usize,
    /// Initial lifetime, seconds.
    pub lifetime: f32,
    /// Width of the uniform per-axis velocity range, px/s.
    pub speed: f32,
}

/// The current respawn position (top-left pixels); updated by checkpoints.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Checkpoint(pub Vec2);

/// Collectible progress for the HUD and scoring.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CollectedCount {
    pub collected: u32,
    pub total: u32,
}

/// Session-scoped RNG; seeded sessions are fully deterministic.
#[derive(Resource)]
pub struct SessionRng(pub SmallRng);

/// Logical size and pixel density of the host's drawing surface.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Surface {
    /// Logical (CSS-pixel) size.
    pub size: Vec2,
    /// Device pixel ratio, clamped to [`constants::MAX_DEVICE_PIXEL_RATIO`].
    pub dpr: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            size: Vec2::new(1200.0, 675.0),
            dpr: 1.0,
        }
    }
}

impl Surface {
    pub fn with_dpr(size: Vec2, dpr: f32) -> Self {
        Self {
            size,
            dpr: dpr.min(constants::MAX_DEVICE_PIXEL_RATIO),
        }
    }
}

use bevy_ecs::prelude::*;
use glam::{UVec2, Vec2};

/// Discrete, edge-triggered commands produced by key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    TogglePause,
}

/// Gameplay events emitted during a frame and consumed later in the same
/// frame (particles, logging). Positions are world-space pixels.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// A collectible was picked up.
    Collected { tile: UVec2, at: Vec2 },
    /// A battery pack was picked up (stealth mode).
    BatteryCollected { tile: UVec2, at: Vec2 },
    /// The respawn point moved to a new checkpoint.
    CheckpointReached { tile: UVec2 },
    /// The player took a hit.
    Damaged { at: Vec2 },
    /// A hazard was defeated by an attack.
    HazardDefeated { at: Vec2 },
    /// The boost action fired (stealth mode).
    Boosted { at: Vec2 },
    /// Health ran out and the player was moved back to the checkpoint.
    Respawned,
}

//! Centralized error types for the engine.
//!
//! Construction-time failures (level validation) are the only fail-fast
//! boundary; everything at frame time is defined behavior or is reported
//! through the ECS error event channel and logged.

use bevy_ecs::event::Event;

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for level parsing and validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LevelError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),

    #[error("Board has no rows")]
    EmptyBoard,

    #[error("Board row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Expected exactly one spawn tile, found {0}")]
    SpawnCount(usize),

    #[error("Expected exactly one finish tile, found {0}")]
    FinishCount(usize),

    #[error("{what} at ({x}, {y}) is outside the world")]
    OutOfBounds { what: &'static str, x: f32, y: f32 },

    #[error("{what} at ({x}, {y}) sits on a solid tile")]
    OnSolidTile { what: &'static str, x: u32, y: u32 },

    #[error("Patrol path must have at least one waypoint")]
    EmptyPatrolPath,

    #[error("Oscillator bounds are inverted: left {left} > right {right}")]
    InvertedBounds { left: u32, right: u32 },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

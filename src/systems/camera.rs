//! Camera follow and wheel zoom.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::ZOOM_STEP;
use crate::input::InputState;
use crate::level::Level;
use crate::systems::components::{BodySize, CameraTuning, PlayerControlled, Position, Surface};

/// The derived view state: recomputed every frame, never persisted.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Camera {
    /// World-pixel position of the viewport's top-left corner.
    pub pos: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Visible world size at the current zoom.
    pub fn viewport(&self, surface: &Surface) -> Vec2 {
        surface.size / self.zoom
    }
}

/// Consumes pending wheel steps into the zoom, then moves the camera a
/// fixed fraction of the way toward the player, clamped to the world.
///
/// When the world is smaller than the viewport the clamp floors at zero.
pub fn camera_system(
    mut camera: ResMut<Camera>,
    mut input: ResMut<InputState>,
    tuning: Res<CameraTuning>,
    surface: Res<Surface>,
    level: Res<Level>,
    players: Query<(&Position, &BodySize), With<PlayerControlled>>,
) {
    let steps = std::mem::take(&mut input.wheel_steps);
    for _ in 0..steps.abs() {
        let factor = if steps > 0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        camera.zoom = (camera.zoom * factor).clamp(tuning.zoom_min, tuning.zoom_max);
    }

    let Ok((pos, size)) = players.single() else {
        return;
    };
    let view = camera.viewport(&surface);
    let world = level.pixel_size();

    let target = (size.center(pos.0) - view / 2.0)
        .clamp(Vec2::ZERO, (world - view).max(Vec2::ZERO));
    let current = camera.pos;
    camera.pos += (target - current) * tuning.smoothing;
}

//! Gravity and the axis-separated tile collision resolver.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::{runner, COLLISION_EPSILON, SPEED_LIMIT, TILE_SIZE};
use crate::level::Level;
use crate::systems::components::{BodySize, DeltaTime, Gravity, OnGround, Position, TileCollider, Velocity};

/// Adds gravity to vertical velocity before the resolve step.
pub fn gravity_system(dt: Res<DeltaTime>, mut bodies: Query<&mut Velocity, With<Gravity>>) {
    for mut vel in bodies.iter_mut() {
        vel.0.y += runner::GRAVITY * dt.0;
    }
}

/// Advances tile-colliding bodies one axis at a time: X first, then Y.
///
/// Each axis samples both leading-edge corners of the hit-box (so a body
/// cannot slip through a single-tile gap), snaps to the tile boundary on
/// contact and zeroes that velocity component. A downward sweep that was
/// blocked grounds the body; an unblocked one un-grounds it. Positions are
/// clamped to the world, and velocity is capped so one clamped step can
/// never cross a full tile.
pub fn physics_system(
    dt: Res<DeltaTime>,
    level: Res<Level>,
    mut bodies: Query<(&mut Position, &mut Velocity, &BodySize, Option<&mut OnGround>), With<TileCollider>>,
) {
    let world = level.pixel_size();

    for (mut pos, mut vel, size, mut on_ground) in bodies.iter_mut() {
        let s = size.0;
        vel.0 = vel.0.clamp(Vec2::splat(-SPEED_LIMIT), Vec2::splat(SPEED_LIMIT));

        // X axis
        let mut nx = pos.0.x + vel.0.x * dt.0;
        let y_top = pos.0.y;
        let y_bottom = pos.0.y + s - 1.0;
        if vel.0.x > 0.0 {
            if level.is_solid(Vec2::new(nx + s, y_top)) || level.is_solid(Vec2::new(nx + s, y_bottom)) {
                nx = ((nx + s) / TILE_SIZE).floor() * TILE_SIZE - s - COLLISION_EPSILON;
                vel.0.x = 0.0;
            }
        } else if vel.0.x < 0.0
            && (level.is_solid(Vec2::new(nx, y_top)) || level.is_solid(Vec2::new(nx, y_bottom)))
        {
            nx = ((nx / TILE_SIZE).floor() + 1.0) * TILE_SIZE + COLLISION_EPSILON;
            vel.0.x = 0.0;
        }
        pos.0.x = nx.clamp(0.0, world.x - s);

        // Y axis
        let mut ny = pos.0.y + vel.0.y * dt.0;
        let x_left = pos.0.x;
        let x_right = pos.0.x + s - 1.0;
        if vel.0.y > 0.0 {
            if level.is_solid(Vec2::new(x_left, ny + s)) || level.is_solid(Vec2::new(x_right, ny + s)) {
                ny = ((ny + s) / TILE_SIZE).floor() * TILE_SIZE - s - COLLISION_EPSILON;
                vel.0.y = 0.0;
                if let Some(ground) = on_ground.as_mut() {
                    ground.0 = true;
                }
            } else if let Some(ground) = on_ground.as_mut() {
                ground.0 = false;
            }
        } else if vel.0.y < 0.0
            && (level.is_solid(Vec2::new(x_left, ny)) || level.is_solid(Vec2::new(x_right, ny)))
        {
            ny = ((ny / TILE_SIZE).floor() + 1.0) * TILE_SIZE + COLLISION_EPSILON;
            vel.0.y = 0.0;
        }
        pos.0.y = ny.clamp(0.0, world.y - s);
    }
}

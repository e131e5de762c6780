//! Collectibles, battery packs and checkpoints.
//!
//! All three trigger off the tile under the player's center, matching the
//! tile-drain semantics of the level model: each collectible is taken
//! exactly once.

use bevy_ecs::prelude::*;
use glam::UVec2;

use crate::events::GameEvent;
use crate::level::Level;
use crate::systems::components::{
    BodySize, Checkpoint, CollectedCount, Meters, MeterTuning, PlayerControlled, Position,
};

pub fn pickup_system(
    mut level: ResMut<Level>,
    mut count: ResMut<CollectedCount>,
    tuning: Option<Res<MeterTuning>>,
    mut meters: Option<ResMut<Meters>>,
    mut checkpoint: Option<ResMut<Checkpoint>>,
    players: Query<(&Position, &BodySize), With<PlayerControlled>>,
    mut events: EventWriter<GameEvent>,
) {
    let Ok((pos, size)) = players.single() else {
        return;
    };
    let center = size.center(pos.0);
    let tile = Level::tile_of(center);
    if tile.x < 0 || tile.y < 0 {
        return;
    }
    let tile = UVec2::new(tile.x as u32, tile.y as u32);

    if level.take_collectible(tile) {
        count.collected += 1;
        events.write(GameEvent::Collected { tile, at: center });
    }

    if let (Some(meters), Some(tuning)) = (meters.as_mut(), tuning.as_ref()) {
        if level.take_battery(tile) {
            meters.battery = (meters.battery + tuning.battery_pickup).min(tuning.battery_max);
            events.write(GameEvent::BatteryCollected { tile, at: center });
        }
    }

    if let Some(checkpoint) = checkpoint.as_mut() {
        if level.is_checkpoint(tile) {
            let origin = Level::tile_origin(tile);
            if checkpoint.0 != origin {
                checkpoint.0 = origin;
                events.write(GameEvent::CheckpointReached { tile });
                tracing::debug!(x = tile.x, y = tile.y, "checkpoint updated");
            }
        }
    }
}

//! Hazard behavior: patrol movement, vision cones, and contact resolution.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::{runner, WAYPOINT_EPSILON};
use crate::events::GameEvent;
use crate::input::{ActionFlags, Intent};
use crate::level::Level;
use crate::systems::components::{
    BodySize, Checkpoint, DeltaTime, HazardContact, Heading, Health, Meters, MeterTuning, Patrol,
    PlayerControlled, Position, Velocity, VisionCone,
};

/// Axis-aligned overlap test between two square hit-boxes (top-left anchored).
pub fn overlaps(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    a.x < b.x + b_size && a.x + a_size > b.x && a.y < b.y + b_size && a.y + a_size > b.y
}

/// Advances every patrol: oscillators bounce between their bounds, waypoint
/// walkers head for `path[target]` and wrap cyclically on arrival.
pub fn patrol_system(
    dt: Res<DeltaTime>,
    mut patrols: Query<(&mut Position, &mut Patrol, Option<&mut Heading>)>,
) {
    for (mut pos, mut patrol, mut heading) in patrols.iter_mut() {
        match &mut *patrol {
            Patrol::Oscillate {
                left,
                right,
                speed,
                dir,
            } => {
                pos.0.x += *dir * *speed * dt.0;
                if pos.0.x < *left {
                    pos.0.x = *left;
                    *dir = 1.0;
                }
                if pos.0.x > *right {
                    pos.0.x = *right;
                    *dir = -1.0;
                }
            }
            Patrol::Waypoints {
                path,
                target,
                speed,
            } => {
                let delta = path[*target] - pos.0;
                if delta.length() < WAYPOINT_EPSILON {
                    *target = (*target + 1) % path.len();
                } else {
                    let step = delta.normalize_or_zero();
                    pos.0 += step * *speed * dt.0;
                    if let Some(h) = heading.as_mut() {
                        h.0 = step;
                    }
                }
            }
        }
    }
}

/// Evaluates sentry vision cones and noise zones against the player,
/// accumulating the noise meter.
///
/// A sentry notices the player when they are within the cone radius and the
/// angle between its walking direction and the direction to the player is
/// inside the half-angle (dot-product test). Noise zones accumulate
/// independently of any sentry's facing.
pub fn vision_system(
    dt: Res<DeltaTime>,
    tuning: Res<MeterTuning>,
    level: Res<Level>,
    mut meters: ResMut<Meters>,
    players: Query<(&Position, &BodySize), With<PlayerControlled>>,
    sentries: Query<(&Position, &VisionCone, &Heading), Without<PlayerControlled>>,
) {
    let Ok((player_pos, player_size)) = players.single() else {
        return;
    };
    let player_center = player_size.center(player_pos.0);

    for (pos, cone, heading) in sentries.iter() {
        let to_player = player_center - pos.0;
        if to_player.length() < cone.radius
            && heading.0.dot(to_player.normalize_or_zero()) > cone.half_angle.cos()
        {
            meters.noise = (meters.noise + tuning.cone_noise_rate * dt.0).min(tuning.noise_max);
        }
    }

    for zone in &level.noise_zones {
        if zone.contains(player_center) {
            meters.noise = (meters.noise + tuning.zone_noise_rate * dt.0).min(tuning.noise_max);
        }
    }
}

/// Resolves player × hazard contact in the platformer.
///
/// An overlap while the attack flag is held defeats the hazard; otherwise
/// the player takes one hit, gated by the invulnerability window. Health
/// running out respawns the player at the checkpoint with health reset —
/// it does not end the session.
#[allow(clippy::type_complexity)]
pub fn contact_system(
    dt: Res<DeltaTime>,
    intent: Res<Intent>,
    checkpoint: Res<Checkpoint>,
    mut commands: Commands,
    mut players: Query<
        (&mut Position, &mut Velocity, &mut Health, &BodySize),
        With<PlayerControlled>,
    >,
    hazards: Query<(Entity, &Position, &BodySize), (With<HazardContact>, Without<PlayerControlled>)>,
    mut events: EventWriter<GameEvent>,
) {
    let Ok((mut pos, mut vel, mut health, size)) = players.single_mut() else {
        return;
    };

    if health.invuln_remaining > 0.0 {
        health.invuln_remaining -= dt.0;
    }

    for (entity, hazard_pos, hazard_size) in hazards.iter() {
        if !overlaps(pos.0, size.0, hazard_pos.0, hazard_size.0) {
            continue;
        }

        if intent.actions.contains(ActionFlags::ATTACK) {
            commands.entity(entity).despawn();
            events.write(GameEvent::HazardDefeated {
                at: hazard_size.center(hazard_pos.0),
            });
            continue;
        }

        if health.invuln_remaining > 0.0 {
            continue;
        }
        health.invuln_remaining = runner::INVULN_WINDOW;
        health.current = health.current.saturating_sub(1);
        events.write(GameEvent::Damaged {
            at: size.center(pos.0),
        });

        if health.current == 0 {
            pos.0 = checkpoint.0;
            vel.0 = Vec2::ZERO;
            health.current = health.max;
            events.write(GameEvent::Respawned);
            tracing::debug!("player respawned at checkpoint");
        }
    }
}

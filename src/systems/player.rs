//! Player control: turns the frame's intent into velocity changes.

use bevy_ecs::prelude::*;

use crate::constants::{runner, studio};
use crate::events::GameEvent;
use crate::input::{ActionFlags, Intent};
use crate::systems::components::{
    BodySize, DashTimer, DeltaTime, Facing, Meters, MeterTuning, OnGround, PlayerControlled,
    Position, Velocity,
};

fn turn(facing: &mut Facing, ax: f32) {
    if ax > 0.0 {
        *facing = Facing::Right;
    } else if ax < 0.0 {
        *facing = Facing::Left;
    }
}

/// Platformer control: horizontal acceleration with per-update friction,
/// jump off the ground, and a cooldown-gated dash in the input direction.
pub fn runner_control_system(
    dt: Res<DeltaTime>,
    intent: Res<Intent>,
    mut players: Query<
        (&mut Velocity, &mut Facing, &mut DashTimer, &mut OnGround),
        With<PlayerControlled>,
    >,
) {
    for (mut vel, mut facing, mut dash, mut on_ground) in players.iter_mut() {
        let ax = intent.axis.x;
        vel.0.x += ax * runner::ACCEL * dt.0;
        vel.0.x *= runner::FRICTION;
        turn(&mut facing, ax);

        if intent.actions.contains(ActionFlags::JUMP) && on_ground.0 {
            vel.0.y = -runner::JUMP_IMPULSE;
            on_ground.0 = false;
        }

        if intent.actions.contains(ActionFlags::DASH) && dash.0 <= 0.0 {
            // Dash along the input axis, or the facing direction when idle.
            let dir = if ax != 0.0 { ax.signum() } else { facing.sign() };
            vel.0.x += dir * runner::DASH_IMPULSE;
            dash.0 = runner::DASH_COOLDOWN;
        }
        if dash.0 > 0.0 {
            dash.0 -= dt.0;
        }
    }
}

/// Stealth control: two-axis acceleration (vertical damped), friction on
/// both axes, and a boost that costs battery.
pub fn studio_control_system(
    dt: Res<DeltaTime>,
    intent: Res<Intent>,
    tuning: Res<MeterTuning>,
    mut meters: ResMut<Meters>,
    mut players: Query<
        (&Position, &BodySize, &mut Velocity, &mut Facing, &mut DashTimer),
        With<PlayerControlled>,
    >,
    mut events: EventWriter<GameEvent>,
) {
    for (pos, size, mut vel, mut facing, mut dash) in players.iter_mut() {
        vel.0.x += intent.axis.x * studio::ACCEL * dt.0;
        vel.0.y += intent.axis.y * studio::ACCEL * studio::VERTICAL_ACCEL * dt.0;
        vel.0 *= studio::FRICTION;
        turn(&mut facing, intent.axis.x);

        if intent.actions.contains(ActionFlags::BOOST)
            && dash.0 <= 0.0
            && meters.battery > tuning.boost_cost
        {
            vel.0.x += facing.sign() * studio::BOOST_IMPULSE;
            dash.0 = studio::BOOST_COOLDOWN;
            meters.battery = (meters.battery - tuning.boost_cost).max(0.0);
            events.write(GameEvent::Boosted {
                at: size.center(pos.0),
            });
        }
        if dash.0 > 0.0 {
            dash.0 -= dt.0;
        }
    }
}

//! Ephemeral spark particles for gameplay feedback.
//!
//! The pool is an unordered bag: pruning uses `swap_remove` and no ordering
//! is guaranteed.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::Rng;

use crate::constants::PARTICLE_FRICTION;
use crate::events::GameEvent;
use crate::systems::components::{DeltaTime, ParticleTuning, SessionRng};
use crate::systems::render::Color;

/// Feedback colors, matching the site's palette.
pub const SPARK_COLLECT: Color = Color::rgb(255, 210, 77);
pub const SPARK_BATTERY: Color = Color::rgb(143, 227, 136);
pub const SPARK_DAMAGE: Color = Color::rgb(255, 127, 127);
pub const SPARK_DEFEAT: Color = Color::rgb(255, 85, 85);
pub const SPARK_BOOST: Color = Color::rgb(255, 255, 255);

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining; render alpha follows it down.
    pub life: f32,
    pub color: Color,
}

#[derive(Resource, Debug, Default)]
pub struct ParticlePool {
    pub particles: Vec<Particle>,
}

impl ParticlePool {
    /// Spawns `tuning.burst` particles at `pos` with velocities drawn
    /// uniformly from `[-speed/2, speed/2]` per axis.
    pub fn spawn_burst(
        &mut self,
        rng: &mut impl Rng,
        tuning: &ParticleTuning,
        pos: Vec2,
        color: Color,
    ) {
        for _ in 0..tuning.burst {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * tuning.speed,
                (rng.random::<f32>() - 0.5) * tuning.speed,
            );
            self.particles.push(Particle {
                pos,
                vel,
                life: tuning.lifetime,
                color,
            });
        }
    }
}

/// Turns the frame's gameplay events into spark bursts.
pub fn particle_spawn_system(
    mut pool: ResMut<ParticlePool>,
    mut rng: ResMut<SessionRng>,
    tuning: Res<ParticleTuning>,
    mut events: EventReader<GameEvent>,
) {
    for event in events.read() {
        let (at, color) = match *event {
            GameEvent::Collected { at, .. } => (at, SPARK_COLLECT),
            GameEvent::BatteryCollected { at, .. } => (at, SPARK_BATTERY),
            GameEvent::Damaged { at } => (at, SPARK_DAMAGE),
            GameEvent::HazardDefeated { at } => (at, SPARK_DEFEAT),
            GameEvent::Boosted { at } => (at, SPARK_BOOST),
            GameEvent::CheckpointReached { .. } | GameEvent::Respawned => continue,
        };
        pool.spawn_burst(&mut rng.0, &tuning, at, color);
    }
}

/// Integrates positions, decays velocity, and prunes dead particles.
pub fn particle_update_system(dt: Res<DeltaTime>, mut pool: ResMut<ParticlePool>) {
    let particles = &mut pool.particles;
    let mut i = 0;
    while i < particles.len() {
        let p = &mut particles[i];
        p.life -= dt.0;
        if p.life <= 0.0 {
            particles.swap_remove(i);
            continue;
        }
        p.pos += p.vel * dt.0;
        p.vel *= PARTICLE_FRICTION;
        i += 1;
    }
}

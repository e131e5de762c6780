//! The game session object.
//!
//! A [`Game`] owns one session: an ECS world, a gated update schedule and an
//! always-on render schedule. The host constructs it, forwards raw input
//! through [`Game::handle_event`], calls [`Game::tick`] once per animation
//! frame, and reads back the frame's draw list with [`Game::frame`].
//! Restarting means constructing a fresh session; dropping the game tears
//! everything down.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::IntoScheduleConfigs;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::constants::{runner, studio, MAX_FRAME_DT, TILE_SIZE};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::input::{intent_system, Bindings, InputEvent, InputState, Intent};
use crate::level::{library, HazardSpec, Level};
use crate::systems::camera::{camera_system, Camera};
use crate::systems::components::*;
use crate::systems::hazard::{contact_system, patrol_system, vision_system};
use crate::systems::particles::{particle_spawn_system, particle_update_system, ParticlePool};
use crate::systems::physics::{gravity_system, physics_system};
use crate::systems::pickup::pickup_system;
use crate::systems::player::{runner_control_system, studio_control_system};
use crate::systems::render::{render_hud_system, render_world_system, DrawCommand, FramePlan};
use crate::systems::session::{meters_system, session_system};

pub use crate::systems::components::{GameMode, LossCause, Outcome, SessionStatus};

pub struct Game {
    pub world: World,
    update: Schedule,
    render: Schedule,
}

impl Game {
    /// Creates a session running the shipped level for `mode`.
    ///
    /// `seed` fixes the session RNG (particles); `None` seeds from the OS.
    pub fn new(mode: GameMode, seed: Option<u64>) -> GameResult<Self> {
        let level = match mode {
            GameMode::Runner => library::runner_level()?,
            GameMode::Studio => library::studio_level()?,
        };
        Self::with_level(mode, level, seed)
    }

    /// Creates a session over a custom (already validated) level.
    pub fn with_level(mode: GameMode, level: Level, seed: Option<u64>) -> GameResult<Self> {
        let mut world = World::default();

        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<GameError>(&mut world);

        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        world.insert_resource(mode);
        world.insert_resource(SessionStatus::Running);
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(InputState::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(Intent::default());
        world.insert_resource(Surface::default());
        world.insert_resource(Camera::default());
        world.insert_resource(FramePlan::default());
        world.insert_resource(ParticlePool::default());
        world.insert_resource(SessionRng(rng));
        world.insert_resource(ScoringTuning::default());
        world.insert_resource(CollectedCount {
            collected: 0,
            total: level.collectibles_remaining() as u32,
        });

        spawn_hazards(&mut world, &level);

        match mode {
            GameMode::Runner => {
                world.insert_resource(CameraTuning {
                    smoothing: crate::constants::CAMERA_SMOOTHING,
                    zoom_min: 0.6,
                    zoom_max: 2.0,
                });
                world.insert_resource(ParticleTuning {
                    burst: 16,
                    lifetime: 0.8,
                    speed: 300.0,
                });
                let spawn = Level::tile_origin(level.spawn);
                world.insert_resource(Checkpoint(spawn));
                world.spawn(RunnerPlayerBundle {
                    marker: PlayerControlled,
                    position: Position(spawn),
                    velocity: Velocity::default(),
                    size: BodySize(runner::PLAYER_SIZE),
                    facing: Facing::default(),
                    on_ground: OnGround(false),
                    gravity: Gravity,
                    collider: TileCollider,
                    health: Health::new(runner::MAX_HEALTH),
                    dash: DashTimer::default(),
                });
            }
            GameMode::Studio => {
                world.insert_resource(CameraTuning {
                    smoothing: crate::constants::CAMERA_SMOOTHING,
                    zoom_min: 0.7,
                    zoom_max: 2.0,
                });
                world.insert_resource(ParticleTuning {
                    burst: 12,
                    lifetime: 0.7,
                    speed: 250.0,
                });
                let tuning = MeterTuning::default();
                world.insert_resource(Meters {
                    battery: tuning.battery_max,
                    noise: 0.0,
                });
                world.insert_resource(tuning);
                world.spawn(StudioPlayerBundle {
                    marker: PlayerControlled,
                    position: Position(Level::tile_origin(level.spawn)),
                    velocity: Velocity::default(),
                    size: BodySize(studio::PLAYER_SIZE),
                    facing: Facing::default(),
                    collider: TileCollider,
                    dash: DashTimer::default(),
                });
            }
        }

        world.insert_resource(level);

        let mut update = Schedule::default();
        match mode {
            GameMode::Runner => {
                update.add_systems(
                    (
                        intent_system,
                        runner_control_system,
                        gravity_system,
                        physics_system,
                        patrol_system,
                        contact_system,
                        pickup_system,
                        session_system,
                        camera_system,
                        particle_spawn_system,
                        particle_update_system,
                    )
                        .chain(),
                );
            }
            GameMode::Studio => {
                update.add_systems(
                    (
                        intent_system,
                        studio_control_system,
                        physics_system,
                        patrol_system,
                        vision_system,
                        meters_system,
                        pickup_system,
                        session_system,
                        camera_system,
                        particle_spawn_system,
                        particle_update_system,
                    )
                        .chain(),
                );
            }
        }

        update.add_systems(error_log_system.after(particle_update_system));

        let mut render = Schedule::default();
        render.add_systems((render_world_system, render_hud_system).chain());

        tracing::debug!(?mode, "session created");
        Ok(Game {
            world,
            update,
            render,
        })
    }

    /// Forwards one raw input event. Handlers only mutate shared input
    /// state (plus the pause toggle); the next tick reads it.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                let command = self.world.resource::<Bindings>().command(key);
                self.world.resource_mut::<InputState>().press(key);
                if let Some(GameCommand::TogglePause) = command {
                    let mut status = self.world.resource_mut::<SessionStatus>();
                    *status = match *status {
                        SessionStatus::Running => SessionStatus::Paused,
                        SessionStatus::Paused => SessionStatus::Running,
                        // Terminal states only leave via a fresh session.
                        finished => finished,
                    };
                }
            }
            InputEvent::KeyUp(key) => {
                self.world.resource_mut::<InputState>().release(key);
            }
            InputEvent::PointerDown { id, pos } => {
                self.world.resource_mut::<InputState>().joystick.pointer_down(id, pos);
            }
            InputEvent::PointerMove { id, pos } => {
                self.world.resource_mut::<InputState>().joystick.pointer_move(id, pos);
            }
            InputEvent::PointerUp { id } | InputEvent::PointerCancel { id } => {
                self.world.resource_mut::<InputState>().joystick.pointer_up(id);
            }
            InputEvent::Wheel { delta_y } => {
                if delta_y != 0.0 {
                    let step = if delta_y > 0.0 { 1 } else { -1 };
                    self.world.resource_mut::<InputState>().wheel_steps += step;
                }
            }
            InputEvent::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                // The host may fire this before layout settles.
                if width <= 0.0 || height <= 0.0 {
                    tracing::debug!(width, height, "ignoring degenerate resize");
                    return;
                }
                self.world
                    .insert_resource(Surface::with_dpr(Vec2::new(width, height), device_pixel_ratio));
            }
        }
    }

    /// Advances one frame.
    ///
    /// The delta is clamped to [`MAX_FRAME_DT`]. Updates only run while the
    /// session is `Running`; rendering always runs, so pause and terminal
    /// banners stay visible.
    pub fn tick(&mut self, dt_seconds: f32) {
        let dt = dt_seconds.clamp(0.0, MAX_FRAME_DT);
        self.world.insert_resource(DeltaTime(dt));

        if self.world.resource::<SessionStatus>().is_running() {
            self.update.run(&mut self.world);
        }
        self.render.run(&mut self.world);

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();
    }

    /// The draw list produced by the most recent [`Game::tick`].
    pub fn frame(&self) -> &[DrawCommand] {
        &self.world.resource::<FramePlan>().commands
    }

    pub fn status(&self) -> SessionStatus {
        *self.world.resource::<SessionStatus>()
    }

    pub fn mode(&self) -> GameMode {
        *self.world.resource::<GameMode>()
    }
}

/// Drains the frame's error channel into the log; nothing here is fatal to
/// the host page.
fn error_log_system(mut errors: EventReader<GameError>) {
    for error in errors.read() {
        tracing::error!(%error, "frame error");
    }
}

fn spawn_hazards(world: &mut World, level: &Level) {
    for hazard in &level.hazards {
        match hazard {
            HazardSpec::Oscillator {
                tile,
                left,
                right,
                speed,
            } => {
                world.spawn(OscillatorBundle {
                    position: Position(Level::tile_origin(*tile)),
                    size: BodySize(runner::ENEMY_SIZE),
                    patrol: Patrol::Oscillate {
                        left: *left as f32 * TILE_SIZE,
                        right: *right as f32 * TILE_SIZE,
                        speed: *speed,
                        dir: 1.0,
                    },
                    contact: HazardContact,
                });
            }
            HazardSpec::Sentry {
                path,
                speed,
                fov,
                arc,
            } => {
                world.spawn(SentryBundle {
                    position: Position(path[0]),
                    patrol: Patrol::Waypoints {
                        path: path.clone(),
                        target: 1 % path.len(),
                        speed: *speed,
                    },
                    cone: VisionCone {
                        radius: *fov,
                        half_angle: *arc,
                    },
                    heading: Heading(Vec2::X),
                });
            }
        }
    }
}

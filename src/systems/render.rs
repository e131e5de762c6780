//! Frame rendering.
//!
//! Rendering is a pure function of current state: each frame the two pass
//! systems rebuild the [`FramePlan`], an ordered list of screen-space
//! [`DrawCommand`]s in logical pixels. The host replays the list onto its
//! 2D surface (scaling by device pixel ratio); nothing here mutates game
//! state.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::constants::{studio, STAR_COUNT, TILE_SIZE};
use crate::level::{Level, Rect};
use crate::systems::camera::Camera;
use crate::systems::components::{
    BodySize, CollectedCount, Facing, GameMode, HazardContact, Heading, Health, Meters, Outcome,
    PlayerControlled, Position, SessionStatus, Surface, VisionCone,
};
use crate::systems::particles::ParticlePool;

/// An RGB color with a separate alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

const BACKDROP_TOP: Color = Color::rgba(255, 255, 255, 0.05);
const BACKDROP_BOTTOM: Color = Color::rgba(255, 255, 255, 0.0);
const STAR: Color = Color::rgba(255, 255, 255, 0.25);
const TILE_FILL: Color = Color::rgba(255, 255, 255, 0.08);
const TILE_STROKE: Color = Color::rgba(255, 255, 255, 0.2);
const ZONE_FILL: Color = Color::rgba(255, 80, 80, 0.12);
const ZONE_STROKE: Color = Color::rgba(255, 80, 80, 0.3);
const CONE_FILL: Color = Color::rgba(255, 80, 80, 0.08);
const HAZARD: Color = Color::rgb(255, 85, 85);
const COLLECTIBLE: Color = Color::rgb(255, 210, 77);
const BATTERY: Color = Color::rgb(143, 227, 136);
const CHECKPOINT: Color = Color::rgba(100, 200, 255, 0.7);
const FINISH: Color = Color::rgba(140, 255, 140, 0.9);
const PLAYER: Color = Color::rgb(243, 243, 242);
const PLAYER_OUTLINE: Color = Color::rgba(0, 0, 0, 0.45);
const MIC_BOOM: Color = Color::rgba(255, 255, 255, 0.5);
const HUD_TEXT: Color = Color::rgba(255, 255, 255, 0.85);
const BANNER_BG: Color = Color::rgba(0, 0, 0, 0.35);
const BANNER_TEXT: Color = Color::rgb(255, 255, 255);

const HUD_FONT: f32 = 12.0;
const BANNER_FONT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One screen-space drawing primitive, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    /// Vertical gradient fill.
    GradientV { rect: Rect, top: Color, bottom: Color },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Color },
    /// A filled circle sector (vision cone), angles in radians.
    FillSector {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// The frame's ordered draw list, rebuilt every frame.
#[derive(Resource, Debug, Default)]
pub struct FramePlan {
    pub commands: Vec<DrawCommand>,
}

/// World-to-screen mapping for the frame being drawn.
#[derive(Clone, Copy)]
struct View {
    cam: Vec2,
    zoom: f32,
}

impl View {
    fn point(&self, world: Vec2) -> Vec2 {
        (world - self.cam) * self.zoom
    }

    fn len(&self, world: f32) -> f32 {
        world * self.zoom
    }

    fn rect(&self, origin: Vec2, size: Vec2) -> Rect {
        let p = self.point(origin);
        Rect::new(p.x, p.y, self.len(size.x), self.len(size.y))
    }
}

fn push_backdrop(plan: &mut FramePlan, view: &View, surface: &Surface, world: Vec2) {
    plan.commands.push(DrawCommand::Clear);
    plan.commands.push(DrawCommand::GradientV {
        rect: Rect::new(0.0, 0.0, surface.size.x, surface.size.y),
        top: BACKDROP_TOP,
        bottom: BACKDROP_BOTTOM,
    });

    // Slow parallax star field.
    let w = world.x as u32;
    let h = world.y as u32;
    for i in 0..STAR_COUNT {
        let star = Vec2::new(((i * 173) % w) as f32, ((i * 97) % h) as f32);
        let p = (star - view.cam * 0.3) * view.zoom;
        plan.commands.push(DrawCommand::FillRect {
            rect: Rect::new(p.x, p.y, 2.0 * view.zoom, 2.0 * view.zoom),
            color: STAR,
        });
    }
}

fn push_tiles(plan: &mut FramePlan, view: &View, surface: &Surface, level: &Level) {
    let view_size = surface.size / view.zoom;
    let x0 = (view.cam.x / TILE_SIZE).floor().max(0.0) as u32;
    let y0 = (view.cam.y / TILE_SIZE).floor().max(0.0) as u32;
    let x1 = (((view.cam.x + view_size.x) / TILE_SIZE).ceil() as u32 + 1).min(level.width());
    let y1 = (((view.cam.y + view_size.y) / TILE_SIZE).ceil() as u32 + 1).min(level.height());

    for y in y0..y1 {
        for x in x0..x1 {
            if !level.is_solid_tile(glam::UVec2::new(x, y)) {
                continue;
            }
            let rect = view.rect(
                Vec2::new(x as f32, y as f32) * TILE_SIZE,
                Vec2::splat(TILE_SIZE),
            );
            plan.commands.push(DrawCommand::FillRect {
                rect,
                color: TILE_FILL,
            });
            plan.commands.push(DrawCommand::StrokeRect {
                rect,
                color: TILE_STROKE,
                width: 1.0,
            });
        }
    }
}

/// Builds the world pass: backdrop, level geometry, entities, particles.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn render_world_system(
    mut plan: ResMut<FramePlan>,
    camera: Res<Camera>,
    surface: Res<Surface>,
    level: Res<Level>,
    mode: Res<GameMode>,
    pool: Res<ParticlePool>,
    players: Query<(&Position, &BodySize, &Facing), With<PlayerControlled>>,
    oscillators: Query<(&Position, &BodySize), (With<HazardContact>, Without<PlayerControlled>)>,
    sentries: Query<(&Position, &VisionCone, &Heading), Without<PlayerControlled>>,
) {
    plan.commands.clear();
    let view = View {
        cam: camera.pos,
        zoom: camera.zoom,
    };

    push_backdrop(&mut plan, &view, &surface, level.pixel_size());

    for zone in &level.noise_zones {
        let rect = view.rect(Vec2::new(zone.x, zone.y), Vec2::new(zone.w, zone.h));
        plan.commands.push(DrawCommand::FillRect {
            rect,
            color: ZONE_FILL,
        });
        plan.commands.push(DrawCommand::StrokeRect {
            rect,
            color: ZONE_STROKE,
            width: 1.0,
        });
    }

    push_tiles(&mut plan, &view, &surface, &level);

    let collectible_radius = match *mode {
        GameMode::Runner => 10.0,
        GameMode::Studio => 9.0,
    };
    for tile in level.collectibles() {
        plan.commands.push(DrawCommand::FillCircle {
            center: view.point(Level::tile_center(*tile)),
            radius: view.len(collectible_radius),
            color: COLLECTIBLE,
        });
    }

    for tile in level.batteries() {
        let center = Level::tile_center(*tile);
        plan.commands.push(DrawCommand::FillRect {
            rect: view.rect(center - Vec2::new(8.0, 5.0), Vec2::new(16.0, 10.0)),
            color: BATTERY,
        });
    }

    for (pos, cone, heading) in sentries.iter() {
        let angle = heading.0.y.atan2(heading.0.x);
        plan.commands.push(DrawCommand::FillSector {
            center: view.point(pos.0),
            radius: view.len(cone.radius),
            start: angle - cone.half_angle,
            end: angle + cone.half_angle,
            color: CONE_FILL,
        });
        plan.commands.push(DrawCommand::FillRect {
            rect: view.rect(
                pos.0 - Vec2::splat(studio::GUARD_SIZE / 2.0),
                Vec2::splat(studio::GUARD_SIZE),
            ),
            color: HAZARD,
        });
    }

    for (pos, size) in oscillators.iter() {
        plan.commands.push(DrawCommand::FillRect {
            rect: view.rect(pos.0, Vec2::splat(size.0)),
            color: HAZARD,
        });
    }

    for tile in &level.checkpoints {
        plan.commands.push(DrawCommand::StrokeRect {
            rect: view.rect(
                Level::tile_origin(*tile) + Vec2::splat(16.0),
                Vec2::splat(TILE_SIZE - 32.0),
            ),
            color: CHECKPOINT,
            width: 1.0,
        });
    }

    plan.commands.push(DrawCommand::StrokeRect {
        rect: view.rect(
            Level::tile_origin(level.finish) + Vec2::splat(8.0),
            Vec2::splat(TILE_SIZE - 16.0),
        ),
        color: FINISH,
        width: 3.0,
    });

    for (pos, size, facing) in players.iter() {
        plan.commands.push(DrawCommand::FillRect {
            rect: view.rect(pos.0, Vec2::splat(size.0)),
            color: PLAYER,
        });
        if *mode == GameMode::Studio {
            // Microphone boom, flipped with the facing direction.
            let x = match facing {
                Facing::Right => 10.0,
                Facing::Left => size.0 - 32.0,
            };
            plan.commands.push(DrawCommand::FillRect {
                rect: view.rect(pos.0 + Vec2::new(x, -8.0), Vec2::new(22.0, 6.0)),
                color: MIC_BOOM,
            });
        }
        plan.commands.push(DrawCommand::StrokeRect {
            rect: view.rect(pos.0 + Vec2::ONE, Vec2::splat(size.0 - 2.0)),
            color: PLAYER_OUTLINE,
            width: 1.0,
        });
    }

    for particle in &pool.particles {
        plan.commands.push(DrawCommand::FillRect {
            rect: view.rect(particle.pos, Vec2::splat(3.0)),
            color: particle.color.with_alpha(particle.life.min(1.0)),
        });
    }
}

fn push_banner(plan: &mut FramePlan, surface: &Surface, text: String) {
    let (w, h) = (surface.size.x, surface.size.y);
    plan.commands.push(DrawCommand::FillRect {
        rect: Rect::new(0.0, h / 2.0 - 30.0, w, 60.0),
        color: BANNER_BG,
    });
    plan.commands.push(DrawCommand::Text {
        pos: Vec2::new(w / 2.0, h / 2.0 + 7.0),
        text,
        size: BANNER_FONT,
        color: BANNER_TEXT,
        align: TextAlign::Center,
    });
}

/// Builds the HUD pass: meter readouts and state banners on top of the world.
pub fn render_hud_system(
    mut plan: ResMut<FramePlan>,
    surface: Res<Surface>,
    camera: Res<Camera>,
    mode: Res<GameMode>,
    status: Res<SessionStatus>,
    count: Res<CollectedCount>,
    meters: Option<Res<Meters>>,
    players: Query<&Health, With<PlayerControlled>>,
) {
    let line = |plan: &mut FramePlan, index: usize, text: String| {
        plan.commands.push(DrawCommand::Text {
            pos: Vec2::new(12.0, 18.0 + index as f32 * 16.0),
            text,
            size: HUD_FONT,
            color: HUD_TEXT,
            align: TextAlign::Left,
        });
    };

    match *mode {
        GameMode::Runner => {
            line(&mut plan, 0, format!("Coins: {}/{}", count.collected, count.total));
            if let Ok(health) = players.single() {
                line(&mut plan, 1, format!("HP: {}", health.current));
            }
            line(&mut plan, 2, format!("Zoom: {:.2}", camera.zoom));
        }
        GameMode::Studio => {
            line(&mut plan, 0, format!("Shots: {}/{}", count.collected, count.total));
            if let Some(meters) = meters.as_deref() {
                line(&mut plan, 1, format!("Battery: {}%", meters.battery.round()));
                line(&mut plan, 2, format!("Noise: {}%", meters.noise.round()));
            }
        }
    }

    match *status {
        SessionStatus::Paused => push_banner(&mut plan, &surface, "PAUSED".to_string()),
        SessionStatus::Finished { outcome, score } => {
            let text = match (*mode, outcome) {
                (GameMode::Runner, _) => "FINISH!".to_string(),
                (GameMode::Studio, Outcome::Won) => {
                    format!("That's a wrap! Score: {score}")
                }
                (GameMode::Studio, Outcome::Lost(_)) => {
                    format!("Cut! Retake. Score: {score}")
                }
            };
            push_banner(&mut plan, &surface, text);
        }
        SessionStatus::Running => {}
    }
}

#![allow(dead_code)]

use backlot::game::{Game, GameMode};
use backlot::input::{InputEvent, Key};
use backlot::level::parser::LevelBuilder;
use backlot::level::Level;
use backlot::systems::{PlayerControlled, Position, Velocity};
use glam::Vec2;

/// Fixed simulation step used across the integration tests.
pub const DT: f32 = 1.0 / 60.0;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("backlot=debug")
        .try_init();
}

pub fn runner_game(level: Level) -> Game {
    Game::with_level(GameMode::Runner, level, Some(7)).expect("runner session")
}

pub fn studio_game(level: Level) -> Game {
    Game::with_level(GameMode::Studio, level, Some(7)).expect("studio session")
}

pub fn build_level(board: &[&str]) -> Level {
    LevelBuilder::from_board(board).build().expect("test level")
}

pub fn tick_n(game: &mut Game, frames: usize) {
    for _ in 0..frames {
        game.tick(DT);
    }
}

pub fn key_down(game: &mut Game, key: Key) {
    game.handle_event(InputEvent::KeyDown(key));
}

pub fn key_up(game: &mut Game, key: Key) {
    game.handle_event(InputEvent::KeyUp(key));
}

pub fn player_pos(game: &mut Game) -> Vec2 {
    let mut query = game
        .world
        .query_filtered::<&Position, bevy_ecs::prelude::With<PlayerControlled>>();
    query.single(&game.world).expect("player").0
}

pub fn set_player_pos(game: &mut Game, pos: Vec2) {
    let mut query = game
        .world
        .query_filtered::<&mut Position, bevy_ecs::prelude::With<PlayerControlled>>();
    query.single_mut(&mut game.world).expect("player").0 = pos;
}

pub fn set_player_vel(game: &mut Game, vel: Vec2) {
    let mut query = game
        .world
        .query_filtered::<&mut Velocity, bevy_ecs::prelude::With<PlayerControlled>>();
    query.single_mut(&mut game.world).expect("player").0 = vel;
}

/// Corner probes of a square hit-box, mirroring the resolver's sampling.
pub fn box_corners(pos: Vec2, size: f32) -> [Vec2; 4] {
    [
        Vec2::new(pos.x, pos.y),
        Vec2::new(pos.x + size - 1.0, pos.y),
        Vec2::new(pos.x, pos.y + size - 1.0),
        Vec2::new(pos.x + size - 1.0, pos.y + size - 1.0),
    ]
}

pub fn assert_clear_of_solids(level: &Level, pos: Vec2, size: f32) {
    for corner in box_corners(pos, size) {
        assert!(
            !level.is_solid(corner),
            "hit-box corner {corner:?} of body at {pos:?} is inside a solid tile"
        );
    }
}

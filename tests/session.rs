use backlot::input::Key;
use backlot::level::parser::LevelBuilder;
use backlot::level::Level;
use backlot::systems::{
    CollectedCount, LossCause, Meters, Outcome, ScoringTuning, SessionStatus,
};
use glam::{UVec2, Vec2};
use pretty_assertions::assert_eq;

mod common;
use common::*;

fn coin_run() -> Level {
    LevelBuilder::from_board(&[
        "........",
        "P.c.c..F",
        "########",
    ])
    .build()
    .unwrap()
}

fn studio_stage() -> Level {
    LevelBuilder::from_board(&[
        "........",
        "P.c.c..F",
        "........",
    ])
    .build()
    .unwrap()
}

fn teleport_to_tile(game: &mut backlot::game::Game, tile: (u32, u32)) {
    set_player_pos(
        &mut *game,
        Level::tile_origin(UVec2::new(tile.0, tile.1)) + Vec2::splat(8.0),
    );
    game.tick(DT);
}

#[test]
fn test_collectible_count_is_monotonic_and_drains() {
    init_tracing();
    let mut game = runner_game(coin_run());
    let remaining = |game: &backlot::game::Game| {
        game.world.resource::<Level>().collectibles_remaining()
    };

    assert_eq!(remaining(&game), 2);
    let mut last = remaining(&game);

    for tile in [(1u32, 1u32), (2, 1), (2, 1), (4, 1), (4, 1)] {
        teleport_to_tile(&mut game, tile);
        let now = remaining(&game);
        assert!(now <= last, "collectible count increased");
        last = now;
    }

    assert_eq!(remaining(&game), 0);
    let count = *game.world.resource::<CollectedCount>();
    assert_eq!((count.collected, count.total), (2, 2));
}

#[test]
fn test_runner_win_requires_empty_set_and_finish_tile() {
    let mut game = runner_game(coin_run());

    // Standing on the finish with coins left is not a win.
    teleport_to_tile(&mut game, (7, 1));
    assert_eq!(game.status(), SessionStatus::Running);

    teleport_to_tile(&mut game, (2, 1));
    teleport_to_tile(&mut game, (4, 1));
    assert_eq!(game.status(), SessionStatus::Running);

    teleport_to_tile(&mut game, (7, 1));
    match game.status() {
        SessionStatus::Finished { outcome, score } => {
            assert_eq!(outcome, Outcome::Won);
            assert_eq!(score, 200);
        }
        other => panic!("expected a win, got {other:?}"),
    }
}

#[test]
fn test_finished_session_is_frozen() {
    let mut game = runner_game(coin_run());
    teleport_to_tile(&mut game, (2, 1));
    teleport_to_tile(&mut game, (4, 1));
    teleport_to_tile(&mut game, (7, 1));
    assert!(game.status().is_terminal());

    let frozen_at = player_pos(&mut game);
    key_down(&mut game, Key::ArrowLeft);
    tick_n(&mut game, 30);

    assert_eq!(player_pos(&mut game), frozen_at);
    assert!(game.status().is_terminal());
}

#[test]
fn test_pause_gates_updates_without_resetting() {
    let mut game = runner_game(coin_run());
    teleport_to_tile(&mut game, (2, 1));
    let collected = game.world.resource::<CollectedCount>().collected;
    assert_eq!(collected, 1);

    key_down(&mut game, Key::KeyP);
    assert_eq!(game.status(), SessionStatus::Paused);

    let paused_at = player_pos(&mut game);
    key_down(&mut game, Key::ArrowRight);
    tick_n(&mut game, 30);
    assert_eq!(player_pos(&mut game), paused_at);
    assert_eq!(game.world.resource::<CollectedCount>().collected, 1);

    key_down(&mut game, Key::KeyP);
    assert_eq!(game.status(), SessionStatus::Running);
    tick_n(&mut game, 30);
    assert_ne!(player_pos(&mut game), paused_at);
}

#[test]
fn test_studio_battery_loss() {
    let mut game = studio_game(studio_stage());
    game.world.resource_mut::<Meters>().battery = 0.05;

    tick_n(&mut game, 30);
    match game.status() {
        SessionStatus::Finished { outcome, .. } => {
            assert_eq!(outcome, Outcome::Lost(LossCause::BatteryDrained));
        }
        other => panic!("expected battery loss, got {other:?}"),
    }
}

#[test]
fn test_studio_noise_loss() {
    let mut game = studio_game(studio_stage());
    game.world.resource_mut::<Meters>().noise = 100.0;

    game.tick(DT);
    match game.status() {
        SessionStatus::Finished { outcome, .. } => {
            assert_eq!(outcome, Outcome::Lost(LossCause::Detected));
        }
        other => panic!("expected noise loss, got {other:?}"),
    }
}

#[test]
fn test_studio_win_score_formula() {
    let mut game = studio_game(studio_stage());
    teleport_to_tile(&mut game, (2, 1));
    assert_eq!(game.status(), SessionStatus::Running);
    teleport_to_tile(&mut game, (4, 1));

    let SessionStatus::Finished { outcome, score } = game.status() else {
        panic!("expected a finished session");
    };
    assert_eq!(outcome, Outcome::Won);

    let meters = *game.world.resource::<Meters>();
    let scoring = *game.world.resource::<ScoringTuning>();
    let expected = 2 * scoring.collectible_weight
        + meters.battery.round() as i32 * scoring.battery_weight
        - meters.noise.round() as i32 * scoring.noise_weight;
    assert_eq!(score, expected);
}

#[test]
fn test_loss_takes_precedence_over_win() {
    let mut game = studio_game(studio_stage());
    teleport_to_tile(&mut game, (2, 1));

    // Collecting the last shot on the same frame the battery dies still
    // counts as a failed take.
    game.world.resource_mut::<Meters>().battery = 0.01;
    teleport_to_tile(&mut game, (4, 1));
    assert_eq!(
        game.world.resource::<Level>().collectibles_remaining(),
        0
    );
    match game.status() {
        SessionStatus::Finished { outcome, .. } => {
            assert_eq!(outcome, Outcome::Lost(LossCause::BatteryDrained));
        }
        other => panic!("expected a loss, got {other:?}"),
    }
}

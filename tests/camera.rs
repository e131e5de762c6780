use backlot::input::InputEvent;
use backlot::level::parser::LevelBuilder;
use backlot::level::{library, Level};
use backlot::systems::{Camera, Surface};
use glam::Vec2;
use speculoos::prelude::*;

mod common;
use common::*;

fn camera(game: &backlot::game::Game) -> Camera {
    *game.world.resource::<Camera>()
}

#[test]
fn test_camera_stays_clamped_while_following() {
    let mut game = runner_game(library::runner_level().unwrap());
    let world = game.world.resource::<Level>().pixel_size();

    // Park the player in the far corner and let the camera chase.
    set_player_pos(&mut game, world - Vec2::splat(64.0));
    for _ in 0..300 {
        game.tick(DT);
        set_player_pos(&mut game, world - Vec2::splat(64.0));

        let cam = camera(&game);
        let surface = *game.world.resource::<Surface>();
        let max = (world - cam.viewport(&surface)).max(Vec2::ZERO);
        assert!(cam.pos.x >= 0.0 && cam.pos.x <= max.x + 0.001, "{:?}", cam.pos);
        assert!(cam.pos.y >= 0.0 && cam.pos.y <= max.y + 0.001, "{:?}", cam.pos);
    }

    // After chasing for five seconds the camera has reached the clamp.
    let cam = camera(&game);
    let surface = *game.world.resource::<Surface>();
    let max = (world - cam.viewport(&surface)).max(Vec2::ZERO);
    assert_that!(cam.pos.x).is_close_to(max.x, 1.0);
    assert_that!(cam.pos.y).is_close_to(max.y, 1.0);
}

#[test]
fn test_camera_clamps_to_zero_when_world_smaller_than_viewport() {
    // A 4x3-tile world is far smaller than the 1200x675 default surface.
    let level = LevelBuilder::from_board(&["P.c.", "....", "...F"])
        .build()
        .unwrap();
    let mut game = studio_game(level);

    tick_n(&mut game, 120);
    assert_eq!(camera(&game).pos, Vec2::ZERO);
}

#[test]
fn test_wheel_zoom_steps_and_clamps() {
    let mut game = runner_game(library::runner_level().unwrap());

    for _ in 0..3 {
        game.handle_event(InputEvent::Wheel { delta_y: 120.0 });
    }
    game.tick(DT);
    assert_that!(camera(&game).zoom).is_close_to(1.1f32.powi(3), 1e-4);

    // Way past the top of the range: clamps at 2.0.
    for _ in 0..30 {
        game.handle_event(InputEvent::Wheel { delta_y: 120.0 });
    }
    game.tick(DT);
    assert_that!(camera(&game).zoom).is_close_to(2.0, 1e-4);

    // And at the bottom of the runner range.
    for _ in 0..40 {
        game.handle_event(InputEvent::Wheel { delta_y: -120.0 });
    }
    game.tick(DT);
    assert_that!(camera(&game).zoom).is_close_to(0.6, 1e-4);
}

#[test]
fn test_resize_updates_surface_and_clamps_dpr() {
    let mut game = runner_game(library::runner_level().unwrap());

    game.handle_event(InputEvent::Resize {
        width: 800.0,
        height: 450.0,
        device_pixel_ratio: 3.0,
    });
    let surface = *game.world.resource::<Surface>();
    assert_eq!(surface.size, Vec2::new(800.0, 450.0));
    assert_eq!(surface.dpr, 2.0);

    // Degenerate layout races are ignored.
    game.handle_event(InputEvent::Resize {
        width: 0.0,
        height: 0.0,
        device_pixel_ratio: 1.0,
    });
    let surface = *game.world.resource::<Surface>();
    assert_eq!(surface.size, Vec2::new(800.0, 450.0));
}

//! Backlot game library crate.
//!
//! The engineered core behind the studio site's easter-egg pages: a
//! tile-world arcade engine instantiated as a platformer ([`game::GameMode::Runner`])
//! and a stealth collect-'em-up ([`game::GameMode::Studio`]), plus the
//! choice-driven shoot [`planner`].
//!
//! The host owns the drawing surface and the frame callback; it feeds raw
//! [`input::InputEvent`]s into a [`game::Game`], calls [`game::Game::tick`]
//! once per animation frame, and interprets the resulting
//! [`systems::render::DrawCommand`] list.

pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod input;
pub mod level;
pub mod persistence;
pub mod planner;
pub mod systems;

//! Input aggregation.
//!
//! The host forwards raw [`InputEvent`]s into [`crate::game::Game::handle_event`];
//! handlers mutate the shared [`InputState`] between frames, and
//! [`intent_system`] folds it into a single per-frame [`Intent`] at the top
//! of each update. Held keys are a set, so opposite keys cancel; keyboard
//! and joystick axes combine by addition and are left unclamped.

use std::collections::{HashMap, HashSet};

use bevy_ecs::prelude::*;
use bitflags::bitflags;
use glam::Vec2;

use crate::constants::{JOYSTICK_RADIUS, JUMP_AXIS_THRESHOLD};
use crate::events::GameCommand;

/// Keys the engine cares about. The host maps its own keyboard events onto
/// these; anything else should not be forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    /// Attack (platformer).
    KeyZ,
    /// Dash (platformer).
    KeyX,
    /// Boost (stealth).
    Space,
    /// Pause toggle.
    KeyP,
}

/// A movement direction a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

bitflags! {
    /// Discrete action flags carried by the per-frame intent.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ActionFlags: u8 {
        const JUMP = 1 << 0;
        const ATTACK = 1 << 1;
        const DASH = 1 << 2;
        const BOOST = 1 << 3;
    }
}

/// Raw input events as delivered by the host page.
///
/// Pointer positions are relative to the virtual joystick's host element;
/// resize dimensions are the logical (CSS) size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { id: u32, pos: Vec2 },
    PointerMove { id: u32, pos: Vec2 },
    PointerUp { id: u32 },
    PointerCancel { id: u32 },
    Wheel { delta_y: f32 },
    Resize { width: f32, height: f32, device_pixel_ratio: f32 },
}

/// Key-to-meaning tables.
#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    movement: HashMap<Key, MoveDir>,
    actions: HashMap<Key, ActionFlags>,
    commands: HashMap<Key, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut movement = HashMap::new();
        movement.insert(Key::ArrowUp, MoveDir::Up);
        movement.insert(Key::KeyW, MoveDir::Up);
        movement.insert(Key::ArrowDown, MoveDir::Down);
        movement.insert(Key::KeyS, MoveDir::Down);
        movement.insert(Key::ArrowLeft, MoveDir::Left);
        movement.insert(Key::KeyA, MoveDir::Left);
        movement.insert(Key::ArrowRight, MoveDir::Right);
        movement.insert(Key::KeyD, MoveDir::Right);

        let mut actions = HashMap::new();
        actions.insert(Key::KeyZ, ActionFlags::ATTACK);
        actions.insert(Key::KeyX, ActionFlags::DASH);
        actions.insert(Key::Space, ActionFlags::BOOST);

        let mut commands = HashMap::new();
        commands.insert(Key::KeyP, GameCommand::TogglePause);

        Self {
            movement,
            actions,
            commands,
        }
    }
}

impl Bindings {
    pub fn direction(&self, key: Key) -> Option<MoveDir> {
        self.movement.get(&key).copied()
    }

    pub fn action(&self, key: Key) -> Option<ActionFlags> {
        self.actions.get(&key).copied()
    }

    pub fn command(&self, key: Key) -> Option<GameCommand> {
        self.commands.get(&key).copied()
    }
}

/// Virtual joystick state.
///
/// A drag session starts on pointer-down, captures that pointer id, and ends
/// on pointer-up or pointer-cancel for the captured id — wherever the pointer
/// has moved in between. Releasing always resets the vector to exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Joystick {
    radius: f32,
    captured: Option<u32>,
    origin: Vec2,
    vector: Vec2,
}

impl Default for Joystick {
    fn default() -> Self {
        Self {
            radius: JOYSTICK_RADIUS,
            captured: None,
            origin: Vec2::ZERO,
            vector: Vec2::ZERO,
        }
    }
}

impl Joystick {
    pub fn pointer_down(&mut self, id: u32, pos: Vec2) {
        // Only one drag session at a time; later pointers are ignored.
        if self.captured.is_some() {
            return;
        }
        self.captured = Some(id);
        self.origin = pos;
        self.vector = Vec2::ZERO;
    }

    pub fn pointer_move(&mut self, id: u32, pos: Vec2) {
        if self.captured != Some(id) {
            return;
        }
        let delta = pos - self.origin;
        let len = delta.length();
        if len == 0.0 {
            self.vector = Vec2::ZERO;
        } else {
            let magnitude = (len / self.radius).min(1.0);
            self.vector = delta / len * magnitude;
        }
    }

    pub fn pointer_up(&mut self, id: u32) {
        if self.captured != Some(id) {
            return;
        }
        self.captured = None;
        self.vector = Vec2::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.captured.is_some()
    }

    pub fn vector(&self) -> Vec2 {
        self.vector
    }
}

/// Shared mutable input state written by event handlers and read once per
/// frame by [`intent_system`].
#[derive(Debug, Clone, Default, Resource)]
pub struct InputState {
    keys: HashSet<Key>,
    pub joystick: Joystick,
    /// Signed wheel steps accumulated since the camera last consumed them.
    pub wheel_steps: i32,
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn direction_held(&self, bindings: &Bindings, dir: MoveDir) -> bool {
        self.keys.iter().any(|&k| bindings.direction(k) == Some(dir))
    }
}

/// The per-frame movement/action intent, recomputed once per update.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct Intent {
    /// Combined keyboard + joystick axis, roughly [-1, 1] per axis but
    /// unclamped (callers clamp downstream where it matters).
    pub axis: Vec2,
    pub actions: ActionFlags,
}

/// Folds the held-key set and the joystick vector into the frame's [`Intent`].
pub fn intent_system(input: Res<InputState>, bindings: Res<Bindings>, mut intent: ResMut<Intent>) {
    let right = input.direction_held(&bindings, MoveDir::Right);
    let left = input.direction_held(&bindings, MoveDir::Left);
    let up = input.direction_held(&bindings, MoveDir::Up);
    let down = input.direction_held(&bindings, MoveDir::Down);

    let keyboard = Vec2::new(
        (right as i32 - left as i32) as f32,
        (down as i32 - up as i32) as f32,
    );
    let axis = keyboard + input.joystick.vector();

    let mut actions = ActionFlags::empty();
    for &key in input.keys.iter() {
        if let Some(flags) = bindings.action(key) {
            actions |= flags;
        }
    }
    if axis.y < -JUMP_AXIS_THRESHOLD {
        actions |= ActionFlags::JUMP;
    }

    *intent = Intent { axis, actions };
}

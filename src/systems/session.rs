//! Session rules: meter upkeep and terminal-condition evaluation.

use bevy_ecs::prelude::*;

use crate::error::GameError;
use crate::level::Level;
use crate::systems::components::{
    BodySize, CollectedCount, DeltaTime, GameMode, LossCause, Meters, MeterTuning, Outcome,
    PlayerControlled, Position, ScoringTuning, SessionStatus,
};

/// Passive stealth upkeep: the battery drains over time.
pub fn meters_system(dt: Res<DeltaTime>, tuning: Res<MeterTuning>, mut meters: ResMut<Meters>) {
    meters.battery = (meters.battery - tuning.battery_drain * dt.0).max(0.0);
}

fn terminal_score(
    scoring: &ScoringTuning,
    count: &CollectedCount,
    meters: Option<&Meters>,
) -> i32 {
    let base = count.collected as i32 * scoring.collectible_weight;
    match meters {
        Some(m) => {
            base + m.battery.round().max(0.0) as i32 * scoring.battery_weight
                - m.noise.round().max(0.0) as i32 * scoring.noise_weight
        }
        None => base,
    }
}

/// Evaluates win/lose each frame and freezes the session on a terminal
/// outcome. Loss checks run before the win check so a last-moment meter
/// failure still counts as a failed take.
pub fn session_system(
    mode: Res<GameMode>,
    level: Res<Level>,
    scoring: Res<ScoringTuning>,
    count: Res<CollectedCount>,
    tuning: Option<Res<MeterTuning>>,
    meters: Option<Res<Meters>>,
    mut status: ResMut<SessionStatus>,
    players: Query<(&Position, &BodySize), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    if !status.is_running() {
        return;
    }

    let outcome = match *mode {
        GameMode::Runner => {
            let Ok((pos, size)) = players.single() else {
                return;
            };
            let tile = Level::tile_of(size.center(pos.0));
            let on_finish = tile.x >= 0
                && tile.y >= 0
                && tile.as_uvec2() == level.finish
                && level.collectibles_remaining() == 0;
            on_finish.then_some(Outcome::Won)
        }
        GameMode::Studio => {
            let (Some(meters), Some(tuning)) = (meters.as_deref(), tuning.as_deref()) else {
                errors.write(GameError::InvalidState(
                    "stealth session is missing its meters".to_string(),
                ));
                return;
            };
            if meters.battery <= 0.0 {
                Some(Outcome::Lost(LossCause::BatteryDrained))
            } else if meters.noise >= tuning.noise_max {
                Some(Outcome::Lost(LossCause::Detected))
            } else if level.collectibles_remaining() == 0 {
                Some(Outcome::Won)
            } else {
                None
            }
        }
    };

    if let Some(outcome) = outcome {
        let score = terminal_score(&scoring, &count, meters.as_deref());
        *status = SessionStatus::Finished { outcome, score };
        tracing::info!(?outcome, score, "session finished");
    }
}

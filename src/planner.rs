//! The shoot planner: the lighter, choice-driven "run your own commercial
//! shoot" game.
//!
//! Pure state machine: three stages (pre-production, shoot, post), one
//! choice per stage, plus niche and difficulty modifiers. Random events are
//! an explicit weighted table keyed by stage and applied through the same
//! accumulator as choices, so the totals are always a pure function of
//! (niche, difficulty, choices, recorded rolls).

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::persistence::{load_json, store_json, SaveStore, PLANNER_SAVE_KEY};

/// Chance that an event fires after committing a stage's choice.
pub const EVENT_CHANCE: f32 = 0.25;

/// Product niche; shifts the scoring baseline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Niche {
    Food,
    Beauty,
    #[default]
    Gadgets,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum StageKey {
    Pre,
    Shoot,
    Post,
}

impl StageKey {
    fn index(self) -> usize {
        match self {
            StageKey::Pre => 0,
            StageKey::Shoot => 1,
            StageKey::Post => 2,
        }
    }
}

/// A delta to the three running totals: picture quality, schedule slack,
/// and budget headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Impact {
    pub image: i32,
    pub schedule: i32,
    pub budget: i32,
}

impl Impact {
    pub const fn new(image: i32, schedule: i32, budget: i32) -> Self {
        Self {
            image,
            schedule,
            budget,
        }
    }
}

impl std::ops::Add for Impact {
    type Output = Impact;

    fn add(self, other: Impact) -> Impact {
        Impact {
            image: self.image + other.image,
            schedule: self.schedule + other.schedule,
            budget: self.budget + other.budget,
        }
    }
}

fn signed(n: i32) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image {} · Schedule {} · Budget {}",
            signed(self.image),
            signed(self.schedule),
            signed(self.budget)
        )
    }
}

impl Niche {
    pub fn modifier(self) -> Impact {
        match self {
            // Food loves light and props; beauty shoots run long.
            Niche::Food => Impact::new(1, 0, -1),
            Niche::Beauty => Impact::new(1, -1, 0),
            Niche::Gadgets => Impact::new(0, 0, 0),
        }
    }
}

impl Difficulty {
    pub fn modifier(self) -> Impact {
        match self {
            Difficulty::Easy => Impact::new(0, 1, 1),
            Difficulty::Normal => Impact::new(0, 0, 0),
            Difficulty::Hard => Impact::new(0, -1, -1),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Choice {
    pub id: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
    pub impact: Impact,
}

#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub key: StageKey,
    pub title: &'static str,
    pub choices: [Choice; 3],
}

impl Stage {
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

static STAGES: [Stage; 3] = [
    Stage {
        key: StageKey::Pre,
        title: "Pre-production",
        choices: [
            Choice {
                id: "story",
                title: "Treatment + storyboard",
                blurb: "Tight dramaturgy.",
                impact: Impact::new(2, 1, -1),
            },
            Choice {
                id: "cast",
                title: "Fast casting",
                blurb: "Saves time, risks quality.",
                impact: Impact::new(0, 2, 1),
            },
            Choice {
                id: "loc",
                title: "One versatile location",
                blurb: "Simple and affordable.",
                impact: Impact::new(1, 1, 2),
            },
        ],
    },
    Stage {
        key: StageKey::Shoot,
        title: "Shoot",
        choices: [
            Choice {
                id: "light",
                title: "Heavy lighting",
                blurb: "Depth and texture.",
                impact: Impact::new(3, -1, -2),
            },
            Choice {
                id: "handy",
                title: "Handheld / UGC",
                blurb: "Native feel.",
                impact: Impact::new(1, 1, 2),
            },
            Choice {
                id: "drone",
                title: "Drone / stabilizer",
                blurb: "Cinematic motion.",
                impact: Impact::new(2, 0, -1),
            },
        ],
    },
    Stage {
        key: StageKey::Post,
        title: "Post-production",
        choices: [
            Choice {
                id: "color",
                title: "Dense color grade",
                blurb: "Premium picture.",
                impact: Impact::new(2, -1, -1),
            },
            Choice {
                id: "motion",
                title: "Motion accents",
                blurb: "Spotlights the selling points.",
                impact: Impact::new(2, -1, -1),
            },
            Choice {
                id: "subs",
                title: "6/15/30 cuts + subtitles",
                blurb: "Platform-ready.",
                impact: Impact::new(1, 0, -1),
            },
        ],
    },
];

pub fn stages() -> &'static [Stage; 3] {
    &STAGES
}

/// A random production event. Weights are relative within a stage's pool.
#[derive(Debug, Clone, Copy)]
pub struct EventCard {
    pub id: &'static str,
    pub stage: StageKey,
    pub text: &'static str,
    pub impact: Impact,
    pub weight: u32,
}

static EVENTS: [EventCard; 4] = [
    EventCard {
        id: "battery",
        stage: StageKey::Shoot,
        text: "Drone battery died — resetting the setup",
        impact: Impact::new(0, -1, -1),
        weight: 1,
    },
    EventCard {
        id: "actor",
        stage: StageKey::Shoot,
        text: "The actor was late but nailed the take",
        impact: Impact::new(1, -1, 0),
        weight: 1,
    },
    EventCard {
        id: "client",
        stage: StageKey::Pre,
        text: "The client sent references on time",
        impact: Impact::new(1, 1, 0),
        weight: 1,
    },
    EventCard {
        id: "render",
        stage: StageKey::Post,
        text: "Heavy renders — optimizing the graphics",
        impact: Impact::new(0, -1, 1),
        weight: 1,
    },
];

pub fn events() -> &'static [EventCard] {
    &EVENTS
}

/// The persisted planner state. Everything the totals depend on lives here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlannerState {
    pub niche: Niche,
    pub difficulty: Difficulty,
    /// Index of the stage being decided; `stages().len()` once finished.
    pub step: usize,
    /// Chosen choice id per stage, in stage order.
    pub picks: [Option<String>; 3],
    /// Accumulated impact of every event that has fired.
    pub event_impact: Impact,
    /// Human-readable event log.
    pub log: Vec<String>,
}

/// The final read on a finished plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub title: &'static str,
    pub tip: &'static str,
    /// Niche-specific production note.
    pub note: &'static str,
}

pub struct Planner {
    state: PlannerState,
    rng: SmallRng,
}

impl Planner {
    pub fn new(seed: Option<u64>) -> Self {
        Self::resume(PlannerState::default(), seed)
    }

    pub fn resume(state: PlannerState, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self { state, rng }
    }

    /// Restores saved state from the store, falling back to defaults on
    /// absence or corruption.
    pub fn load(store: &dyn SaveStore, seed: Option<u64>) -> Self {
        Self::resume(
            load_json(store, PLANNER_SAVE_KEY).unwrap_or_default(),
            seed,
        )
    }

    /// Best-effort write of the current state.
    pub fn save(&self, store: &mut dyn SaveStore) {
        store_json(store, PLANNER_SAVE_KEY, &self.state);
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn set_niche(&mut self, niche: Niche) {
        self.state.niche = niche;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.state.difficulty = difficulty;
    }

    pub fn finished(&self) -> bool {
        self.state.step >= STAGES.len()
    }

    pub fn current_stage(&self) -> Option<&'static Stage> {
        STAGES.get(self.state.step)
    }

    /// Toggles a choice for a stage: picking the already-picked id clears
    /// it. Unknown ids are ignored. Returns whether anything changed.
    pub fn choose(&mut self, stage: StageKey, id: &str) -> bool {
        let Some(stage_def) = STAGES.get(stage.index()) else {
            return false;
        };
        if stage_def.choice(id).is_none() {
            return false;
        }
        let slot = &mut self.state.picks[stage.index()];
        *slot = match slot.as_deref() {
            Some(current) if current == id => None,
            _ => Some(id.to_string()),
        };
        true
    }

    pub fn can_advance(&self) -> bool {
        !self.finished() && self.state.picks[self.state.step].is_some()
    }

    /// Commits the current stage's choice and moves on, possibly firing a
    /// random event for that stage. No-op (returning `None`) unless
    /// [`Planner::can_advance`].
    pub fn advance(&mut self) -> Option<&'static EventCard> {
        if !self.can_advance() {
            return None;
        }
        let stage = STAGES[self.state.step].key;
        self.state.step += 1;
        self.roll_event(stage)
    }

    /// Steps back one stage without undoing fired events: their rolls are
    /// part of the record.
    pub fn back(&mut self) {
        self.state.step = self.state.step.saturating_sub(1);
    }

    /// Clears progress, keeping niche and difficulty.
    pub fn reset(&mut self) {
        self.state.step = 0;
        self.state.picks = [None, None, None];
        self.state.event_impact = Impact::default();
        self.state.log.clear();
    }

    fn roll_event(&mut self, stage: StageKey) -> Option<&'static EventCard> {
        if self.rng.random::<f32>() >= EVENT_CHANCE {
            return None;
        }
        let pool: Vec<&'static EventCard> =
            EVENTS.iter().filter(|e| e.stage == stage).collect();
        let total: u32 = pool.iter().map(|e| e.weight).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.rng.random_range(0..total);
        let card = pool
            .iter()
            .find(|e| {
                if roll < e.weight {
                    true
                } else {
                    roll -= e.weight;
                    false
                }
            })
            .copied()?;

        self.state.event_impact = self.state.event_impact + card.impact;
        self.state.log.push(format!("Event: {} ({})", card.text, card.impact));
        tracing::debug!(id = card.id, "production event fired");
        Some(card)
    }

    /// Grand totals: choices + niche and difficulty modifiers + events.
    pub fn totals(&self) -> Impact {
        let mut total =
            self.state.niche.modifier() + self.state.difficulty.modifier() + self.state.event_impact;
        for (stage, pick) in STAGES.iter().zip(self.state.picks.iter()) {
            if let Some(choice) = pick.as_deref().and_then(|id| stage.choice(id)) {
                total = total + choice.impact;
            }
        }
        total
    }

    pub fn verdict(&self) -> Verdict {
        let Impact {
            image,
            schedule,
            budget,
        } = self.totals();

        let mut title = "Solid — ready to ship";
        let mut tip = "Add a couple of motion accents or tighten the grade for a more premium feel.";
        if image >= 7 && schedule >= 1 && budget >= 0 {
            title = "A keeper — the picture sells";
            tip = "Cut 6/15/30 versions and a vertical pack; performance will fly.";
        }
        if image <= 2 || budget < -3 {
            title = "Risk: weak picture or budget overrun";
            tip = "Simplify the scene or push the lighting. Platform cuts and subtitles are a must.";
        }
        if schedule < -2 {
            title = "Deadlines on fire";
            tip = "Cut complex scenes, move some motion work to graphics, add UGC coverage.";
        }

        let note = match self.state.niche {
            Niche::Food => "Food wants close-ups, steam and sauce, slow motion, clean sound texture.",
            Niche::Beauty => "Beauty wants even skin, a specular lighting scheme, macro swatches.",
            Niche::Gadgets => "Gadgets want ports and features up close, 3D cutaways, a clear call to action.",
        };

        Verdict { title, tip, note }
    }
}

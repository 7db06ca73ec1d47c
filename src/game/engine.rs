//! CodeBreaker: the sequence-memory lock game.
//!
//! The player repeats a random sequence of lock buttons before the countdown
//! runs out. The engine is a plain state machine: [`CodeBreaker::start`],
//! [`CodeBreaker::submit`] and [`CodeBreaker::tick`] are the only
//! transitions, and none of them do I/O. Timing lives in `game::timer`.
//!
//! ```text
//! Idle ──start──▶ Playing ──full match──▶ Success ──start──▶ Playing
//!                    │ ▲
//!      mismatch/     │ └──────────start─────────┐
//!      time out      ▼                          │
//!                  Failed ──────────────────────┘
//! ```

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GameError;

/// Number of lock buttons; sequence values are in `0..BUTTON_COUNT`.
pub const BUTTON_COUNT: u8 = 4;

/// Points per cleared sequence, multiplied by the level it was cleared on.
const POINTS_PER_LEVEL: u32 = 10;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Sequence length at level 1.
    pub fn base_length(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Seconds on the clock when a round starts.
    pub fn time_limit(&self) -> u32 {
        match self {
            Difficulty::Easy | Difficulty::Medium => 15,
            Difficulty::Hard => 12,
        }
    }

    /// Length of the sequence generated at `level`.
    pub fn sequence_length(&self, level: u32) -> usize {
        self.base_length() + (level / 2) as usize
    }
}

impl TryFrom<String> for Difficulty {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Playing,
    Success,
    Failed,
}

/// The four lock buttons, in value order.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LockButton {
    Shield,
    Lock,
    Key,
    Zap,
}

impl LockButton {
    pub const ALL: [LockButton; BUTTON_COUNT as usize] =
        [LockButton::Shield, LockButton::Lock, LockButton::Key, LockButton::Zap];
}

/// What a single submitted value did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Correct so far; more values needed.
    Progress,
    Cleared,
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct CodeBreaker {
    difficulty: Difficulty,
    round: u64,
    phase: Phase,
    sequence: Vec<u8>,
    input: Vec<u8>,
    time_left: u32,
    level: u32,
    score: u32,
    hint: Option<String>,
}

impl CodeBreaker {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            round: 0,
            phase: Phase::Idle,
            sequence: Vec::new(),
            input: Vec::new(),
            time_left: 0,
            level: 1,
            score: 0,
            hint: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    /// Incremented by every `start`; lets a countdown tell its round apart
    /// from a later one.
    pub fn round(&self) -> u64 {
        self.round
    }
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }
    pub fn input(&self) -> &[u8] {
        &self.input
    }
    pub fn time_left(&self) -> u32 {
        self.time_left
    }
    pub fn level(&self) -> u32 {
        self.level
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Length the next (or current) round's sequence has at this level.
    pub fn target_length(&self) -> usize {
        self.difficulty.sequence_length(self.level)
    }

    /// Starts a new round. Allowed from any phase; level and score carry over.
    pub fn start<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) {
        self.difficulty = difficulty;
        self.round += 1;
        let len = self.target_length();
        self.sequence = (0..len).map(|_| rng.gen_range(0..BUTTON_COUNT)).collect();
        self.input.clear();
        self.time_left = difficulty.time_limit();
        self.hint = None;
        self.phase = Phase::Playing;
    }

    pub fn submit(&mut self, value: u8) -> Result<Outcome, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::NotPlaying);
        }
        if value >= BUTTON_COUNT {
            return Err(GameError::InvalidButton(value));
        }

        self.input.push(value);
        // Earlier positions were checked on their own submit.
        let pos = self.input.len() - 1;
        if self.sequence.get(pos) != Some(&value) {
            self.phase = Phase::Failed;
            self.hint = Some(format!("The correct sequence was: {}", self.joined_sequence()));
            return Ok(Outcome::Mismatch);
        }

        if self.input.len() == self.sequence.len() {
            self.phase = Phase::Success;
            self.score = self
                .score
                .saturating_add(self.level.saturating_mul(POINTS_PER_LEVEL));
            self.level = self.level.saturating_add(1);
            return Ok(Outcome::Cleared);
        }
        Ok(Outcome::Progress)
    }

    /// One countdown step. Returns whether the round is still being played.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.phase = Phase::Failed;
            self.hint = Some(format!(
                "Time's up! The correct sequence was: {}",
                self.joined_sequence()
            ));
            return false;
        }
        self.time_left -= 1;
        true
    }

    fn joined_sequence(&self) -> String {
        self.sequence
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Success => "success",
            Phase::Failed => "failed",
        };
        f.write_str(s)
    }
}

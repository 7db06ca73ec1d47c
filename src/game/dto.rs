use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::{CodeBreaker, Difficulty, LockButton, Phase, BUTTON_COUNT};

#[derive(Debug, Default, Deserialize)]
pub struct StartGameRequest {
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
pub struct PressRequest {
    pub value: u8,
}

/// Client-facing snapshot of a game. The target sequence stays hidden while
/// a round is being played.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: Uuid,
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub level: u32,
    pub score: u32,
    pub time_left: u32,
    pub target_length: usize,
    pub input: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed: Option<Vec<u8>>,
    pub buttons: [LockButton; BUTTON_COUNT as usize],
}

impl GameView {
    pub fn of(id: Uuid, game: &CodeBreaker) -> Self {
        let revealed = matches!(game.phase(), Phase::Success | Phase::Failed)
            .then(|| game.sequence().to_vec());
        Self {
            id,
            difficulty: game.difficulty(),
            phase: game.phase(),
            level: game.level(),
            score: game.score(),
            time_left: game.time_left(),
            target_length: game.target_length(),
            input: game.input().to_vec(),
            hint: game.hint().map(str::to_string),
            revealed,
            buttons: LockButton::ALL,
        }
    }
}

/// Returned once per round: the state plus the sequence to memorize.
#[derive(Debug, Serialize)]
pub struct StartedGame {
    #[serde(flatten)]
    pub state: GameView,
    pub sequence: Vec<u8>,
}

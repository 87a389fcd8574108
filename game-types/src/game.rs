use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LetterColor {
    Green,  // correct letter in correct position
    Orange, // correct letter in wrong position
    Grey,   // letter not in word (or every occurrence already claimed)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LetterResult {
    pub letter: String,
    pub color: LetterColor,
}

impl LetterResult {
    pub fn new(letter: char, color: LetterColor) -> Self {
        Self {
            letter: letter.to_string(),
            color,
        }
    }
}

/// One submitted guess together with its coloring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRecord {
    pub guess: String,
    pub result: Vec<LetterResult>,
}

impl GuessRecord {
    pub fn is_all_green(&self) -> bool {
        !self.result.is_empty() && self.result.iter().all(|l| l.color == LetterColor::Green)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRequest {
    pub guess: String,
}

/// Response body of a submitted guess.
/// `game_over` and `message` are only present once the round has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessResponse {
    pub guess_history: Vec<GuessRecord>,
    pub guesses_left: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub game_over: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

impl GuessResponse {
    pub fn is_game_over(&self) -> bool {
        self.game_over.unwrap_or(false)
    }
}

/// Response body of starting (or resuming) a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundStarted {
    pub guess_history: Vec<GuessRecord>,
    pub guesses_left: u32,
    pub word_length: u32,
    pub resumed: bool,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    pub date: String, // ISO 8601 date
    pub total_players: u64,
    pub correct_guesses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerReportEntry {
    pub date: String,
    pub words_tried: u32,
    pub correct_guess: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerReport {
    pub username: String,
    pub report: Vec<PlayerReportEntry>,
}

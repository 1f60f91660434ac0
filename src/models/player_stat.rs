use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::common::{double_option, merge};

/// One player's numbers for one match.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerStat {
    pub id: i64,
    pub player_id: i64,
    pub match_id: i64,
    pub goals: i32,
    pub assists: i32,
    pub minutes_played: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub shots: i32,
    pub shots_on_target: i32,
    pub passes: i32,
    pub pass_accuracy: Option<f64>,
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PlayerStatCreate {
    pub player_id: i64,
    pub match_id: i64,
    #[serde(default)]
    pub goals: i32,
    #[serde(default)]
    pub assists: i32,
    #[serde(default)]
    pub minutes_played: i32,
    #[serde(default)]
    pub yellow_cards: i32,
    #[serde(default)]
    pub red_cards: i32,
    #[serde(default)]
    pub shots: i32,
    #[serde(default)]
    pub shots_on_target: i32,
    #[serde(default)]
    pub passes: i32,
    pub pass_accuracy: Option<f64>,
    pub rating: Option<f64>,
}

/// Player and match are fixed once recorded; only the numbers change.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct PlayerStatUpdate {
    pub goals: Option<i32>,
    pub assists: Option<i32>,
    pub minutes_played: Option<i32>,
    pub yellow_cards: Option<i32>,
    pub red_cards: Option<i32>,
    pub shots: Option<i32>,
    pub shots_on_target: Option<i32>,
    pub passes: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub pass_accuracy: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rating: Option<Option<f64>>,
}

impl PlayerStat {
    pub fn merge(&mut self, update: PlayerStatUpdate) {
        merge(&mut self.goals, update.goals);
        merge(&mut self.assists, update.assists);
        merge(&mut self.minutes_played, update.minutes_played);
        merge(&mut self.yellow_cards, update.yellow_cards);
        merge(&mut self.red_cards, update.red_cards);
        merge(&mut self.shots, update.shots);
        merge(&mut self.shots_on_target, update.shots_on_target);
        merge(&mut self.passes, update.passes);
        merge(&mut self.pass_accuracy, update.pass_accuracy);
        merge(&mut self.rating, update.rating);
    }

    /// Checks that hold for a complete stat line, after creation or merge.
    pub fn validate(&self) -> Result<(), String> {
        let counters = [
            self.goals,
            self.assists,
            self.minutes_played,
            self.yellow_cards,
            self.red_cards,
            self.shots,
            self.shots_on_target,
            self.passes,
        ];
        if counters.iter().any(|c| *c < 0) {
            return Err("Counters cannot be negative".to_string());
        }
        if self.shots_on_target > self.shots {
            return Err("Shots on target cannot exceed shots".to_string());
        }
        if matches!(self.pass_accuracy, Some(p) if !(0.0..=100.0).contains(&p)) {
            return Err("Pass accuracy must be a percentage between 0 and 100".to_string());
        }
        if matches!(self.rating, Some(r) if !(0.0..=10.0).contains(&r)) {
            return Err("Rating must be between 0 and 10".to_string());
        }
        Ok(())
    }
}

impl PlayerStatCreate {
    pub fn validate(&self) -> Result<(), String> {
        self.as_stat(0).validate()
    }

    fn as_stat(&self, id: i64) -> PlayerStat {
        PlayerStat {
            id,
            player_id: self.player_id,
            match_id: self.match_id,
            goals: self.goals,
            assists: self.assists,
            minutes_played: self.minutes_played,
            yellow_cards: self.yellow_cards,
            red_cards: self.red_cards,
            shots: self.shots,
            shots_on_target: self.shots_on_target,
            passes: self.passes,
            pass_accuracy: self.pass_accuracy,
            rating: self.rating,
        }
    }
}

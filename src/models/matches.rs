use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::common::{double_option, merge};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SCHEDULED" => Ok(MatchStatus::Scheduled),
            "TIMED" => Ok(MatchStatus::Timed),
            "IN_PLAY" => Ok(MatchStatus::InPlay),
            "PAUSED" => Ok(MatchStatus::Paused),
            "FINISHED" => Ok(MatchStatus::Finished),
            "POSTPONED" => Ok(MatchStatus::Postponed),
            "SUSPENDED" => Ok(MatchStatus::Suspended),
            "CANCELLED" => Ok(MatchStatus::Cancelled),
            other => Err(format!("Unknown match status: {}", other)),
        }
    }
}

impl TryFrom<String> for MatchStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub match_date: NaiveDate,
    pub competition: Option<String>,
    pub season: Option<String>,
    pub matchday: Option<i32>,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    pub xg_home: Option<f64>,
    pub xg_away: Option<f64>,
    #[sqlx(try_from = "String")]
    pub status: MatchStatus,
    pub external_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchCreate {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub match_date: NaiveDate,
    pub competition: Option<String>,
    pub season: Option<String>,
    pub matchday: Option<i32>,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    pub xg_home: Option<f64>,
    pub xg_away: Option<f64>,
    #[serde(default)]
    pub status: MatchStatus,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct MatchUpdate {
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub match_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub competition: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub season: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub matchday: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub home_goals: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub away_goals: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub xg_home: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub xg_away: Option<Option<f64>>,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MatchQueryParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Matches where the team plays at home or away.
    pub team_id: Option<i64>,
    pub season: Option<String>,
    pub status: Option<MatchStatus>,
}

impl Match {
    pub fn merge(&mut self, update: MatchUpdate) {
        merge(&mut self.home_team_id, update.home_team_id);
        merge(&mut self.away_team_id, update.away_team_id);
        merge(&mut self.match_date, update.match_date);
        merge(&mut self.competition, update.competition);
        merge(&mut self.season, update.season);
        merge(&mut self.matchday, update.matchday);
        merge(&mut self.home_goals, update.home_goals);
        merge(&mut self.away_goals, update.away_goals);
        merge(&mut self.xg_home, update.xg_home);
        merge(&mut self.xg_away, update.xg_away);
        merge(&mut self.status, update.status);
    }
}

fn check_scores(goals: [Option<i32>; 2], xg: [Option<f64>; 2]) -> Result<(), String> {
    if goals.iter().flatten().any(|g| *g < 0) {
        return Err("Goals cannot be negative".to_string());
    }
    if xg.iter().flatten().any(|x| *x < 0.0) {
        return Err("Expected goals cannot be negative".to_string());
    }
    Ok(())
}

impl MatchCreate {
    pub fn validate(&self) -> Result<(), String> {
        check_scores([self.home_goals, self.away_goals], [self.xg_home, self.xg_away])
    }
}

impl MatchUpdate {
    pub fn validate(&self) -> Result<(), String> {
        check_scores(
            [self.home_goals.flatten(), self.away_goals.flatten()],
            [self.xg_home.flatten(), self.xg_away.flatten()],
        )
    }
}

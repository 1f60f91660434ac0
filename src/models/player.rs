use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::common::{double_option, merge};

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team_id: Option<i64>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub age: Option<i32>,
    pub shirt_number: Option<i32>,
    pub market_value_eur: Option<f64>,
    pub external_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerCreate {
    pub name: String,
    pub team_id: Option<i64>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub age: Option<i32>,
    pub shirt_number: Option<i32>,
    pub market_value_eur: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub team_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub position: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub nationality: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub shirt_number: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub market_value_eur: Option<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerQueryParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub team_id: Option<i64>,
    pub name: Option<String>,
}

impl Player {
    pub fn merge(&mut self, update: PlayerUpdate) {
        merge(&mut self.name, update.name);
        merge(&mut self.team_id, update.team_id);
        merge(&mut self.position, update.position);
        merge(&mut self.nationality, update.nationality);
        merge(&mut self.age, update.age);
        merge(&mut self.shirt_number, update.shirt_number);
        merge(&mut self.market_value_eur, update.market_value_eur);
    }
}

fn check_attributes(age: Option<i32>, shirt_number: Option<i32>, market_value: Option<f64>) -> Result<(), String> {
    if matches!(age, Some(a) if a < 0) {
        return Err("Age cannot be negative".to_string());
    }
    if matches!(shirt_number, Some(n) if !(0..=99).contains(&n)) {
        return Err("Shirt number must be between 0 and 99".to_string());
    }
    if matches!(market_value, Some(v) if v < 0.0) {
        return Err("Market value cannot be negative".to_string());
    }
    Ok(())
}

impl PlayerCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Player name cannot be empty".to_string());
        }
        check_attributes(self.age, self.shirt_number, self.market_value_eur)
    }
}

impl PlayerUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err("Player name cannot be empty".to_string());
        }
        check_attributes(
            self.age.flatten(),
            self.shirt_number.flatten(),
            self.market_value_eur.flatten(),
        )
    }
}

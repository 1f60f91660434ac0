// src/models/team.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::common::{double_option, merge};

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub short_name: Option<String>,
    pub country: Option<String>,
    pub founded: Option<i32>,
    pub stadium: Option<String>,
    pub stadium_capacity: Option<i32>,
    pub manager: Option<String>,
    pub external_id: Option<i64>,
}

/// Body of `POST /teams/`. Only the name is required.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamCreate {
    pub name: String,
    pub short_name: Option<String>,
    pub country: Option<String>,
    pub founded: Option<i32>,
    pub stadium: Option<String>,
    pub stadium_capacity: Option<i32>,
    pub manager: Option<String>,
}

/// Body of `PATCH /teams/{id}`: every field is optional.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct TeamUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub short_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub founded: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub stadium: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub stadium_capacity: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TeamQueryParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub country: Option<String>,
}

impl Team {
    pub fn merge(&mut self, update: TeamUpdate) {
        merge(&mut self.name, update.name);
        merge(&mut self.short_name, update.short_name);
        merge(&mut self.country, update.country);
        merge(&mut self.founded, update.founded);
        merge(&mut self.stadium, update.stadium);
        merge(&mut self.stadium_capacity, update.stadium_capacity);
        merge(&mut self.manager, update.manager);
    }
}

impl TeamCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }
        if let Some(capacity) = self.stadium_capacity {
            if capacity < 0 {
                return Err("Stadium capacity cannot be negative".to_string());
            }
        }
        Ok(())
    }
}

impl TeamUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Team name cannot be empty".to_string());
            }
        }
        if let Some(Some(capacity)) = self.stadium_capacity {
            if capacity < 0 {
                return Err("Stadium capacity cannot be negative".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barcelona() -> Team {
        Team {
            id: 7,
            name: "FC Barcelona".into(),
            short_name: Some("BAR".into()),
            country: Some("Catalonia".into()),
            founded: Some(1899),
            stadium: Some("Camp Nou".into()),
            stadium_capacity: Some(99354),
            manager: Some("Xavi".into()),
            external_id: Some(8634),
        }
    }

    #[test]
    fn merge_with_only_country_leaves_other_fields() {
        let mut team = barcelona();
        let update: TeamUpdate = serde_json::from_str(r#"{"country": "Spain"}"#).unwrap();
        team.merge(update);

        let mut expected = barcelona();
        expected.country = Some("Spain".into());
        assert_eq!(team, expected);
    }

    #[test]
    fn merge_clears_nullable_field_on_explicit_null() {
        let mut team = barcelona();
        let update: TeamUpdate = serde_json::from_str(r#"{"manager": null}"#).unwrap();
        team.merge(update);
        assert_eq!(team.manager, None);
        assert_eq!(team.name, "FC Barcelona");
    }

    #[test]
    fn null_name_is_ignored() {
        let mut team = barcelona();
        let update: TeamUpdate = serde_json::from_str(r#"{"name": null, "founded": 1900}"#).unwrap();
        team.merge(update);
        assert_eq!(team.name, "FC Barcelona");
        assert_eq!(team.founded, Some(1900));
    }

    #[test]
    fn create_requires_name() {
        let create: TeamCreate = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(create.validate().is_err());
        let create: TeamCreate = serde_json::from_str(r#"{"name": "Real Madrid"}"#).unwrap();
        assert!(create.validate().is_ok());
    }
}

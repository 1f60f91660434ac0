pub mod auth_handler;
pub mod backend_health_handler;
pub mod match_handler;
pub mod player_handler;
pub mod player_stat_handler;
pub mod registration_handler;
pub mod team_handler;

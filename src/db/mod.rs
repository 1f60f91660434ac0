//! Query functions, one module per table.
//!
//! Functions take any Postgres executor so handlers can run them on the pool
//! or inside a transaction (`&mut *tx`).

pub mod matches;
pub mod player_stats;
pub mod players;
pub mod teams;
pub mod users;

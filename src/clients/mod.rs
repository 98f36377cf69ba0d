pub mod database;
pub mod health;

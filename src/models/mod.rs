pub mod campaign;
pub mod error;
pub mod health;

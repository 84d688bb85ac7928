pub mod health;
pub mod platform;

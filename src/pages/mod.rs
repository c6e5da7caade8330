pub mod health;
pub mod reviewer;

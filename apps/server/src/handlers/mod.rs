pub mod demos;
pub mod health;

pub mod config;
pub mod handlers;
pub mod router;
pub mod salesforce;
pub mod scenarios;
pub mod shutdown;
pub mod state;
pub mod views;

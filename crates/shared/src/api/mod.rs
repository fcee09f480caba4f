pub mod apex;
pub mod auth;
pub mod composite;
pub mod query;
pub mod sobject;
pub mod tree;

pub mod auth;
pub mod database;
pub mod user_store;

pub mod connection;
pub mod models;
pub mod settings_store;

/// Database connection and schema management
pub mod database;

/// Application settings from config.toml and environment variables
pub mod settings;

// Configuration module for energy-dash
// Loads settings from .env, the environment and CLI overrides

pub mod settings;

pub use settings::{database_url, AppConfig};

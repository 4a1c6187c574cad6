use crate::controller::ControllerSettings;
use crate::domain::{AGGREGATE_REGION, DEFAULT_PARTNER};
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_DATABASE: &str = "energy.db";
const DEFAULT_LOG_FILE: &str = "energy-dash.log";
const DEFAULT_REFRESH_MS: u64 = 1000;

/// Runtime settings resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub database_url: String,
    pub partner: String,
    pub aggregate_region: String,
    /// Interval of the summary table refresh.
    pub refresh_interval: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Reads the process environment after loading `.env`.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let base_dir = env::current_dir()?;
        let config = Self::from_lookup(|key| env::var(key).ok(), &base_dir)?;

        if let Some(parent) = config.database_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, base_dir: &Path) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_name = non_empty("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let database_path = base_dir.join(db_name);
        let database_url = database_url(&database_path)?;

        let refresh_ms = match non_empty("REFRESH_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| eyre!("REFRESH_MS must be a positive number of milliseconds, got {raw:?}"))?,
            None => DEFAULT_REFRESH_MS,
        };

        let log_file = non_empty("LOG_FILE")
            .map_or_else(|| base_dir.join(DEFAULT_LOG_FILE), |path| base_dir.join(path));

        let debug = non_empty("DEBUG").is_some_and(|value| value != "0" && value != "false");

        Ok(Self {
            database_path,
            database_url,
            partner: non_empty("TRADE_PARTNER").unwrap_or_else(|| DEFAULT_PARTNER.to_string()),
            aggregate_region: non_empty("AGGREGATE_REGION")
                .unwrap_or_else(|| AGGREGATE_REGION.to_string()),
            refresh_interval: Duration::from_millis(refresh_ms),
            log_file,
            debug,
        })
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            partner: self.partner.clone(),
            aggregate_region: self.aggregate_region.clone(),
        }
    }
}

/// Formats a database path as an sqlx SQLite URL.
///
/// Absolute paths need three slashes (`sqlite:///abs/path.db`), relative
/// paths two (`sqlite://rel/path.db`).
pub fn database_url(path: &Path) -> Result<String> {
    let path_str = path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path: {}", path.display()))?;

    let clean_path = path_str.trim_start_matches('/');
    if path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned(), Path::new("/srv/dash"))
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite:///srv/dash/energy.db");
        assert_eq!(config.partner, "Russia");
        assert_eq!(config.aggregate_region, "EU27_2020");
        assert_eq!(config.refresh_interval, Duration::from_millis(1000));
        assert_eq!(config.log_file, PathBuf::from("/srv/dash/energy-dash.log"));
        assert!(!config.debug);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("DATABASE_NAME", "data/eurostat.db"),
            ("TRADE_PARTNER", "Norway"),
            ("REFRESH_MS", "250"),
            ("DEBUG", "1"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite:///srv/dash/data/eurostat.db");
        assert_eq!(config.controller_settings().partner, "Norway");
        assert_eq!(config.refresh_interval, Duration::from_millis(250));
        assert!(config.debug);
    }

    #[test]
    fn rejects_zero_or_garbage_refresh() {
        assert!(config_from(&[("REFRESH_MS", "0")]).is_err());
        assert!(config_from(&[("REFRESH_MS", "soon")]).is_err());
    }

    #[test]
    fn relative_paths_use_two_slashes() {
        assert_eq!(
            database_url(Path::new("local/energy.db")).unwrap(),
            "sqlite://local/energy.db"
        );
    }
}

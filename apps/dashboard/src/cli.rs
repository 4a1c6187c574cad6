use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "energy-dash",
    version,
    about = "Dashboard of EU energy-import dependency on a single trade partner"
)]
pub struct CliArgs {
    /// Print the summary for the selection and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Trade partner the dependency is measured against
    #[arg(long, value_name = "NAME")]
    pub partner: Option<String>,

    /// Summary table refresh interval in milliseconds
    #[arg(long = "refresh-ms", value_name = "N")]
    pub refresh_ms: Option<u64>,

    /// Initial commodity ("Natural Gas", "oil_petrol", ...)
    #[arg(long, value_name = "NAME")]
    pub commodity: Option<String>,

    /// Initial year
    #[arg(long, value_name = "N")]
    pub year: Option<i32>,

    /// Initial country
    #[arg(long, value_name = "NAME")]
    pub country: Option<String>,

    /// Replace the database contents with the built-in demo dataset
    #[arg(long = "seed-demo")]
    pub seed_demo: bool,

    /// Import region boundaries from a GeoJSON file
    #[arg(long = "import-regions", value_name = "FILE")]
    pub import_regions: Option<PathBuf>,

    /// Override log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(partner) = &self.partner {
            std::env::set_var("TRADE_PARTNER", partner);
        }
        if let Some(ms) = self.refresh_ms {
            std::env::set_var("REFRESH_MS", ms.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_flags() {
        let args = CliArgs::try_parse_from([
            "energy-dash",
            "--commodity",
            "Oil Petrol",
            "--year",
            "2015",
            "--country",
            "Poland",
            "--headless",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.commodity.as_deref(), Some("Oil Petrol"));
        assert_eq!(args.year, Some(2015));
        assert_eq!(args.country.as_deref(), Some("Poland"));
        assert!(args.headless && args.json);
        assert!(!args.seed_demo);
    }

    #[test]
    fn help_lists_demo_seeding() {
        assert!(CliArgs::help_text().contains("--seed-demo"));
    }
}

use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use energy_dash::app::App;
use energy_dash::cli::CliArgs;
use energy_dash::config::AppConfig;
use energy_dash::controller::Controller;
use energy_dash::db::{create_database_pool, import_regions, seed_demo_dataset};
use energy_dash::logging::{init_logging, LogTarget};
use energy_dash::query::parse_commodity;
use energy_dash::selection::Selection;
use energy_dash::store::DatasetStore;
use energy_dash::{event, terminal, Commodity};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env()?;

    // The terminal belongs to the UI, so interactive runs log to a file
    let headless = args.headless || !is_terminal();
    let _log_guard = if headless {
        init_logging(LogTarget::Stderr, config.debug)?
    } else {
        init_logging(LogTarget::File(&config.log_file), config.debug)?
    };
    info!(database = %config.database_path.display(), headless, "starting");

    let pool = create_database_pool(&config.database_url).await?;

    if args.seed_demo {
        let summary = seed_demo_dataset(&pool).await?;
        info!(?summary, "seeded demo dataset");
    }
    if let Some(path) = &args.import_regions {
        let text = std::fs::read_to_string(path)?;
        let count = import_regions(&pool, &text).await?;
        info!(count, path = %path.display(), "imported regions");
    }

    let store = DatasetStore::load(&pool).await?;
    if store.is_empty() {
        pool.close().await;
        return Err(eyre!(
            "No dependency data in {}; run with --seed-demo to load the demo dataset",
            config.database_path.display()
        ));
    }

    let selection = initial_selection(&args, &config, &store)?;
    let controller = Controller::new(store, selection, config.controller_settings());

    if headless {
        let result = event::run_headless(&pool, &controller, args.json).await;
        pool.close().await;
        return result;
    }
    pool.close().await;

    let mut app = App::new(controller, config.refresh_interval);
    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app);
    terminal::cleanup(true, true);

    result
}

fn initial_selection(args: &CliArgs, config: &AppConfig, store: &DatasetStore) -> Result<Selection> {
    let defaults = Selection::default();
    let commodity = args
        .commodity
        .as_deref()
        .map(parse_commodity)
        .transpose()?
        .unwrap_or(Commodity::NaturalGas);
    let year = args.year.unwrap_or(defaults.year);

    let country = match args.country.as_deref() {
        Some(country) if store.is_known_country(country) => country,
        Some(country) => {
            warn!(country, fallback = %config.aggregate_region, "unknown country, using aggregate");
            config.aggregate_region.as_str()
        }
        None => config.aggregate_region.as_str(),
    };

    Ok(Selection::new(commodity, year, country))
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

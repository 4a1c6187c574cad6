pub mod import;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;

pub use import::import_regions;
pub use migrations::{create_database_pool, setup_database};
pub use seed::seed_demo_dataset;

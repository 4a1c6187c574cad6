// Export our modules for use in the binary and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod db;
pub mod demo;
pub mod domain;
pub mod error;
pub mod event;
pub mod region;
pub mod logging;
pub mod query;
pub mod render;
pub mod selection;
pub mod store;
pub mod terminal;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use domain::Commodity;
pub use error::DashboardError;

use crate::db::migrations::{clear_dataset, insert_dependency, insert_exporter, upsert_region};
use crate::db::models::{DependencyParams, ExporterParams};
use crate::demo::demo_dataset;
use crate::error::Result;
use crate::region::to_geojson;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

/// Row counts written by [`seed_demo_dataset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub dependencies: usize,
    pub exporters: usize,
    pub regions: usize,
}

/// Replaces the database contents with the built-in demonstration dataset
pub async fn seed_demo_dataset(pool: &SqlitePool) -> Result<SeedSummary> {
    let dataset = demo_dataset();

    clear_dataset(pool).await?;

    let mut tx = pool.begin().await?;
    for (commodity, row) in &dataset.dependencies {
        let params = DependencyParams {
            commodity: *commodity,
            country: row.country.clone(),
            year: row.year,
            import_pct: row.import,
        };
        insert_dependency(&mut *tx, &params).await?;
    }

    for (commodity, row) in &dataset.exporters {
        let params = ExporterParams {
            commodity: *commodity,
            country: row.country.clone(),
            year: row.year,
            partner: row.partner.clone(),
            continent: row.continent.clone(),
            import_value: row.import,
        };
        insert_exporter(&mut *tx, &params).await?;
    }

    for (country, geometry) in &dataset.regions {
        upsert_region(&mut *tx, country, &to_geojson(geometry)?).await?;
    }
    tx.commit().await?;

    let summary = SeedSummary {
        dependencies: dataset.dependencies.len(),
        exporters: dataset.exporters.len(),
        regions: dataset.regions.len(),
    };
    info!(?summary, "seeded demo dataset");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::setup_database;
    use crate::db::queries::{count_dependencies, count_regions, get_exporters};
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        setup_database(&pool).await?;

        let first = seed_demo_dataset(&pool).await?;
        let second = seed_demo_dataset(&pool).await?;
        assert_eq!(first, second);

        let dependencies = usize::try_from(count_dependencies(&pool).await?)?;
        assert_eq!(dependencies, first.dependencies);
        let regions = usize::try_from(count_regions(&pool).await?)?;
        assert_eq!(regions, first.regions);
        assert_eq!(get_exporters(&pool).await?.len(), first.exporters);

        Ok(())
    }
}

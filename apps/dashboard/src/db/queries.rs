use sqlx::{query_as, query_scalar, SqlitePool};

use crate::db::models::{DependencyRecord, ExporterRecord, RegionRecord};

/// Retrieves every dependency row in insertion order
pub async fn get_dependencies(pool: &SqlitePool) -> Result<Vec<DependencyRecord>, sqlx::Error> {
    query_as::<_, DependencyRecord>(
        "SELECT commodity, country, year, import_pct FROM dependency ORDER BY rowid",
    )
    .fetch_all(pool)
    .await
}

/// Retrieves every exporter breakdown row in insertion order
pub async fn get_exporters(pool: &SqlitePool) -> Result<Vec<ExporterRecord>, sqlx::Error> {
    query_as::<_, ExporterRecord>(
        "SELECT commodity, country, year, partner, continent, import_value
         FROM exporter ORDER BY rowid",
    )
    .fetch_all(pool)
    .await
}

/// Retrieves region boundaries; the order defines the map's row indices
pub async fn get_regions(pool: &SqlitePool) -> Result<Vec<RegionRecord>, sqlx::Error> {
    query_as::<_, RegionRecord>("SELECT id, country, geometry FROM region ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn count_dependencies(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM dependency")
        .fetch_one(pool)
        .await
}

pub async fn count_regions(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM region")
        .fetch_one(pool)
        .await
}

pub async fn count_dependencies_by_commodity(
    pool: &SqlitePool,
) -> Result<Vec<(String, i64)>, sqlx::Error> {
    query_as::<_, (String, i64)>(
        "SELECT commodity, COUNT(*) FROM dependency GROUP BY commodity ORDER BY commodity",
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::{insert_dependency, insert_exporter, setup_database, upsert_region};
    use crate::db::models::{DependencyParams, ExporterParams};
    use crate::Commodity;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> Result<SqlitePool, sqlx::Error> {
        // A single connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        setup_database(&pool).await?;
        Ok(pool)
    }

    #[tokio::test]
    async fn test_dependency_rows_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        for (year, pct) in [(2019, 41.25), (2020, 38.5)] {
            let params = DependencyParams {
                commodity: Commodity::NaturalGas,
                country: "Poland".to_string(),
                year,
                import_pct: pct,
            };
            insert_dependency(&pool, &params).await?;
        }

        let rows = get_dependencies(&pool).await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].commodity, "natural_gas");
        assert_eq!(rows[1].year, 2020);
        assert!((rows[0].import_pct - 41.25).abs() < f64::EPSILON);
        assert_eq!(count_dependencies(&pool).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_dependency_insert_replaces_same_key() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let mut params = DependencyParams {
            commodity: Commodity::SolidFuel,
            country: "Latvia".to_string(),
            year: 2010,
            import_pct: 10.0,
        };
        insert_dependency(&pool, &params).await?;
        params.import_pct = 12.0;
        insert_dependency(&pool, &params).await?;

        let rows = get_dependencies(&pool).await?;
        assert_eq!(rows.len(), 1);
        assert!((rows[0].import_pct - 12.0).abs() < f64::EPSILON);

        let by_commodity = count_dependencies_by_commodity(&pool).await?;
        assert_eq!(by_commodity, vec![("solid_fuel".to_string(), 1)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_exporter_rows_keep_insertion_order() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        for (partner, continent) in [("Russia", "Europe"), ("Algeria", "Africa")] {
            let params = ExporterParams {
                commodity: Commodity::OilPetrol,
                country: "Italy".to_string(),
                year: 2015,
                partner: partner.to_string(),
                continent: continent.to_string(),
                import_value: 100.0,
            };
            insert_exporter(&pool, &params).await?;
        }

        let rows = get_exporters(&pool).await?;
        assert_eq!(rows[0].partner, "Russia");
        assert_eq!(rows[1].continent, "Africa");

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_region_keeps_row_order() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        upsert_region(&pool, "Poland", "{}").await?;
        upsert_region(&pool, "Norway", "{}").await?;
        upsert_region(&pool, "Poland", "{\"updated\":true}").await?;

        let regions = get_regions(&pool).await?;
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].country, "Poland");
        assert_eq!(regions[0].geometry, "{\"updated\":true}");
        assert_eq!(count_regions(&pool).await?, 2);

        Ok(())
    }
}

//! In-memory snapshot of every dataset, loaded once at startup.

use crate::db::queries::{get_dependencies, get_exporters, get_regions};
use crate::demo::DemoDataset;
use crate::error::Result;
use crate::region::{self, parse_geometry};
use crate::Commodity;
use geo::{MultiPolygon, Rect};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

/// `(Country, Year, ImportPercentage)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyRow {
    pub country: String,
    pub year: i32,
    pub import: f64,
}

/// `(Country, Year, Partner, Continent, ImportValue)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExporterRow {
    pub country: String,
    pub year: i32,
    pub partner: String,
    pub continent: String,
    pub import: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoRegion {
    pub index: usize,
    pub country: String,
    pub geometry: MultiPolygon<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    dependencies: [Vec<DependencyRow>; 3],
    exporters: [Vec<ExporterRow>; 3],
    regions: Vec<GeoRegion>,
    countries: Vec<String>,
}

impl DatasetStore {
    pub fn from_parts(
        dependencies: impl IntoIterator<Item = (Commodity, DependencyRow)>,
        exporters: impl IntoIterator<Item = (Commodity, ExporterRow)>,
        regions: impl IntoIterator<Item = (String, MultiPolygon<f64>)>,
    ) -> Self {
        let mut store = Self::default();

        for (commodity, row) in dependencies {
            store.dependencies[commodity.index()].push(row);
        }
        for (commodity, row) in exporters {
            store.exporters[commodity.index()].push(row);
        }
        store.regions = regions
            .into_iter()
            .enumerate()
            .map(|(index, (country, geometry))| GeoRegion {
                index,
                country,
                geometry,
            })
            .collect();

        // The selectable countries are those reporting natural gas figures
        for row in &store.dependencies[Commodity::NaturalGas.index()] {
            if !store.countries.contains(&row.country) {
                store.countries.push(row.country.clone());
            }
        }

        store
    }

    pub fn from_demo(dataset: DemoDataset) -> Self {
        Self::from_parts(dataset.dependencies, dataset.exporters, dataset.regions)
    }

    /// Reads every table; an unknown commodity key or bad geometry fails the load.
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let dependencies = get_dependencies(pool)
            .await?
            .into_iter()
            .map(|record| -> Result<_> {
                Ok((
                    record.commodity.parse::<Commodity>()?,
                    DependencyRow {
                        country: record.country,
                        year: year_from_db(record.year),
                        import: record.import_pct,
                    },
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let exporters = get_exporters(pool)
            .await?
            .into_iter()
            .map(|record| -> Result<_> {
                Ok((
                    record.commodity.parse::<Commodity>()?,
                    ExporterRow {
                        country: record.country,
                        year: year_from_db(record.year),
                        partner: record.partner,
                        continent: record.continent,
                        import: record.import_value,
                    },
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let regions = get_regions(pool)
            .await?
            .into_iter()
            .map(|record| -> Result<_> {
                let geometry = parse_geometry(&record.country, &record.geometry)?;
                Ok((record.country, geometry))
            })
            .collect::<Result<Vec<_>>>()?;

        let store = Self::from_parts(dependencies, exporters, regions);
        info!(
            dependencies = store.dependencies.iter().map(Vec::len).sum::<usize>(),
            exporters = store.exporters.iter().map(Vec::len).sum::<usize>(),
            regions = store.regions.len(),
            countries = store.countries.len(),
            "dataset store loaded"
        );
        Ok(store)
    }

    pub fn dependencies(&self, commodity: Commodity) -> &[DependencyRow] {
        &self.dependencies[commodity.index()]
    }

    pub fn exporters(&self, commodity: Commodity) -> &[ExporterRow] {
        &self.exporters[commodity.index()]
    }

    pub fn regions(&self) -> &[GeoRegion] {
        &self.regions
    }

    /// The known-country enumeration offered by the country selector
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn is_known_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.iter().all(Vec::is_empty)
    }

    /// Extent of every region outline
    pub fn bounds(&self) -> Option<Rect<f64>> {
        region::bounds(self.regions.iter().map(|r| &r.geometry))
    }
}

fn year_from_db(year: i64) -> i32 {
    i32::try_from(year).unwrap_or(i32::MAX)
}

//! Pure filters over the dataset store.
//!
//! Nothing here touches shared state: the unit label and commodity name come
//! from the [`Commodity`] value the caller passes in.

use crate::error::{DashboardError, Result};
use crate::store::{DatasetStore, DependencyRow, ExporterRow};
use crate::Commodity;
use serde::Serialize;

/// One map polygon's render input: a region left-joined with its dependency row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRow {
    pub index: usize,
    pub country: String,
    pub import: Option<f64>,
}

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn parse_commodity(name: &str) -> Result<Commodity> {
    name.parse()
}

pub const fn unit_label(commodity: Commodity) -> &'static str {
    commodity.unit()
}

/// Dependency rows of `commodity` for a single year.
pub fn filter_by_year(store: &DatasetStore, commodity: Commodity, year: i32) -> Vec<DependencyRow> {
    store
        .dependencies(commodity)
        .iter()
        .filter(|row| row.year == year)
        .cloned()
        .collect()
}

/// Every region, in row order, joined with the year's dependency figure.
pub fn map_frame(store: &DatasetStore, commodity: Commodity, year: i32) -> Vec<MapRow> {
    let rows = filter_by_year(store, commodity, year);
    store
        .regions()
        .iter()
        .map(|region| MapRow {
            index: region.index,
            country: region.country.clone(),
            import: rows
                .iter()
                .find(|row| row.country == region.country)
                .map(|row| row.import),
        })
        .collect()
}

/// Exporter breakdown for one country and year, rounded, without zero rows.
pub fn filter_by_country_and_year(
    store: &DatasetStore,
    commodity: Commodity,
    year: i32,
    country: &str,
) -> Vec<ExporterRow> {
    store
        .exporters(commodity)
        .iter()
        .filter(|row| row.country == country && row.year == year)
        .map(|row| ExporterRow {
            import: round1(row.import),
            ..row.clone()
        })
        .filter(|row| row.import != 0.0)
        .collect()
}

/// All years for one country, oldest first, rounded.
pub fn filter_time_series(store: &DatasetStore, commodity: Commodity, country: &str) -> Vec<DependencyRow> {
    let mut rows: Vec<_> = store
        .dependencies(commodity)
        .iter()
        .filter(|row| row.country == country)
        .map(|row| DependencyRow {
            import: round1(row.import),
            ..row.clone()
        })
        .collect();
    rows.sort_by_key(|row| row.year);
    rows
}

/// Row index of the region named exactly `country`.
pub fn region_index(store: &DatasetStore, country: &str) -> Result<usize> {
    store
        .regions()
        .iter()
        .find(|region| region.country == country)
        .map(|region| region.index)
        .ok_or_else(|| DashboardError::NoMatchingRegion(country.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_dataset;
    use crate::domain::AGGREGATE_REGION;
    use geo::{LineString, MultiPolygon, Polygon};

    fn demo_store() -> DatasetStore {
        DatasetStore::from_demo(demo_dataset())
    }

    fn tiny_store() -> DatasetStore {
        let row = |country: &str, year, import| {
            (
                Commodity::NaturalGas,
                DependencyRow {
                    country: country.to_string(),
                    year,
                    import,
                },
            )
        };
        let exporter = |partner: &str, import| {
            (
                Commodity::NaturalGas,
                ExporterRow {
                    country: "Poland".to_string(),
                    year: 2015,
                    partner: partner.to_string(),
                    continent: "Europe".to_string(),
                    import,
                },
            )
        };
        let square = MultiPolygon::new(vec![Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            Vec::new(),
        )]);

        DatasetStore::from_parts(
            [
                row("Poland", 2016, 60.04),
                row("Poland", 2015, 55.56),
                row("Latvia", 2015, 90.0),
            ],
            [
                exporter("Russia", 1234.56),
                exporter("Libya", 0.0),
                exporter("Qatar", 0.04),
                exporter("Norway", 12.34),
            ],
            [
                ("Norway".to_string(), square.clone()),
                ("Poland".to_string(), square),
            ],
        )
    }

    #[test]
    fn filter_by_year_returns_only_that_year() {
        let store = demo_store();
        for commodity in Commodity::ALL {
            let rows = filter_by_year(&store, commodity, 2007);
            assert!(!rows.is_empty());
            assert!(rows.iter().all(|row| row.year == 2007));
        }
        assert_eq!(unit_label(Commodity::NaturalGas), "million m3");
        assert_eq!(unit_label(Commodity::OilPetrol), "thousand tonnes");
        assert_eq!(unit_label(Commodity::SolidFuel), "thousand tonnes");
    }

    #[test]
    fn map_frame_left_joins_regions() {
        let store = tiny_store();
        let frame = map_frame(&store, Commodity::NaturalGas, 2015);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0].country, "Norway");
        assert_eq!(frame[0].import, None);
        assert_eq!(frame[1].index, 1);
        assert_eq!(frame[1].import, Some(55.56));
    }

    #[test]
    fn breakdown_is_rounded_and_drops_zero_rows() {
        let store = tiny_store();
        let rows = filter_by_country_and_year(&store, Commodity::NaturalGas, 2015, "Poland");
        let partners: Vec<_> = rows.iter().map(|r| r.partner.as_str()).collect();
        // Qatar rounds to zero and is dropped along with Libya
        assert_eq!(partners, ["Russia", "Norway"]);
        assert_eq!(rows[0].import, 1234.6);
        assert_eq!(rows[1].import, 12.3);
    }

    #[test]
    fn breakdown_never_contains_zero_values() {
        let store = demo_store();
        for commodity in Commodity::ALL {
            for year in [2000, 2009, 2010, 2016, 2020] {
                for country in store.countries() {
                    let rows = filter_by_country_and_year(&store, commodity, year, country);
                    assert!(rows.iter().all(|row| row.import != 0.0));
                }
            }
        }
    }

    #[test]
    fn time_series_is_sorted_and_rounded() {
        let store = tiny_store();
        let rows = filter_time_series(&store, Commodity::NaturalGas, "Poland");
        let years: Vec<_> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, [2015, 2016]);
        assert_eq!(rows[0].import, 55.6);
        assert_eq!(rows[1].import, 60.0);
    }

    #[test]
    fn region_index_reports_missing_region() {
        let store = demo_store();
        assert!(region_index(&store, "Poland").is_ok());
        let err = region_index(&store, AGGREGATE_REGION).unwrap_err();
        assert!(matches!(err, DashboardError::NoMatchingRegion(name) if name == AGGREGATE_REGION));
    }

    #[test]
    fn parse_commodity_rejects_unknown_names() {
        assert_eq!(parse_commodity("Solid Fuel").unwrap(), Commodity::SolidFuel);
        assert!(matches!(
            parse_commodity("Peat"),
            Err(DashboardError::UnknownCommodity(_))
        ));
    }

    #[test]
    fn round1_rounds_half_away_from_zero() {
        assert_eq!(round1(0.05), 0.1);
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(-1.25), -1.3);
    }
}

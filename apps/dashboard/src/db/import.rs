use crate::db::migrations::upsert_region;
use crate::error::{DashboardError, Result};
use crate::region::{from_geojson, to_geojson};
use geo::MultiPolygon;
use geojson::{Feature, GeoJson};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Property names checked, in order, for a feature's country name
const NAME_PROPERTIES: &[&str] = &["Country", "country", "NAME", "name", "ADMIN"];

/// Parses a GeoJSON document into named region geometries.
///
/// Features without a recognizable name or with an unsupported geometry are
/// skipped with a warning rather than failing the whole import.
pub fn parse_regions(text: &str) -> Result<Vec<(String, MultiPolygon<f64>)>> {
    let geojson: GeoJson = text.parse().map_err(|e: geojson::Error| {
        DashboardError::InvalidGeometry {
            country: "<document>".to_string(),
            reason: e.to_string(),
        }
    })?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(DashboardError::InvalidGeometry {
                country: "<document>".to_string(),
                reason: "expected a Feature or FeatureCollection".to_string(),
            })
        }
    };

    let mut regions = Vec::with_capacity(features.len());
    for feature in features {
        let Some(country) = feature_name(&feature) else {
            warn!("skipping feature without a country name");
            continue;
        };
        let Some(geometry) = feature.geometry else {
            warn!(%country, "skipping feature without geometry");
            continue;
        };
        match from_geojson(&country, geometry) {
            Ok(region) => regions.push((country, region)),
            Err(e) => warn!(%country, error = %e, "skipping feature"),
        }
    }

    Ok(regions)
}

fn feature_name(feature: &Feature) -> Option<String> {
    NAME_PROPERTIES
        .iter()
        .find_map(|key| feature.property(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// Imports region boundaries from a GeoJSON document, returning how many were written
pub async fn import_regions(pool: &SqlitePool, text: &str) -> Result<usize> {
    let regions = parse_regions(text)?;
    for (country, geometry) in &regions {
        upsert_region(pool, country, &to_geojson(geometry)?).await?;
    }
    info!(count = regions.len(), "imported region boundaries");
    Ok(regions.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"Country": "Poland"},
             "geometry": {"type": "Polygon", "coordinates": [[[14,49],[24,49],[24,54],[14,54],[14,49]]]}},
            {"type": "Feature", "properties": {"name": "Iceland"},
             "geometry": {"type": "Point", "coordinates": [-19, 65]}},
            {"type": "Feature", "properties": {"id": 7},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
        ]
    }"#;

    #[test]
    fn keeps_named_polygon_features_only() {
        let regions = parse_regions(COLLECTION).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].0, "Poland");
        assert_eq!(crate::region::hit_test([&regions[0].1], 20.0, 52.0), Some(0));
    }

    #[test]
    fn rejects_bare_geometry_document() {
        let text = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#;
        assert!(matches!(
            parse_regions(text),
            Err(DashboardError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_regions("{not json").is_err());
    }
}

//! Region boundaries in lon/lat degrees and the hit testing the map needs.
//!
//! Outlines are held as [`MultiPolygon`]s; the `geojson` crate converts
//! between stored GeoJSON text and `geo` types.

use crate::error::{DashboardError, Result};
use geo::{BoundingRect, Contains, Coord, Geometry, MultiPolygon, Point, Rect};

/// Parses a GeoJSON geometry object (`Polygon` or `MultiPolygon`).
pub fn parse_geometry(country: &str, text: &str) -> Result<MultiPolygon<f64>> {
    let geometry: geojson::Geometry = serde_json::from_str(text)?;
    from_geojson(country, geometry)
}

pub fn from_geojson(country: &str, geometry: geojson::Geometry) -> Result<MultiPolygon<f64>> {
    let invalid = |reason: String| DashboardError::InvalidGeometry {
        country: country.to_string(),
        reason,
    };

    let shape = Geometry::<f64>::try_from(geometry).map_err(|e| invalid(e.to_string()))?;
    let polygons = match shape {
        Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
        Geometry::MultiPolygon(polygons) => polygons,
        _ => return Err(invalid("expected Polygon or MultiPolygon".to_string())),
    };

    if polygons.0.is_empty() {
        return Err(invalid("no polygons".to_string()));
    }
    // A closed triangle is the smallest usable ring
    if polygons.0.iter().any(|p| p.exterior().0.len() < 4) {
        return Err(invalid("empty polygon".to_string()));
    }

    Ok(polygons)
}

/// Serializes as a `Polygon` when there is a single part.
pub fn to_geojson(geometry: &MultiPolygon<f64>) -> Result<String> {
    let value = match geometry.0.as_slice() {
        [single] => geojson::Value::from(single),
        _ => geojson::Value::from(geometry),
    };
    Ok(serde_json::to_string(&geojson::Geometry::new(value))?)
}

/// Smallest rectangle covering both.
pub fn union_bounds(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

/// Extent of a set of outlines, `None` when there are none.
pub fn bounds<'a>(regions: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Option<Rect<f64>> {
    regions
        .into_iter()
        .filter_map(|region| region.bounding_rect())
        .reduce(union_bounds)
}

/// Index of the first geometry containing the point.
pub fn hit_test<'a>(
    regions: impl IntoIterator<Item = &'a MultiPolygon<f64>>,
    x: f64,
    y: f64,
) -> Option<usize> {
    let point = Point::new(x, y);
    regions.into_iter().position(|region| region.contains(&point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
        let ring = LineString::from(vec![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]);
        MultiPolygon::new(vec![Polygon::new(ring, Vec::new())])
    }

    #[test]
    fn parses_polygon_geojson() {
        let text = r#"{"type":"Polygon","coordinates":[[[0,0],[4,0],[4,4],[0,4],[0,0]]]}"#;
        let geometry = parse_geometry("Testland", text).unwrap();
        assert_eq!(geometry.0.len(), 1);
        assert!(geometry.contains(&Point::new(2.0, 2.0)));
        assert!(!geometry.contains(&Point::new(5.0, 2.0)));
    }

    #[test]
    fn parses_multipolygon_with_hole() {
        let text = r#"{"type":"MultiPolygon","coordinates":[
            [[[0,0],[10,0],[10,10],[0,10],[0,0]],[[4,4],[6,4],[6,6],[4,6],[4,4]]],
            [[[20,20],[22,20],[22,22],[20,22],[20,20]]]
        ]}"#;
        let geometry = parse_geometry("Islands", text).unwrap();
        assert_eq!(geometry.0.len(), 2);
        assert_eq!(hit_test([&geometry], 1.0, 1.0), Some(0));
        assert_eq!(hit_test([&geometry], 5.0, 5.0), None);
        assert_eq!(hit_test([&geometry], 21.0, 21.0), Some(0));

        let rect = bounds([&geometry]).unwrap();
        assert_eq!((rect.min().x, rect.max().y), (0.0, 22.0));
    }

    #[test]
    fn rejects_non_polygon_geometry() {
        let text = r#"{"type":"Point","coordinates":[1,2]}"#;
        let err = parse_geometry("Dot", text).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidGeometry { country, .. } if country == "Dot"));
    }

    #[test]
    fn rejects_degenerate_ring() {
        let text = r#"{"type":"Polygon","coordinates":[[[0,0],[1,1]]]}"#;
        assert!(matches!(
            parse_geometry("Line", text),
            Err(DashboardError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn stored_text_parses_back() {
        let outline = square(1.0, 1.0, 2.0);
        let text = to_geojson(&outline).unwrap();
        assert!(text.contains("\"Polygon\""));
        assert_eq!(parse_geometry("Sq", &text).unwrap(), outline);
    }

    #[test]
    fn union_covers_both_rects() {
        let regions = [square(0.0, 0.0, 1.0), square(5.0, -2.0, 1.0)];
        let rect = bounds(&regions).unwrap();
        assert_eq!((rect.min().x, rect.min().y), (0.0, -2.0));
        assert_eq!((rect.max().x, rect.max().y), (6.0, 1.0));
        assert!(bounds(std::iter::empty()).is_none());
    }

    #[test]
    fn hit_test_returns_row_index() {
        let regions = [square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)];
        assert_eq!(hit_test(&regions, 5.5, 5.5), Some(1));
        assert_eq!(hit_test(&regions, 0.5, 0.5), Some(0));
        assert_eq!(hit_test(&regions, 3.0, 3.0), None);
    }
}

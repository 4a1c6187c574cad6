use crate::Commodity;
use sqlx::FromRow;

/// A dependency percentage row as stored in the database
#[derive(Debug, FromRow, Clone)]
pub struct DependencyRecord {
    pub commodity: String,
    pub country: String,
    pub year: i64,
    pub import_pct: f64,
}

/// An exporter breakdown row as stored in the database
#[derive(Debug, FromRow, Clone)]
pub struct ExporterRecord {
    pub commodity: String,
    pub country: String,
    pub year: i64,
    pub partner: String,
    pub continent: String,
    pub import_value: f64,
}

/// A region boundary row; `geometry` holds a GeoJSON geometry object
#[derive(Debug, FromRow, Clone)]
pub struct RegionRecord {
    pub id: i64,
    pub country: String,
    pub geometry: String,
}

/// Parameters for inserting a dependency row
#[derive(Debug, Clone)]
pub struct DependencyParams {
    pub commodity: Commodity,
    pub country: String,
    pub year: i32,
    pub import_pct: f64,
}

/// Parameters for inserting an exporter breakdown row
#[derive(Debug, Clone)]
pub struct ExporterParams {
    pub commodity: Commodity,
    pub country: String,
    pub year: i32,
    pub partner: String,
    pub continent: String,
    pub import_value: f64,
}

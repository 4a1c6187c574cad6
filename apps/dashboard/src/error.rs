use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown commodity: {0}")]
    UnknownCommodity(String),

    #[error("no region matches country: {0}")]
    NoMatchingRegion(String),

    #[error("invalid geometry for {country}: {reason}")]
    InvalidGeometry { country: String, reason: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

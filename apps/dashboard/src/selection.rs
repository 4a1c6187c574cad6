use crate::domain::{AGGREGATE_REGION, FIRST_YEAR, LAST_YEAR};
use crate::Commodity;
use serde::Serialize;

/// The dashboard's current choice of commodity, year and country.
///
/// Snapshots are never mutated in place: every transition builds the next
/// value so renderers always see one consistent selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub commodity: Commodity,
    pub year: i32,
    pub country: String,
    /// Last country that matched a map region, kept for the "back" key.
    pub last_valid_country: String,
    /// Forces the next map redraw even when only the country changed.
    pub replot: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Commodity::NaturalGas, LAST_YEAR, AGGREGATE_REGION)
    }
}

impl Selection {
    pub fn new(commodity: Commodity, year: i32, country: &str) -> Self {
        Self {
            commodity,
            year: clamp_year(year),
            country: country.to_string(),
            last_valid_country: country.to_string(),
            replot: false,
        }
    }

    #[must_use]
    pub fn with_commodity(&self, commodity: Commodity) -> Self {
        Self {
            commodity,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_year(&self, year: i32) -> Self {
        Self {
            year: clamp_year(year),
            ..self.clone()
        }
    }

    /// A country chosen by the user, either from the dropdown or the map.
    #[must_use]
    pub fn with_country(&self, country: &str) -> Self {
        Self {
            country: country.to_string(),
            last_valid_country: country.to_string(),
            ..self.clone()
        }
    }

    /// A fallback country that should not overwrite the last valid choice.
    #[must_use]
    pub fn with_fallback_country(&self, country: &str) -> Self {
        Self {
            country: country.to_string(),
            ..self.clone()
        }
    }

    /// A map click landed on a region with no data.
    #[must_use]
    pub fn unmatched_region(&self) -> Self {
        Self {
            replot: true,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn after_map_repaint(&self) -> Self {
        Self {
            replot: false,
            ..self.clone()
        }
    }
}

pub fn clamp_year(year: i32) -> i32 {
    year.clamp(FIRST_YEAR, LAST_YEAR)
}

use crate::error::DashboardError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// First year covered by the dependency datasets.
pub const FIRST_YEAR: i32 = 2000;
/// Last year covered by the dependency datasets.
pub const LAST_YEAR: i32 = 2020;
/// EU-27 total row, used as the default and fallback country.
pub const AGGREGATE_REGION: &str = "EU27_2020";
/// External trade partner the dependency percentages are measured against.
pub const DEFAULT_PARTNER: &str = "Russia";

/// An sRGB colour without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Perceived brightness in `0.0..=1.0`.
    pub fn luminance(self) -> f64 {
        (0.2126 * f64::from(self.0) + 0.7152 * f64::from(self.1) + 0.0722 * f64::from(self.2))
            / 255.0
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(value: Rgb) -> Self {
        Self::Rgb(value.0, value.1, value.2)
    }
}

// Sequential brewer ramps, lightest first.
const GREENS: [Rgb; 8] = [
    Rgb::from_hex(0xf7fcf5),
    Rgb::from_hex(0xe5f5e0),
    Rgb::from_hex(0xc7e9c0),
    Rgb::from_hex(0xa1d99b),
    Rgb::from_hex(0x74c476),
    Rgb::from_hex(0x41ab5d),
    Rgb::from_hex(0x238b45),
    Rgb::from_hex(0x005a32),
];

const BLUES: [Rgb; 8] = [
    Rgb::from_hex(0xf7fbff),
    Rgb::from_hex(0xdeebf7),
    Rgb::from_hex(0xc6dbef),
    Rgb::from_hex(0x9ecae1),
    Rgb::from_hex(0x6baed6),
    Rgb::from_hex(0x4292c6),
    Rgb::from_hex(0x2171b5),
    Rgb::from_hex(0x084594),
];

const ORANGES: [Rgb; 8] = [
    Rgb::from_hex(0xfff5eb),
    Rgb::from_hex(0xfee6ce),
    Rgb::from_hex(0xfdd0a2),
    Rgb::from_hex(0xfdae6b),
    Rgb::from_hex(0xfd8d3c),
    Rgb::from_hex(0xf16913),
    Rgb::from_hex(0xd94801),
    Rgb::from_hex(0x8c2d04),
];

/// The selectable energy-import category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Commodity {
    #[serde(rename = "Natural Gas")]
    NaturalGas,
    #[serde(rename = "Oil Petrol")]
    OilPetrol,
    #[serde(rename = "Solid Fuel")]
    SolidFuel,
}

impl Commodity {
    pub const ALL: [Self; 3] = [Self::NaturalGas, Self::OilPetrol, Self::SolidFuel];

    /// Key used in the `commodity` column of the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NaturalGas => "natural_gas",
            Self::OilPetrol => "oil_petrol",
            Self::SolidFuel => "solid_fuel",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::NaturalGas),
            1 => Some(Self::OilPetrol),
            2 => Some(Self::SolidFuel),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::NaturalGas => 0,
            Self::OilPetrol => 1,
            Self::SolidFuel => 2,
        }
    }

    /// Accepts either the storage key or the display label, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "natural gas" => Some(Self::NaturalGas),
            "oil petrol" => Some(Self::OilPetrol),
            "solid fuel" => Some(Self::SolidFuel),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NaturalGas => "Natural Gas",
            Self::OilPetrol => "Oil Petrol",
            Self::SolidFuel => "Solid Fuel",
        }
    }

    /// Unit of the absolute import values in the exporter breakdown.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::NaturalGas => "million m3",
            Self::OilPetrol | Self::SolidFuel => "thousand tonnes",
        }
    }

    /// Choropleth ramp for this commodity, lightest colour first.
    pub const fn palette(self) -> &'static [Rgb; 8] {
        match self {
            Self::NaturalGas => &GREENS,
            Self::OilPetrol => &BLUES,
            Self::SolidFuel => &ORANGES,
        }
    }

    pub const fn line_color(self) -> Rgb {
        match self {
            Self::NaturalGas => Rgb(0, 128, 0),
            Self::OilPetrol => Rgb(0, 0, 255),
            Self::SolidFuel => Rgb(255, 165, 0),
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Commodity {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DashboardError::UnknownCommodity(s.to_string()))
    }
}

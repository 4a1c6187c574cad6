//! Built-in demonstration dataset.
//!
//! Coarse outlines for a set of European countries and deterministic,
//! plausible-looking dependency figures, so the dashboard can be explored
//! without the Eurostat extracts. Norway, Switzerland, the United Kingdom and
//! Ukraine have outlines but no dependency rows.

use crate::domain::{Commodity, AGGREGATE_REGION, DEFAULT_PARTNER, FIRST_YEAR, LAST_YEAR};
use crate::store::{DependencyRow, ExporterRow};
use geo::{LineString, MultiPolygon, Polygon};

/// Reporting countries and their baseline gas dependency in percent.
const REPORTERS: &[(&str, f64)] = &[
    (AGGREGATE_REGION, 41.0),
    ("Austria", 64.0),
    ("Bulgaria", 88.0),
    ("Czechia", 72.0),
    ("Estonia", 91.0),
    ("Finland", 96.0),
    ("France", 16.0),
    ("Germany", 47.0),
    ("Greece", 52.0),
    ("Hungary", 79.0),
    ("Italy", 36.0),
    ("Latvia", 93.0),
    ("Lithuania", 87.0),
    ("Poland", 68.0),
    ("Portugal", 2.5),
    ("Romania", 21.0),
    ("Slovakia", 84.0),
    ("Spain", 9.0),
    ("Sweden", 6.0),
];

/// Exporting partners other than the tracked one, with their continent and weight.
const OTHER_PARTNERS: &[(&str, &str, f64)] = &[
    ("Norway", "Europe", 0.35),
    ("Algeria", "Africa", 0.18),
    ("Libya", "Africa", 0.07),
    ("Qatar", "Asia", 0.14),
    ("Kazakhstan", "Asia", 0.08),
    ("United States", "America", 0.12),
    ("Colombia", "America", 0.06),
];

/// Everything the seeder writes.
#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub dependencies: Vec<(Commodity, DependencyRow)>,
    pub exporters: Vec<(Commodity, ExporterRow)>,
    pub regions: Vec<(String, MultiPolygon<f64>)>,
}

pub fn demo_dataset() -> DemoDataset {
    let mut dependencies = Vec::new();
    let mut exporters = Vec::new();

    for commodity in Commodity::ALL {
        for (country_index, &(country, base)) in REPORTERS.iter().enumerate() {
            let volume = total_volume(commodity, country_index);
            for year in FIRST_YEAR..=LAST_YEAR {
                let pct = dependency_pct(commodity, base, country_index, year);
                dependencies.push((
                    commodity,
                    DependencyRow {
                        country: country.to_string(),
                        year,
                        import: pct,
                    },
                ));

                exporters.extend(
                    breakdown(country, year, pct, volume)
                        .into_iter()
                        .map(|row| (commodity, row)),
                );
            }
        }
    }

    let regions = OUTLINES
        .iter()
        .map(|(country, ring)| {
            (
                (*country).to_string(),
                MultiPolygon::new(vec![Polygon::new(LineString::from(ring.to_vec()), Vec::new())]),
            )
        })
        .collect();

    DemoDataset {
        dependencies,
        exporters,
        regions,
    }
}

fn dependency_pct(commodity: Commodity, base: f64, country_index: usize, year: i32) -> f64 {
    let scale = match commodity {
        Commodity::NaturalGas => 1.0,
        Commodity::OilPetrol => 0.55,
        Commodity::SolidFuel => 0.8,
    };
    let phase = f64::from(year - FIRST_YEAR).mul_add(0.7, country_index as f64);
    let trend = f64::from(year - FIRST_YEAR) * 0.35;
    (base * scale + 6.0 * phase.sin() + trend).clamp(0.0, 100.0)
}

fn total_volume(commodity: Commodity, country_index: usize) -> f64 {
    let base = match commodity {
        Commodity::NaturalGas => 9_000.0,
        Commodity::OilPetrol => 14_000.0,
        Commodity::SolidFuel => 3_500.0,
    };
    if country_index == 0 {
        base * 12.0
    } else {
        base * (1.0 + (country_index % 5) as f64 * 0.6)
    }
}

fn breakdown(country: &str, year: i32, pct: f64, volume: f64) -> Vec<ExporterRow> {
    let tracked = volume * pct / 100.0;
    let rest = volume - tracked;

    let mut rows = vec![ExporterRow {
        country: country.to_string(),
        year,
        partner: DEFAULT_PARTNER.to_string(),
        continent: "Europe".to_string(),
        import: tracked,
    }];

    rows.extend(OTHER_PARTNERS.iter().map(|&(partner, continent, weight)| {
        // Libya and Kazakhstan report nothing for part of the range
        let active = match partner {
            "Libya" => year >= 2010,
            "Kazakhstan" => year < 2016,
            _ => true,
        };
        ExporterRow {
            country: country.to_string(),
            year,
            partner: partner.to_string(),
            continent: continent.to_string(),
            import: if active { rest * weight } else { 0.0 },
        }
    }));

    rows
}

/// `(country, ring)`; rings are closed on construction.
const OUTLINES: &[(&str, &[(f64, f64)])] = &[
    ("Portugal", &[(-9.5, 37.0), (-7.4, 37.2), (-6.9, 41.9), (-8.9, 41.9)]),
    (
        "Spain",
        &[
            (-9.3, 43.2), (-1.8, 43.4), (3.2, 42.4), (0.3, 40.1), (-0.8, 37.6),
            (-5.6, 36.0), (-7.4, 37.2), (-6.9, 41.9), (-8.9, 41.9),
        ],
    ),
    (
        "France",
        &[
            (-4.7, 48.4), (-1.8, 43.4), (3.2, 42.4), (7.5, 43.8), (6.0, 46.2),
            (7.6, 47.6), (8.2, 48.9), (6.0, 49.5), (2.5, 51.1),
        ],
    ),
    (
        "Switzerland",
        &[(6.0, 46.2), (6.8, 45.9), (10.5, 46.5), (9.6, 47.5), (7.6, 47.6)],
    ),
    (
        "Italy",
        &[
            (7.5, 43.8), (6.8, 45.9), (10.5, 46.5), (12.4, 47.0), (13.7, 45.7),
            (12.4, 44.2), (16.0, 41.5), (18.5, 40.1), (15.6, 38.0), (12.0, 41.9),
        ],
    ),
    (
        "Germany",
        &[
            (6.0, 49.5), (8.2, 48.9), (7.6, 47.6), (9.6, 47.5), (13.0, 47.5),
            (13.8, 48.8), (12.1, 50.3), (15.0, 51.1), (14.2, 53.9), (8.6, 54.9),
            (7.0, 53.3),
        ],
    ),
    (
        "Poland",
        &[
            (14.2, 53.9), (15.0, 51.1), (18.8, 49.5), (22.6, 49.1), (24.1, 50.8),
            (23.5, 53.9), (19.4, 54.4),
        ],
    ),
    (
        "Czechia",
        &[(12.1, 50.3), (13.8, 48.8), (16.9, 48.6), (18.8, 49.5), (15.0, 51.1)],
    ),
    (
        "Austria",
        &[
            (9.6, 47.5), (10.5, 46.5), (13.7, 46.5), (16.5, 46.5), (17.1, 48.0),
            (16.9, 48.6), (13.8, 48.8), (13.0, 47.5),
        ],
    ),
    (
        "Hungary",
        &[(16.5, 46.5), (18.8, 45.8), (21.0, 46.2), (22.9, 48.0), (18.8, 48.1), (17.1, 48.0)],
    ),
    (
        "Slovakia",
        &[(16.9, 48.6), (17.1, 48.0), (18.8, 48.1), (22.9, 48.0), (22.6, 49.1), (18.8, 49.5)],
    ),
    (
        "Romania",
        &[(21.0, 46.2), (22.9, 48.0), (28.2, 48.2), (29.7, 45.4), (28.6, 43.7), (22.7, 44.2)],
    ),
    (
        "Bulgaria",
        &[(22.7, 44.2), (28.6, 43.7), (28.0, 42.0), (22.4, 41.3), (22.4, 42.4)],
    ),
    (
        "Greece",
        &[(20.2, 39.6), (22.4, 41.3), (26.3, 41.7), (24.0, 40.7), (23.0, 38.0), (22.0, 36.4), (21.0, 38.0)],
    ),
    (
        "Lithuania",
        &[(21.0, 56.0), (26.6, 55.7), (25.8, 54.2), (23.5, 53.9), (22.7, 54.4), (21.0, 55.3)],
    ),
    (
        "Latvia",
        &[(21.0, 56.0), (21.0, 57.5), (24.3, 57.8), (27.7, 57.5), (28.2, 56.2), (26.6, 55.7)],
    ),
    (
        "Estonia",
        &[(23.5, 59.3), (28.0, 59.4), (27.4, 57.6), (24.3, 57.8), (23.4, 58.5)],
    ),
    (
        "Finland",
        &[
            (21.3, 60.6), (25.0, 60.2), (27.9, 60.5), (30.0, 62.0), (29.0, 66.0),
            (29.6, 69.0), (28.4, 70.0), (25.0, 68.6), (21.0, 69.0), (23.9, 66.0),
            (21.4, 63.5),
        ],
    ),
    (
        "Sweden",
        &[
            (11.1, 58.9), (12.8, 55.5), (14.3, 55.5), (16.5, 57.0), (18.9, 59.8),
            (17.2, 61.3), (21.4, 63.5), (23.9, 66.0), (21.0, 69.0), (16.0, 68.0),
            (12.0, 65.0), (12.3, 61.0),
        ],
    ),
    (
        "Norway",
        &[
            (5.0, 58.5), (11.1, 58.9), (12.3, 61.0), (12.0, 65.0), (16.0, 68.0),
            (21.0, 69.0), (28.4, 70.0), (25.0, 71.0), (15.0, 69.5), (10.0, 64.0),
            (5.0, 62.0),
        ],
    ),
    (
        "United Kingdom",
        &[
            (-5.7, 50.0), (1.4, 51.2), (1.7, 52.7), (-0.1, 54.5), (-1.6, 55.6),
            (-2.0, 57.7), (-3.0, 58.6), (-5.0, 58.6), (-6.2, 56.8), (-4.9, 55.0),
            (-3.1, 53.4), (-4.6, 52.1), (-5.3, 51.7),
        ],
    ),
    (
        "Ukraine",
        &[
            (22.9, 48.0), (22.6, 49.1), (24.1, 50.8), (23.6, 51.5), (30.5, 51.5),
            (34.5, 52.0), (40.1, 49.6), (38.0, 47.0), (33.5, 46.0), (29.7, 45.4),
            (28.2, 48.2),
        ],
    ),
];

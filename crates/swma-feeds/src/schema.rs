//! Declarative descriptions of the time-series feeds.
//!
//! A [`FeedSchema`] says where the timestamp, the value columns and the
//! optional category live in each record. The catalog functions at the
//! bottom describe every SWPC feed SWMA plots.

use serde_json::Value;
use swma_common::Unit;

/// Shape of one record in the payload array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Array of objects, fields addressed by key.
    Records,
    /// Array of fixed-position arrays, fields addressed by index.
    Rows,
}

/// Where a field lives in a record.
///
/// `key` is the object key for [`Layout::Records`] and the header cell for
/// [`Layout::Rows`]; `position` is only used for rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    /// Field name.
    pub key: &'static str,
    /// Column index in row layouts.
    pub position: Option<usize>,
}

impl FieldRef {
    /// A field addressed by object key.
    pub const fn key(key: &'static str) -> Self {
        Self { key, position: None }
    }

    /// A field addressed by row position, `key` naming its header cell.
    pub const fn at(position: usize, key: &'static str) -> Self {
        Self {
            key,
            position: Some(position),
        }
    }

    /// Looks the field up in one record.
    ///
    /// `None` means the key or position is absent, which differs from a
    /// present JSON `null`.
    pub fn lookup<'a>(&self, layout: Layout, record: &'a Value) -> Option<&'a Value> {
        match layout {
            Layout::Records => record.get(self.key),
            Layout::Rows => self.position.and_then(|index| record.get(index)),
        }
    }
}

/// One value column of the normalized series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Source field.
    pub field: FieldRef,
    /// Column name in the series.
    pub name: &'static str,
    /// Physical unit.
    pub unit: Unit,
}

/// A declared category of a split feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Value of the category field in the feed, e.g. `0.1-0.8nm`.
    pub key: &'static str,
    /// Legend label.
    pub label: &'static str,
    /// Named display color.
    pub color: &'static str,
}

impl Category {
    /// Creates a declared category.
    pub const fn new(key: &'static str, label: &'static str, color: &'static str) -> Self {
        Self { key, label, color }
    }
}

/// How rows are partitioned into sub-series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Field holding the category.
    pub field: FieldRef,
    /// Declared categories in display order. Empty means keep every
    /// category in first-appearance order.
    pub categories: Vec<Category>,
}

/// Declarative description of one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSchema {
    /// Feed name used in errors and logs.
    pub name: &'static str,
    /// Record shape.
    pub layout: Layout,
    /// Timestamp field.
    pub time: FieldRef,
    /// Value columns.
    pub columns: Vec<ColumnSpec>,
    /// Optional category split.
    pub split: Option<Split>,
}

impl FeedSchema {
    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

/// Long GOES XRS band.
pub const XRAY_LONG: &str = "0.1-0.8nm";
/// Short GOES XRS band.
pub const XRAY_SHORT: &str = "0.05-0.4nm";

/// GOES soft X-ray flux, two interleaved wavelength bands.
pub fn xrays() -> FeedSchema {
    FeedSchema {
        name: "xrays",
        layout: Layout::Records,
        time: FieldRef::key("time_tag"),
        columns: vec![ColumnSpec {
            field: FieldRef::key("flux"),
            name: "flux",
            unit: Unit::WattsPerSquareMeter,
        }],
        split: Some(Split {
            field: FieldRef::key("energy"),
            categories: vec![
                Category::new(XRAY_LONG, XRAY_LONG, "red"),
                Category::new(XRAY_SHORT, XRAY_SHORT, "blue"),
            ],
        }),
    }
}

/// Integral proton channel keys, lowest energy first.
pub const PROTON_CHANNELS: [&str; 5] = [">=1 MeV", ">=10 MeV", ">=50 MeV", ">=100 MeV", ">=500 MeV"];

/// GOES integral proton flux, five interleaved energy channels.
pub fn integral_protons() -> FeedSchema {
    FeedSchema {
        name: "integral-protons",
        layout: Layout::Records,
        time: FieldRef::key("time_tag"),
        columns: vec![ColumnSpec {
            field: FieldRef::key("flux"),
            name: "flux",
            unit: Unit::ParticleFlux,
        }],
        split: Some(Split {
            field: FieldRef::key("energy"),
            categories: vec![
                Category::new(PROTON_CHANNELS[0], "GOES->1MeV", "orange"),
                Category::new(PROTON_CHANNELS[1], "GOES->10MeV", "red"),
                Category::new(PROTON_CHANNELS[2], "GOES->50MeV", "blue"),
                Category::new(PROTON_CHANNELS[3], "GOES->100MeV", "green"),
                Category::new(PROTON_CHANNELS[4], "GOES->500MeV", "black"),
            ],
        }),
    }
}

/// Forecast categories of `solar_probabilities.json`.
pub const FORECAST_KINDS: [&str; 4] = ["c_class", "m_class", "x_class", "10mev_protons"];

/// Daily flare and proton event probabilities, one record per day.
///
/// Columns are named `<kind>_<n>_day` for every kind in
/// [`FORECAST_KINDS`] and n in 1..=3.
pub fn solar_probabilities() -> FeedSchema {
    const FIELDS: [&str; 12] = [
        "c_class_1_day",
        "c_class_2_day",
        "c_class_3_day",
        "m_class_1_day",
        "m_class_2_day",
        "m_class_3_day",
        "x_class_1_day",
        "x_class_2_day",
        "x_class_3_day",
        "10mev_protons_1_day",
        "10mev_protons_2_day",
        "10mev_protons_3_day",
    ];

    FeedSchema {
        name: "solar-probabilities",
        layout: Layout::Records,
        time: FieldRef::key("date"),
        columns: FIELDS
            .iter()
            .map(|&field| ColumnSpec {
                field: FieldRef::key(field),
                name: field,
                unit: Unit::Percent,
            })
            .collect(),
        split: None,
    }
}

/// Solar wind plasma moments.
pub fn solar_wind_plasma() -> FeedSchema {
    FeedSchema {
        name: "plasma-1-day",
        layout: Layout::Rows,
        time: FieldRef::at(0, "time_tag"),
        columns: vec![
            ColumnSpec {
                field: FieldRef::at(1, "density"),
                name: "density",
                unit: Unit::ProtonDensity,
            },
            ColumnSpec {
                field: FieldRef::at(2, "speed"),
                name: "speed",
                unit: Unit::KilometersPerSecond,
            },
        ],
        split: None,
    }
}

/// Interplanetary magnetic field in GSM coordinates.
pub fn solar_wind_mag() -> FeedSchema {
    FeedSchema {
        name: "mag-1-day",
        layout: Layout::Rows,
        time: FieldRef::at(0, "time_tag"),
        columns: vec![
            ColumnSpec {
                field: FieldRef::at(3, "bz_gsm"),
                name: "bz",
                unit: Unit::NanoTesla,
            },
            ColumnSpec {
                field: FieldRef::at(6, "bt"),
                name: "bt",
                unit: Unit::NanoTesla,
            },
        ],
        split: None,
    }
}

/// Planetary K-index, three-hour cadence.
pub fn planetary_k_index() -> FeedSchema {
    FeedSchema {
        name: "noaa-planetary-k-index",
        layout: Layout::Rows,
        time: FieldRef::at(0, "time_tag"),
        columns: vec![ColumnSpec {
            field: FieldRef::at(1, "Kp"),
            name: "kp",
            unit: Unit::Dimensionless,
        }],
        split: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_by_layout() {
        let record = json!({"flux": 1.0});
        let row = json!(["2023-01-01", "4.2"]);

        assert_eq!(FieldRef::key("flux").lookup(Layout::Records, &record), Some(&json!(1.0)));
        assert_eq!(FieldRef::at(1, "density").lookup(Layout::Rows, &row), Some(&json!("4.2")));
        assert_eq!(FieldRef::at(5, "bt").lookup(Layout::Rows, &row), None);
        assert_eq!(FieldRef::key("flux").lookup(Layout::Rows, &row), None);
    }

    #[test]
    fn test_probabilities_columns() {
        let schema = solar_probabilities();
        assert_eq!(schema.columns.len(), 12);
        for kind in FORECAST_KINDS {
            for day in 1..=3 {
                assert!(schema.column_index(&format!("{kind}_{day}_day")).is_some());
            }
        }
    }

    #[test]
    fn test_split_feeds_declare_categories() {
        assert_eq!(xrays().split.map(|s| s.categories.len()), Some(2));
        let protons = integral_protons();
        let keys: Vec<_> = protons
            .split
            .iter()
            .flat_map(|s| s.categories.iter().map(|c| c.key))
            .collect();
        assert_eq!(keys, PROTON_CHANNELS);
    }
}

//! Schema-driven conversion of feed payloads into time-indexed series.

use crate::schema::{FeedSchema, FieldRef, Layout};
use serde_json::Value;
use swma_common::{parse_timestamp, Result, SwmaError, Timestamp, Unit};
use tracing::debug;

/// A named value column with its unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Physical unit.
    pub unit: Unit,
}

/// One timestamp and one value per column; `None` is a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Ordering key.
    pub timestamp: Timestamp,
    /// Values in column order.
    pub values: Vec<Option<f64>>,
}

/// Observations of one category, strictly increasing in time.
#[derive(Debug, Clone, PartialEq)]
pub struct SubSeries {
    /// Category key as found in the feed; `None` for unsplit feeds.
    pub category: Option<String>,
    /// Legend label.
    pub label: String,
    /// Named display color, if the schema declares one.
    pub color: Option<String>,
    /// Time-ordered observations.
    pub observations: Vec<Observation>,
}

impl SubSeries {
    /// Whether there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First and last timestamp.
    pub fn window(&self) -> Result<(Timestamp, Timestamp)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Ok((first.timestamp, last.timestamp)),
            _ => Err(SwmaError::empty_series(format!("sub-series '{}'", self.label))),
        }
    }

    /// Present values of one column, paired with their timestamps.
    pub fn points(&self, column: usize) -> impl Iterator<Item = (Timestamp, f64)> + '_ {
        self.observations.iter().filter_map(move |observation| {
            observation
                .values
                .get(column)
                .copied()
                .flatten()
                .map(|value| (observation.timestamp, value))
        })
    }

    /// Most recent observation.
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

/// A normalized feed: columns plus one or more disjoint sub-series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Feed name.
    pub feed: String,
    /// Value columns.
    pub columns: Vec<Column>,
    /// Sub-series, in declared or first-appearance order.
    pub subseries: Vec<SubSeries>,
}

impl Series {
    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Index of a column by name, or a schema error naming the feed.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| SwmaError::schema(&self.feed, name, "no such column"))
    }

    /// Sub-series for a category key.
    pub fn category(&self, key: &str) -> Option<&SubSeries> {
        self.subseries
            .iter()
            .find(|sub| sub.category.as_deref() == Some(key))
    }

    /// The only sub-series of an unsplit feed, or the first of a split one.
    pub fn primary(&self) -> Result<&SubSeries> {
        self.subseries
            .first()
            .ok_or_else(|| SwmaError::empty_series(self.feed.clone()))
    }

    /// Total number of observations across sub-series.
    pub fn len(&self) -> usize {
        self.subseries.iter().map(|sub| sub.observations.len()).sum()
    }

    /// Whether every sub-series is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Row {
    timestamp: Timestamp,
    category: Option<String>,
    values: Vec<Option<f64>>,
}

/// Converts a raw JSON payload into a [`Series`] according to `schema`.
///
/// # Errors
///
/// * [`SwmaError::Format`] if the payload is not an array or a record has
///   the wrong shape for the layout
/// * [`SwmaError::Schema`] if a field is absent or a cell does not parse
/// * [`SwmaError::EmptySeries`] if there are no data records
pub fn normalize(schema: &FeedSchema, payload: &Value) -> Result<Series> {
    let records = payload
        .as_array()
        .ok_or_else(|| SwmaError::format(format!("{} payload is not a JSON array", schema.name)))?;

    let records = match (schema.layout, records.split_first()) {
        (Layout::Rows, Some((first, rest))) if is_header(schema, first) => rest,
        _ => records.as_slice(),
    };
    if records.is_empty() {
        return Err(SwmaError::empty_series(schema.name));
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| read_row(schema, index, record))
        .collect::<Result<Vec<_>>>()?;

    let buckets = partition(schema, rows);
    let subseries = buckets
        .into_iter()
        .map(|(category, label, color, rows)| SubSeries {
            observations: into_observations(schema.name, &label, rows),
            category,
            label,
            color,
        })
        .collect();

    let series = Series {
        feed: schema.name.to_string(),
        columns: schema
            .columns
            .iter()
            .map(|spec| Column {
                name: spec.name.to_string(),
                unit: spec.unit,
            })
            .collect(),
        subseries,
    };
    debug!(feed = schema.name, records = records.len(), observations = series.len(), "Normalized feed");
    Ok(series)
}

fn is_header(schema: &FeedSchema, record: &Value) -> bool {
    schema
        .time
        .lookup(Layout::Rows, record)
        .and_then(Value::as_str)
        .is_some_and(|cell| cell == schema.time.key)
}

fn read_row(schema: &FeedSchema, index: usize, record: &Value) -> Result<Row> {
    let shape_ok = match schema.layout {
        Layout::Records => record.is_object(),
        Layout::Rows => record.is_array(),
    };
    if !shape_ok {
        return Err(SwmaError::format(format!(
            "{} record {index} is not {}",
            schema.name,
            match schema.layout {
                Layout::Records => "an object",
                Layout::Rows => "an array",
            }
        )));
    }

    let raw_time = require(schema, &schema.time, index, record)?;
    let timestamp = raw_time
        .as_str()
        .and_then(parse_timestamp)
        .ok_or_else(|| {
            SwmaError::schema(schema.name, schema.time.key, format!("record {index}: bad timestamp {raw_time}"))
        })?;

    let category = match &schema.split {
        Some(split) => Some(category_key(schema, &split.field, index, record)?),
        None => None,
    };

    let values = schema
        .columns
        .iter()
        .map(|spec| {
            let cell = require(schema, &spec.field, index, record)?;
            numeric(cell).ok_or_else(|| {
                SwmaError::schema(schema.name, spec.field.key, format!("record {index}: {cell} is not numeric"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Row {
        timestamp,
        category,
        values,
    })
}

fn require<'a>(schema: &FeedSchema, field: &FieldRef, index: usize, record: &'a Value) -> Result<&'a Value> {
    field
        .lookup(schema.layout, record)
        .ok_or_else(|| SwmaError::schema(schema.name, field.key, format!("record {index}: field is missing")))
}

fn category_key(schema: &FeedSchema, field: &FieldRef, index: usize, record: &Value) -> Result<String> {
    match require(schema, field, index, record)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SwmaError::schema(
            schema.name,
            field.key,
            format!("record {index}: {other} is not a category"),
        )),
    }
}

/// Numbers and numeric strings are values; `null` is a missing value.
/// `Some(None)` therefore means "present but missing".
fn numeric(cell: &Value) -> Option<Option<f64>> {
    match cell {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().map(Some),
        Value::String(s) => s.trim().parse::<f64>().ok().map(Some),
        _ => None,
    }
}

type Bucket = (Option<String>, String, Option<String>, Vec<Row>);

fn partition(schema: &FeedSchema, rows: Vec<Row>) -> Vec<Bucket> {
    let Some(split) = &schema.split else {
        return vec![(None, schema.name.to_string(), None, rows)];
    };

    if split.categories.is_empty() {
        let mut buckets: Vec<Bucket> = Vec::new();
        for row in rows {
            let key = row.category.clone().unwrap_or_default();
            match buckets.iter_mut().find(|bucket| bucket.0.as_deref() == Some(key.as_str())) {
                Some(bucket) => bucket.3.push(row),
                None => buckets.push((Some(key.clone()), key, None, vec![row])),
            }
        }
        return buckets;
    }

    let mut buckets: Vec<Bucket> = split
        .categories
        .iter()
        .map(|c| {
            (
                Some(c.key.to_string()),
                c.label.to_string(),
                Some(c.color.to_string()),
                Vec::new(),
            )
        })
        .collect();

    let mut undeclared = 0usize;
    for row in rows {
        let slot = split
            .categories
            .iter()
            .position(|c| row.category.as_deref() == Some(c.key));
        match slot {
            Some(slot) => buckets[slot].3.push(row),
            None => undeclared += 1,
        }
    }
    if undeclared > 0 {
        debug!(feed = schema.name, undeclared, "Skipped records of undeclared categories");
    }
    buckets
}

fn into_observations(feed: &str, label: &str, mut rows: Vec<Row>) -> Vec<Observation> {
    // Stable sort keeps payload order among equal timestamps, so dedup
    // below retains the first occurrence.
    rows.sort_by_key(|row| row.timestamp);
    let before = rows.len();
    rows.dedup_by_key(|row| row.timestamp);
    let dropped = before - rows.len();
    if dropped > 0 {
        debug!(feed, sub_series = label, dropped, "Dropped duplicate timestamps");
    }

    rows.into_iter()
        .map(|row| Observation {
            timestamp: row.timestamp,
            values: row.values,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{self, Category, ColumnSpec, Split};
    use serde_json::json;
    use swma_common::{
        format_minute,
        test_utils::{assert_approx_eq, feed_fixtures, mock_timestamp},
    };

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_plasma_scenario() {
        let payload = json!([["2023-01-01T00:00:00", "4.2", "430.5"]]);
        let series = normalize(&schema::solar_wind_plasma(), &payload).unwrap();

        let latest = series.primary().unwrap().latest().unwrap();
        assert_eq!(format_minute(latest.timestamp), "2023-01-01T00:00");
        assert_eq!(latest.values, vec![Some(4.2), Some(430.5)]);
        assert_eq!(series.columns[0].unit, Unit::ProtonDensity);
        assert_eq!(series.columns[1].unit, Unit::KilometersPerSecond);
    }

    #[test]
    fn test_header_row_is_skipped() {
        let series = normalize(&schema::solar_wind_plasma(), &parse(feed_fixtures::PLASMA)).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_xray_bands_split_into_two() {
        let series = normalize(&schema::xrays(), &parse(feed_fixtures::XRAYS)).unwrap();

        assert_eq!(series.subseries.len(), 2);
        let long = series.category(schema::XRAY_LONG).unwrap();
        let short = series.category(schema::XRAY_SHORT).unwrap();
        assert_eq!(long.observations.len(), 3);
        assert_eq!(short.observations.len(), 3);
        assert_eq!(long.color.as_deref(), Some("red"));
        assert_approx_eq(long.observations[1].values[0].unwrap(), 1.3e-6, 1e-12);
        assert!(long
            .observations
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_empty_payload() {
        let err = normalize(&schema::xrays(), &json!([])).unwrap_err();
        assert!(matches!(err, SwmaError::EmptySeries { .. }));
    }

    #[test]
    fn test_header_only_payload_is_empty() {
        let err = normalize(&schema::planetary_k_index(), &json!([["time_tag", "Kp"]])).unwrap_err();
        assert!(matches!(err, SwmaError::EmptySeries { .. }));
    }

    #[test]
    fn test_not_an_array_is_format_error() {
        let err = normalize(&schema::xrays(), &json!({"flux": 1})).unwrap_err();
        assert!(matches!(err, SwmaError::Format { .. }));
    }

    #[test]
    fn test_wrong_record_shape_is_format_error() {
        let err = normalize(&schema::solar_wind_plasma(), &json!([{"time_tag": "2023-01-01"}])).unwrap_err();
        assert!(matches!(err, SwmaError::Format { .. }));
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let payload = json!([{"time_tag": "2023-01-01T00:00:00Z", "energy": "0.1-0.8nm"}]);
        let err = normalize(&schema::xrays(), &payload).unwrap_err();
        assert!(matches!(err, SwmaError::Schema { ref field, .. } if field == "flux"));
    }

    #[test]
    fn test_short_row_is_schema_error() {
        let err = normalize(&schema::solar_wind_mag(), &json!([["2023-01-01 00:00:00.000", "1.2"]])).unwrap_err();
        assert!(matches!(err, SwmaError::Schema { ref field, .. } if field == "bz_gsm"));
    }

    #[test]
    fn test_bad_cells_are_schema_errors() {
        let bad_time = json!([["yesterday", "4.2", "430.5"]]);
        assert!(matches!(
            normalize(&schema::solar_wind_plasma(), &bad_time).unwrap_err(),
            SwmaError::Schema { .. }
        ));

        let bad_value = json!([["2023-01-01", "fast", "430.5"]]);
        assert!(matches!(
            normalize(&schema::solar_wind_plasma(), &bad_value).unwrap_err(),
            SwmaError::Schema { .. }
        ));
    }

    #[test]
    fn test_null_cell_is_missing_value() {
        let payload = json!([["2023-01-01 00:00:00.000", null, "430.5"]]);
        let series = normalize(&schema::solar_wind_plasma(), &payload).unwrap();
        let sub = series.primary().unwrap();
        assert_eq!(sub.observations[0].values, vec![None, Some(430.5)]);
        assert_eq!(sub.points(0).count(), 0);
        assert_eq!(sub.points(1).count(), 1);
    }

    #[test]
    fn test_unsorted_input_and_duplicates() {
        let payload = json!([
            ["time_tag", "Kp"],
            ["2023-01-01 03:00:00.000", "3.00"],
            ["2023-01-01 00:00:00.000", "2.33"],
            ["2023-01-01 03:00:00.000", "9.00"]
        ]);
        let series = normalize(&schema::planetary_k_index(), &payload).unwrap();
        let sub = series.primary().unwrap();

        assert_eq!(sub.observations.len(), 2);
        assert_eq!(sub.observations[0].timestamp, mock_timestamp(2023, 1, 1, 0, 0, 0));
        assert_eq!(sub.observations[1].values, vec![Some(3.0)]);
    }

    #[test]
    fn test_declared_category_order_and_undeclared_rows() {
        let mut schema = schema::xrays();
        if let Some(split) = schema.split.as_mut() {
            split.categories.truncate(1);
        }
        let series = normalize(&schema, &parse(feed_fixtures::XRAYS)).unwrap();
        assert_eq!(series.subseries.len(), 1);
        assert_eq!(series.subseries[0].category.as_deref(), Some(schema::XRAY_LONG));
    }

    #[test]
    fn test_first_appearance_order_without_declared_categories() {
        let schema = FeedSchema {
            name: "channels",
            layout: Layout::Records,
            time: FieldRef::key("t"),
            columns: vec![ColumnSpec {
                field: FieldRef::key("v"),
                name: "v",
                unit: Unit::Dimensionless,
            }],
            split: Some(Split {
                field: FieldRef::key("c"),
                categories: Vec::new(),
            }),
        };
        let payload = json!([
            {"t": "2023-01-01T00:00", "v": 1, "c": "b"},
            {"t": "2023-01-01T00:00", "v": 2, "c": 7},
            {"t": "2023-01-01T00:01", "v": 3, "c": "b"}
        ]);

        let series = normalize(&schema, &payload).unwrap();
        let order: Vec<_> = series.subseries.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(order, ["b", "7"]);
    }

    #[test]
    fn test_declared_category_without_rows_is_kept_empty() {
        let mut schema = schema::xrays();
        if let Some(split) = schema.split.as_mut() {
            split.categories.push(Category::new("0.01-0.02nm", "test", "black"));
        }
        let series = normalize(&schema, &parse(feed_fixtures::XRAYS)).unwrap();
        let empty = series.category("0.01-0.02nm").unwrap();
        assert!(empty.is_empty());
        assert!(matches!(empty.window(), Err(SwmaError::EmptySeries { .. })));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let payload = parse(feed_fixtures::PROTONS);
        let first = normalize(&schema::integral_protons(), &payload).unwrap();
        let second = normalize(&schema::integral_protons(), &payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.subseries.len(), 5);
    }
}

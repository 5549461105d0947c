//! Dataset loading
//!
//! The dataset file is the JSON dump of a pandas data frame in one of two
//! orientations:
//!
//! - **columns** (the pandas default): an object mapping each column name to an
//!   object from row index to cell value
//! - **records**: an array of row objects
//!
//! ```json
//! {
//!   "genre": {"0": "Tools", "1": "Games"},
//!   "hostingLocation": {"0": "US", "1": "DE"},
//!   ...
//! }
//! ```
//!
//! Rows of the columns orientation are ordered by numeric row index. Columns
//! that are not part of [`Record`] are ignored, but every column must hold a
//! cell for every row.

use std::{
    collections::{BTreeMap, HashSet},
    io,
};

use serde_json::{Map, Value};

use crate::{
    filter::{FilterCriteria, Selection},
    record::Record,
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("failed to parse dataset JSON")]
    Json(serde_json::Error),
    #[display("dataset must be an array of records or an object of columns")]
    UnexpectedShape,
    #[display("column '{column}' is not an object keyed by row index")]
    InvalidColumn { column: String },
    #[display("column '{column}' has a non-numeric row index '{index}'")]
    InvalidRowIndex { column: String, index: String },
    #[display("column '{column}' has no cell for row {row}")]
    MissingCell { column: String, row: u64 },
    #[display("invalid record at row {row}")]
    InvalidRecord { row: u64, source: serde_json::Error },
}

/// Read-only table of privacy policy records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn from_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        let value = serde_json::from_reader(reader).map_err(DatasetError::Json)?;
        Self::from_json_value(value)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let value = serde_json::from_str(json).map_err(DatasetError::Json)?;
        Self::from_json_value(value)
    }

    /// Builds a dataset from an already parsed JSON document.
    pub fn from_json_value(value: Value) -> Result<Self, DatasetError> {
        let rows = match value {
            Value::Array(items) => (0..).zip(items).collect::<Vec<_>>(),
            Value::Object(columns) => rows_from_columns(columns)?,
            _ => return Err(DatasetError::UnexpectedShape),
        };

        let records = rows
            .into_iter()
            .map(|(row, item)| {
                serde_json::from_value::<Record>(item)
                    .map_err(|source| DatasetError::InvalidRecord { row, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(records = records.len(), "loaded dataset");
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct genres in order of first appearance.
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.genre.as_str()))
    }

    /// Distinct hosting locations in order of first appearance.
    #[must_use]
    pub fn countries(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.hosting_location.as_str()))
    }

    /// Records matching `criteria`, in dataset order.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Selection<'_> {
        Selection::filter(&self.records, criteria)
    }
}

fn distinct<'a, I>(values: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(*v)).collect()
}

fn rows_from_columns(columns: Map<String, Value>) -> Result<Vec<(u64, Value)>, DatasetError> {
    let column_names = columns.keys().cloned().collect::<Vec<_>>();

    let mut rows = BTreeMap::<u64, Map<String, Value>>::new();
    for (column, cells) in columns {
        let Value::Object(cells) = cells else {
            return Err(DatasetError::InvalidColumn { column });
        };
        for (index, cell) in cells {
            let Ok(row) = index.parse::<u64>() else {
                return Err(DatasetError::InvalidRowIndex { column, index });
            };
            rows.entry(row).or_default().insert(column.clone(), cell);
        }
    }

    rows.into_iter()
        .map(|(row, cells)| {
            if let Some(column) = column_names.iter().find(|c| !cells.contains_key(*c)) {
                return Err(DatasetError::MissingCell {
                    column: column.clone(),
                    row,
                });
            }
            Ok((row, Value::Object(cells)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &str = r#"{
        "genre": {"0": "Tools", "2": "Games", "10": "Tools"},
        "hostingLocation": {"0": "US", "2": "DE", "10": "FR"},
        "maxInstalls": {"0": 1000, "2": 50000, "10": 10000000},
        "amountOfInstallsGrouped": {"0": "1k", "2": "50k", "10": "10M+"},
        "isNativelyEnglish": {"0": true, "2": false, "10": true},
        "vagueTotalPercentage": {"0": 1.0, "2": null, "10": 3.0},
        "policyLength": {"0": 100, "2": 200, "10": 300}
    }"#;

    #[test]
    fn test_columns_orientation_orders_rows_numerically() {
        let dataset = Dataset::from_json_str(COLUMNS).unwrap();
        assert_eq!(dataset.len(), 3);
        let countries = dataset
            .records()
            .iter()
            .map(|r| r.hosting_location.as_str())
            .collect::<Vec<_>>();
        // "10" sorts before "2" as a string
        assert_eq!(countries, ["US", "DE", "FR"]);
        assert_eq!(dataset.records()[1].metrics.vague_total_percentage, None);
    }

    #[test]
    fn test_records_orientation() {
        let json = r#"[
            {"genre": "Tools", "hostingLocation": "US", "maxInstalls": 10,
             "amountOfInstallsGrouped": "10", "isNativelyEnglish": "True"},
            {"genre": "Games", "hostingLocation": "US", "maxInstalls": 20,
             "amountOfInstallsGrouped": "20", "isNativelyEnglish": "False"}
        ]"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.genres(), ["Tools", "Games"]);
        assert_eq!(dataset.countries(), ["US"]);
    }

    #[test]
    fn test_options_in_order_of_first_appearance() {
        let dataset = Dataset::from_json_str(COLUMNS).unwrap();
        assert_eq!(dataset.genres(), ["Tools", "Games"]);
        assert_eq!(dataset.countries(), ["US", "DE", "FR"]);
    }

    #[test]
    fn test_missing_cell_is_an_error() {
        let json = r#"{
            "genre": {"0": "Tools", "1": "Games"},
            "hostingLocation": {"0": "US"}
        }"#;
        let err = Dataset::from_json_str(json).unwrap_err();
        assert!(
            matches!(&err, DatasetError::MissingCell { column, row: 1 } if column == "hostingLocation"),
            "{err}"
        );
    }

    #[test]
    fn test_invalid_row_index() {
        let json = r#"{"genre": {"first": "Tools"}}"#;
        assert!(matches!(
            Dataset::from_json_str(json),
            Err(DatasetError::InvalidRowIndex { .. })
        ));
    }

    #[test]
    fn test_invalid_record_reports_row() {
        let json = r#"[{"genre": "Tools"}]"#;
        assert!(matches!(
            Dataset::from_json_str(json),
            Err(DatasetError::InvalidRecord { row: 0, .. })
        ));
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(matches!(
            Dataset::from_json_str("42"),
            Err(DatasetError::UnexpectedShape)
        ));
        assert!(matches!(
            Dataset::from_json_str("{"),
            Err(DatasetError::Json(_))
        ));
    }
}

//! Display-ready post-hoc result table.
//!
//! The table has the label column [`LABEL_COLUMN`] first, followed by one
//! column per group in matrix order. Every cell, including the label cell,
//! carries a tooltip comparing the mean ranks of its row and column group.

use serde::Serialize;
use vagueness_stats::matrix::PValueMatrix;

use crate::mean_rank::MeanRanks;

/// Header of the label column. Also the name of the pseudo-group that has
/// no mean rank.
pub const LABEL_COLUMN: &str = "Country";

/// Number of decimals p-values are rounded to.
pub const P_VALUE_DECIMALS: i32 = 5;

/// Significance band of a p-value, used to highlight cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// p ≥ 0.05
    NotSignificant,
    /// p < 0.05
    Low,
    /// p < 0.01
    Medium,
    /// p < 0.001
    High,
}

impl Significance {
    #[must_use]
    pub fn of(p_value: f64) -> Self {
        if p_value < 0.001 {
            Self::High
        } else if p_value < 0.01 {
            Self::Medium
        } else if p_value < 0.05 {
            Self::Low
        } else {
            Self::NotSignificant
        }
    }

    /// Asterisk marker for text output.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::NotSignificant => "",
            Self::Low => "*",
            Self::Medium => "**",
            Self::High => "***",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosthocCell {
    pub p_value: f64,
    pub significance: Significance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosthocRow {
    /// Group of this row (the label column value)
    pub label: String,
    /// One cell per group column, in column order
    pub cells: Vec<PosthocCell>,
    /// One tooltip per column, label column first
    pub tooltips: Vec<String>,
}

/// Rounded post-hoc p-value table with mean-rank tooltips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosthocTable {
    /// Column headers: [`LABEL_COLUMN`] followed by the group labels
    pub columns: Vec<String>,
    pub rows: Vec<PosthocRow>,
}

impl PosthocTable {
    /// Shapes `matrix` (whose rows and columns follow `labels`) into a table.
    ///
    /// `total` is the number of selected records, shown in every tooltip.
    ///
    /// # Panics
    ///
    /// Panics if the matrix size differs from the number of labels.
    #[must_use]
    pub fn new<S>(labels: &[S], matrix: &PValueMatrix, ranks: &MeanRanks, total: usize) -> Self
    where
        S: AsRef<str>,
    {
        assert_eq!(
            labels.len(),
            matrix.size(),
            "one label per matrix row is required"
        );

        let columns = std::iter::once(LABEL_COLUMN.to_owned())
            .chain(labels.iter().map(|l| l.as_ref().to_owned()))
            .collect::<Vec<_>>();
        let rounded = matrix.rounded(P_VALUE_DECIMALS);

        let rows = labels
            .iter()
            .zip(rounded.rows())
            .map(|(label, p_values)| {
                let label = label.as_ref();
                PosthocRow {
                    label: label.to_owned(),
                    cells: p_values
                        .iter()
                        .map(|&p_value| PosthocCell {
                            p_value,
                            significance: Significance::of(p_value),
                        })
                        .collect(),
                    tooltips: columns
                        .iter()
                        .map(|column| tooltip(label, column, ranks, total))
                        .collect(),
                }
            })
            .collect();

        Self { columns, rows }
    }

    /// Group labels, in column order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns[1..].iter().map(String::as_str)
    }

    /// Rounded p-value of the cell at `row` and group column `col`.
    #[must_use]
    pub fn p_value(&self, row: usize, col: usize) -> f64 {
        self.rows[row].cells[col].p_value
    }
}

/// Tooltip text of the cell comparing `row` with `column`.
///
/// ```
/// use vagueness_analysis::{mean_rank::MeanRanks, table::tooltip};
///
/// let text = tooltip("US", "Country", &MeanRanks::default(), 12);
/// assert_eq!(
///     text,
///     "US with mean rank: None vs Country with mean rank: None. Total N = 12"
/// );
/// ```
#[must_use]
pub fn tooltip(row: &str, column: &str, ranks: &MeanRanks, total: usize) -> String {
    format!(
        "{row} with mean rank: {} vs {column} with mean rank: {}. Total N = {total}",
        ranks.display(row),
        ranks.display(column),
    )
}

#[cfg(test)]
mod tests {
    use vagueness_data::{
        dataset::Dataset,
        filter::FilterCriteria,
        record::{GroupColumn, Metric},
    };

    use super::*;

    fn ranks() -> MeanRanks {
        let dataset = Dataset::from_json_str(
            r#"[
                {"genre": "A", "hostingLocation": "DE", "maxInstalls": 1,
                 "amountOfInstallsGrouped": "1", "isNativelyEnglish": false,
                 "vagueTotalPercentage": 1.0},
                {"genre": "A", "hostingLocation": "US", "maxInstalls": 1,
                 "amountOfInstallsGrouped": "1", "isNativelyEnglish": true,
                 "vagueTotalPercentage": 2.0},
                {"genre": "A", "hostingLocation": "US", "maxInstalls": 1,
                 "amountOfInstallsGrouped": "1", "isNativelyEnglish": true,
                 "vagueTotalPercentage": 3.0}
            ]"#,
        )
        .unwrap();
        let selection = dataset.filter(&FilterCriteria::all(&dataset));
        MeanRanks::new(
            &selection,
            Metric::VagueTotalPercentage,
            GroupColumn::HostingLocation,
        )
    }

    #[test]
    fn test_table_shape_and_rounding() {
        let matrix = PValueMatrix::from_upper_triangle(2, &[0.000_123_456]);
        let table = PosthocTable::new(&["DE", "US"], &matrix, &ranks(), 3);

        assert_eq!(table.columns, ["Country", "DE", "US"]);
        assert_eq!(table.labels().collect::<Vec<_>>(), ["DE", "US"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.p_value(0, 1), 0.00012);
        assert_eq!(table.p_value(1, 0), 0.00012);
        assert_eq!(table.p_value(0, 0), 1.0);
        assert_eq!(table.rows[0].cells[1].significance, Significance::High);
        assert_eq!(table.rows[1].cells[1].significance, Significance::NotSignificant);
    }

    #[test]
    fn test_tooltips() {
        let matrix = PValueMatrix::from_upper_triangle(2, &[0.2]);
        let table = PosthocTable::new(&["DE", "US"], &matrix, &ranks(), 3);

        let row = &table.rows[0];
        assert_eq!(row.tooltips.len(), table.columns.len());
        assert_eq!(
            row.tooltips[0],
            "DE with mean rank: 1.0 vs Country with mean rank: None. Total N = 3"
        );
        assert_eq!(
            row.tooltips[2],
            "DE with mean rank: 1.0 vs US with mean rank: 2.5. Total N = 3"
        );
        assert_eq!(
            table.rows[1].tooltips[1],
            "US with mean rank: 2.5 vs DE with mean rank: 1.0. Total N = 3"
        );
    }

    #[test]
    fn test_significance_bands() {
        assert_eq!(Significance::of(0.0005), Significance::High);
        assert_eq!(Significance::of(0.001), Significance::Medium);
        assert_eq!(Significance::of(0.049), Significance::Low);
        assert_eq!(Significance::of(0.05), Significance::NotSignificant);
        assert_eq!(Significance::High.marker(), "***");
        assert!(Significance::High > Significance::Low);
    }
}

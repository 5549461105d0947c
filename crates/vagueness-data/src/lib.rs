//! Privacy policy dataset and filter layer
//!
//! This crate owns the read-only table of privacy policy metrics and the
//! predicates used to select a subset of it.
//!
//! # Overview
//!
//! ```text
//! final_dataframe.json
//!     ↓
//! Dataset (records, loaded once)
//!     ↓  FilterCriteria (genres, countries, install range)
//! Selection (borrowed records, original order)
//!     ↓
//! metric values / per-group values for the statistics
//! ```
//!
//! - [`record`]: one row of the dataset, plus the [`record::Metric`] and
//!   [`record::GroupColumn`] column selectors
//! - [`dataset`]: JSON loading (pandas `columns` and `records` orientation) and
//!   the selectable genres and countries
//! - [`filter`]: validated filter criteria and the filtered [`filter::Selection`]
//!
//! # Examples
//!
//! ```
//! use vagueness_data::{
//!     dataset::Dataset,
//!     filter::FilterCriteria,
//!     record::{GroupColumn, Metric},
//! };
//!
//! let json = r#"[
//!     {"genre": "Games", "hostingLocation": "US", "maxInstalls": 1000,
//!      "amountOfInstallsGrouped": "1k", "isNativelyEnglish": true,
//!      "vagueTotalPercentage": 1.5},
//!     {"genre": "Games", "hostingLocation": "DE", "maxInstalls": 5000000,
//!      "amountOfInstallsGrouped": "5M", "isNativelyEnglish": false,
//!      "vagueTotalPercentage": 2.5}
//! ]"#;
//! let dataset = Dataset::from_json_str(json).unwrap();
//!
//! let criteria = FilterCriteria::new(["Games"], ["US", "DE"], 0, 1_000_000).unwrap();
//! let selection = dataset.filter(&criteria);
//! assert_eq!(selection.len(), 1);
//!
//! let groups = selection.groups(Metric::VagueTotalPercentage, GroupColumn::HostingLocation);
//! assert_eq!(groups["US"], vec![1.5]);
//! ```

pub mod dataset;
pub mod filter;
pub mod record;

//! Group comparison of privacy policy metrics
//!
//! This crate turns a filtered [`Selection`](vagueness_data::filter::Selection)
//! into the values the dashboard displays.
//!
//! # Overview
//!
//! - [`comparison`]: normality, Kruskal-Wallis and post-hoc statistics for
//!   one [`query::ComparisonQuery`], collected in a
//!   [`comparison::ComparisonReport`]
//! - [`table`]: the rounded post-hoc table with its label column, significance
//!   bands and tooltips
//! - [`mean_rank`]: per-group mean ranks shown in the tooltips
//! - [`boxplot`]: per-group quartiles, whiskers and outliers
//! - [`session`]: per-session state holding the last report
//! - [`outcome`]: value-or-error wrapper for statistics that may not apply
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use vagueness_analysis::{query::DashboardQuery, session::DashboardSession};
//! use vagueness_data::dataset::Dataset;
//!
//! let json = r#"[
//!     {"genre": "Tools", "hostingLocation": "US", "maxInstalls": 10,
//!      "amountOfInstallsGrouped": "10", "isNativelyEnglish": true,
//!      "vagueTotalPercentage": 1.0},
//!     {"genre": "Tools", "hostingLocation": "DE", "maxInstalls": 10,
//!      "amountOfInstallsGrouped": "10", "isNativelyEnglish": false,
//!      "vagueTotalPercentage": 2.0}
//! ]"#;
//! let dataset = Arc::new(Dataset::from_json_str(json).unwrap());
//!
//! let mut session = DashboardSession::new(dataset);
//! let report = session.apply(&DashboardQuery::default()).unwrap();
//! assert_eq!(report.total, 2);
//! // Shapiro-Wilk needs at least three observations
//! assert!(report.normality.is_error());
//! ```

pub mod boxplot;
pub mod comparison;
pub mod mean_rank;
pub mod outcome;
pub mod query;
pub mod session;
pub mod table;

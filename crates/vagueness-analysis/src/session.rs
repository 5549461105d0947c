//! Per-session dashboard state
//!
//! A [`DashboardSession`] stands for one user of the dashboard. All sessions
//! share the read-only [`Dataset`]; the last report is owned by the session
//! that computed it, so concurrent sessions never see each other's results.
//!
//! ```text
//! Arc<Dataset> ─┬─ DashboardSession (last_report: A)
//!               └─ DashboardSession (last_report: B)
//! ```

use std::sync::Arc;

use vagueness_data::{dataset::Dataset, filter::FilterError};

use crate::{
    comparison::{ComparisonReport, compare},
    query::DashboardQuery,
};

#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    last_report: Option<ComparisonReport>,
}

impl DashboardSession {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            last_report: None,
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Validates the filter of `query`, then filters and compares.
    ///
    /// The report replaces the previous one of this session. An invalid
    /// filter leaves the previous report in place.
    pub fn apply(&mut self, query: &DashboardQuery) -> Result<&ComparisonReport, FilterError> {
        let criteria = query.criteria(&self.dataset)?;
        let selection = self.dataset.filter(&criteria);
        let report = compare(&selection, &query.comparison);
        tracing::debug!(header = %report.header, total = report.total, "applied query");
        Ok(self.last_report.insert(report))
    }

    /// Report of the last successful [`Self::apply`].
    #[must_use]
    pub fn last_report(&self) -> Option<&ComparisonReport> {
        self.last_report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use vagueness_data::record::{Metrics, Record};
    use vagueness_stats::posthoc::PosthocTest;

    use super::*;
    use crate::query::ComparisonQuery;

    fn dataset() -> Arc<Dataset> {
        let values = [
            ("US", 1.0),
            ("US", 2.0),
            ("US", 3.5),
            ("DE", 4.0),
            ("DE", 5.0),
            ("DE", 6.5),
            ("FR", 2.5),
            ("FR", 3.0),
            ("FR", 4.5),
        ];
        let records = values
            .into_iter()
            .enumerate()
            .map(|(i, (country, value))| Record {
                app_id: Some(format!("app.{i}")),
                genre: if i % 2 == 0 { "Tools" } else { "Games" }.to_owned(),
                hosting_location: country.to_owned(),
                max_installs: 1_000 * (i as u64 + 1),
                installs_grouped: "1k+".to_owned(),
                natively_english: "true".to_owned(),
                location_genre: None,
                metrics: Metrics {
                    vague_total_percentage: Some(value),
                    ..Metrics::default()
                },
            })
            .collect();
        Arc::new(Dataset::new(records))
    }

    #[test]
    fn test_apply_stores_report() {
        let mut session = DashboardSession::new(dataset());
        assert!(session.last_report().is_none());

        let total = session.apply(&DashboardQuery::default()).unwrap().total;
        assert_eq!(total, 9);
        assert_eq!(session.last_report().unwrap().total, 9);
    }

    #[test]
    fn test_invalid_filter_keeps_previous_report() {
        let mut session = DashboardSession::new(dataset());
        session.apply(&DashboardQuery::default()).unwrap();

        let query = DashboardQuery {
            min_installs: 5_000,
            max_installs: 5_000,
            ..DashboardQuery::default()
        };
        assert_eq!(
            session.apply(&query).unwrap_err(),
            FilterError::EmptyRange {
                min: 5_000,
                max: 5_000
            }
        );
        assert_eq!(session.last_report().unwrap().total, 9);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let dataset = dataset();
        let mut first = DashboardSession::new(Arc::clone(&dataset));
        let mut second = DashboardSession::new(dataset);

        first.apply(&DashboardQuery::default()).unwrap();
        second
            .apply(&DashboardQuery {
                genres: Some(vec!["Tools".to_owned()]),
                comparison: ComparisonQuery {
                    test: PosthocTest::Conover,
                    ..ComparisonQuery::default()
                },
                ..DashboardQuery::default()
            })
            .unwrap();

        let first = first.last_report().unwrap();
        let second = second.last_report().unwrap();
        assert_eq!(first.total, 9);
        assert_eq!(first.query.test, PosthocTest::Dunn);
        assert_eq!(second.total, 5);
        assert_eq!(second.query.test, PosthocTest::Conover);
    }
}

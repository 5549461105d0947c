//! Filter layer
//!
//! A record is selected when all three predicates hold:
//!
//! - its genre is one of the selected genres
//! - its hosting location is one of the selected countries
//! - its `maxInstalls` lies in the install range
//!
//! The install range is open on both ends: `min < maxInstalls < max`. The
//! slider maximum [`InstallRange::MAX`] is a sentinel for "no upper bound":
//! when `max` equals it, only the lower bound applies.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    dataset::Dataset,
    record::{GroupColumn, Metric, Record},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FilterError {
    #[display("at least one genre must be selected")]
    NoGenres,
    #[display("at least one country must be selected")]
    NoCountries,
    #[display("install range is empty: lower bound {min} is not below upper bound {max}")]
    EmptyRange { min: u64, max: u64 },
}

/// Install count range selected on the slider.
///
/// Deserialization goes through [`InstallRange::new`], so a range read from a
/// file is clamped and checked like one built in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstallRange")]
pub struct InstallRange {
    min: u64,
    max: u64,
}

#[derive(Deserialize)]
struct RawInstallRange {
    min: u64,
    max: u64,
}

impl TryFrom<RawInstallRange> for InstallRange {
    type Error = FilterError;

    fn try_from(raw: RawInstallRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl Default for InstallRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl InstallRange {
    /// Lowest slider value.
    pub const MIN: u64 = 0;
    /// Highest slider value, meaning "no upper bound".
    pub const MAX: u64 = 10_000_000;
    /// Slider step.
    pub const STEP: u64 = 25_000;
    pub const FULL: Self = Self {
        min: Self::MIN,
        max: Self::MAX,
    };

    /// Creates a range, clamping `max` to [`Self::MAX`].
    pub fn new(min: u64, max: u64) -> Result<Self, FilterError> {
        let max = max.min(Self::MAX);
        if min >= max {
            return Err(FilterError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> u64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Returns `true` if the upper bound is the sentinel.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max == Self::MAX
    }

    /// Returns `true` if `installs` passes the range predicate.
    ///
    /// ```
    /// use vagueness_data::filter::InstallRange;
    ///
    /// let range = InstallRange::new(0, 5_000).unwrap();
    /// assert!(range.contains(4_999));
    /// assert!(!range.contains(5_000));
    /// assert!(!range.contains(0));
    ///
    /// assert!(InstallRange::FULL.contains(5_000_000_000));
    /// ```
    #[must_use]
    pub fn contains(&self, installs: u64) -> bool {
        installs > self.min && (self.is_unbounded() || installs < self.max)
    }
}

/// Validated genre, country and install range selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    genres: BTreeSet<String>,
    countries: BTreeSet<String>,
    installs: InstallRange,
}

impl FilterCriteria {
    /// Validates a selection.
    ///
    /// # Errors
    ///
    /// * [`FilterError::NoGenres`] / [`FilterError::NoCountries`] - empty selection
    /// * [`FilterError::EmptyRange`] - `min_installs >= max_installs` (after clamping)
    pub fn new<G, C>(
        genres: G,
        countries: C,
        min_installs: u64,
        max_installs: u64,
    ) -> Result<Self, FilterError>
    where
        G: IntoIterator,
        G::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let genres = genres.into_iter().map(Into::into).collect::<BTreeSet<_>>();
        if genres.is_empty() {
            return Err(FilterError::NoGenres);
        }
        let countries = countries
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>();
        if countries.is_empty() {
            return Err(FilterError::NoCountries);
        }
        let installs = InstallRange::new(min_installs, max_installs)?;
        Ok(Self {
            genres,
            countries,
            installs,
        })
    }

    /// Selects every genre and country of `dataset` over the full install range.
    #[must_use]
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            genres: dataset.genres().into_iter().map(str::to_owned).collect(),
            countries: dataset.countries().into_iter().map(str::to_owned).collect(),
            installs: InstallRange::FULL,
        }
    }

    #[must_use]
    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    #[must_use]
    pub fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }

    #[must_use]
    pub fn installs(&self) -> InstallRange {
        self.installs
    }

    /// Returns `true` if `record` passes all three predicates.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.genres.contains(&record.genre)
            && self.countries.contains(&record.hosting_location)
            && self.installs.contains(record.max_installs)
    }
}

/// Records selected by a [`FilterCriteria`], in their original relative order.
///
/// Positions are renumbered from zero: `records()[0]` is the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    records: Vec<&'a Record>,
}

impl<'a> Selection<'a> {
    #[must_use]
    pub fn filter(records: &'a [Record], criteria: &FilterCriteria) -> Self {
        let records = records
            .iter()
            .filter(|record| criteria.matches(record))
            .collect::<Vec<_>>();
        tracing::debug!(
            selected = records.len(),
            genres = criteria.genres.len(),
            countries = criteria.countries.len(),
            min_installs = criteria.installs.min,
            max_installs = criteria.installs.max,
            "filtered records"
        );
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[&'a Record] {
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

    /// Non-missing values of `metric`, in selection order.
    #[must_use]
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.metric(metric)).collect()
    }

    /// Non-missing values of `metric` partitioned by their label in `column`.
    ///
    /// Groups are keyed in ascending label order; a label appears only if at
    /// least one of its records has a value.
    #[must_use]
    pub fn groups(&self, metric: Metric, column: GroupColumn) -> BTreeMap<&'a str, Vec<f64>> {
        let mut groups = BTreeMap::<&'a str, Vec<f64>>::new();
        for record in &self.records {
            if let (Some(label), Some(value)) = (record.group_label(column), record.metric(metric))
            {
                groups.entry(label).or_default().push(value);
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::record::Metrics;

    fn record(genre: &str, country: &str, max_installs: u64, value: Option<f64>) -> Record {
        Record {
            app_id: None,
            genre: genre.to_owned(),
            hosting_location: country.to_owned(),
            max_installs,
            installs_grouped: format!("{max_installs}"),
            natively_english: "true".to_owned(),
            location_genre: None,
            metrics: Metrics {
                vague_total_percentage: value,
                ..Metrics::default()
            },
        }
    }

    fn ten_rows() -> Dataset {
        Dataset::new(vec![
            record("Tools", "US", 1_000, Some(1.0)),
            record("Games", "US", 1_000, Some(2.0)),
            record("Tools", "DE", 4_999, Some(3.0)),
            record("Tools", "FR", 1_000, Some(4.0)),
            record("Tools", "DE", 5_000, Some(5.0)),
            record("Games", "DE", 100, Some(6.0)),
            record("Tools", "US", 500, None),
            record("Tools", "US", 10_000_000, Some(8.0)),
            record("Games", "FR", 10, Some(9.0)),
            record("Tools", "DE", 1, Some(10.0)),
        ])
    }

    #[test]
    fn test_ten_row_example() {
        let dataset = ten_rows();
        let criteria = FilterCriteria::new(["Tools"], ["US", "DE"], 0, 5_000).unwrap();
        let selection = dataset.filter(&criteria);
        let picked = selection
            .records()
            .iter()
            .map(|r| (r.hosting_location.as_str(), r.max_installs))
            .collect::<Vec<_>>();
        assert_eq!(
            picked,
            [("US", 1_000), ("DE", 4_999), ("US", 500), ("DE", 1)]
        );
        assert_eq!(selection.values(Metric::VagueTotalPercentage), [1.0, 3.0, 10.0]);
    }

    #[test]
    fn test_full_selection_returns_dataset_in_order() {
        let dataset = ten_rows();
        let selection = dataset.filter(&FilterCriteria::all(&dataset));
        assert_eq!(selection.len(), dataset.len());
        for (selected, original) in selection.records().iter().zip(dataset.records()) {
            assert_eq!(*selected, original);
        }
    }

    #[test]
    fn test_sentinel_disables_upper_bound() {
        let dataset = Dataset::new(vec![
            record("Tools", "US", 10_000_000, None),
            record("Tools", "US", 500_000_000, None),
        ]);
        let criteria = FilterCriteria::new(["Tools"], ["US"], 0, 10_000_000).unwrap();
        assert_eq!(dataset.filter(&criteria).len(), 2);

        let criteria = FilterCriteria::new(["Tools"], ["US"], 0, 9_975_000).unwrap();
        assert!(dataset.filter(&criteria).is_empty());
    }

    #[test]
    fn test_upper_bound_is_clamped_to_sentinel() {
        let range = InstallRange::new(25_000, 50_000_000).unwrap();
        assert_eq!(range.max(), InstallRange::MAX);
        assert!(range.is_unbounded());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            FilterCriteria::new(Vec::<String>::new(), ["US"], 0, 100),
            Err(FilterError::NoGenres)
        );
        assert_eq!(
            FilterCriteria::new(["Tools"], Vec::<String>::new(), 0, 100),
            Err(FilterError::NoCountries)
        );
        assert_eq!(
            FilterCriteria::new(["Tools"], ["US"], 100, 100),
            Err(FilterError::EmptyRange { min: 100, max: 100 })
        );
        assert_eq!(
            InstallRange::new(20_000_000, 30_000_000),
            Err(FilterError::EmptyRange {
                min: 20_000_000,
                max: 10_000_000
            })
        );
    }

    #[test]
    fn test_empty_selection() {
        let dataset = ten_rows();
        let criteria = FilterCriteria::new(["Music"], ["US"], 0, 100).unwrap();
        let selection = dataset.filter(&criteria);
        assert!(selection.is_empty());
        assert!(
            selection
                .groups(Metric::VagueTotalPercentage, GroupColumn::HostingLocation)
                .is_empty()
        );
    }

    #[test]
    fn test_groups_skip_missing_values() {
        let dataset = ten_rows();
        let selection = dataset.filter(&FilterCriteria::all(&dataset));
        let groups = selection.groups(Metric::VagueTotalPercentage, GroupColumn::HostingLocation);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["DE", "FR", "US"]);
        assert_eq!(groups["US"], [1.0, 2.0, 8.0]);
        assert!(
            selection
                .groups(Metric::SmogIndex, GroupColumn::HostingLocation)
                .is_empty()
        );
    }

    const GENRES: [&str; 3] = ["Tools", "Games", "Music"];
    const COUNTRIES: [&str; 3] = ["US", "DE", "FR"];

    fn arb_record() -> impl Strategy<Value = Record> {
        (0..GENRES.len(), 0..COUNTRIES.len(), 1..=20_000_000_u64)
            .prop_map(|(g, c, installs)| record(GENRES[g], COUNTRIES[c], installs, None))
    }

    fn arb_subset(names: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
        proptest::sample::subsequence(names, 1..=names.len())
    }

    fn arb_range() -> impl Strategy<Value = (u64, u64)> {
        (0..400_u64, 1..=401_u64).prop_filter_map("empty range", |(lo, hi)| {
            (lo < hi).then_some((lo * InstallRange::STEP, hi * InstallRange::STEP))
        })
    }

    proptest! {
        #[test]
        fn filter_is_sound_and_complete(
            records in proptest::collection::vec(arb_record(), 0..60),
            genres in arb_subset(&GENRES),
            countries in arb_subset(&COUNTRIES),
            (lo, hi) in arb_range(),
        ) {
            let dataset = Dataset::new(records);
            let criteria = FilterCriteria::new(genres.clone(), countries.clone(), lo, hi).unwrap();
            let selection = dataset.filter(&criteria);

            for record in selection.records() {
                prop_assert!(genres.contains(&record.genre.as_str()));
                prop_assert!(countries.contains(&record.hosting_location.as_str()));
                prop_assert!(record.max_installs > lo);
                prop_assert!(hi >= InstallRange::MAX || record.max_installs < hi);
            }

            let expected = dataset
                .records()
                .iter()
                .filter(|r| {
                    genres.contains(&r.genre.as_str())
                        && countries.contains(&r.hosting_location.as_str())
                        && r.max_installs > lo
                        && (hi >= InstallRange::MAX || r.max_installs < hi)
                })
                .collect::<Vec<_>>();
            prop_assert_eq!(selection.records(), expected.as_slice());
        }

        #[test]
        fn full_range_keeps_every_record(
            records in proptest::collection::vec(arb_record(), 0..60),
        ) {
            let dataset = Dataset::new(records);
            let criteria = FilterCriteria::new(GENRES, COUNTRIES, 0, InstallRange::MAX).unwrap();
            prop_assert_eq!(dataset.filter(&criteria).len(), dataset.len());
        }
    }

    #[test]
    fn test_deserialized_range_is_validated() {
        let raw = json!({"min": 100, "max": 50_000_000});
        let range = serde_json::from_value::<InstallRange>(raw).unwrap();
        assert_eq!(range, InstallRange::new(100, InstallRange::MAX).unwrap());
        assert!(range.is_unbounded());

        let raw = json!({"min": 5_000, "max": 5_000});
        let error = serde_json::from_value::<InstallRange>(raw).unwrap_err();
        assert!(error.to_string().contains("install range is empty"), "{error}");
    }
}

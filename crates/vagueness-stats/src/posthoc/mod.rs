//! Pairwise post-hoc tests following a Kruskal-Wallis test.
//!
//! Every variant compares all pairs of groups, adjusts the resulting family of
//! p-values with the selected [`PValueAdjustment`] and returns a symmetric
//! [`PValueMatrix`] whose rows and columns follow the input group order. The
//! variants are interchangeable: same input, same adjustment set, same matrix
//! shape.
//!
//! | Variant          | Statistic                                         |
//! |------------------|---------------------------------------------------|
//! | [`Dunn`]         | z on mean-rank differences (pooled ranks)         |
//! | [`Conover`]      | t on mean-rank differences, df = n - k            |
//! | [`MannWhitney`]  | Mann-Whitney U per pair (ranks within the pair)   |
//!
//! [`Dunn`]: PosthocTest::Dunn
//! [`Conover`]: PosthocTest::Conover
//! [`MannWhitney`]: PosthocTest::MannWhitney

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    ParseSelectorError, StatsError, adjust::PValueAdjustment, check_groups, matrix::PValueMatrix,
    rank::RankedGroups,
};

mod conover;
mod dunn;
pub mod mann_whitney;

/// Post-hoc test variant.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PosthocTest {
    #[default]
    Dunn,
    Conover,
    MannWhitney,
}

impl fmt::Display for PosthocTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for PosthocTest {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|test| test.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSelectorError {
                kind: "post-hoc test",
                value: s.to_owned(),
                expected: "dunn, conover, mann-whitney",
            })
    }
}

impl PosthocTest {
    pub const ALL: [Self; 3] = [Self::Dunn, Self::Conover, Self::MannWhitney];

    /// Selector name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dunn => "dunn",
            Self::Conover => "conover",
            Self::MannWhitney => "mann-whitney",
        }
    }

    /// Title-cased name for headers.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dunn => "Dunn",
            Self::Conover => "Conover",
            Self::MannWhitney => "Mann-Whitney",
        }
    }

    fn test_name(self) -> &'static str {
        match self {
            Self::Dunn => "Dunn's test",
            Self::Conover => "Conover's test",
            Self::MannWhitney => "Mann-Whitney U test",
        }
    }

    /// Compares every pair of `groups` and adjusts the p-values with `adjustment`.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewGroups`] - fewer than two groups
    /// * [`StatsError::EmptyGroup`] - a group has no observations
    /// * [`StatsError::IdenticalValues`] - (Dunn, Conover) all observations are equal
    /// * [`StatsError::NoDegreesOfFreedom`] - (Conover) no more observations than groups
    ///
    /// # Examples
    ///
    /// ```
    /// use vagueness_stats::{adjust::PValueAdjustment, posthoc::PosthocTest};
    ///
    /// let groups = [vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    /// let matrix = PosthocTest::MannWhitney
    ///     .pairwise(&groups, PValueAdjustment::Bonferroni)
    ///     .unwrap();
    /// assert!((matrix.get(0, 1) - 0.1).abs() < 1e-12);
    /// assert_eq!(matrix.get(0, 0), 1.0);
    /// ```
    pub fn pairwise<G>(
        self,
        groups: &[G],
        adjustment: PValueAdjustment,
    ) -> Result<PValueMatrix, StatsError>
    where
        G: AsRef<[f64]>,
    {
        let test = self.test_name();
        check_groups(test, groups)?;

        let raw = match self {
            Self::Dunn => dunn::upper_p_values(test, &RankedGroups::new(groups))?,
            Self::Conover => conover::upper_p_values(test, &RankedGroups::new(groups))?,
            Self::MannWhitney => mann_whitney::upper_p_values(groups),
        };
        let adjusted = adjustment.adjust(&raw);
        Ok(PValueMatrix::from_upper_triangle(groups.len(), &adjusted))
    }
}

//! Nonparametric statistics for comparing groups of measurements.
//!
//! This crate provides the statistical building blocks used to compare privacy
//! policy metrics between groups (hosting countries, install buckets, ...):
//!
//! - **Descriptive statistics**: mean, median, variance, standard deviation
//! - **Percentiles**: linearly interpolated quantiles (box plot quartiles)
//! - **Ranking**: average-rank transform with tie bookkeeping
//! - **Normality**: Shapiro-Wilk W test (Royston's approximation)
//! - **Omnibus test**: Kruskal-Wallis H test
//! - **Post-hoc tests**: Dunn, Conover and pairwise Mann-Whitney U tests
//! - **Multiple comparisons**: Bonferroni, Šidák, Holm and Holm-Šidák p-value adjustment
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Interpolated percentiles and quartiles
//! - [`rank`]: Rank transform shared by every rank-based test
//! - [`normality`]: Shapiro-Wilk normality test
//! - [`kruskal`]: Kruskal-Wallis H test
//! - [`posthoc`]: Pairwise post-hoc tests producing a [`matrix::PValueMatrix`]
//! - [`adjust`]: P-value adjustment for multiple comparisons
//! - [`matrix`]: Symmetric pairwise p-value matrix
//!
//! # Examples
//!
//! ## Omnibus and post-hoc comparison
//!
//! ```
//! use vagueness_stats::{
//!     adjust::PValueAdjustment, kruskal::KruskalWallis, posthoc::PosthocTest,
//! };
//!
//! let groups = [vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]];
//!
//! let omnibus = KruskalWallis::test(&groups).unwrap();
//! assert!(omnibus.p_value < 0.05);
//!
//! let matrix = PosthocTest::Dunn
//!     .pairwise(&groups, PValueAdjustment::Holm)
//!     .unwrap();
//! assert_eq!(matrix.size(), 3);
//! assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
//! ```
//!
//! ## Checking normality
//!
//! ```
//! use vagueness_stats::normality::ShapiroWilk;
//!
//! let result = ShapiroWilk::test(&[1.0, 2.0, 3.0]).unwrap();
//! assert!((result.statistic - 1.0).abs() < 1e-9);
//! ```

pub mod adjust;
pub mod descriptive;
mod distribution;
pub mod kruskal;
pub mod matrix;
pub mod normality;
pub mod percentiles;
pub mod posthoc;
pub mod rank;

/// Error raised when a statistical test cannot be computed for its input.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("{test} requires at least {required} observations, got {actual}")]
    TooFewObservations {
        test: &'static str,
        required: usize,
        actual: usize,
    },
    #[display("{test} requires at least 2 groups, got {actual}")]
    TooFewGroups { test: &'static str, actual: usize },
    #[display("{test} requires every group to contain at least one observation")]
    EmptyGroup { test: &'static str },
    #[display("{test} is undefined when all values are identical")]
    IdenticalValues { test: &'static str },
    #[display(
        "{test} has no degrees of freedom left ({observations} observations in {groups} groups)"
    )]
    NoDegreesOfFreedom {
        test: &'static str,
        observations: usize,
        groups: usize,
    },
    #[display("invalid {distribution} distribution: {reason}")]
    Distribution {
        distribution: &'static str,
        reason: String,
    },
}

/// Error returned when a selector name (test variant, adjustment method) is unknown.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseSelectorError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

fn check_groups<G>(test: &'static str, groups: &[G]) -> Result<(), StatsError>
where
    G: AsRef<[f64]>,
{
    if groups.len() < 2 {
        return Err(StatsError::TooFewGroups {
            test,
            actual: groups.len(),
        });
    }
    if groups.iter().any(|g| g.as_ref().is_empty()) {
        return Err(StatsError::EmptyGroup { test });
    }
    Ok(())
}

//! P-value adjustment for multiple comparisons.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseSelectorError;

/// Method used to adjust a family of p-values for multiple comparisons.
///
/// All methods control the family-wise error rate. Adjusted values are
/// clipped to `[0, 1]`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PValueAdjustment {
    /// `p · m`
    #[default]
    Bonferroni,
    /// `1 - (1 - p)^m`
    Sidak,
    /// Step-down Bonferroni.
    Holm,
    /// Step-down Šidák.
    HolmSidak,
}

impl fmt::Display for PValueAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for PValueAdjustment {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSelectorError {
                kind: "p-value adjustment",
                value: s.to_owned(),
                expected: "bonferroni, sidak, holm, holm-sidak",
            })
    }
}

impl PValueAdjustment {
    pub const ALL: [Self; 4] = [Self::Bonferroni, Self::Sidak, Self::Holm, Self::HolmSidak];

    /// Selector name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bonferroni => "bonferroni",
            Self::Sidak => "sidak",
            Self::Holm => "holm",
            Self::HolmSidak => "holm-sidak",
        }
    }

    /// Title-cased name for headers.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Bonferroni => "Bonferroni",
            Self::Sidak => "Sidak",
            Self::Holm => "Holm",
            Self::HolmSidak => "Holm-Sidak",
        }
    }

    /// Adjusts `p_values`, returning the adjusted values in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use vagueness_stats::adjust::PValueAdjustment;
    ///
    /// let adjusted = PValueAdjustment::Holm.adjust(&[0.04, 0.01, 0.02]);
    /// assert_eq!(adjusted.len(), 3);
    /// assert!((adjusted[1] - 0.03).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn adjust(self, p_values: &[f64]) -> Vec<f64> {
        let m = p_values.len() as f64;
        match self {
            Self::Bonferroni => p_values.iter().map(|p| (p * m).min(1.0)).collect(),
            Self::Sidak => p_values.iter().map(|&p| sidak(p, m)).collect(),
            Self::Holm => step_down(p_values, |p, remaining| p * remaining),
            Self::HolmSidak => step_down(p_values, sidak),
        }
    }
}

fn sidak(p: f64, m: f64) -> f64 {
    (-(m * (-p).ln_1p()).exp_m1()).clamp(0.0, 1.0)
}

/// Applies `f(p_(i), m - i)` to the ascending p-values and enforces monotonicity.
#[expect(clippy::cast_precision_loss)]
fn step_down<F>(p_values: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    let m = p_values.len();
    let mut order = (0..m).collect::<Vec<_>>();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; m];
    let mut running_max = 0.0_f64;
    for (rank, &idx) in order.iter().enumerate() {
        let value = f(p_values[idx], (m - rank) as f64);
        running_max = running_max.max(value);
        adjusted[idx] = running_max.min(1.0);
    }
    adjusted
}

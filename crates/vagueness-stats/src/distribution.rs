use statrs::distribution::{ChiSquared, ContinuousCDF, Normal, StudentsT};

use crate::StatsError;

/// Upper tail probability `P(Z > z)` of the standard normal distribution.
pub(crate) fn normal_sf(z: f64) -> f64 {
    Normal::standard().sf(z)
}

/// Quantile function of the standard normal distribution.
pub(crate) fn normal_quantile(p: f64) -> f64 {
    Normal::standard().inverse_cdf(p)
}

/// Upper tail probability of the χ² distribution with `freedom` degrees of freedom.
pub(crate) fn chi_squared_sf(x: f64, freedom: f64) -> Result<f64, StatsError> {
    let dist = ChiSquared::new(freedom).map_err(|e| StatsError::Distribution {
        distribution: "chi-squared",
        reason: e.to_string(),
    })?;
    Ok(dist.sf(x))
}

/// Upper tail probability of Student's t distribution with `freedom` degrees of freedom.
pub(crate) fn students_t_sf(t: f64, freedom: f64) -> Result<f64, StatsError> {
    let dist = StudentsT::new(0.0, 1.0, freedom).map_err(|e| StatsError::Distribution {
        distribution: "Student's t",
        reason: e.to_string(),
    })?;
    Ok(dist.sf(t))
}

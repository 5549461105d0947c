use std::fmt;

use serde::Serialize;

/// Result of one statistic of a report.
///
/// A statistic that cannot be computed for the selected data (too few
/// observations, a single group, ...) is kept as an error message so that the
/// remaining statistics of the report are still shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Value(T),
    Error(String),
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: fmt::Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Error(message) => Some(message),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Value(value) => Outcome::Value(f(value)),
            Self::Error(message) => Outcome::Error(message),
        }
    }
}

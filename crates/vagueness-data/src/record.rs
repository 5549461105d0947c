//! Record schema of the privacy policy dataset
//!
//! Field names follow the dataset file exactly; they are part of the file
//! format and are also the names accepted by the [`Metric`] and
//! [`GroupColumn`] selectors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// One privacy policy (one app) of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// App identifier, when the dataset carries one
    #[serde(rename = "appId", default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Store genre of the app
    pub genre: String,
    /// Country the privacy policy is hosted in
    #[serde(rename = "hostingLocation")]
    pub hosting_location: String,
    /// Upper bound of the install bucket
    #[serde(rename = "maxInstalls")]
    pub max_installs: u64,
    /// Install bucket label
    #[serde(rename = "amountOfInstallsGrouped")]
    pub installs_grouped: String,
    /// Whether the policy is written in its native English; stored as a label
    #[serde(rename = "isNativelyEnglish", deserialize_with = "deserialize_label")]
    pub natively_english: String,
    /// Combined hosting location / genre label
    #[serde(
        rename = "MVLocationGenre",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location_genre: Option<String>,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl Record {
    /// Value of `metric`, or `None` if the cell is missing.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }

    /// Label of this record in the grouping column `column`.
    #[must_use]
    pub fn group_label(&self, column: GroupColumn) -> Option<&str> {
        match column {
            GroupColumn::HostingLocation => Some(&self.hosting_location),
            GroupColumn::InstallsGrouped => Some(&self.installs_grouped),
            GroupColumn::LocationGenre => self.location_genre.as_deref(),
            GroupColumn::NativelyEnglish => Some(&self.natively_english),
        }
    }
}

/// Numeric metrics of a record. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(rename = "vagueTotalPercentage", default)]
    pub vague_total_percentage: Option<f64>,
    #[serde(rename = "averageMinutesToReadNative", default)]
    pub average_minutes_to_read_native: Option<f64>,
    #[serde(rename = "SMOGIndex", default)]
    pub smog_index: Option<f64>,
    #[serde(rename = "FleschKincaidGrade", default)]
    pub flesch_kincaid_grade: Option<f64>,
    #[serde(rename = "ColemanLiau", default)]
    pub coleman_liau: Option<f64>,
    #[serde(rename = "AutomatedReadabilityIndex", default)]
    pub automated_readability_index: Option<f64>,
    #[serde(rename = "GunningFog", default)]
    pub gunning_fog: Option<f64>,
    #[serde(rename = "DaleChall", default)]
    pub dale_chall: Option<f64>,
    #[serde(rename = "meanReadability", default)]
    pub mean_readability: Option<f64>,
}

impl Metrics {
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::VagueTotalPercentage => self.vague_total_percentage,
            Metric::AverageMinutesToReadNative => self.average_minutes_to_read_native,
            Metric::SmogIndex => self.smog_index,
            Metric::FleschKincaidGrade => self.flesch_kincaid_grade,
            Metric::ColemanLiau => self.coleman_liau,
            Metric::AutomatedReadabilityIndex => self.automated_readability_index,
            Metric::GunningFog => self.gunning_fog,
            Metric::DaleChall => self.dale_chall,
            Metric::MeanReadability => self.mean_readability,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Flag(bool),
    Text(String),
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Label::deserialize(deserializer)? {
        Label::Flag(flag) => flag.to_string(),
        Label::Text(text) => text,
    })
}

/// Error returned when a column name is not one of the known columns.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown {kind} column '{value}' (expected one of: {expected})")]
pub struct ParseColumnError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Numeric value column.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    #[serde(rename = "vagueTotalPercentage")]
    VagueTotalPercentage,
    #[serde(rename = "averageMinutesToReadNative")]
    AverageMinutesToReadNative,
    #[serde(rename = "SMOGIndex")]
    SmogIndex,
    #[serde(rename = "FleschKincaidGrade")]
    FleschKincaidGrade,
    #[serde(rename = "ColemanLiau")]
    ColemanLiau,
    #[serde(rename = "AutomatedReadabilityIndex")]
    AutomatedReadabilityIndex,
    #[serde(rename = "GunningFog")]
    GunningFog,
    #[serde(rename = "DaleChall")]
    DaleChall,
    #[serde(rename = "meanReadability")]
    MeanReadability,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for Metric {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseColumnError {
                kind: "metric",
                value: s.to_owned(),
                expected: "vagueTotalPercentage, averageMinutesToReadNative, SMOGIndex, \
                           FleschKincaidGrade, ColemanLiau, AutomatedReadabilityIndex, \
                           GunningFog, DaleChall, meanReadability",
            })
    }
}

impl Metric {
    pub const ALL: [Self; 9] = [
        Self::VagueTotalPercentage,
        Self::AverageMinutesToReadNative,
        Self::SmogIndex,
        Self::FleschKincaidGrade,
        Self::ColemanLiau,
        Self::AutomatedReadabilityIndex,
        Self::GunningFog,
        Self::DaleChall,
        Self::MeanReadability,
    ];

    /// Column name in the dataset file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VagueTotalPercentage => "vagueTotalPercentage",
            Self::AverageMinutesToReadNative => "averageMinutesToReadNative",
            Self::SmogIndex => "SMOGIndex",
            Self::FleschKincaidGrade => "FleschKincaidGrade",
            Self::ColemanLiau => "ColemanLiau",
            Self::AutomatedReadabilityIndex => "AutomatedReadabilityIndex",
            Self::GunningFog => "GunningFog",
            Self::DaleChall => "DaleChall",
            Self::MeanReadability => "meanReadability",
        }
    }

    /// Human readable label for axis titles.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VagueTotalPercentage => "Percentage occurrence of Vague Terms",
            other => other.as_str(),
        }
    }
}

/// Categorical column used to partition records into groups.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupColumn {
    #[default]
    #[serde(rename = "hostingLocation")]
    HostingLocation,
    #[serde(rename = "amountOfInstallsGrouped")]
    InstallsGrouped,
    #[serde(rename = "MVLocationGenre")]
    LocationGenre,
    #[serde(rename = "isNativelyEnglish")]
    NativelyEnglish,
}

impl fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for GroupColumn {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseColumnError {
                kind: "group",
                value: s.to_owned(),
                expected: "hostingLocation, amountOfInstallsGrouped, MVLocationGenre, \
                           isNativelyEnglish",
            })
    }
}

impl GroupColumn {
    pub const ALL: [Self; 4] = [
        Self::HostingLocation,
        Self::InstallsGrouped,
        Self::LocationGenre,
        Self::NativelyEnglish,
    ];

    /// Column name in the dataset file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HostingLocation => "hostingLocation",
            Self::InstallsGrouped => "amountOfInstallsGrouped",
            Self::LocationGenre => "MVLocationGenre",
            Self::NativelyEnglish => "isNativelyEnglish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "appId": "com.example.app",
            "genre": "Tools",
            "hostingLocation": "US",
            "maxInstalls": 500000,
            "amountOfInstallsGrouped": "100k-500k",
            "isNativelyEnglish": true,
            "MVLocationGenre": "US-Tools",
            "vagueTotalPercentage": 1.25,
            "SMOGIndex": null,
            "DaleChall": 9.5,
            "unrelated": [1, 2, 3]
        }"#;
        let record = serde_json::from_str::<Record>(json).unwrap();
        assert_eq!(record.app_id.as_deref(), Some("com.example.app"));
        assert_eq!(record.max_installs, 500_000);
        assert_eq!(record.natively_english, "true");
        assert_eq!(record.metric(Metric::VagueTotalPercentage), Some(1.25));
        assert_eq!(record.metric(Metric::SmogIndex), None);
        assert_eq!(record.metric(Metric::GunningFog), None);
        assert_eq!(record.metric(Metric::DaleChall), Some(9.5));
        assert_eq!(record.group_label(GroupColumn::LocationGenre), Some("US-Tools"));
    }

    #[test]
    fn test_natively_english_text_label() {
        let json = r#"{
            "genre": "Tools", "hostingLocation": "DE", "maxInstalls": 10,
            "amountOfInstallsGrouped": "0-10", "isNativelyEnglish": "no"
        }"#;
        let record = serde_json::from_str::<Record>(json).unwrap();
        assert_eq!(record.group_label(GroupColumn::NativelyEnglish), Some("no"));
        assert_eq!(record.group_label(GroupColumn::LocationGenre), None);
    }

    #[test]
    fn test_missing_required_field() {
        let json = r#"{"genre": "Tools", "maxInstalls": 10}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn test_metric_names() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>(), Ok(metric));
            assert_eq!(
                serde_json::to_string(&metric).unwrap(),
                format!("\"{metric}\"")
            );
        }
        assert_eq!("smogindex".parse::<Metric>(), Ok(Metric::SmogIndex));
        let err = "readability".parse::<Metric>().unwrap_err();
        assert_eq!(err.kind, "metric");
    }

    #[test]
    fn test_group_column_names() {
        for column in GroupColumn::ALL {
            assert_eq!(column.as_str().parse::<GroupColumn>(), Ok(column));
        }
        assert!("genre".parse::<GroupColumn>().is_err());
        assert_eq!(GroupColumn::default(), GroupColumn::HostingLocation);
    }
}

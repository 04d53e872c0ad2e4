//! Supported PLACES releases and their upstream resource identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlacesError;

/// Resource identifier of the PLACES data dictionary (release independent).
pub const DATA_DICTIONARY_ID: &str = "m35w-spkz";

/// A yearly snapshot of the county-level PLACES dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Release {
    /// PLACES 2020 release.
    #[serde(rename = "2020")]
    Y2020,
    /// PLACES 2021 release.
    #[serde(rename = "2021")]
    Y2021,
    /// PLACES 2022 release.
    #[serde(rename = "2022")]
    Y2022,
    /// PLACES 2023 release.
    #[serde(rename = "2023")]
    Y2023,
    /// PLACES 2024 release.
    #[serde(rename = "2024")]
    Y2024,
    /// PLACES 2025 release.
    #[serde(rename = "2025")]
    Y2025,
}

impl Release {
    /// Every supported release, newest first.
    pub const ALL: [Release; 6] = [
        Release::Y2025,
        Release::Y2024,
        Release::Y2023,
        Release::Y2022,
        Release::Y2021,
        Release::Y2020,
    ];

    /// The most recent release.
    #[must_use]
    pub const fn latest() -> Self {
        Self::Y2025
    }

    /// Release year as it appears in requests, e.g. `"2024"`.
    #[must_use]
    pub const fn year(&self) -> &'static str {
        match self {
            Self::Y2020 => "2020",
            Self::Y2021 => "2021",
            Self::Y2022 => "2022",
            Self::Y2023 => "2023",
            Self::Y2024 => "2024",
            Self::Y2025 => "2025",
        }
    }

    /// Upstream resource identifier of the county dataset for this release.
    #[must_use]
    pub const fn resource_id(&self) -> &'static str {
        match self {
            Self::Y2025 => "swc5-untb",
            Self::Y2024 => "fu4u-a9bh",
            Self::Y2023 => "h3ej-a9ec",
            Self::Y2022 => "duw2-7jbt",
            Self::Y2021 => "pqpp-u99h",
            Self::Y2020 => "dv4u-3x3q",
        }
    }
}

impl Default for Release {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.year())
    }
}

impl FromStr for Release {
    type Err = PlacesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|release| release.year() == s)
            .ok_or_else(|| {
                PlacesError::invalid_argument(
                    "release",
                    format!("release '{s}' is not supported (expected one of 2020-2025)"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_ids() {
        let table: Vec<_> = Release::ALL
            .iter()
            .map(|r| (r.year(), r.resource_id()))
            .collect();
        assert_eq!(
            table,
            [
                ("2025", "swc5-untb"),
                ("2024", "fu4u-a9bh"),
                ("2023", "h3ej-a9ec"),
                ("2022", "duw2-7jbt"),
                ("2021", "pqpp-u99h"),
                ("2020", "dv4u-3x3q"),
            ]
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("2022".parse::<Release>().unwrap(), Release::Y2022);
        assert!(" 2025 ".parse::<Release>().is_err());
        assert!("2025\n".parse::<Release>().is_err());
        assert_eq!(Release::default(), Release::Y2025);
    }

    #[test]
    fn test_parse_unsupported() {
        for input in ["2019", "2026", "", "latest", "20 22"] {
            let err = input.parse::<Release>().unwrap_err();
            assert!(
                matches!(&err, PlacesError::InvalidArgument { argument, .. } if argument == "release"),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn test_serde_uses_year() {
        let json = serde_json::to_string(&Release::Y2023).unwrap();
        assert_eq!(json, "\"2023\"");
        let back: Release = serde_json::from_str("\"2021\"").unwrap();
        assert_eq!(back, Release::Y2021);
    }
}

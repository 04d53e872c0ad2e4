use serde::{Deserialize, Serialize};

/// One public-health measure from the data dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureCatalogEntry {
    /// Measure identifier (`measureid`).
    pub id: String,
    /// Short label (`measure_short_name`).
    pub short_name: String,
    /// Full descriptive name (`measure_full_name`).
    pub full_name: String,
    /// Category name (`category_name`).
    pub category: String,
}

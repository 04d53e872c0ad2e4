//! Measure categories covered by the client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category identifiers kept by the loaders.
pub const COVERED_CATEGORY_IDS: [&str; 2] = ["HLTHOUT", "RISKBEH"];

/// A PLACES measure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// `HLTHOUT`
    #[serde(rename = "HLTHOUT")]
    HealthOutcomes,
    /// `RISKBEH`
    #[serde(rename = "RISKBEH")]
    HealthRiskBehaviors,
}

impl Category {
    /// Both covered categories.
    pub const ALL: [Category; 2] = [Category::HealthOutcomes, Category::HealthRiskBehaviors];

    /// Upstream category identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::HealthOutcomes => "HLTHOUT",
            Self::HealthRiskBehaviors => "RISKBEH",
        }
    }

    /// Upstream category label, as found in the `category` column.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HealthOutcomes => "Health Outcomes",
            Self::HealthRiskBehaviors => "Health Risk Behaviors",
        }
    }

    /// Looks up a covered category by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    /// Returns whether `id` names a covered category.
    #[must_use]
    pub fn is_covered(id: &str) -> bool {
        Self::from_id(id).is_some()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_covered_list() {
        let ids: Vec<_> = Category::ALL.iter().map(Category::id).collect();
        assert_eq!(ids, COVERED_CATEGORY_IDS);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Category::from_id("RISKBEH"), Some(Category::HealthRiskBehaviors));
        assert_eq!(Category::from_id("PREVENT"), None);
        assert!(!Category::is_covered("hlthout"));
    }
}

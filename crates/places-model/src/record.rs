//! Typed row schema for PLACES records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record exactly as received from the upstream API.
///
/// Key order follows the response body.
pub type RawRecord = Map<String, Value>;

/// Socrata metadata and footnote columns removed during normalization.
pub const METADATA_COLUMNS: [&str; 6] = [
    ":id",
    ":version",
    ":created_at",
    ":updated_at",
    "data_value_footnote_symbol",
    "data_value_footnote",
];

/// Columns coerced to `f64` during normalization.
pub const NUMERIC_COLUMNS: [&str; 4] = [
    "data_value",
    "low_confidence_limit",
    "high_confidence_limit",
    "totalpopulation",
];

/// Known text columns with a dedicated field on [`Record`].
pub const TEXT_COLUMNS: [&str; 17] = [
    "year",
    "stateabbr",
    "statedesc",
    "locationid",
    "locationname",
    "datasource",
    "category",
    "categoryid",
    "measure",
    "measureid",
    "short_question_text",
    "data_value_unit",
    "data_value_type",
    "datavaluetypeid",
    "measure_short_name",
    "measure_full_name",
    "category_name",
];

/// One normalized row.
///
/// Every column the current API is known to emit has a typed field. Anything else lands in
/// [`Record::extra`] unchanged, so upstream schema drift never fails a load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Release year of the observation.
    pub year: Option<String>,
    /// Two-letter state abbreviation.
    pub stateabbr: Option<String>,
    /// State name.
    pub statedesc: Option<String>,
    /// Location identifier (county FIPS code at county level).
    pub locationid: Option<String>,
    /// Location name.
    pub locationname: Option<String>,
    /// Survey the estimate comes from.
    pub datasource: Option<String>,
    /// Category label, e.g. "Health Outcomes".
    pub category: Option<String>,
    /// Category identifier, e.g. `HLTHOUT`.
    pub categoryid: Option<String>,
    /// Full measure text.
    pub measure: Option<String>,
    /// Measure identifier, e.g. `CHD`.
    pub measureid: Option<String>,
    /// Short measure label.
    pub short_question_text: Option<String>,
    /// Unit of `data_value`, usually `%`.
    pub data_value_unit: Option<String>,
    /// Estimate type, e.g. "Crude prevalence".
    pub data_value_type: Option<String>,
    /// Estimate type identifier.
    pub datavaluetypeid: Option<String>,
    /// Data dictionary: short measure name.
    pub measure_short_name: Option<String>,
    /// Data dictionary: full measure name.
    pub measure_full_name: Option<String>,
    /// Data dictionary: category name.
    pub category_name: Option<String>,

    /// Observed value.
    pub data_value: Option<f64>,
    /// Lower bound of the confidence interval.
    pub low_confidence_limit: Option<f64>,
    /// Upper bound of the confidence interval.
    pub high_confidence_limit: Option<f64>,
    /// Population of the location.
    pub totalpopulation: Option<f64>,

    /// Unrecognized columns, in input order.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Returns whether `column` has a dedicated typed field.
    #[must_use]
    pub fn is_known_column(column: &str) -> bool {
        TEXT_COLUMNS.contains(&column) || NUMERIC_COLUMNS.contains(&column)
    }

    /// Mutable access to a known text field.
    pub fn text_field_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        let field = match column {
            "year" => &mut self.year,
            "stateabbr" => &mut self.stateabbr,
            "statedesc" => &mut self.statedesc,
            "locationid" => &mut self.locationid,
            "locationname" => &mut self.locationname,
            "datasource" => &mut self.datasource,
            "category" => &mut self.category,
            "categoryid" => &mut self.categoryid,
            "measure" => &mut self.measure,
            "measureid" => &mut self.measureid,
            "short_question_text" => &mut self.short_question_text,
            "data_value_unit" => &mut self.data_value_unit,
            "data_value_type" => &mut self.data_value_type,
            "datavaluetypeid" => &mut self.datavaluetypeid,
            "measure_short_name" => &mut self.measure_short_name,
            "measure_full_name" => &mut self.measure_full_name,
            "category_name" => &mut self.category_name,
            _ => return None,
        };
        Some(field)
    }

    /// Mutable access to a known numeric field.
    pub fn number_field_mut(&mut self, column: &str) -> Option<&mut Option<f64>> {
        let field = match column {
            "data_value" => &mut self.data_value,
            "low_confidence_limit" => &mut self.low_confidence_limit,
            "high_confidence_limit" => &mut self.high_confidence_limit,
            "totalpopulation" => &mut self.totalpopulation,
            _ => return None,
        };
        Some(field)
    }

    /// Text value of `column`.
    ///
    /// Looks at the typed field first, then at string values in [`Record::extra`].
    #[must_use]
    pub fn text(&self, column: &str) -> Option<&str> {
        let field = match column {
            "year" => &self.year,
            "stateabbr" => &self.stateabbr,
            "statedesc" => &self.statedesc,
            "locationid" => &self.locationid,
            "locationname" => &self.locationname,
            "datasource" => &self.datasource,
            "category" => &self.category,
            "categoryid" => &self.categoryid,
            "measure" => &self.measure,
            "measureid" => &self.measureid,
            "short_question_text" => &self.short_question_text,
            "data_value_unit" => &self.data_value_unit,
            "data_value_type" => &self.data_value_type,
            "datavaluetypeid" => &self.datavaluetypeid,
            "measure_short_name" => &self.measure_short_name,
            "measure_full_name" => &self.measure_full_name,
            "category_name" => &self.category_name,
            _ => return self.extra.get(column).and_then(Value::as_str),
        };
        field.as_deref()
    }

    /// Numeric value of `column`, if it is one of [`NUMERIC_COLUMNS`].
    #[must_use]
    pub fn number(&self, column: &str) -> Option<f64> {
        match column {
            "data_value" => self.data_value,
            "low_confidence_limit" => self.low_confidence_limit,
            "high_confidence_limit" => self.high_confidence_limit,
            "totalpopulation" => self.totalpopulation,
            _ => None,
        }
    }

    /// Value of any column rendered as JSON; `Value::Null` when absent.
    #[must_use]
    pub fn value(&self, column: &str) -> Value {
        if NUMERIC_COLUMNS.contains(&column) {
            return self.number(column).map_or(Value::Null, Value::from);
        }
        if TEXT_COLUMNS.contains(&column) {
            return self.text(column).map_or(Value::Null, Value::from);
        }
        self.extra.get(column).cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_columns_have_fields() {
        let mut record = Record::default();
        for column in TEXT_COLUMNS {
            assert!(Record::is_known_column(column));
            *record.text_field_mut(column).unwrap() = Some(format!("{column}!"));
        }
        for column in TEXT_COLUMNS {
            assert_eq!(record.text(column), Some(format!("{column}!").as_str()));
        }
        for column in NUMERIC_COLUMNS {
            *record.number_field_mut(column).unwrap() = Some(1.5);
            assert_eq!(record.number(column), Some(1.5));
        }
    }

    #[test]
    fn test_unknown_column_reads_extra() {
        let mut record = Record::default();
        record
            .extra
            .insert("geolocation".to_string(), serde_json::json!({"type": "Point"}));
        record
            .extra
            .insert("locationtype".to_string(), Value::from("County"));

        assert!(!Record::is_known_column("geolocation"));
        assert!(record.text_field_mut("geolocation").is_none());
        assert_eq!(record.text("locationtype"), Some("County"));
        assert_eq!(record.text("geolocation"), None);
        assert_eq!(record.value("geolocation"), serde_json::json!({"type": "Point"}));
        assert_eq!(record.value("missing"), Value::Null);
    }

    #[test]
    fn test_value_renders_typed_fields() {
        let record = Record {
            measureid: Some("CHD".to_string()),
            data_value: Some(6.1),
            ..Record::default()
        };
        assert_eq!(record.value("measureid"), Value::from("CHD"));
        assert_eq!(record.value("data_value"), Value::from(6.1));
        assert_eq!(record.value("totalpopulation"), Value::Null);
    }
}

//! Integration tests for the dataset loaders.

use places_ingest::{
    Endpoints, Fetch, StaticFetch, load_county_data, load_county_release, load_measure_list,
};
use places_model::{PlacesError, RawRecord, Release, UpstreamError};
use serde_json::json;

struct FailingFetch;

impl Fetch for FailingFetch {
    fn fetch(&self, url: &str, _params: &[(&str, &str)]) -> Result<Vec<RawRecord>, UpstreamError> {
        Err(UpstreamError::Status {
            url: url.to_string(),
            status: 403,
            body: "Invalid app_token specified".to_string(),
        })
    }
}

fn county_fixture() -> StaticFetch {
    StaticFetch::from_json(json!([
        {
            "year": "2022",
            "stateabbr": "WI",
            "statedesc": "Wisconsin",
            "locationname": "Fond du Lac",
            "category": "Health Outcomes",
            "measure": "Stroke among adults",
            "data_value": "3.7",
            "totalpopulation": "103836",
            "locationid": "55039",
            "categoryid": "HLTHOUT",
            "measureid": "STROKE",
            "short_question_text": "Stroke"
        },
        {
            "stateabbr": "WI",
            "locationid": "55039",
            "categoryid": "PREVENT",
            "measureid": "CHECKUP",
            "data_value": "71.0"
        },
        {
            "stateabbr": "WI",
            "locationid": "55041",
            "categoryid": "RISKBEH",
            "measureid": "CSMOKING",
            "data_value": null,
            "data_value_footnote": "Estimates suppressed"
        },
        {
            "stateabbr": "MN",
            "locationid": "27001",
            "categoryid": "RISKBEH",
            "measureid": "BINGE",
            "data_value": "18.9"
        }
    ]))
    .unwrap()
}

#[test]
fn test_get_county_data_single_record() {
    let fetch = StaticFetch::from_json(json!([{
        "year": "2022",
        "stateabbr": "WI",
        "locationname": "Fond du Lac",
        "category": "Health Outcomes",
        "data_value": "3.7",
        "totalpopulation": "103836",
        "locationid": "55039",
        "categoryid": "HLTHOUT",
        "measureid": "STROKE",
        "short_question_text": "Stroke"
    }]))
    .unwrap();

    let table = load_county_data(&fetch, &Endpoints::default(), "2022").unwrap();

    let row = &table.rows()[0];
    assert_eq!(row.measureid.as_deref(), Some("STROKE"));
    assert_eq!(row.data_value, Some(3.7));
    assert_eq!(row.locationid.as_deref(), Some("55039"));
    assert_eq!(row.totalpopulation, Some(103_836.0));
    assert_eq!(
        fetch.requests(),
        ["https://data.cdc.gov/api/v3/views/duw2-7jbt/query.json"]
    );
}

#[test]
fn test_county_data_keeps_covered_non_null_rows_in_order() {
    let fetch = county_fixture();
    let table = load_county_release(&fetch, &Endpoints::default(), Release::Y2025).unwrap();

    let ids: Vec<_> = table.iter().filter_map(|r| r.measureid.as_deref()).collect();
    assert_eq!(ids, ["STROKE", "BINGE"]);
    for row in &table {
        assert!(row.data_value.is_some());
        assert!(matches!(row.categoryid.as_deref(), Some("HLTHOUT" | "RISKBEH")));
    }
    assert!(!table.has_column("data_value_footnote"));
}

#[test]
fn test_county_data_without_category_column_fails() {
    let fetch = StaticFetch::from_json(json!([{"measureid": "CHD", "data_value": "1"}])).unwrap();
    let err = load_county_data(&fetch, &Endpoints::default(), "2024").unwrap_err();
    assert!(matches!(err, PlacesError::MissingColumn { column } if column == "categoryid"));
}

#[test]
fn test_county_data_bad_numeric_fails_whole_load() {
    let fetch = StaticFetch::from_json(json!([
        {"categoryid": "HLTHOUT", "measureid": "CHD", "data_value": "5.1"},
        {"categoryid": "HLTHOUT", "measureid": "CHD", "data_value": "**"}
    ]))
    .unwrap();
    let err = load_county_data(&fetch, &Endpoints::default(), "2024").unwrap_err();
    assert!(matches!(err, PlacesError::DataFormat { row: 1, .. }));
}

#[test]
fn test_upstream_error_is_propagated() {
    let err = load_county_data(&FailingFetch, &Endpoints::default(), "2023").unwrap_err();
    match err {
        PlacesError::Upstream(UpstreamError::Status { url, status, .. }) => {
            assert_eq!(status, 403);
            assert!(url.ends_with("/h3ej-a9ec/query.json"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = load_measure_list(&FailingFetch, &Endpoints::default()).unwrap_err();
    assert!(matches!(err, PlacesError::Upstream(_)));
}

#[test]
fn test_measure_list_projects_covered_categories() {
    let fetch = StaticFetch::from_json(json!([
        {
            "measureid": "ACCESS2",
            "measure_short_name": "Health Insurance",
            "measure_full_name": "Current lack of health insurance among adults aged 18-64 years",
            "categoryid": "PREVENT",
            "category_name": "Prevention"
        },
        {
            "measureid": "ARTHRITIS",
            "measure_short_name": "Arthritis",
            "measure_full_name": "Arthritis among adults",
            "categoryid": "HLTHOUT",
            "category_name": "Health Outcomes",
            ":id": "row-abc"
        },
        {
            "measureid": "BINGE",
            "measure_short_name": "Binge Drinking",
            "measure_full_name": "Binge drinking among adults",
            "categoryid": "RISKBEH",
            "category_name": "Health Risk Behaviors"
        },
        {
            "measureid": "ARTHRITIS",
            "measure_short_name": "Arthritis (duplicate)",
            "measure_full_name": "Arthritis among adults",
            "categoryid": "HLTHOUT",
            "category_name": "Health Outcomes"
        }
    ]))
    .unwrap();

    let measures = load_measure_list(&fetch, &Endpoints::default()).unwrap();

    assert_eq!(measures.len(), 2);
    assert_eq!(measures[0].id, "ARTHRITIS");
    assert_eq!(measures[0].short_name, "Arthritis");
    assert_eq!(measures[0].full_name, "Arthritis among adults");
    assert_eq!(measures[0].category, "Health Outcomes");
    assert_eq!(measures[1].id, "BINGE");
    assert_eq!(measures[1].category, "Health Risk Behaviors");
    assert_eq!(
        fetch.requests(),
        ["https://data.cdc.gov/api/v3/views/m35w-spkz/query.json"]
    );
}

#[test]
fn test_custom_base_url() {
    let fetch = StaticFetch::default();
    load_county_data(&fetch, &Endpoints::new("http://127.0.0.1:9000/api/"), "2020").unwrap();
    assert_eq!(
        fetch.requests(),
        ["http://127.0.0.1:9000/api/dv4u-3x3q/query.json"]
    );
}

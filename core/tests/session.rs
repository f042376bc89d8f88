//! Session tests: dataset hand-off, cost sources, memoized simulation.

use risklab_core::{
    config::{CostSource, LabConfig},
    error::LabError,
    governance::VsmWeights,
    session::Session,
    table::RawTable,
    trade::DataSource,
};
use chrono::NaiveDate;
use std::rc::Rc;

fn session(config: LabConfig) -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    Session::new(config)
}

#[test]
fn seeded_session_keeps_its_seed() {
    let session = session(LabConfig::default_test());
    assert_eq!(session.seed(), 42);
}

#[test]
fn unseeded_sessions_fix_a_seed_for_their_lifetime() {
    let mut session = session(LabConfig::default());
    let seed = session.seed();
    let a = session.simulate(&VsmWeights::default(), "Reactive").unwrap();
    let b = session.simulate(&VsmWeights::uniform(0.7), "Reactive").unwrap();
    assert_eq!(session.seed(), seed);
    let rows_a: Vec<_> = a.iter().map(|s| s.row.clone()).collect();
    let rows_b: Vec<_> = b.iter().map(|s| s.row.clone()).collect();
    assert_eq!(rows_a, rows_b, "Same session must score the same synthetic table");
}

#[test]
fn no_dataset_before_load() {
    let session = session(LabConfig::default_test());
    assert!(session.dataset().is_none());
    assert!(session.cost_values(&CostSource::Dataset).unwrap().is_empty());
}

#[test]
fn configured_dataset_without_path_is_sample_table() {
    let mut session = session(LabConfig::default_test());
    let table = session.load_configured_dataset().unwrap();
    assert_eq!(table.source, DataSource::Fallback);
    assert_eq!(session.cost_values(&CostSource::Dataset).unwrap().len(), 5);
}

#[test]
fn failed_load_clears_previous_dataset() {
    let mut session = session(LabConfig::default_test());
    session.load_dataset(None).unwrap();
    assert!(session.dataset().is_some());

    let bad = RawTable::from_csv_str("Date,Cost per Trade\n2024-01-01,1.0\n").unwrap();
    let err = session.load_dataset(Some(&bad)).unwrap_err();
    assert!(matches!(err, LabError::Schema { .. }), "got {err:?}");
    assert!(session.dataset().is_none(), "Stale dataset must not survive a failed load");
}

#[test]
fn unparseable_upload_clears_previous_dataset() {
    let mut session = session(LabConfig::default_test());
    session.load_dataset(None).unwrap();

    let err = session.load_csv("").unwrap_err();
    assert!(matches!(err, LabError::EmptyData), "got {err:?}");
    assert!(session.dataset().is_none());
    assert!(session.cost_values(&CostSource::Dataset).unwrap().is_empty());

    let table = session
        .load_csv("Date,Cost per Trade,Trade ID,Risk Category,Severity,Likelihood,Firm Type\n\
                   2024-02-01,10.5,201,Market,5,6,A\n")
        .unwrap();
    assert_eq!(table.source, DataSource::Uploaded);
    assert_eq!(session.cost_values(&CostSource::Dataset).unwrap(), vec![10.5]);
}

#[test]
fn start_date_past_calendar_end_is_reported_not_fatal() {
    let mut config = LabConfig::default_test();
    config.generator.start = NaiveDate::MAX;
    let mut session = session(config);

    let err = session.simulate(&VsmWeights::default(), "Reactive").unwrap_err();
    assert!(matches!(err, LabError::DateRange { n_rows: 100, .. }), "got {err:?}");
}

#[test]
fn missing_dataset_file_clears_slot() {
    let mut config = LabConfig::default_test();
    config.dataset_path = Some("/nonexistent/risklab/trades.csv".into());
    let mut session = session(config);
    session.load_dataset(None).unwrap();

    assert!(matches!(session.load_configured_dataset(), Err(LabError::Io(_))));
    assert!(session.dataset().is_none());
}

#[test]
fn manual_costs_ignore_dataset() {
    let mut session = session(LabConfig::default_test());
    session.load_dataset(None).unwrap();

    let values = session.cost_values(&session.config.cost_source.clone()).unwrap();
    assert_eq!(values, vec![10.0, 12.0, 15.0, 11.0, 13.0]);

    let err = session.cost_values(&CostSource::Manual("1, x".into())).unwrap_err();
    assert!(matches!(err, LabError::Parse { .. }));
}

#[test]
fn repeated_simulation_is_served_from_cache() {
    let mut session = session(LabConfig::default_test());
    let weights = VsmWeights::from_array([0.8, 0.7, 0.9, 0.6, 0.5, 0.4]);

    let first = session.simulate(&weights, "Active").unwrap();
    let misses = session.cache().misses();
    let second = session.simulate(&weights, "Active").unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(session.cache().misses(), misses);
    assert!(session.cache().hits() >= 1);

    let other = session.simulate(&weights, "Reactive").unwrap();
    assert!(!Rc::ptr_eq(&first, &other));
    assert_eq!(first.len(), other.len());
}

#[test]
fn invalid_style_is_rejected_by_session() {
    let mut session = session(LabConfig::default_test());
    let err = session.simulate(&VsmWeights::default(), "passive").unwrap_err();
    assert!(matches!(err, LabError::InvalidStyle(_)));
    assert_eq!(session.cache().misses(), 0, "Rejected style must not touch the cache");
}

#[test]
fn config_round_trips_through_json_with_defaults() {
    let config: LabConfig = serde_json::from_str(
        r#"{ "generator": { "seed": 7 }, "cost_source": { "source": "manual", "text": "1, 2" } }"#,
    )
    .unwrap();
    assert_eq!(config.generator.seed, Some(7));
    assert_eq!(config.generator.n_rows, 100);
    assert_eq!(config.governance.style, "Reactive");
    assert_eq!(config.cost_source, CostSource::Manual("1, 2".into()));

    let dataset: LabConfig = serde_json::from_str(r#"{ "cost_source": { "source": "dataset" } }"#).unwrap();
    assert_eq!(dataset.cost_source, CostSource::Dataset);
}

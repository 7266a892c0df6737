// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Loading snapshots end to end and swapping them into a shared handle.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use outbreak::Error;
use outbreak::MetricKind;
use outbreak::StoreConfig;
use outbreak::StoreHandle;
use outbreak::config::ColumnLayout;
use outbreak::snapshot;

const SNAPSHOT: &str = "\
iso_code,location,date,total_cases,new_cases,total_deaths,new_deaths
PRT,Portugal,2020-05-11,27581,,1135,
PRT,Portugal,2020-05-12,27679,98,1144,9
PRT,Portugal,2020-05-13,27913,234,1163,19
ESP,Spain,2020-05-12,227436.0,594.0,26744,0
ESP,Spain,2020-05-13,228030,594,26920,176
";

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 5, d).unwrap()
}

#[test]
fn load_builds_every_country() {
    let store = snapshot::load_store(SNAPSHOT.as_bytes(), &StoreConfig::default()).unwrap();
    assert_eq!(store.countries(), vec!["portugal", "spain"]);
    assert_eq!(store.fingerprint(), Some(snapshot::fingerprint(SNAPSHOT.as_bytes())));

    let totals = store.stats_for("Portugal", MetricKind::TotalCases).unwrap();
    let values: Vec<_> = totals.iter().map(|s| s.value).collect();
    assert_eq!(values, vec![27581, 27679, 27913]);

    let new = store.stats_for("Portugal", MetricKind::NewCases).unwrap();
    assert_eq!(new.first().map(|s| s.date), Some(date(12)));

    let spain = store.point_for("spain", MetricKind::TotalCases, date(12)).unwrap();
    assert_eq!(spain.map(|s| s.value), Some(227436));
}

#[test]
fn config_picks_ordering_and_threads() {
    let config = StoreConfig {
        chronological: false,
        build_threads: 4,
        ..StoreConfig::default()
    };
    let store = snapshot::load_store(SNAPSHOT.as_bytes(), &config).unwrap();
    assert_eq!(store.ordering(), outbreak::Ordering::Structural);
    assert_eq!(store.len(), 2);
}

#[test]
fn custom_layout_reads_other_exports() {
    let csv = "date,country,cases_total\n2020-05-13,Malta,500\n";
    let layout = ColumnLayout {
        location: 1,
        date: 0,
        total_cases: 2,
        new_cases: 9,
        total_deaths: 9,
        new_deaths: 9,
    };
    let records = snapshot::parse(csv.as_bytes(), &layout).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].country, "malta");
    assert_eq!(records[0].len(), 1);
}

#[test]
fn repeated_rows_are_duplicates() {
    let csv = format!("{SNAPSHOT}PRT,Portugal,2020-05-13,27913,234,1163,19\n");
    let err = snapshot::load_store(csv.as_bytes(), &StoreConfig::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { .. }));
}

#[test]
fn garbage_values_name_their_column() {
    let csv = "iso_code,location,date,total_cases,new_cases,total_deaths,new_deaths\n\
               PRT,Portugal,2020-05-13,lots,1,1,1\n";
    let err = snapshot::parse(csv.as_bytes(), &ColumnLayout::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { column: 3, .. }));
}

#[test]
fn short_rows_are_malformed() {
    let csv = "iso_code,location,date,total_cases,new_cases,total_deaths,new_deaths\nPRT,Portugal\n";
    let err = snapshot::parse(csv.as_bytes(), &ColumnLayout::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedRow { line: 2, .. }));
}

#[test]
fn readers_see_whole_stores_during_refresh() {
    let handle = Arc::new(StoreHandle::default());
    let config = StoreConfig::default();

    let reader = {
        let handle = Arc::clone(&handle);
        thread::spawn(move || {
            for _ in 0..1000 {
                let store = handle.load();
                assert!(store.is_empty() || store.len() == 2);
            }
        })
    };

    assert!(handle.refresh(SNAPSHOT.as_bytes(), &config).unwrap());
    assert!(!handle.refresh(SNAPSHOT.as_bytes(), &config).unwrap());
    reader.join().unwrap();
    assert_eq!(handle.load().len(), 2);
}

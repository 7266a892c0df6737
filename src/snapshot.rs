// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Turning a CSV snapshot into country records.
//!
//! A snapshot has a header row followed by one row per country and day. Rows
//! are grouped by lowercased location in the order countries first appear.
//! Cells left empty by the publisher are skipped, so a series may have gaps;
//! integral float cells such as `12.0` are accepted as integers.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use tracing::info;
use tracing::warn;

use crate::builder::CountryRecords;
use crate::builder::build_store;
use crate::builder::build_store_parallel;
use crate::config::ColumnLayout;
use crate::config::StoreConfig;
use crate::error::Error;
use crate::error::Result;
use crate::metric::MetricKind;
use crate::node::normalize_country;
use crate::store::CountryMetricStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 2^63: the first float past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Digest of raw snapshot bytes, used to tell whether a download changed.
pub fn fingerprint(bytes: &[u8]) -> blake3::Hash {
    blake3::hash(bytes)
}

fn parse_value(cell: &str, line: u64, column: usize) -> Result<Option<i64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = cell.parse::<i64>() {
        return Ok(Some(value));
    }
    match cell.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&value) => {
            Ok(Some(value as i64))
        }
        _ => Err(Error::InvalidValue {
            line,
            column,
            value: cell.to_string(),
        }),
    }
}

/// Parse snapshot bytes into per-country records.
pub fn parse(bytes: &[u8], layout: &ColumnLayout) -> Result<Vec<CountryRecords>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let mut countries: Vec<CountryRecords> = Vec::new();
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |position| position.line());

        let location = row.get(layout.location).ok_or_else(|| Error::MalformedRow {
            line,
            reason: format!("no location in column {}", layout.location),
        })?;
        let date = row.get(layout.date).ok_or_else(|| Error::MalformedRow {
            line,
            reason: format!("no date in column {}", layout.date),
        })?;
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
            line,
            value: date.to_string(),
        })?;

        let country = normalize_country(location);
        let index = match positions.get(&country).copied() {
            Some(index) => index,
            None => {
                positions.insert(country.clone(), countries.len());
                countries.push(CountryRecords::new(&country));
                countries.len() - 1
            }
        };

        for kind in MetricKind::ALL {
            let column = layout.column(kind);
            match parse_value(row.get(column).unwrap_or(""), line, column)? {
                Some(value) => countries[index].push(kind, date, value),
                None => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "snapshot cells without a value were skipped");
    }
    Ok(countries)
}

/// Parse a snapshot and build a ready-to-serve store from it.
pub fn load_store(bytes: &[u8], config: &StoreConfig) -> Result<CountryMetricStore> {
    let records = parse(bytes, &config.layout)?;
    let mut store = if config.build_threads > 1 {
        build_store_parallel(records, config.build_threads)?
    } else {
        build_store(records)?
    };
    store.set_ordering(config.chronological);
    store.set_config(config.clone());
    let digest = fingerprint(bytes);
    store.set_fingerprint(digest);
    info!(countries = store.len(), fingerprint = %digest.to_hex(), "loaded snapshot");
    Ok(store)
}

// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Bulk construction of a store from parsed records.
//!
//! Every (country, metric) pair gets its own tree, so countries can be
//! built on separate threads without sharing anything mutable.

use std::thread;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use tracing::debug;
use tracing::info;

use crate::error::Result;
use crate::metric::MetricKind;
use crate::node::StatNode;
use crate::node::normalize_country;
use crate::store::CountryMetricStore;
use crate::store::MetricBundle;

/// Date-ordered readings of one metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesBatch {
    pub kind: MetricKind,
    pub points: Vec<(NaiveDate, i64)>,
}

/// Everything parsed for one country: up to one batch per metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecords {
    pub country: String,
    pub batches: Vec<SeriesBatch>,
}

impl CountryRecords {
    pub fn new(country: &str) -> Self {
        CountryRecords {
            country: normalize_country(country),
            batches: Vec::new(),
        }
    }

    /// Append a reading to the batch of `kind`, creating it on first use.
    pub fn push(&mut self, kind: MetricKind, date: NaiveDate, value: i64) {
        match self.batches.iter_mut().find(|batch| batch.kind == kind) {
            Some(batch) => batch.points.push((date, value)),
            None => self.batches.push(SeriesBatch {
                kind,
                points: vec![(date, value)],
            }),
        }
    }

    pub fn batch(&self, kind: MetricKind) -> Option<&SeriesBatch> {
        self.batches.iter().find(|batch| batch.kind == kind)
    }

    /// Number of readings across all batches.
    pub fn len(&self) -> usize {
        self.batches.iter().map(|batch| batch.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn absorb(&mut self, other: CountryRecords) {
        for batch in other.batches {
            for (date, value) in batch.points {
                self.push(batch.kind, date, value);
            }
        }
    }
}

/// Insert every reading of `records` into `bundle`. Stops at the first
/// structural error.
fn fill_bundle(bundle: &mut MetricBundle, records: &CountryRecords) -> Result<()> {
    for batch in &records.batches {
        let tree = bundle.tree_mut(batch.kind);
        for &(date, value) in &batch.points {
            tree.insert(StatNode::new(batch.kind, date, &records.country, value))?;
        }
    }
    Ok(())
}

/// Build the four trees of one country.
pub fn build_bundle(records: &CountryRecords) -> Result<MetricBundle> {
    let mut bundle = MetricBundle::default();
    fill_bundle(&mut bundle, records)?;
    debug!(country = %records.country, readings = records.len(), "built country bundle");
    Ok(bundle)
}

/// Fold records naming the same country together, keeping first-seen order.
fn merge_by_country(records: impl IntoIterator<Item = CountryRecords>) -> Vec<CountryRecords> {
    let mut merged: Vec<CountryRecords> = Vec::new();
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();
    for mut record in records {
        record.country = normalize_country(&record.country);
        match positions.get(&record.country).copied() {
            Some(i) => merged[i].absorb(record),
            None => {
                positions.insert(record.country.clone(), merged.len());
                merged.push(record);
            }
        }
    }
    merged
}

/// Build a store on the calling thread.
pub fn build_store(records: impl IntoIterator<Item = CountryRecords>) -> Result<CountryMetricStore> {
    let mut store = CountryMetricStore::new();
    for records in merge_by_country(records) {
        let bundle = build_bundle(&records)?;
        store.insert_bundle(&records.country, bundle)?;
    }
    info!(countries = store.len(), "built store");
    Ok(store)
}

/// Build a store with countries spread over up to `threads` scoped threads.
pub fn build_store_parallel(
    records: impl IntoIterator<Item = CountryRecords>,
    threads: usize,
) -> Result<CountryMetricStore> {
    let records = merge_by_country(records);
    let threads = threads.max(1).min(records.len().max(1));
    if threads == 1 {
        return build_store(records);
    }

    let chunk = records.len().div_ceil(threads);
    let built: Vec<Result<Vec<(String, MetricBundle)>>> = thread::scope(|scope| {
        let handles: Vec<_> = records
            .chunks(chunk)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|records| Ok((records.country.clone(), build_bundle(records)?)))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut store = CountryMetricStore::new();
    for part in built {
        for (country, bundle) in part? {
            store.insert_bundle(&country, bundle)?;
        }
    }
    info!(countries = store.len(), threads, "built store in parallel");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn day(d: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, 1).unwrap() + chrono::Days::new(d)
    }

    fn country(name: &str, days: u64) -> CountryRecords {
        let mut records = CountryRecords::new(name);
        for d in 0..days {
            for kind in MetricKind::ALL {
                records.push(kind, day(d), d as i64);
            }
        }
        records
    }

    #[test]
    fn push_groups_by_kind() {
        let records = country("Italy", 3);
        assert_eq!(records.batches.len(), 4);
        assert_eq!(records.batch(MetricKind::NewDeaths).unwrap().points.len(), 3);
        assert_eq!(records.len(), 12);
        assert_eq!(records.country, "italy");
    }

    #[test]
    fn repeated_country_records_merge() {
        let mut first = CountryRecords::new("Italy");
        first.push(MetricKind::NewCases, day(0), 1);
        let mut second = CountryRecords::new("ITALY");
        second.push(MetricKind::NewCases, day(1), 2);

        let store = build_store(vec![first, second]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve("italy").unwrap().new_cases().len(), 2);
    }

    #[test]
    fn duplicate_dates_fail_the_build() {
        let mut records = CountryRecords::new("Italy");
        records.push(MetricKind::TotalCases, day(0), 1);
        records.push(MetricKind::TotalCases, day(0), 2);
        assert!(matches!(build_store(vec![records]), Err(Error::DuplicateKey { .. })));
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let names = ["Portugal", "Spain", "France", "Italy", "Germany", "Greece", "Malta"];
        let records: Vec<_> = names.iter().map(|name| country(name, 30)).collect();

        let sequential = build_store(records.clone()).unwrap();
        let parallel = build_store_parallel(records, 3).unwrap();

        assert_eq!(sequential.countries(), parallel.countries());
        for name in names {
            for kind in MetricKind::ALL {
                assert_eq!(
                    sequential.resolve(name).unwrap().tree(kind).inorder(),
                    parallel.resolve(name).unwrap().tree(kind).inorder(),
                );
            }
        }
    }

    #[test]
    fn parallel_build_reports_errors() {
        let mut broken = CountryRecords::new("Spain");
        broken.push(MetricKind::NewCases, day(0), 1);
        broken.push(MetricKind::NewCases, day(0), 1);
        let records = vec![country("Portugal", 5), broken, country("France", 5)];
        assert!(build_store_parallel(records, 3).is_err());
    }
}

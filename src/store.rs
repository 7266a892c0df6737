// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Country-keyed bundles of metric trees.
//!
//! A [`CountryMetricStore`] is built once from a snapshot and then only
//! read. Refreshing the data means building a new store and swapping it in
//! whole (see [`crate::handle::StoreHandle`]).

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::config::StoreConfig;
use crate::error::Error;
use crate::error::Result;
use crate::index::BalancedIndex;
use crate::metric::MetricKind;
use crate::node::normalize_country;
use crate::predict::TrendPredictor;
use crate::statistic::VirusStatistic;

/// The order list queries come back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    /// Pre-order: the tree's own layout, no sorting work.
    #[default]
    Structural,
    /// In-order: ascending by date.
    Chronological,
}

/// The four trees of one country, in [`MetricKind::ALL`] order.
#[derive(Debug, Default)]
pub struct MetricBundle {
    trees: [BalancedIndex; 4],
}

impl MetricBundle {
    pub fn new(trees: [BalancedIndex; 4]) -> Self {
        MetricBundle { trees }
    }

    pub fn tree(&self, kind: MetricKind) -> &BalancedIndex {
        &self.trees[kind.index()]
    }

    pub fn tree_mut(&mut self, kind: MetricKind) -> &mut BalancedIndex {
        &mut self.trees[kind.index()]
    }

    pub fn new_cases(&self) -> &BalancedIndex {
        self.tree(MetricKind::NewCases)
    }

    pub fn total_cases(&self) -> &BalancedIndex {
        self.tree(MetricKind::TotalCases)
    }

    pub fn new_deaths(&self) -> &BalancedIndex {
        self.tree(MetricKind::NewDeaths)
    }

    pub fn total_deaths(&self) -> &BalancedIndex {
        self.tree(MetricKind::TotalDeaths)
    }

    /// Number of readings across all four trees.
    pub fn len(&self) -> usize {
        self.trees.iter().map(BalancedIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.iter().all(BalancedIndex::is_empty)
    }
}

#[derive(Debug, Default)]
pub struct CountryMetricStore {
    countries: FxHashMap<String, MetricBundle>,
    ordering: Ordering,
    fingerprint: Option<blake3::Hash>,
    config: Option<StoreConfig>,
}

impl CountryMetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the bundle of a country.
    ///
    /// Every non-empty tree must belong to `country` and sit in the slot of
    /// its own metric.
    pub fn insert_bundle(&mut self, country: &str, bundle: MetricBundle) -> Result<Option<MetricBundle>> {
        let country = normalize_country(country);
        for kind in MetricKind::ALL {
            let tree = bundle.tree(kind);
            if let Some(found) = tree.kind().filter(|found| *found != kind) {
                return Err(Error::TypeMismatch { expected: kind, found });
            }
            if let Some(found) = tree.country().filter(|found| *found != country) {
                return Err(Error::CountryMismatch {
                    expected: country,
                    found: found.to_string(),
                });
            }
        }
        Ok(self.countries.insert(country, bundle))
    }

    /// Select list ordering for every later query on this store.
    pub fn set_ordering(&mut self, chronological: bool) {
        self.ordering = if chronological {
            Ordering::Chronological
        } else {
            Ordering::Structural
        };
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// Digest of the snapshot this store was built from, if known.
    pub fn fingerprint(&self) -> Option<blake3::Hash> {
        self.fingerprint
    }

    pub fn set_fingerprint(&mut self, fingerprint: blake3::Hash) {
        self.fingerprint = Some(fingerprint);
    }

    /// Settings the store was loaded with, if it came from a snapshot.
    pub fn config(&self) -> Option<&StoreConfig> {
        self.config.as_ref()
    }

    pub fn set_config(&mut self, config: StoreConfig) {
        self.config = Some(config);
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Normalized country names, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.countries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Case-insensitive lookup of a country's bundle.
    pub fn resolve(&self, country: &str) -> Result<&MetricBundle> {
        self.countries
            .get(&normalize_country(country))
            .ok_or_else(|| Error::UnknownCountry(country.to_string()))
    }

    /// The whole series of one metric, in the store's ordering.
    pub fn stats_for(&self, country: &str, kind: MetricKind) -> Result<Vec<VirusStatistic>> {
        let tree = self.resolve(country)?.tree(kind);
        Ok(match self.ordering {
            Ordering::Structural => tree.preorder(),
            Ordering::Chronological => tree.inorder(),
        })
    }

    pub fn point_for(&self, country: &str, kind: MetricKind, date: NaiveDate) -> Result<Option<VirusStatistic>> {
        Ok(self.resolve(country)?.tree(kind).get(date))
    }

    /// Readings within `[first, last]`, always oldest first.
    pub fn range_for(
        &self,
        country: &str,
        kind: MetricKind,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<VirusStatistic>> {
        Ok(self.resolve(country)?.tree(kind).between_dates(first, last))
    }

    /// Next-day forecast for a metric.
    ///
    /// Daily metrics are forecast as the increment implied by their running
    /// total, so both variants read the cumulative tree in date order,
    /// whatever the store's ordering.
    pub fn forecast(&self, country: &str, kind: MetricKind) -> Result<i64> {
        let series = self.resolve(country)?.tree(kind.cumulative()).values();
        if kind.is_cumulative() {
            TrendPredictor::predict_total(&series)
        } else {
            TrendPredictor::predict_new(&series)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::StatNode;

    fn day(d: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 1).unwrap() + chrono::Days::new(d)
    }

    fn store() -> CountryMetricStore {
        let mut bundle = MetricBundle::default();
        for kind in MetricKind::ALL {
            for d in [3, 1, 4, 0, 2] {
                let node = StatNode::new(kind, day(d), "Portugal", d as i64 + 10 * kind.index() as i64);
                bundle.tree_mut(kind).insert(node).unwrap();
            }
        }
        let mut store = CountryMetricStore::new();
        store.insert_bundle("Portugal", bundle).unwrap();
        store
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let store = store();
        assert!(store.resolve("PORTUGAL").is_ok());
        assert!(store.resolve(" portugal ").is_ok());
        assert!(matches!(store.resolve("Atlantis"), Err(Error::UnknownCountry(_))));
    }

    #[test]
    fn ordering_switches_traversal() {
        let mut store = store();
        let structural = store.stats_for("portugal", MetricKind::NewDeaths).unwrap();
        assert_eq!(structural, store.resolve("portugal").unwrap().new_deaths().preorder());

        store.set_ordering(true);
        let chronological = store.stats_for("portugal", MetricKind::NewDeaths).unwrap();
        let dates: Vec<_> = chronological.iter().map(|s| s.date).collect();
        assert_eq!(dates, (0..5).map(day).collect::<Vec<_>>());
        assert!(chronological.iter().all(|s| s.kind == MetricKind::NewDeaths));
    }

    #[test]
    fn point_and_range_queries() {
        let store = store();
        let hit = store.point_for("portugal", MetricKind::TotalCases, day(2)).unwrap();
        assert_eq!(hit.map(|s| s.value), Some(12));
        assert_eq!(store.point_for("portugal", MetricKind::TotalCases, day(9)).unwrap(), None);

        let range = store.range_for("portugal", MetricKind::NewCases, day(1), day(3)).unwrap();
        assert_eq!(range.iter().map(|s| s.value).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn unknown_country_is_not_found() {
        let store = store();
        let err = store.stats_for("narnia", MetricKind::NewCases).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn bundles_must_match_their_key() {
        let mut bundle = MetricBundle::default();
        let node = StatNode::new(MetricKind::NewCases, day(0), "Spain", 1);
        bundle.tree_mut(MetricKind::NewCases).insert(node).unwrap();

        let mut store = CountryMetricStore::new();
        let err = store.insert_bundle("Portugal", bundle).unwrap_err();
        assert!(matches!(err, Error::CountryMismatch { expected, found } if expected == "portugal" && found == "spain"));
        assert!(store.is_empty());

        let mut misplaced = MetricBundle::default();
        let node = StatNode::new(MetricKind::NewDeaths, day(0), "Spain", 1);
        misplaced.tree_mut(MetricKind::NewCases).insert(node).unwrap();
        assert!(matches!(
            store.insert_bundle("spain", misplaced),
            Err(Error::TypeMismatch { expected: MetricKind::NewCases, found: MetricKind::NewDeaths })
        ));

        assert!(store.insert_bundle(" SPAIN ", MetricBundle::default()).unwrap().is_none());
        assert_eq!(store.countries(), vec!["spain"]);
    }

    #[test]
    fn bundle_accessors_follow_kind() {
        let store = store();
        let bundle = store.resolve("portugal").unwrap();
        assert_eq!(bundle.total_deaths().kind(), Some(MetricKind::TotalDeaths));
        assert_eq!(bundle.len(), 20);
        assert_eq!(store.countries(), vec!["portugal"]);
    }
}

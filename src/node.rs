// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use chrono::NaiveDate;

use crate::avl::Balanced;
use crate::avl::Link;
use crate::metric::MetricKind;
use crate::statistic::VirusStatistic;

/// One day's reading of one metric for one country.
///
/// Nodes are created once while a snapshot is parsed and never modified
/// afterwards, apart from the cached height and child links that the tree
/// rewrites while rebalancing.
#[derive(Debug)]
pub struct StatNode {
    key: NaiveDate,
    country: String,
    kind: MetricKind,
    value: i64,
    height: i32,
    left: Link<StatNode>,
    right: Link<StatNode>,
}

/// Trim and lowercase a country name, the form trees and stores key on.
pub fn normalize_country(country: &str) -> String {
    country.trim().to_lowercase()
}

impl StatNode {
    pub fn new(kind: MetricKind, date: NaiveDate, country: &str, value: i64) -> StatNode {
        StatNode {
            key: date,
            country: normalize_country(country),
            kind,
            value,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.key
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn to_statistic(&self) -> VirusStatistic {
        VirusStatistic::new(self.key, self.country.clone(), self.value, self.kind)
    }
}

impl Balanced for StatNode {
    type Key = NaiveDate;

    fn key(&self) -> &NaiveDate {
        &self.key
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    fn left(&self) -> &Link<Self> {
        &self.left
    }

    fn right(&self) -> &Link<Self> {
        &self.right
    }

    fn left_mut(&mut self) -> &mut Link<Self> {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Link<Self> {
        &mut self.right
    }
}

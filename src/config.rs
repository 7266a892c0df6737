// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Settings for building and serving a store.

use serde::Deserialize;
use serde::Serialize;

use crate::metric::MetricKind;

/// Zero-based column positions in a snapshot CSV.
///
/// The defaults match the Our World in Data export the tracker consumes:
/// `location, date, total_cases, new_cases, total_deaths, new_deaths` in
/// columns 1 to 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub location: usize,
    pub date: usize,
    pub total_cases: usize,
    pub new_cases: usize,
    pub total_deaths: usize,
    pub new_deaths: usize,
}

impl ColumnLayout {
    pub fn column(&self, kind: MetricKind) -> usize {
        match kind {
            MetricKind::NewCases => self.new_cases,
            MetricKind::TotalCases => self.total_cases,
            MetricKind::NewDeaths => self.new_deaths,
            MetricKind::TotalDeaths => self.total_deaths,
        }
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            location: 1,
            date: 2,
            total_cases: 3,
            new_cases: 4,
            total_deaths: 5,
            new_deaths: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Return list queries in date order rather than tree order.
    pub chronological: bool,
    /// Threads used to build country trees; 1 builds inline.
    pub build_threads: usize,
    pub layout: ColumnLayout,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            chronological: true,
            build_threads: 1,
            layout: ColumnLayout::default(),
        }
    }
}

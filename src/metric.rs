// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! The four daily metrics tracked per country.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// Which reading a node or a tree holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    NewCases,
    TotalCases,
    NewDeaths,
    TotalDeaths,
}

impl MetricKind {
    /// Bundle order: new cases, total cases, new deaths, total deaths.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::NewCases,
        MetricKind::TotalCases,
        MetricKind::NewDeaths,
        MetricKind::TotalDeaths,
    ];

    /// Position of this metric inside a country bundle.
    pub fn index(self) -> usize {
        match self {
            MetricKind::NewCases => 0,
            MetricKind::TotalCases => 1,
            MetricKind::NewDeaths => 2,
            MetricKind::TotalDeaths => 3,
        }
    }

    /// The name a statistic of this kind is reported under.
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::NewCases => "newCases",
            MetricKind::TotalCases => "totalCases",
            MetricKind::NewDeaths => "newDeaths",
            MetricKind::TotalDeaths => "totalDeaths",
        }
    }

    pub fn is_cumulative(self) -> bool {
        matches!(self, MetricKind::TotalCases | MetricKind::TotalDeaths)
    }

    /// The running-total metric a daily metric is derived from.
    pub fn cumulative(self) -> MetricKind {
        match self {
            MetricKind::NewCases | MetricKind::TotalCases => MetricKind::TotalCases,
            MetricKind::NewDeaths | MetricKind::TotalDeaths => MetricKind::TotalDeaths,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    /// Accepts the reported name (`totalCases`) as well as the
    /// kebab and snake spellings (`total-cases`, `total_cases`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "newcases" => Ok(MetricKind::NewCases),
            "totalcases" => Ok(MetricKind::TotalCases),
            "newdeaths" => Ok(MetricKind::NewDeaths),
            "totaldeaths" => Ok(MetricKind::TotalDeaths),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

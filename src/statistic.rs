// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use std::fmt;

use chrono::Datelike;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::metric::MetricKind;

/// A read-only view of one reading, materialized by a lookup or traversal.
/// Nothing stores these; they exist to be handed to callers and serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirusStatistic {
    pub date: NaiveDate,
    pub country: String,
    pub value: i64,
    #[serde(rename = "statType")]
    pub kind: MetricKind,
}

impl VirusStatistic {
    pub fn new(date: NaiveDate, country: impl Into<String>, value: i64, kind: MetricKind) -> Self {
        VirusStatistic {
            date,
            country: country.into(),
            value,
            kind,
        }
    }
}

impl fmt::Display for VirusStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VirusStatistic{{date={}/{}/{}, country='{}', {}={}}}",
            self.date.day(),
            self.date.month(),
            self.date.year(),
            self.country,
            self.kind,
            self.value,
        )
    }
}

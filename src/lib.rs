// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Outbreak - per-country epidemic statistics in balanced date indexes.
//!
//! Each (country, metric) series lives in its own AVL tree keyed by date, so
//! point lookups and date ranges stay logarithmic however long the outbreak
//! runs. A [`CountryMetricStore`] groups the four trees of every country, and
//! [`TrendPredictor`] turns a running total into a next-day forecast.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use outbreak::builder::CountryRecords;
//! use outbreak::builder::build_store;
//! use outbreak::MetricKind;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 5, d).unwrap();
//!
//! let mut records = CountryRecords::new("Portugal");
//! records.push(MetricKind::TotalCases, day(12), 642);
//! records.push(MetricKind::TotalCases, day(13), 693);
//!
//! let mut store = build_store(vec![records]).unwrap();
//! store.set_ordering(true);
//!
//! let point = store.point_for("PORTUGAL", MetricKind::TotalCases, day(13)).unwrap();
//! assert_eq!(point.map(|s| s.value), Some(693));
//!
//! let series = store.stats_for("portugal", MetricKind::TotalCases).unwrap();
//! assert_eq!(series.iter().map(|s| s.value).collect::<Vec<_>>(), vec![642, 693]);
//! ```

pub mod avl;
pub mod builder;
pub mod config;
pub mod error;
pub mod handle;
pub mod index;
pub mod metric;
pub mod node;
pub mod predict;
pub mod snapshot;
pub mod statistic;
pub mod store;

pub use config::StoreConfig;
pub use error::Error;
pub use error::Result;
pub use handle::StoreHandle;
pub use index::BalancedIndex;
pub use metric::MetricKind;
pub use node::StatNode;
pub use predict::TrendPredictor;
pub use statistic::VirusStatistic;
pub use store::CountryMetricStore;
pub use store::MetricBundle;
pub use store::Ordering;

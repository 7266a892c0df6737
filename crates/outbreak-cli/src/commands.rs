// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Running a parsed command against a loaded store.

use chrono::NaiveDate;
use outbreak::CountryMetricStore;
use outbreak::MetricKind;
use serde::Serialize;
use tracing::debug;

use crate::cli::Commands;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct ForecastReport<'a> {
    country: &'a str,
    metric: MetricKind,
    forecast: i64,
}

pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Run `command` and render its output, as JSON when `json` is set.
    pub fn execute(command: &Commands, store: &CountryMetricStore, json: bool) -> Result<String> {
        match command {
            Commands::Countries => {
                let countries = store.countries();
                if json {
                    return Ok(serde_json::to_string_pretty(&countries)?);
                }
                Ok(countries.join("\n"))
            }
            Commands::Stats {
                country,
                metric,
                from,
                to,
            } => {
                let stats = if from.is_some() || to.is_some() {
                    let first = from.unwrap_or(NaiveDate::MIN);
                    let last = to.unwrap_or(NaiveDate::MAX);
                    debug!(%first, %last, "range query");
                    store.range_for(country, *metric, first, last)?
                } else {
                    store.stats_for(country, *metric)?
                };
                if json {
                    return Ok(serde_json::to_string_pretty(&stats)?);
                }
                Ok(stats.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))
            }
            Commands::Point {
                country,
                metric,
                date,
            } => {
                let point = store.point_for(country, *metric, *date)?;
                if json {
                    return Ok(serde_json::to_string_pretty(&point)?);
                }
                Ok(match point {
                    Some(stat) => stat.to_string(),
                    None => format!("no {metric} reading for {country} on {date}"),
                })
            }
            Commands::Forecast { country, metric } => {
                let forecast = store.forecast(country, *metric)?;
                if json {
                    let report = ForecastReport {
                        country,
                        metric: *metric,
                        forecast,
                    };
                    return Ok(serde_json::to_string_pretty(&report)?);
                }
                Ok(format!("{metric} forecast for {country}: {forecast}"))
            }
        }
    }
}

// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Next-day forecasts from the recent growth trend.
//!
//! Epidemic counts grow roughly exponentially, so the trend is fitted on a
//! log scale: the last [`TREND_WINDOW`] readings are numbered `1..=15`,
//! mapped through `log10` (a zero reading maps to zero) and fitted with an
//! ordinary least-squares line. The forecast for a running total is the last
//! reading plus the step the fitted curve takes from day 15 to day 16, each
//! end truncated to an integer before subtracting.

use smallvec::SmallVec;

use crate::error::Error;
use crate::error::Result;

/// How many of the most recent readings a forecast looks at.
pub const TREND_WINDOW: usize = 15;

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 1.0 when every `y` is equal.
    pub r_squared: f64,
}

impl Fit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Simple one-variable least-squares regression.
#[derive(Debug, Clone, Default)]
pub struct Regression {
    points: SmallVec<[(f64, f64); 16]>,
}

impl Regression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fit the line, or `None` with fewer than two distinct `x` values.
    pub fn fit(&self) -> Option<Fit> {
        let n = self.points.len() as f64;
        if self.points.len() < 2 {
            return None;
        }

        let mean_x = self.points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = self.points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (x, y) in &self.points {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

        Some(Fit {
            slope,
            intercept,
            r_squared,
        })
    }
}

/// Log-linear trend forecasts over a date-ordered series.
pub struct TrendPredictor;

impl TrendPredictor {
    /// Fit the log-scale trend of the last [`TREND_WINDOW`] readings.
    pub fn trend(series: &[i64]) -> Result<Fit> {
        let window = Self::window(series)?;
        let mut regression = Regression::new();
        for (day, &value) in (1..).zip(window) {
            let y = if value == 0 { 0.0 } else { (value as f64).log10() };
            regression.add(day as f64, y);
        }
        // Fifteen distinct days always give a line.
        regression.fit().ok_or(Error::InsufficientHistory {
            required: TREND_WINDOW,
            found: window.len(),
        })
    }

    /// Forecast tomorrow's running total.
    ///
    /// Fails with [`Error::ForecastOutOfRange`] when a steep fit pushes the
    /// forecast past what an `i64` holds.
    pub fn predict_total(series: &[i64]) -> Result<i64> {
        let fit = Self::trend(series)?;
        let last = series[series.len() - 1];
        let tomorrow = 10f64.powf(fit.predict((TREND_WINDOW + 1) as f64)) as i64;
        let today = 10f64.powf(fit.predict(TREND_WINDOW as f64)) as i64;
        tomorrow
            .checked_sub(today)
            .and_then(|step| last.checked_add(step))
            .ok_or(Error::ForecastOutOfRange { last })
    }

    /// Forecast tomorrow's increment of a running total.
    pub fn predict_new(series: &[i64]) -> Result<i64> {
        let total = Self::predict_total(series)?;
        Ok(total - series[series.len() - 1])
    }

    fn window(series: &[i64]) -> Result<&[i64]> {
        if series.len() < TREND_WINDOW {
            return Err(Error::InsufficientHistory {
                required: TREND_WINDOW,
                found: series.len(),
            });
        }
        Ok(&series[series.len() - TREND_WINDOW..])
    }
}

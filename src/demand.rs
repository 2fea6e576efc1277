//! Synthetic demand history and forecast for a product code
//!
//! History months carry a trend, a yearly seasonal curve, random bonus
//! spikes (April and November only), random supply shocks and noise.
//! Forecast months carry trend, seasonality and a smaller noise term only.

use std::f64::consts::PI;

use tracing::{debug, instrument};

use crate::config::{SeriesConfig, TrendOrigin};
use crate::error::ConfigResult;
use crate::kpi::summarize;
use crate::models::{MonthlyRecord, SeriesSnapshot};
use crate::rng::{seed_from_code, SeededRandomStream};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 0-based month indices eligible for a bonus spike (April, November)
const BONUS_MONTHS: [u32; 2] = [3, 10];
const BONUS_THRESHOLD: f64 = 0.5;
const SUPPLY_SHOCK_THRESHOLD: f64 = 0.85;
/// Forecast stream seed = product seed + this offset
const FORECAST_SEED_OFFSET: u64 = 999;

/// Level and slope shared by history and forecast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemandProfile {
    pub base_level: f64,
    pub trend: f64,
}

impl DemandProfile {
    fn draw(stream: &mut SeededRandomStream) -> Self {
        let base_level = 500.0 + stream.draw() * 2000.0;
        let trend = (stream.draw() - 0.4) * 30.0;
        DemandProfile { base_level, trend }
    }

    /// Yearly seasonal component for a 0-based calendar month
    pub fn seasonal(&self, month_index: u32) -> f64 {
        let angle = 2.0 * PI * month_index as f64 / 12.0;
        angle.sin() * self.base_level * 0.15 + angle.cos() * self.base_level * 0.07
    }

    fn level_at(&self, t: u32, month_index: u32) -> f64 {
        self.base_level + self.trend * t as f64 + self.seasonal(month_index)
    }
}

/// Calendar position of the i-th month from the start of the series
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CalendarMonth {
    year: i32,
    month_index: u32, // 0-11
}

impl CalendarMonth {
    fn nth(start_year: i32, offset: u32) -> Self {
        CalendarMonth {
            year: start_year + (offset / 12) as i32,
            month_index: offset % 12,
        }
    }

    fn period(&self) -> String {
        format!("{}-{:02}", self.year, self.month_index + 1)
    }

    fn label(&self) -> String {
        format!("{} {}", MONTH_ABBREVIATIONS[self.month_index as usize], self.year)
    }
}

/// Round and floor at zero
fn clamp_round(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

fn scaled(quantity: u32, factor: f64) -> u32 {
    clamp_round(quantity as f64 * factor)
}

/// Builds the monthly record sequence for product codes
#[derive(Clone, Debug, Default)]
pub struct SeriesGenerator {
    config: SeriesConfig,
}

impl SeriesGenerator {
    /// Rejects horizons that `SeriesConfig::validate` rejects, so generation stays total
    pub fn new(config: SeriesConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(SeriesGenerator { config })
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// History followed by forecast, in chronological order.
    /// Total over all inputs; identical codes give identical sequences.
    #[instrument(skip(self))]
    pub fn generate(&self, code: &str) -> Vec<MonthlyRecord> {
        let seed = seed_from_code(code);
        let mut history_stream = SeededRandomStream::new(seed);
        let profile = DemandProfile::draw(&mut history_stream);

        let mut records = Vec::with_capacity(self.config.total_months() as usize);
        for t in 0..self.config.history_months {
            let month = CalendarMonth::nth(self.config.start_year, t);
            records.push(historical_record(&profile, &mut history_stream, month, t));
        }

        // Separate stream: forecast values never depend on how many draws history took
        let mut forecast_stream = SeededRandomStream::new(seed + FORECAST_SEED_OFFSET);
        for step in 0..self.config.forecast_months {
            let offset = self.config.history_months + step;
            let month = CalendarMonth::nth(self.config.start_year, offset);
            let t = self.forecast_trend_index(step);
            records.push(forecast_record(&profile, &mut forecast_stream, month, t));
        }

        debug!(
            seed,
            base_level = profile.base_level,
            trend = profile.trend,
            records = records.len(),
            "generated series"
        );
        records
    }

    /// Trend index for the given forecast step
    pub fn forecast_trend_index(&self, step: u32) -> u32 {
        match self.config.forecast_trend_origin {
            TrendOrigin::YearStart => (self.config.history_months / 12) * 12 + step,
            TrendOrigin::Calendar => self.config.history_months + step,
        }
    }

    /// Series plus KPIs, with history trimmed to the configured window
    pub fn snapshot(&self, code: &str) -> SeriesSnapshot {
        let records = self.generate(code);
        snapshot_from_records(code, &records, self.config.history_window)
    }
}

pub fn snapshot_from_records(
    code: &str,
    records: &[MonthlyRecord],
    history_window: usize,
) -> SeriesSnapshot {
    let kpis = summarize(records);
    let (history, forward_forecast): (Vec<MonthlyRecord>, Vec<MonthlyRecord>) =
        records.iter().cloned().partition(MonthlyRecord::is_historical);
    let skip = history.len().saturating_sub(history_window);

    SeriesSnapshot {
        code: code.to_string(),
        history: history.into_iter().skip(skip).collect(),
        forward_forecast,
        kpis,
    }
}

/// Generate the default 30 + 6 month series for a product code
pub fn generate_series(code: &str) -> Vec<MonthlyRecord> {
    SeriesGenerator::default().generate(code)
}

fn historical_record(
    profile: &DemandProfile,
    stream: &mut SeededRandomStream,
    month: CalendarMonth,
    t: u32,
) -> MonthlyRecord {
    let base = profile.base_level;

    // Draw order matters: bonus (eligible months only), shock, noise, inventories, bonus qty
    let bonus_flag = BONUS_MONTHS.contains(&month.month_index) && stream.exceeds(BONUS_THRESHOLD);
    let supply_flag = stream.exceeds(SUPPLY_SHOCK_THRESHOLD);

    let bonus_lift = if bonus_flag { base * 0.35 } else { 0.0 };
    let supply_drop = if supply_flag { -base * 0.25 } else { 0.0 };
    let noise = (stream.draw() - 0.5) * base * 0.12;
    let actual = clamp_round(profile.level_at(t, month.month_index) + bonus_lift + supply_drop + noise);

    // Inventories scale off the clamped actual, zero included
    let primary_inventory = scaled(actual, 1.5 + stream.draw() * 1.2);
    let dist_inventory = scaled(actual, 0.6 + stream.draw() * 0.8);
    let bonus_qty = if bonus_flag {
        scaled(actual, 0.2 + stream.draw() * 0.2)
    } else {
        0
    };

    MonthlyRecord {
        period: month.period(),
        label: month.label(),
        actual: Some(actual),
        predicted: None,
        primary_inventory,
        dist_inventory,
        bonus_qty,
        bonus_flag,
        supply_flag,
        year: month.year,
        month: month.month_index + 1,
        is_forecast: false,
    }
}

fn forecast_record(
    profile: &DemandProfile,
    stream: &mut SeededRandomStream,
    month: CalendarMonth,
    t: u32,
) -> MonthlyRecord {
    let base = profile.base_level;
    let noise = (stream.draw() - 0.5) * base * 0.08;
    let predicted = clamp_round(profile.level_at(t, month.month_index) + noise);

    MonthlyRecord {
        period: month.period(),
        label: month.label(),
        actual: None,
        predicted: Some(predicted),
        primary_inventory: scaled(predicted, 1.3 + stream.draw() * 1.0),
        dist_inventory: scaled(predicted, 0.5 + stream.draw() * 0.7),
        bonus_qty: 0,
        bonus_flag: false,
        supply_flag: false,
        year: month.year,
        month: month.month_index + 1,
        is_forecast: true,
    }
}

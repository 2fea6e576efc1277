//! KPI aggregation over a generated record sequence

use crate::models::{KpiSummary, MonthlyRecord, Trend};

/// Placeholder shown when a metric cannot be computed
pub const MISSING: &str = "—";

/// Derive the summary metrics from a record sequence.
/// Works on any slice; short or forecast-only sequences leave the
/// history-dependent fields empty instead of failing.
pub fn summarize(records: &[MonthlyRecord]) -> KpiSummary {
    let actuals: Vec<&MonthlyRecord> = records
        .iter()
        .filter(|r| r.is_historical() && r.actual.is_some())
        .collect();

    let next_month_forecast = records.iter().find(|r| r.is_forecast).cloned();
    let last_actual = actuals.last().map(|r| (*r).clone());
    let prev_actual = actuals
        .len()
        .checked_sub(2)
        .map(|index| actuals[index].clone());

    let mom_percent = match (&last_actual, &prev_actual) {
        (Some(last), Some(prev)) => {
            let last = last.actual.unwrap_or(0) as f64;
            let prev = prev.actual.unwrap_or(0);
            Some(round_one_decimal((last - prev as f64) / prev.max(1) as f64 * 100.0))
        }
        _ => None,
    };

    let total: u64 = actuals.iter().filter_map(|r| r.actual).map(u64::from).sum();
    let avg_actual = if actuals.is_empty() {
        0
    } else {
        (total as f64 / actuals.len() as f64).round() as u32
    };

    KpiSummary {
        next_month_forecast,
        last_actual,
        prev_actual,
        mom_percent,
        avg_actual,
        bonus_months: actuals.iter().filter(|r| r.bonus_flag).count(),
        supply_shocks: actuals.iter().filter(|r| r.supply_flag).count(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl KpiSummary {
    /// MoM change with one decimal, e.g. "10.0"
    pub fn mom_label(&self) -> String {
        match self.mom_percent {
            Some(percent) => format!("{:.1}", percent),
            None => MISSING.to_string(),
        }
    }

    /// A missing MoM change reads as declining
    pub fn trend(&self) -> Trend {
        match self.mom_percent {
            Some(percent) if percent > 0.0 => Trend::Growing,
            _ => Trend::Declining,
        }
    }
}

//! Data structures shared by the series generator, KPI aggregation and reporting

use serde::{Deserialize, Serialize};

/// One calendar month of sales and inventory for a product code
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub period: String,            // YYYY-MM
    pub label: String,             // e.g. "Jan 2023"
    pub actual: Option<u32>,       // Historical months only
    pub predicted: Option<u32>,    // Forecast months only
    pub primary_inventory: u32,
    pub dist_inventory: u32,
    pub bonus_qty: u32,
    #[serde(with = "flag")]
    pub bonus_flag: bool,
    #[serde(with = "flag")]
    pub supply_flag: bool,
    pub year: i32,
    pub month: u32,                // 1-12
    pub is_forecast: bool,
}

impl MonthlyRecord {
    pub fn is_historical(&self) -> bool {
        !self.is_forecast
    }
}

/// Summary metrics derived from a record sequence
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub next_month_forecast: Option<MonthlyRecord>,
    pub last_actual: Option<MonthlyRecord>,
    pub prev_actual: Option<MonthlyRecord>,
    /// Month-over-month change in percent, one decimal
    pub mom_percent: Option<f64>,
    pub avg_actual: u32,
    pub bonus_months: usize,
    pub supply_shocks: usize,
}

/// Direction of the latest month-over-month change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Trend {
    Growing,
    Declining,
}

/// Payload handed to external consumers: a trailing history window plus the forecast
#[derive(Clone, Debug, Serialize)]
pub struct SeriesSnapshot {
    pub code: String,
    pub history: Vec<MonthlyRecord>,
    pub forward_forecast: Vec<MonthlyRecord>,
    pub kpis: KpiSummary,
}

/// Flags travel as 0/1 integers on the wire
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "flag must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

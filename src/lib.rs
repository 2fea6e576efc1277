//! Deterministic synthetic sales/inventory series for product codes.
//!
//! A product code is hashed into a seed, the seed drives independent Lehmer
//! streams for history and forecast, and the resulting monthly records feed
//! the KPI summary shown on the dashboard cards.

pub mod cache;
pub mod config;
pub mod demand;
pub mod error;
pub mod kpi;
pub mod logging;
pub mod models;
pub mod reporting;
pub mod rng;

pub use cache::{CacheStats, SeriesCache};
pub use config::{SeriesConfig, TrendOrigin};
pub use demand::{generate_series, SeriesGenerator};
pub use error::{ConfigError, ConfigResult};
pub use kpi::summarize;
pub use models::{KpiSummary, MonthlyRecord, SeriesSnapshot, Trend};
pub use rng::{seed_from_code, SeededRandomStream};

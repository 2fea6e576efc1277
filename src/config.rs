//! Horizon parameters for series generation

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable the demo binary reads a config path from
pub const CONFIG_ENV_VAR: &str = "SKU_SIM_CONFIG";

const MAX_HORIZON_MONTHS: u32 = 600;
const MAX_YEAR: i32 = 9999;

/// Where the trend index of forecast months is counted from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendOrigin {
    /// Forecast step k sits at 12 * (year offset of the first forecast month) + k
    #[default]
    YearStart,
    /// Forecast months continue the historical month index
    Calendar,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Year of the first historical month (always January)
    pub start_year: i32,
    pub history_months: u32,
    pub forecast_months: u32,
    pub forecast_trend_origin: TrendOrigin,
    /// Historical months included in a snapshot payload
    pub history_window: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        SeriesConfig {
            start_year: 2023,
            history_months: 30,
            forecast_months: 6,
            forecast_trend_origin: TrendOrigin::YearStart,
            history_window: 24,
        }
    }
}

impl SeriesConfig {
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: SeriesConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Config from `SKU_SIM_CONFIG` when set, defaults otherwise
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("history_months", self.history_months),
            ("forecast_months", self.forecast_months),
        ] {
            if value > MAX_HORIZON_MONTHS {
                return Err(ConfigError::InvalidHorizon {
                    field,
                    value: i64::from(value),
                    message: format!("at most {} months are supported", MAX_HORIZON_MONTHS),
                });
            }
        }

        let span_years = (self.total_months().saturating_add(11) / 12) as i32;
        if self.start_year < 1 || self.start_year > MAX_YEAR - span_years {
            return Err(ConfigError::InvalidHorizon {
                field: "start_year",
                value: i64::from(self.start_year),
                message: format!("horizon must fall within years 1..={}", MAX_YEAR),
            });
        }

        Ok(())
    }

    pub fn total_months(&self) -> u32 {
        self.history_months.saturating_add(self.forecast_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_dashboard_horizon() {
        let config = SeriesConfig::default();
        assert_eq!(config.start_year, 2023);
        assert_eq!(config.history_months, 30);
        assert_eq!(config.forecast_months, 6);
        assert_eq!(config.total_months(), 36);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SeriesConfig::from_json_str(
            r#"{"forecast_months": 12, "forecast_trend_origin": "calendar"}"#,
        )
        .unwrap();

        assert_eq!(config.forecast_months, 12);
        assert_eq!(config.forecast_trend_origin, TrendOrigin::Calendar);
        assert_eq!(config.history_months, 30);
        assert_eq!(config.start_year, 2023);
    }

    #[test]
    fn test_rejects_oversized_horizon() {
        let err = SeriesConfig::from_json_str(r#"{"history_months": 601}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidHorizon { field: "history_months", .. }
        ));
    }

    #[test]
    fn test_rejects_start_year_out_of_range() {
        let err = SeriesConfig::from_json_str(r#"{"start_year": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHorizon { field: "start_year", .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SeriesConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"start_year": 2020, "history_window": 12}}"#).unwrap();

        let config = SeriesConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.start_year, 2020);
        assert_eq!(config.history_window, 12);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SeriesConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_total_months_saturates() {
        let config = SeriesConfig {
            history_months: u32::MAX,
            forecast_months: 1,
            ..SeriesConfig::default()
        };
        assert_eq!(config.total_months(), u32::MAX);
        assert!(config.validate().is_err());

        let far_future = SeriesConfig {
            start_year: i32::MAX,
            ..SeriesConfig::default()
        };
        assert!(matches!(
            far_future.validate(),
            Err(ConfigError::InvalidHorizon { field: "start_year", .. })
        ));
    }
}

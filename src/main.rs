use std::process::ExitCode;

use sku_forecast_sim::demand::snapshot_from_records;
use sku_forecast_sim::reporting::display_report;
use sku_forecast_sim::{logging, summarize, SeriesCache, SeriesConfig, SeriesGenerator};

/// Codes shown when none are given on the command line
const DEMO_CODES: &[&str] = &[
    "SKU-001", "SKU-002", "SKU-003", "SKU-004", "SKU-005", "SKU-007", "SKU-012",
];

fn main() -> ExitCode {
    logging::init();

    let mut json = false;
    let mut codes: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("usage: sku-forecast-sim [--json] [CODE ...]");
                return ExitCode::SUCCESS;
            }
            _ => codes.push(arg),
        }
    }
    if codes.is_empty() {
        codes = DEMO_CODES.iter().map(|c| c.to_string()).collect();
    }

    let generator = match SeriesConfig::from_env().and_then(SeriesGenerator::new) {
        Ok(generator) => generator,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let config = generator.config();
    tracing::info!(
        start_year = config.start_year,
        history_months = config.history_months,
        forecast_months = config.forecast_months,
        "generating {} series",
        codes.len()
    );

    let mut cache = SeriesCache::new(generator, codes.len());
    let history_window = cache.generator().config().history_window;
    let mut snapshots = Vec::new();

    for code in &codes {
        let records = cache.get_or_generate(code);
        if json {
            snapshots.push(snapshot_from_records(code, &records, history_window));
        } else {
            display_report(code, &records, &summarize(&records));
        }
    }

    if json {
        match serde_json::to_string_pretty(&snapshots) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                tracing::error!("failed to serialize snapshots: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    let stats = cache.stats();
    tracing::debug!(hits = stats.hits, misses = stats.misses, "series cache");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_codes_match_dashboard_catalog() {
        assert_eq!(
            DEMO_CODES,
            ["SKU-001", "SKU-002", "SKU-003", "SKU-004", "SKU-005", "SKU-007", "SKU-012"]
        );
    }
}

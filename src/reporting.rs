//! Console presentation of a product's series and KPI cards

use std::fmt::Write;

use crate::kpi::MISSING;
use crate::models::{KpiSummary, MonthlyRecord, Trend};

/// 12345 -> "12,345"
pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact chart axis label: 1234 -> "1.2k", 950 -> "950"
pub fn format_axis_tick(value: u32) -> String {
    if value >= 1000 {
        format!("{:.1}k", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

/// Signed MoM change, e.g. "+10.0%"
pub fn format_mom(summary: &KpiSummary) -> String {
    match summary.mom_percent {
        Some(percent) if percent > 0.0 => format!("+{}%", summary.mom_label()),
        Some(_) => format!("{}%", summary.mom_label()),
        None => MISSING.to_string(),
    }
}

fn quantity_or_missing(value: Option<u32>) -> String {
    value.map(format_thousands).unwrap_or_else(|| MISSING.to_string())
}

fn flag_mark(flag: bool) -> &'static str {
    if flag {
        "●"
    } else {
        ""
    }
}

/// KPI cards as label / value / caption lines
pub fn render_kpi_cards(summary: &KpiSummary) -> String {
    let next = summary.next_month_forecast.as_ref();
    let last = summary.last_actual.as_ref();
    let trend = match summary.trend() {
        Trend::Growing => "▲ Growing",
        Trend::Declining => "▼ Declining",
    };

    let cards = [
        (
            "Next Month Forecast",
            quantity_or_missing(next.and_then(|r| r.predicted)),
            next.map(|r| r.label.clone()).unwrap_or_default(),
        ),
        (
            "Last Actual",
            quantity_or_missing(last.and_then(|r| r.actual)),
            last.map(|r| r.label.clone()).unwrap_or_default(),
        ),
        ("MoM Change", format_mom(summary), trend.to_string()),
        (
            "Avg Monthly Sales",
            format_thousands(summary.avg_actual),
            "Historical mean".to_string(),
        ),
        (
            "Bonus Events",
            summary.bonus_months.to_string(),
            "Months with bonus spike".to_string(),
        ),
        (
            "Supply Shocks",
            summary.supply_shocks.to_string(),
            "Stockout events".to_string(),
        ),
    ];

    let mut out = String::new();
    for (label, value, caption) in cards {
        let _ = writeln!(out, "  {:<20} {:>10}   {}", label, value, caption);
    }
    out
}

/// One row per month; forecast rows are marked with '*'
pub fn render_series_table(records: &[MonthlyRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<10} {:>9} {:>9} {:>9} {:>9} {:>7} {:>5} {:>6}",
        "Month", "Actual", "Forecast", "Primary", "Dist", "Bonus", "B", "Shock"
    );
    for record in records {
        let marker = if record.is_forecast { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {:<10} {:>9} {:>9} {:>9} {:>9} {:>7} {:>5} {:>6}",
            marker,
            record.label,
            record.actual.map(format_thousands).unwrap_or_default(),
            record.predicted.map(format_thousands).unwrap_or_default(),
            format_axis_tick(record.primary_inventory),
            format_axis_tick(record.dist_inventory),
            record.bonus_qty,
            flag_mark(record.bonus_flag),
            flag_mark(record.supply_flag),
        );
    }
    out
}

/// Print the full report for one product code
pub fn display_report(code: &str, records: &[MonthlyRecord], summary: &KpiSummary) {
    println!("\n╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║  SKU FORECAST - {:<61}║", code);
    println!("╚══════════════════════════════════════════════════════════════════════════════╝\n");

    println!("Key Metrics:");
    print!("{}", render_kpi_cards(summary));
    println!("\nSales Trend (* = forecast horizon):");
    print!("{}", render_series_table(records));
}

//! # summarize 子命令实现
//!
//! 读取合并数据集并打印统计表：
//! - 总体摘要
//! - 贴地/高架 × 昼/夜 频率
//! - 季节统计
//! - 最强 / 最厚逆温
//!
//! ## 依赖关系
//! - 使用 `cli/summarize.rs` 定义的 SummarizeArgs
//! - 使用 `report::load_records` 读取数据
//! - 使用 `analysis/stats.rs` 计算统计量

use crate::analysis::stats::{self, Frequency, SeasonStats, Summary};
use crate::cli::summarize::SummarizeArgs;
use crate::error::Result;
use crate::models::inversion::DATE_FORMAT;
use crate::models::InversionRecord;
use crate::report::load_records;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 指标行
#[derive(Debug, Clone, Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// 季节行
#[derive(Debug, Clone, Tabled)]
struct SeasonRow {
    #[tabled(rename = "Season")]
    season: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "ΔT mean")]
    mean_delta_t: String,
    #[tabled(rename = "ΔT max")]
    max_delta_t: String,
    #[tabled(rename = "ΔH mean")]
    mean_delta_h: String,
    #[tabled(rename = "ΔH max")]
    max_delta_h: String,
    #[tabled(rename = "Ground")]
    ground: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Night")]
    night: String,
}

/// 逆温行
#[derive(Debug, Clone, Tabled)]
struct InversionRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "ΔT (°C)")]
    delta_t: String,
    #[tabled(rename = "ΔH (m)")]
    delta_h: String,
    #[tabled(rename = "Base (m)")]
    base: String,
    #[tabled(rename = "Ground")]
    ground: &'static str,
}

/// 执行统计
pub fn execute(args: SummarizeArgs) -> Result<()> {
    output::print_header("Inversion Statistics");

    let records = load_records(&args.input)?;
    output::print_info(&format!(
        "Loaded {} inversions from '{}'",
        records.len(),
        args.input.display()
    ));

    if records.is_empty() {
        output::print_warning("No inversions in the dataset");
        return Ok(());
    }

    output::print_header("Summary");
    println!("{}", Table::new(summary_rows(&stats::summarize(&records))));

    output::print_header("Frequency (share of all inversions)");
    println!("{}", Table::new(frequency_rows(&stats::frequency(&records))));

    output::print_header("Seasonal Statistics");
    println!("{}", Table::new(season_rows(&stats::seasonal(&records))));

    output::print_header(&format!("Top {} Strongest Inversions (ΔT)", args.top_n));
    println!("{}", Table::new(inversion_rows(&stats::strongest(&records, args.top_n))));

    output::print_header(&format!("Top {} Deepest Inversions (ΔH)", args.top_n));
    println!("{}", Table::new(inversion_rows(&stats::deepest(&records, args.top_n))));

    Ok(())
}

fn fmt_opt(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.2} {}", v, unit))
        .unwrap_or_else(|| "-".to_string())
}

fn percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn summary_rows(s: &Summary) -> Vec<MetricRow> {
    let row = |metric, value| MetricRow { metric, value };
    vec![
        row("Total inversions", s.total.to_string()),
        row("Ground inversions", s.ground.to_string()),
        row("Elevated inversions", s.elevated.to_string()),
        row("Day (12Z)", s.day.to_string()),
        row("Night (00Z)", s.night.to_string()),
        row("Mean ΔT", fmt_opt(s.mean_delta_t, "°C")),
        row("Max ΔT", fmt_opt(s.max_delta_t, "°C")),
        row("Mean ΔH", fmt_opt(s.mean_delta_h, "m")),
        row("Max ΔH", fmt_opt(s.max_delta_h, "m")),
        row("Mean base height", fmt_opt(s.mean_base_height, "m")),
    ]
}

fn frequency_rows(f: &Frequency) -> Vec<MetricRow> {
    let row = |metric, share| MetricRow {
        metric,
        value: percent(share),
    };
    vec![
        row("Ground, day", f.ground_day),
        row("Ground, night", f.ground_night),
        row("Elevated, day", f.elevated_day),
        row("Elevated, night", f.elevated_night),
    ]
}

fn season_rows(seasons: &[SeasonStats]) -> Vec<SeasonRow> {
    seasons
        .iter()
        .map(|s| SeasonRow {
            season: s.season.to_string(),
            count: s.count,
            mean_delta_t: format!("{:.2}", s.mean_delta_t),
            max_delta_t: format!("{:.2}", s.max_delta_t),
            mean_delta_h: format!("{:.1}", s.mean_delta_h),
            max_delta_h: format!("{:.1}", s.max_delta_h),
            ground: percent(s.ground_share),
            day: percent(s.day_share),
            night: percent(s.night_share),
        })
        .collect()
}

fn inversion_rows(records: &[InversionRecord]) -> Vec<InversionRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| InversionRow {
            rank: i + 1,
            date: r.date.format(DATE_FORMAT).to_string(),
            delta_t: format!("{:.2}", r.delta_t),
            delta_h: format!("{:.1}", r.delta_h),
            base: format!("{:.1}", r.base_height),
            ground: if r.ground { "yes" } else { "no" },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::record;

    #[test]
    fn test_summary_rows_format() {
        let records = vec![record(1, 0, 0.0, true), record(1, 12, 300.0, false)];
        let rows = summary_rows(&stats::summarize(&records));
        assert_eq!(rows[0].value, "2");
        assert_eq!(rows[1].value, "1");
        assert_eq!(rows[5].value, "2.00 °C");
        assert_eq!(rows[9].value, "150.00 m");

        let empty = summary_rows(&stats::summarize(&[]));
        assert_eq!(empty[5].value, "-");
    }

    #[test]
    fn test_frequency_and_inversion_rows() {
        let records = vec![
            record(1, 0, 0.0, true),
            record(1, 0, 400.0, false),
            record(2, 12, 0.0, true),
            record(3, 12, 0.0, true),
        ];
        let rows = frequency_rows(&stats::frequency(&records));
        assert_eq!(rows[0].value, "50.0%");
        assert_eq!(rows[1].value, "25.0%");
        assert_eq!(rows[2].value, "0.0%");

        let top = inversion_rows(&records[..2]);
        assert_eq!(top[1].rank, 2);
        assert_eq!(top[1].ground, "no");
        assert_eq!(top[0].date, "2021-01-01 00:00:00");
    }
}

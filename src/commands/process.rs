//! # process / run 子命令实现
//!
//! 获取探空、检测逆温、导出单次探空文件与合并数据集，并打印汇总。
//!
//! ## 依赖关系
//! - 使用 `cli/process.rs` 定义的 ProcessArgs / RunArgs
//! - 使用 `pipeline.rs` 执行流程
//! - 使用 `report/` 导出 CSV
//! - 使用 `analysis/stats.rs` 生成汇总

use crate::analysis::{stats, Detector};
use crate::cli::process::{ProcessArgs, RunArgs};
use crate::error::Result;
use crate::models::PeriodKey;
use crate::pipeline;
use crate::report::{CsvReportSink, InversionReport, ReportSink};
use crate::source::{CachingSource, DataSource, LocalArchive, WyomingClient};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct CountRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

/// 只使用本地归档
pub fn execute_process(args: ProcessArgs) -> Result<()> {
    output::print_header("Temperature Inversion Detection");

    let keys = args.period.keys()?;
    let source = LocalArchive::new(args.data_dir.clone()).recursive(args.recursive);

    let dirs: Vec<String> = args
        .data_dir
        .iter()
        .map(|d| format!("'{}'", d.display()))
        .collect();
    output::print_info(&format!("Searching saved pages in {}", dirs.join(", ")));

    let detector = Detector::with_config(args.detector.config());
    run_and_export(&source, &keys, &detector, args.jobs, &args.output_dir)
}

/// 本地缺失时下载
pub fn execute_run(args: RunArgs) -> Result<()> {
    output::print_header("Temperature Inversion Detection");

    let keys = args.period.keys()?;
    let source = CachingSource::new(
        LocalArchive::new(vec![args.data_dir.clone()]),
        WyomingClient::new(args.archive.config())?,
        args.data_dir.clone(),
    );

    output::print_info(&format!(
        "Using cached pages in '{}', downloading from {}",
        args.data_dir.display(),
        args.archive.archive_url
    ));

    let detector = Detector::with_config(args.detector.config());
    run_and_export(&source, &keys, &detector, args.jobs, &args.output_dir)
}

fn run_and_export(
    source: &dyn DataSource,
    keys: &[PeriodKey],
    detector: &Detector,
    jobs: usize,
    output_dir: &Path,
) -> Result<()> {
    let config = detector.config();
    output::print_info(&format!(
        "{} month(s), base below {} m, ground at or below {} m",
        keys.len(),
        config.max_base_height,
        config.ground_threshold
    ));

    let report = pipeline::run_batch(source, keys, detector, jobs)?;

    for failure in &report.source_failures {
        output::print_warning(&format!(
            "{}-{:02}: {}",
            failure.period.year, failure.period.month, failure.reason
        ));
    }

    let sink = CsvReportSink::new(output_dir.to_path_buf());
    let summary = sink.write(&report)?;

    output::print_success(&format!(
        "Wrote {} sounding file(s) under '{}'",
        summary.sounding_files,
        output_dir.display()
    ));
    if let Some(dir) = &summary.combined_dir {
        output::print_success(&format!("Combined dataset saved to '{}'", dir.display()));
    }

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &InversionReport) {
    let s = stats::summarize(&report.records);

    let rows = vec![
        CountRow {
            item: "Soundings with inversions",
            count: report.processed,
        },
        CountRow {
            item: "Soundings without inversions",
            count: report.no_inversion,
        },
        CountRow {
            item: "Malformed soundings",
            count: report.failed,
        },
        CountRow {
            item: "Inversions",
            count: s.total,
        },
        CountRow {
            item: "Ground inversions",
            count: s.ground,
        },
        CountRow {
            item: "Elevated inversions",
            count: s.elevated,
        },
    ];

    output::print_header("Processing Summary");
    println!("{}", Table::new(&rows));

    output::print_separator();
    output::print_done(&format!("Successfully processed: {}", report.valid()));
    if report.failed > 0 {
        output::print_warning(&format!("Failed: {}", report.failed));
        for (label, reason) in report.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", label, reason));
        }
        if report.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", report.failures.len() - 10));
        }
    }
}

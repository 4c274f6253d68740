//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fetch`: 下载归档页面
//! - `process`: 从本地归档检测逆温并导出
//! - `run`: 下载（缺失时）+ 处理
//! - `summarize`: 统计合并数据集
//! - `plot`: 绘制分布图
//! - `profile`: 绘制单个逆温的温度廓线
//! - `list`: 列出已保存的页面与导出结果
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: fetch, list, plot, process, profile, summarize

pub mod fetch;
pub mod list;
pub mod plot;
pub mod process;
pub mod profile;
pub mod summarize;

use crate::analysis::detector::{DEFAULT_GROUND_THRESHOLD, DEFAULT_MAX_BASE_HEIGHT};
use crate::analysis::DetectorConfig;
use crate::error::Result;
use crate::models::{period_range, PeriodKey, StationId};
use crate::source::wyoming::{DEFAULT_ARCHIVE_URL, DEFAULT_REGION};
use crate::source::WyomingConfig;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// wysonde - 探空逆温分析工具
#[derive(Parser)]
#[command(name = "wysonde")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Detect temperature inversions in Wyoming upper-air soundings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level or filter directives (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Download raw archive pages for a station and month range
    Fetch(fetch::FetchArgs),

    /// Detect inversions in locally saved archive pages
    Process(process::ProcessArgs),

    /// Download missing pages, then detect inversions
    Run(process::RunArgs),

    /// Print statistics for a combined inversion dataset
    Summarize(summarize::SummarizeArgs),

    /// Plot inversion distributions from a combined dataset
    Plot(plot::PlotArgs),

    /// Plot the temperature profile of one inversion
    Profile(profile::ProfileArgs),

    /// List saved archive pages and exported results
    List(list::ListArgs),
}

// ─────────────────────────────────────────────────────────────
// 共享参数
// ─────────────────────────────────────────────────────────────

/// 站点与时段
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Year (4 digits)
    #[arg(long, default_value_t = 2021)]
    pub year: i32,

    /// First month (1-12)
    #[arg(long, default_value_t = 1)]
    pub month: u32,

    /// Last month (inclusive, defaults to --month)
    #[arg(long)]
    pub end_month: Option<u32>,

    /// WMO station number
    #[arg(long, default_value_t = 26075)]
    pub station: u32,
}

impl PeriodArgs {
    /// 生成查询键
    pub fn keys(&self) -> Result<Vec<PeriodKey>> {
        let station = StationId::new(self.station)?;
        period_range(
            self.year,
            self.month,
            self.end_month.unwrap_or(self.month),
            station,
        )
    }
}

/// 远程归档
#[derive(Args, Debug, Clone)]
pub struct ArchiveArgs {
    /// Base URL of the sounding archive
    #[arg(long, env = "WYSONDE_ARCHIVE_URL", default_value = DEFAULT_ARCHIVE_URL)]
    pub archive_url: String,

    /// Archive region parameter
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
}

impl ArchiveArgs {
    pub fn config(&self) -> WyomingConfig {
        WyomingConfig {
            base_url: self.archive_url.clone(),
            region: self.region.clone(),
            timeout: std::time::Duration::from_secs(self.timeout),
            ..WyomingConfig::default()
        }
    }
}

/// 检测阈值
#[derive(Args, Debug, Clone)]
pub struct DetectorArgs {
    /// Inversion base must lie strictly below this height (m above ground)
    #[arg(long, default_value_t = DEFAULT_MAX_BASE_HEIGHT)]
    pub max_base_height: f64,

    /// Bases at or below this height (m above ground) are ground inversions
    #[arg(long, default_value_t = DEFAULT_GROUND_THRESHOLD)]
    pub ground_threshold: f64,
}

impl DetectorArgs {
    pub fn config(&self) -> DetectorConfig {
        DetectorConfig {
            max_base_height: self.max_base_height,
            ground_threshold: self.ground_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["wysonde", "run", "--end-month", "3"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                let keys = args.period.keys().unwrap();
                assert_eq!(keys.len(), 3);
                assert_eq!(keys[0].station.value(), 26075);
                assert_eq!(keys[2].month, 3);
                assert_eq!(args.detector.config(), DetectorConfig::default());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_log_flags() {
        let cli = Cli::try_parse_from([
            "wysonde",
            "summarize",
            "DATA/df_full.csv",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_period() {
        let cli = Cli::try_parse_from(["wysonde", "process", "--month", "5", "--end-month", "2"])
            .unwrap();
        match cli.command {
            Commands::Process(args) => assert!(args.period.keys().is_err()),
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn test_profile_and_list_args() {
        let cli = Cli::try_parse_from([
            "wysonde",
            "profile",
            "DATA/df_full.csv",
            "--index",
            "3",
            "--data-dir",
            "data,archive",
        ])
        .unwrap();
        match cli.command {
            Commands::Profile(args) => {
                assert_eq!(args.index, 3);
                assert_eq!(args.data_dir.len(), 2);
                assert_eq!(args.output, PathBuf::from("inversion_profile.png"));
            }
            _ => panic!("expected profile"),
        }

        let cli = Cli::try_parse_from(["wysonde", "list"]).unwrap();
        match cli.command {
            Commands::List(args) => {
                assert_eq!(
                    args.data_dir,
                    vec![PathBuf::from("data"), PathBuf::from("test_results")]
                );
                assert_eq!(args.output_dir, PathBuf::from("."));
            }
            _ => panic!("expected list"),
        }
    }
}

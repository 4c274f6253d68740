//! # process / run 子命令 CLI 定义
//!
//! - `process`: 只读本地归档
//! - `run`: 本地缺失时先下载
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/process.rs`

use super::{ArchiveArgs, DetectorArgs, PeriodArgs};
use clap::Args;
use std::path::PathBuf;

/// process 子命令参数
#[derive(Args, Debug)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    #[command(flatten)]
    pub detector: DetectorArgs,

    /// Directories searched for saved pages (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "data,test_results")]
    pub data_dir: Vec<PathBuf>,

    /// Search data directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Directory for per-sounding files and the combined dataset
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of parallel jobs (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    #[command(flatten)]
    pub detector: DetectorArgs,

    #[command(flatten)]
    pub archive: ArchiveArgs,

    /// Directory holding cached raw pages
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for per-sounding files and the combined dataset
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of parallel jobs (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}

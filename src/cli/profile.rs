//! # profile 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/profile.rs`

use clap::Args;
use std::path::PathBuf;

/// profile 子命令参数
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Combined dataset CSV (e.g. DATA/df_full.csv)
    pub input: PathBuf,

    /// Row of the inversion to draw (0-based, blank grid rows skipped)
    #[arg(short, long, default_value_t = 0)]
    pub index: usize,

    /// Directories searched for saved pages (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "data,test_results")]
    pub data_dir: Vec<PathBuf>,

    /// Search data directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = "inversion_profile.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1000)]
    pub height: u32,
}

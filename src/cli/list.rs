//! # list 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/list.rs`

use clap::Args;
use std::path::PathBuf;

/// list 子命令参数
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directories searched for saved pages (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "data,test_results")]
    pub data_dir: Vec<PathBuf>,

    /// Search data directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Directory holding per-sounding files and the combined dataset
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

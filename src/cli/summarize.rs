//! # summarize 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/summarize.rs`

use clap::Args;
use std::path::PathBuf;

/// summarize 子命令参数
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Combined dataset CSV (e.g. DATA/df_full.csv)
    pub input: PathBuf,

    /// Number of strongest/deepest inversions to list
    #[arg(long, default_value_t = 5)]
    pub top_n: usize,
}

//! # fetch 子命令 CLI 定义
//!
//! 下载一个站点若干月份的归档页面
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fetch.rs`

use super::{ArchiveArgs, PeriodArgs};
use clap::Args;
use std::path::PathBuf;

/// fetch 子命令参数
#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    #[command(flatten)]
    pub archive: ArchiveArgs,

    /// Directory to save raw pages into
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Download again even if the page is already saved
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

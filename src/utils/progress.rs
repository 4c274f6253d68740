//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//! 前缀显示任务名，消息留给调用方显示实时计数。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 和 `commands/fetch.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{spinner:.green} {prefix:.bold} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// 创建标准进度条
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_prefix(label.to_string());
    pb
}

//! # 批量处理模块
//!
//! ## 功能
//! - 在数据目录中收集归档页面
//! - 并行检测与统计
//!
//! ## 依赖关系
//! - 被 `pipeline.rs`、`source/local.rs` 和 `commands/list.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};

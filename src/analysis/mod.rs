//! # 逆温分析模块
//!
//! 提供逆温检测、统计与绘图功能。
//!
//! ## 子模块
//! - `detector`: 单次探空的逆温检测
//! - `stats`: 表格视图上的描述性统计
//! - `plot`: 分布图与单个逆温廓线图
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 和 `commands/` 使用
//! - 使用 `models/`

pub mod detector;
pub mod plot;
pub mod stats;

pub use detector::{Detector, DetectorConfig};

//! # 数据源模块
//!
//! 按 (年, 月, 站号) 提供已解码的探空。
//!
//! ## 实现
//! - `WyomingClient`: 从远程归档下载 (blocking `reqwest`)
//! - `LocalArchive`: 从本地目录读取已保存的归档页面
//! - `CachingSource`: 优先本地，缺失时下载并保存
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 和 `commands/` 使用
//! - 使用 `parsers/` 解码页面
//! - 使用 `batch/collector.rs` 搜索本地文件

pub mod cached;
pub mod local;
pub mod wyoming;

pub use cached::CachingSource;
pub use local::LocalArchive;
pub use wyoming::{WyomingClient, WyomingConfig};

use crate::error::Result;
use crate::models::{PeriodKey, Sounding};

/// 探空数据源
///
/// 外层错误表示整个时段不可用（`SourceUnavailable` / `NoDataForPeriod`），
/// 内层错误为单次探空解码失败（`MalformedSounding`）。
pub trait DataSource {
    /// 数据源名称（用于日志）
    fn name(&self) -> &str;

    /// 获取一个时段的全部探空
    fn fetch(&self, key: &PeriodKey) -> Result<Vec<Result<Sounding>>>;
}

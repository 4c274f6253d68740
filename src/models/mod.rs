//! # 数据模型模块
//!
//! 定义探空、逆温与查询键的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `source/`, `analysis/`, `report/` 使用
//! - 子模块: period, sounding, inversion

pub mod inversion;
pub mod period;
pub mod sounding;

pub use inversion::{Inversion, InversionRecord};
pub use period::{period_range, PeriodKey, StationId};
pub use sounding::{Level, Sounding};

//! # 解析器模块
//!
//! 解析探空归档页面与其中的定宽表格。
//!
//! ## 依赖关系
//! - 被 `source/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: wyoming, text_list

pub mod text_list;
pub mod wyoming;

pub use wyoming::parse_archive_page;

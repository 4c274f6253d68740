//! # 统一错误处理模块
//!
//! 定义 wysonde 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - `SourceUnavailable`: 下载/网络失败，报告后继续处理其余月份
//! - `NoDataForPeriod`: 数据源没有该时段的数据，报告但不致命
//! - `MalformedSounding`: 解码或高度顺序不合法，计为失败并跳过
//! - `NoUsableSoundings`: 整个批次没有任何可用探空，无法继续
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// wysonde 统一错误类型
#[derive(Error, Debug)]
pub enum SondeError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 数据源错误
    // ─────────────────────────────────────────────────────────────
    #[error("Sounding archive unavailable for {period}: {reason}")]
    SourceUnavailable { period: String, reason: String },

    #[error("No sounding data for {period}")]
    NoDataForPeriod { period: String },

    // ─────────────────────────────────────────────────────────────
    // 解码错误
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed sounding ({context}): {reason}")]
    MalformedSounding { context: String, reason: String },

    #[error("No usable soundings in the requested period")]
    NoUsableSoundings,

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl SondeError {
    /// 构造解码错误
    pub fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        SondeError::MalformedSounding {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// 是否为单个时段级别的错误（报告后继续处理其余时段）
    pub fn is_period_level(&self) -> bool {
        matches!(
            self,
            SondeError::SourceUnavailable { .. } | SondeError::NoDataForPeriod { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SondeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_level_errors() {
        let unavailable = SondeError::SourceUnavailable {
            period: "2021-01 station 26075".into(),
            reason: "HTTP 503".into(),
        };
        assert!(unavailable.is_period_level());
        assert!(SondeError::NoDataForPeriod { period: "p".into() }.is_period_level());
        assert!(!SondeError::malformed("00Z 01 Jan 2021", "empty").is_period_level());
        assert!(!SondeError::NoUsableSoundings.is_period_level());
        assert_eq!(
            unavailable.to_string(),
            "Sounding archive unavailable for 2021-01 station 26075: HTTP 503"
        );
    }
}

//! # 日志初始化
//!
//! 安装 `tracing-subscriber` 格式化输出。
//!
//! ## 级别来源（优先级从高到低）
//! - `--log-level`
//! - `RUST_LOG`
//! - 默认 `warn`
//!
//! 指定 `--log-file` 时写入文件（无颜色），否则写到 stderr，
//! 与 `utils::output` 的 stdout 状态行分开。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber` (env-filter)

use crate::error::{Result, SondeError};

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// 默认日志级别
pub const DEFAULT_LEVEL: &str = "warn";

/// 构造过滤器
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
            SondeError::InvalidArgument(format!("Invalid log level '{}': {}", directives, e))
        }),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))),
    }
}

/// 安装全局日志订阅者
pub fn init(level: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level)?)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| SondeError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| SondeError::Other(format!("Failed to initialize logging: {}", e)))
}

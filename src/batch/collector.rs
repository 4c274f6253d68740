//! # 归档文件收集器
//!
//! 在数据目录中收集已保存的归档页面与导出文件。
//!
//! ## 功能
//! - 单文件或目录输入
//! - 逗号分隔的 glob 模式 (`*`, `?`, `[...]`)
//! - 可选递归搜索
//! - 结果按路径排序，保证重复运行时顺序一致
//!
//! ## 依赖关系
//! - 被 `source/local.rs` 和 `commands/list.rs` 调用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `glob` 匹配文件名

use crate::error::{Result, SondeError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 归档页面的默认匹配模式
pub const ARCHIVE_PATTERN: &str = "response_*_*_*.html";

/// 单次探空导出文件的匹配模式
pub const SOUNDING_FILE_PATTERN: &str = "DATA_*.csv";

/// 文件收集器
pub struct FileCollector {
    /// 输入路径（文件或目录）
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: archive_pattern(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    SondeError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.patterns = if patterns.is_empty() {
            archive_pattern()
        } else {
            patterns
        };
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（已排序）
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return if self.matches_patterns(&self.input) {
                vec![self.input.clone()]
            } else {
                vec![]
            };
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let walker = if self.recursive {
            WalkDir::new(&self.input)
        } else {
            WalkDir::new(&self.input).max_depth(1)
        };

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns.iter().any(|p| p.matches(filename))
    }
}

fn archive_pattern() -> Vec<Pattern> {
    Pattern::new(ARCHIVE_PATTERN).into_iter().collect()
}

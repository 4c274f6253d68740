//! # 本地归档
//!
//! 在若干目录中查找已保存的归档页面 `response_{year}_{mm}_{station}.html`。
//!
//! ## 依赖关系
//! - 被 `source/cached.rs` 和 `commands/process.rs` 使用
//! - 使用 `batch/collector.rs` 搜索文件
//! - 使用 `parsers/wyoming.rs` 解码页面

use super::DataSource;
use crate::batch::FileCollector;
use crate::error::{Result, SondeError};
use crate::models::{PeriodKey, Sounding};
use crate::parsers::parse_archive_page;

use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// 本地归档
#[derive(Debug, Clone)]
pub struct LocalArchive {
    /// 按顺序搜索的目录
    search_dirs: Vec<PathBuf>,
    /// 是否递归搜索
    recursive: bool,
}

impl LocalArchive {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        LocalArchive {
            search_dirs,
            recursive: false,
        }
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 查找某时段的页面文件，返回第一个匹配
    pub fn find(&self, key: &PeriodKey) -> Option<PathBuf> {
        let pattern = glob::Pattern::escape(&key.archive_file_name());

        self.search_dirs.iter().find_map(|dir| {
            FileCollector::new(dir.clone())
                .with_pattern(&pattern)
                .ok()?
                .recursive(self.recursive)
                .collect()
                .into_iter()
                .min()
        })
    }

    /// 读取某时段的页面内容
    pub fn load(&self, key: &PeriodKey) -> Result<String> {
        let path = match self.find(key) {
            Some(p) => p,
            None => {
                warn!(period = %key, "no local archive page found");
                return Err(SondeError::NoDataForPeriod {
                    period: key.to_string(),
                });
            }
        };

        let html = fs::read_to_string(&path).map_err(|e| SondeError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        info!(path = %path.display(), "loaded archive page");
        Ok(html)
    }
}

impl DataSource for LocalArchive {
    fn name(&self) -> &str {
        "local archive"
    }

    fn fetch(&self, key: &PeriodKey) -> Result<Vec<Result<Sounding>>> {
        let html = self.load(key)?;
        parse_archive_page(&html, key)
    }
}

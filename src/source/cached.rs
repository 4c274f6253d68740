//! # 带缓存的数据源
//!
//! 优先读取本地归档；本地缺失时从远程下载并解码。
//! 只有页面中确实含有探空时才写入缓存目录，繁忙页或空页不落盘。
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` (run 模式) 使用
//! - 组合 `source/local.rs` 与 `source/wyoming.rs`

use super::wyoming::save_page;
use super::{DataSource, LocalArchive, WyomingClient};
use crate::error::{Result, SondeError};
use crate::models::{PeriodKey, Sounding};
use crate::parsers::parse_archive_page;

use std::path::PathBuf;
use tracing::info;

/// 本地优先、远程兜底的数据源
#[derive(Debug)]
pub struct CachingSource {
    local: LocalArchive,
    remote: WyomingClient,
    cache_dir: PathBuf,
}

impl CachingSource {
    pub fn new(local: LocalArchive, remote: WyomingClient, cache_dir: PathBuf) -> Self {
        CachingSource {
            local,
            remote,
            cache_dir,
        }
    }
}

impl DataSource for CachingSource {
    fn name(&self) -> &str {
        "cached archive"
    }

    fn fetch(&self, key: &PeriodKey) -> Result<Vec<Result<Sounding>>> {
        match self.local.load(key) {
            Ok(html) => parse_archive_page(&html, key),
            Err(SondeError::NoDataForPeriod { .. }) => {
                info!(period = %key, "not cached locally, downloading");
                let html = self.remote.download(key)?;
                let soundings = parse_archive_page(&html, key)?;
                save_page(&html, key, &self.cache_dir)?;
                Ok(soundings)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationId;
    use crate::source::WyomingConfig;
    use crate::test_data::{serve_pages, ARCHIVE_PAGE, BUSY_PAGE};
    use std::fs;
    use std::time::Duration;

    fn offline_client() -> WyomingClient {
        client_for("http://127.0.0.1:9/cgi-bin/sounding")
    }

    fn client_for(base_url: &str) -> WyomingClient {
        WyomingClient::new(WyomingConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(2),
            delay: (0.0, 0.0),
            ..WyomingConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_cached_page_skips_download() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("response_2021_01_26075.html"), ARCHIVE_PAGE).unwrap();

        let source = CachingSource::new(
            LocalArchive::new(vec![dir.path().to_path_buf()]),
            offline_client(),
            dir.path().to_path_buf(),
        );

        let key = PeriodKey::new(2021, 1, StationId::new(26075).unwrap()).unwrap();
        assert_eq!(source.fetch(&key).unwrap().len(), 2);
    }

    #[test]
    fn test_cache_miss_falls_back_to_remote() {
        let dir = tempfile::tempdir().unwrap();
        let source = CachingSource::new(
            LocalArchive::new(vec![dir.path().to_path_buf()]),
            offline_client(),
            dir.path().to_path_buf(),
        );

        let key = PeriodKey::new(2021, 2, StationId::new(26075).unwrap()).unwrap();
        let err = source.fetch(&key).unwrap_err();
        assert!(matches!(err, SondeError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_busy_page_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let base_url = serve_pages(vec![BUSY_PAGE, ARCHIVE_PAGE]);
        let source = CachingSource::new(
            LocalArchive::new(vec![dir.path().to_path_buf()]),
            client_for(&base_url),
            dir.path().to_path_buf(),
        );
        let key = PeriodKey::new(2021, 1, StationId::new(26075).unwrap()).unwrap();
        let cached = dir.path().join(key.archive_file_name());

        let err = source.fetch(&key).unwrap_err();
        assert!(matches!(err, SondeError::NoDataForPeriod { .. }));
        assert!(!cached.exists());

        // 下一次请求重新访问归档
        assert_eq!(source.fetch(&key).unwrap().len(), 2);
        assert!(cached.exists());
    }
}

//! # 远程归档客户端
//!
//! 从 University of Wyoming 探空归档下载 TEXT:LIST 页面。
//!
//! ## 功能
//! - 构造查询 URL（整月 01 日 00Z 至月末 12Z）
//! - 浏览器风格请求头，60 秒超时
//! - 相邻请求之间随机间隔，避免频繁访问
//! - 保存原始页面到本地目录（仅限含有探空的页面）
//!
//! ## 依赖关系
//! - 被 `source/cached.rs` 和 `commands/fetch.rs` 使用
//! - 使用 `reqwest` (blocking) 发送请求
//! - 使用 `parsers/wyoming.rs` 解码页面

use super::DataSource;
use crate::error::{Result, SondeError};
use crate::models::{PeriodKey, Sounding};
use crate::parsers::wyoming::extract_soundings;
use crate::parsers::parse_archive_page;

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 默认归档地址
pub const DEFAULT_ARCHIVE_URL: &str = "http://weather.uwyo.edu/cgi-bin/sounding";

/// 默认区域
pub const DEFAULT_REGION: &str = "europe";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 客户端配置
#[derive(Debug, Clone)]
pub struct WyomingConfig {
    pub base_url: String,
    pub region: String,
    pub timeout: Duration,
    /// 相邻请求的间隔范围（秒）
    pub delay: (f64, f64),
}

impl Default for WyomingConfig {
    fn default() -> Self {
        WyomingConfig {
            base_url: DEFAULT_ARCHIVE_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            timeout: Duration::from_secs(60),
            delay: (2.0, 5.0),
        }
    }
}

/// 远程归档客户端
pub struct WyomingClient {
    config: WyomingConfig,
    client: reqwest::blocking::Client,
    last_request: Mutex<Option<Instant>>,
}

impl std::fmt::Debug for WyomingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WyomingClient")
            .field("base_url", &self.config.base_url)
            .field("region", &self.config.region)
            .finish()
    }
}

impl WyomingClient {
    /// 创建客户端
    pub fn new(config: WyomingConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SondeError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(WyomingClient {
            config,
            client,
            last_request: Mutex::new(None),
        })
    }

    /// 构造某时段的查询 URL
    pub fn url(&self, key: &PeriodKey) -> String {
        format!(
            "{}?region={}&TYPE=TEXT%3ALIST&YEAR={}&MONTH={:02}&FROM=0100&TO={:02}12&STNM={}",
            self.config.base_url,
            self.config.region,
            key.year,
            key.month,
            key.days_in_month(),
            key.station.value()
        )
    }

    /// 距上次请求不足随机间隔时等待
    fn throttle(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(prev) = *last {
            let (lo, hi) = self.config.delay;
            let wait = if hi > lo {
                rand::thread_rng().gen_range(lo..hi)
            } else {
                lo
            };
            let wait = Duration::from_secs_f64(wait.max(0.0));
            let elapsed = prev.elapsed();
            if elapsed < wait {
                debug!(seconds = (wait - elapsed).as_secs_f64(), "waiting before next request");
                std::thread::sleep(wait - elapsed);
            }
        }

        *last = Some(Instant::now());
    }

    /// 下载某时段的原始页面
    pub fn download(&self, key: &PeriodKey) -> Result<String> {
        self.throttle();

        let url = self.url(key);
        info!(%url, "fetching sounding archive page");

        let unavailable = |reason: String| SondeError::SourceUnavailable {
            period: key.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, period = %key, "archive request failed");
            return Err(unavailable(format!("HTTP {}", status)));
        }

        response.text().map_err(|e| unavailable(e.to_string()))
    }

    /// 下载并保存原始页面，返回保存路径
    ///
    /// 页面中没有可拆分的探空时返回 `NoDataForPeriod`，不写文件。
    pub fn download_to(&self, key: &PeriodKey, dir: &Path) -> Result<PathBuf> {
        let html = self.download(key)?;
        extract_soundings(&html, key)?;
        save_page(&html, key, dir)
    }
}

/// 保存页面为 `response_{year}_{mm}_{station}.html`
pub fn save_page(html: &str, key: &PeriodKey, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| SondeError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let path = dir.join(key.archive_file_name());
    fs::write(&path, html).map_err(|e| SondeError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(path = %path.display(), bytes = html.len(), "saved raw archive page");
    Ok(path)
}

impl DataSource for WyomingClient {
    fn name(&self) -> &str {
        "remote archive"
    }

    fn fetch(&self, key: &PeriodKey) -> Result<Vec<Result<Sounding>>> {
        let html = self.download(key)?;
        parse_archive_page(&html, key)
    }
}

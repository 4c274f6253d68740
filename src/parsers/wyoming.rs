//! # 探空归档页面解析器
//!
//! 从 University of Wyoming 归档的 HTML 页面中拆分出各次探空。
//!
//! ## 页面结构
//! ```text
//! <h2>26075 ULLI St. Petersburg (Voejkovo) Observations at 00Z 01 Jan 2021</h2>
//! <pre> ...探空表格... </pre>
//! <h3>Station information and sounding indices</h3><pre> ...站点信息... </pre>
//! ```
//! 若 `<pre>` 数量恰为 `<h2>` 的两倍，则每对中第一个为数据块。
//!
//! ## 依赖关系
//! - 被 `source/` 调用
//! - 使用 `parsers/text_list.rs` 解析表格
//! - 使用 `regex` 匹配标签与时间

use super::text_list::parse_text_list;
use crate::error::{Result, SondeError};
use crate::models::{PeriodKey, Sounding, StationId};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// 页面中的一个探空片段（尚未解码）
#[derive(Debug, Clone, PartialEq)]
pub struct RawSounding {
    pub station: StationId,
    pub valid_time: NaiveDateTime,
    pub text: String,
}

static H2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h2[^>]*>(.*?)</h2>").expect("valid h2 regex"));

static PRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").expect("valid pre regex"));

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2})Z\s+(\d{1,2})\s+([A-Za-z]{3})\s+(\d{4})").expect("valid time regex")
});

static STATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4,5})\s").expect("valid station regex"));

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// 去除标签并还原常见实体
fn inner_text(html: &str) -> String {
    TAG_RE
        .replace_all(html, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let month = match abbrev.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// 从标题中提取观测时间，例如 `Observations at 00Z 01 Jan 2021`
pub fn parse_header_time(header: &str) -> Option<NaiveDateTime> {
    let caps = TIME_RE.captures(header)?;
    let hour: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let month = month_from_abbrev(&caps[3])?;
    let year: i32 = caps[4].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)
}

/// 从标题开头提取站号，失败时返回 None
pub fn parse_header_station(header: &str) -> Option<StationId> {
    let caps = STATION_RE.captures(header)?;
    caps[1].parse().ok()
}

/// 把页面拆分为 (标题, 数据块) 对
///
/// 页面中没有探空，或标签数量不匹配时返回 `NoDataForPeriod`。
pub fn extract_soundings(html: &str, key: &PeriodKey) -> Result<Vec<Result<RawSounding>>> {
    let headers: Vec<String> = H2_RE
        .captures_iter(html)
        .map(|c| inner_text(&c[1]))
        .collect();
    let mut blocks: Vec<String> = PRE_RE
        .captures_iter(html)
        .map(|c| inner_text(&c[1]))
        .collect();

    if headers.is_empty() || blocks.is_empty() {
        warn!(period = %key, "no soundings found in archive page");
        return Err(SondeError::NoDataForPeriod {
            period: key.to_string(),
        });
    }

    if blocks.len() == 2 * headers.len() {
        debug!("found twice as many <pre> blocks as headers, using every other block");
        blocks = blocks.into_iter().step_by(2).collect();
    } else if blocks.len() != headers.len() {
        warn!(
            period = %key,
            headers = headers.len(),
            blocks = blocks.len(),
            "mismatch between header and data block counts"
        );
        return Err(SondeError::NoDataForPeriod {
            period: key.to_string(),
        });
    }

    let soundings: Vec<Result<RawSounding>> = headers
        .into_iter()
        .zip(blocks)
        .map(|(header, text)| {
            let valid_time = parse_header_time(&header).ok_or_else(|| {
                SondeError::malformed(header.trim(), "no observation time in header")
            })?;
            let station = parse_header_station(&header).unwrap_or(key.station);
            Ok(RawSounding {
                station,
                valid_time,
                text,
            })
        })
        .collect();

    info!(period = %key, count = soundings.len(), "extracted soundings");
    Ok(soundings)
}

/// 解析整个页面为探空列表
///
/// 外层错误表示整个时段不可用；内层错误为单次探空的解码失败。
pub fn parse_archive_page(html: &str, key: &PeriodKey) -> Result<Vec<Result<Sounding>>> {
    let raw = extract_soundings(html, key)?;

    Ok(raw
        .into_iter()
        .map(|r| r.and_then(|raw| parse_text_list(&raw.text, raw.station, raw.valid_time)))
        .collect())
}

//! # 逆温统计
//!
//! 在表格视图（`InversionRecord` 列表）上计算描述性统计。
//!
//! ## 功能
//! - 总体摘要：数量、贴地/高架、昼/夜、ΔT/ΔH 均值与最大值
//! - 频率：贴地/高架 × 昼/夜 占比
//! - 季节统计 (DJF/MAM/JJA/SON)
//! - 最强 / 最厚逆温
//!
//! ## 依赖关系
//! - 被 `commands/summarize.rs` 调用
//! - 使用 `models/inversion.rs`

use crate::models::InversionRecord;

use chrono::Datelike;
use std::cmp::Ordering;
use std::fmt;

/// 总体摘要
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub ground: usize,
    pub elevated: usize,
    pub day: usize,
    pub night: usize,
    pub mean_delta_t: Option<f64>,
    pub max_delta_t: Option<f64>,
    pub mean_delta_h: Option<f64>,
    pub max_delta_h: Option<f64>,
    pub mean_base_height: Option<f64>,
}

/// 贴地/高架 × 昼/夜 占比
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency {
    pub ground_day: f64,
    pub ground_night: f64,
    pub elevated_day: f64,
    pub elevated_night: f64,
}

/// 季节
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Fall => write!(f, "Fall"),
        }
    }
}

/// 单个季节的统计
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStats {
    pub season: Season,
    pub count: usize,
    pub mean_delta_t: f64,
    pub max_delta_t: f64,
    pub mean_delta_h: f64,
    pub max_delta_h: f64,
    pub ground_share: f64,
    pub day_share: f64,
    pub night_share: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

fn max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |acc: Option<f64>, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

fn count_where<F>(records: &[InversionRecord], pred: F) -> usize
where
    F: Fn(&InversionRecord) -> bool,
{
    records.iter().filter(|r| pred(r)).count()
}

fn share(count: usize, total: usize) -> f64 {
    count as f64 / total.max(1) as f64
}

/// 计算总体摘要
pub fn summarize(records: &[InversionRecord]) -> Summary {
    let ground = records.iter().filter(|r| r.ground).count();

    Summary {
        total: records.len(),
        ground,
        elevated: records.len() - ground,
        day: records.iter().filter(|r| r.day).count(),
        night: records.iter().filter(|r| r.night).count(),
        mean_delta_t: mean(records.iter().map(|r| r.delta_t)),
        max_delta_t: max(records.iter().map(|r| r.delta_t)),
        mean_delta_h: mean(records.iter().map(|r| r.delta_h)),
        max_delta_h: max(records.iter().map(|r| r.delta_h)),
        mean_base_height: mean(records.iter().map(|r| r.base_height)),
    }
}

/// 计算贴地/高架 × 昼/夜 占比（分母为全部记录数）
pub fn frequency(records: &[InversionRecord]) -> Frequency {
    let total = records.len();

    Frequency {
        ground_day: share(count_where(records, |r| r.ground && r.day), total),
        ground_night: share(count_where(records, |r| r.ground && r.night), total),
        elevated_day: share(count_where(records, |r| !r.ground && r.day), total),
        elevated_night: share(count_where(records, |r| !r.ground && r.night), total),
    }
}

/// 按季节分组统计，仅返回有记录的季节
pub fn seasonal(records: &[InversionRecord]) -> Vec<SeasonStats> {
    [Season::Winter, Season::Spring, Season::Summer, Season::Fall]
        .iter()
        .filter_map(|&season| {
            let group: Vec<&InversionRecord> = records
                .iter()
                .filter(|r| Season::from_month(r.date.month()) == season)
                .collect();

            if group.is_empty() {
                return None;
            }

            let n = group.len();
            Some(SeasonStats {
                season,
                count: n,
                mean_delta_t: mean(group.iter().map(|r| r.delta_t)).unwrap_or(0.0),
                max_delta_t: max(group.iter().map(|r| r.delta_t)).unwrap_or(0.0),
                mean_delta_h: mean(group.iter().map(|r| r.delta_h)).unwrap_or(0.0),
                max_delta_h: max(group.iter().map(|r| r.delta_h)).unwrap_or(0.0),
                ground_share: share(group.iter().filter(|r| r.ground).count(), n),
                day_share: share(group.iter().filter(|r| r.day).count(), n),
                night_share: share(group.iter().filter(|r| r.night).count(), n),
            })
        })
        .collect()
}

fn top_by<F>(records: &[InversionRecord], n: usize, key: F) -> Vec<InversionRecord>
where
    F: Fn(&InversionRecord) -> f64,
{
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

/// ΔT 最大的 n 个逆温
pub fn strongest(records: &[InversionRecord], n: usize) -> Vec<InversionRecord> {
    top_by(records, n, |r| r.delta_t)
}

/// ΔH 最大的 n 个逆温
pub fn deepest(records: &[InversionRecord], n: usize) -> Vec<InversionRecord> {
    top_by(records, n, |r| r.delta_h)
}

//! # 探空数据模型
//!
//! 一次探空（单次气球施放）的垂直廓线。
//!
//! ## 不变量
//! - 至少一个层次
//! - 高度（离地）严格递增，且非负
//! - 构造后不可变
//!
//! ## 依赖关系
//! - 被 `parsers/text_list.rs` 构造
//! - 被 `analysis/detector.rs` 与 `analysis/plot.rs` 读取

use crate::error::{Result, SondeError};
use crate::models::StationId;

use chrono::{NaiveDateTime, Timelike};

/// 单个观测层次
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    /// 离地高度 (m)
    pub height: f64,
    /// 温度 (°C)
    pub temperature: f64,
    /// 露点 (°C)
    pub dew_point: Option<f64>,
    /// 气压 (hPa)
    pub pressure: Option<f64>,
}

impl Level {
    pub fn new(height: f64, temperature: f64) -> Self {
        Level {
            height,
            temperature,
            dew_point: None,
            pressure: None,
        }
    }

    pub fn with_dew_point(mut self, dew_point: Option<f64>) -> Self {
        self.dew_point = dew_point;
        self
    }

    pub fn with_pressure(mut self, pressure: Option<f64>) -> Self {
        self.pressure = pressure;
        self
    }
}

/// 一次探空
#[derive(Debug, Clone, PartialEq)]
pub struct Sounding {
    station: StationId,
    valid_time: NaiveDateTime,
    surface_elevation: f64,
    levels: Vec<Level>,
}

impl Sounding {
    /// 创建探空并校验层次顺序
    ///
    /// `surface_elevation` 为最低层的海拔高度，`levels` 中的高度为离地高度。
    pub fn new(
        station: StationId,
        valid_time: NaiveDateTime,
        surface_elevation: f64,
        levels: Vec<Level>,
    ) -> Result<Self> {
        let context = format!("{} {}", station, valid_time.format("%Y-%m-%d %HZ"));

        if levels.is_empty() {
            return Err(SondeError::malformed(context, "no levels"));
        }

        if let Some(bad) = levels
            .iter()
            .find(|l| !l.height.is_finite() || !l.temperature.is_finite() || l.height < 0.0)
        {
            return Err(SondeError::malformed(
                context,
                format!("invalid level at {} m", bad.height),
            ));
        }

        if let Some(pair) = levels.windows(2).find(|w| w[1].height <= w[0].height) {
            return Err(SondeError::malformed(
                context,
                format!(
                    "heights not strictly increasing ({} m -> {} m)",
                    pair[0].height, pair[1].height
                ),
            ));
        }

        Ok(Sounding {
            station,
            valid_time,
            surface_elevation,
            levels,
        })
    }

    pub fn station(&self) -> StationId {
        self.station
    }

    pub fn valid_time(&self) -> NaiveDateTime {
        self.valid_time
    }

    /// 最低层海拔高度 (m)
    pub fn surface_elevation(&self) -> f64 {
        self.surface_elevation
    }

    /// 按高度升序排列的层次
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// 高度落在 `[base_height, top_height]` 内的连续层次
    pub fn layer(&self, base_height: f64, top_height: f64) -> &[Level] {
        let start = self.levels.partition_point(|l| l.height < base_height);
        let end = self.levels.partition_point(|l| l.height <= top_height);
        &self.levels[start..end.max(start)]
    }

    /// 12Z 观测视为白天
    pub fn is_day(&self) -> bool {
        self.valid_time.hour() == 12
    }

    /// 00Z 观测视为夜间
    pub fn is_night(&self) -> bool {
        self.valid_time.hour() == 0
    }
}

//! # 站点与时段标识
//!
//! 数据源的查询键：(年, 月, 站号)。
//!
//! ## 依赖关系
//! - 被 `source/`, `pipeline.rs`, `cli/` 使用
//! - 使用 `chrono` 计算月份天数

use crate::error::{Result, SondeError};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// WMO 五位站号，例如 26075 (St. Petersburg / Voejkovo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StationId(u32);

impl StationId {
    /// 创建站号，必须在 1..=99999 范围内
    pub fn new(id: u32) -> Result<Self> {
        if (1..=99_999).contains(&id) {
            Ok(StationId(id))
        } else {
            Err(SondeError::InvalidArgument(format!(
                "Station id {} is not a 5-digit WMO number",
                id
            )))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for StationId {
    type Error = SondeError;

    fn try_from(id: u32) -> Result<Self> {
        StationId::new(id)
    }
}

impl From<StationId> for u32 {
    fn from(station: StationId) -> u32 {
        station.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl FromStr for StationId {
    type Err = SondeError;

    fn from_str(s: &str) -> Result<Self> {
        let id: u32 = s
            .trim()
            .parse()
            .map_err(|_| SondeError::InvalidArgument(format!("Invalid station id '{}'", s)))?;
        StationId::new(id)
    }
}

/// 一个站点一个月的查询键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
    pub station: StationId,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32, station: StationId) -> Result<Self> {
        if !(1000..=9999).contains(&year) {
            return Err(SondeError::InvalidArgument(format!(
                "Year {} must have 4 digits",
                year
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(SondeError::InvalidArgument(format!(
                "Month {} must be between 1 and 12",
                month
            )));
        }
        Ok(PeriodKey {
            year,
            month,
            station,
        })
    }

    /// 该月天数
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// 该月第一天
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// 该月最后一天
    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month()).unwrap_or_default()
    }

    /// 归档页面的本地文件名
    pub fn archive_file_name(&self) -> String {
        format!(
            "response_{}_{:02}_{}.html",
            self.year,
            self.month,
            self.station.value()
        )
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02} station {}", self.year, self.month, self.station)
    }
}

/// 返回某年某月的天数
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// 为同一站点的连续月份生成查询键
pub fn period_range(
    year: i32,
    start_month: u32,
    end_month: u32,
    station: StationId,
) -> Result<Vec<PeriodKey>> {
    if end_month < start_month {
        return Err(SondeError::InvalidArgument(format!(
            "End month {} is before start month {}",
            end_month, start_month
        )));
    }

    (start_month..=end_month)
        .map(|month| PeriodKey::new(year, month, station))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2021, 1), 31);
        assert_eq!(days_in_month(2021, 2), 28);
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(2021, 4), 30);
        assert_eq!(days_in_month(2021, 12), 31);
    }

    #[test]
    fn test_station_id_display_and_parse() {
        let stn: StationId = "26075".parse().unwrap();
        assert_eq!(stn.value(), 26075);
        assert_eq!(stn.to_string(), "26075");
        assert_eq!(StationId::new(1415).unwrap().to_string(), "01415");
        assert!(StationId::new(0).is_err());
        assert!(StationId::new(100_000).is_err());
        assert!("abc".parse::<StationId>().is_err());
    }

    #[test]
    fn test_station_id_deserialize_is_validated() {
        #[derive(Debug, Deserialize)]
        struct Row {
            station: StationId,
        }

        let mut ok = csv::Reader::from_reader("station\n26075\n".as_bytes());
        let row: Row = ok.deserialize().next().unwrap().unwrap();
        assert_eq!(row.station.value(), 26075);

        let mut bad = csv::Reader::from_reader("station\n0\n".as_bytes());
        let err = bad.deserialize::<Row>().next().unwrap().unwrap_err();
        assert!(err.to_string().contains("5-digit WMO number"));
    }

    #[test]
    fn test_period_key_validation() {
        let stn = StationId::new(26075).unwrap();
        assert!(PeriodKey::new(2021, 0, stn).is_err());
        assert!(PeriodKey::new(2021, 13, stn).is_err());
        assert!(PeriodKey::new(21, 1, stn).is_err());

        let key = PeriodKey::new(2021, 2, stn).unwrap();
        assert_eq!(key.archive_file_name(), "response_2021_02_26075.html");
        assert_eq!(key.last_day(), NaiveDate::from_ymd_opt(2021, 2, 28).unwrap());
    }

    #[test]
    fn test_period_range() {
        let stn = StationId::new(26075).unwrap();
        let keys = period_range(2021, 1, 3, stn).unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[2].month, 3);
        assert!(period_range(2021, 5, 4, stn).is_err());
    }
}

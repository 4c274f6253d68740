//! # 逆温数据模型
//!
//! 检测器输出的逆温层，以及带站点/时间标签的表格行。
//!
//! ## 依赖关系
//! - 被 `analysis/detector.rs` 构造
//! - 被 `report/`, `analysis/stats.rs`, `analysis/plot.rs` 使用
//! - 使用 `serde` 读写 CSV 行

use crate::models::{Sounding, StationId};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 一个逆温层（温度随高度单调上升的最大连续段）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inversion {
    /// 底部高度 (m, 离地)
    pub base_height: f64,
    /// 底部温度 (°C)
    pub base_temperature: f64,
    /// 顶部高度 (m, 离地)
    pub top_height: f64,
    /// 顶部温度 (°C)
    pub top_temperature: f64,
    /// 是否为贴地逆温
    pub ground: bool,
}

impl Inversion {
    /// 逆温强度 ΔT (°C)
    pub fn delta_t(&self) -> f64 {
        self.top_temperature - self.base_temperature
    }

    /// 逆温厚度 ΔH (m)
    pub fn delta_h(&self) -> f64 {
        self.top_height - self.base_height
    }
}

/// 表格视图中的一行
///
/// 列名与原始数据表保持一致：`ΔT`, `ΔH`, `HL` (底高), `TL` (底温)，
/// 标志列取 0/1。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InversionRecord {
    #[serde(with = "record_date")]
    pub date: NaiveDateTime,
    pub station: StationId,
    #[serde(rename = "ΔT")]
    pub delta_t: f64,
    #[serde(rename = "ΔH")]
    pub delta_h: f64,
    #[serde(rename = "HL")]
    pub base_height: f64,
    #[serde(rename = "TL")]
    pub base_temperature: f64,
    #[serde(rename = "HT")]
    pub top_height: f64,
    #[serde(rename = "TT")]
    pub top_temperature: f64,
    #[serde(rename = "Ground", with = "flag")]
    pub ground: bool,
    #[serde(rename = "Day", with = "flag")]
    pub day: bool,
    #[serde(rename = "Night", with = "flag")]
    pub night: bool,
}

impl InversionRecord {
    /// 用探空的站号与时间给逆温打标签
    pub fn from_inversion(sounding: &Sounding, inversion: &Inversion) -> Self {
        InversionRecord {
            date: sounding.valid_time(),
            station: sounding.station(),
            delta_t: inversion.delta_t(),
            delta_h: inversion.delta_h(),
            base_height: inversion.base_height,
            base_temperature: inversion.base_temperature,
            top_height: inversion.top_height,
            top_temperature: inversion.top_temperature,
            ground: inversion.ground,
            day: sounding.is_day(),
            night: sounding.is_night(),
        }
    }
}

/// 日期列格式
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) mod record_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        // 兼容 "1" / "1.0" / "true"
        let text = String::deserialize(d)?;
        match text.trim() {
            "1" | "1.0" | "true" | "True" => Ok(true),
            "0" | "0.0" | "false" | "False" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid flag '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;
    use chrono::NaiveDate;

    #[test]
    fn test_record_tags_from_sounding() {
        let time = NaiveDate::from_ymd_opt(2021, 1, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let snd = Sounding::new(
            StationId::new(26075).unwrap(),
            time,
            4.0,
            vec![Level::new(0.0, -3.0), Level::new(150.0, -1.0)],
        )
        .unwrap();

        let inv = Inversion {
            base_height: 0.0,
            base_temperature: -3.0,
            top_height: 150.0,
            top_temperature: -1.0,
            ground: true,
        };

        let rec = InversionRecord::from_inversion(&snd, &inv);
        assert_eq!(rec.date, time);
        assert!((rec.delta_t - 2.0).abs() < 1e-9);
        assert!((rec.delta_h - 150.0).abs() < 1e-9);
        assert!(rec.day);
        assert!(!rec.night);
        assert!(rec.ground);
    }

    #[test]
    fn test_record_csv_columns() {
        let rec = InversionRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            station: StationId::new(26075).unwrap(),
            delta_t: 1.5,
            delta_h: 250.0,
            base_height: 0.0,
            base_temperature: -10.0,
            top_height: 250.0,
            top_temperature: -8.5,
            ground: true,
            day: false,
            night: true,
        };

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&rec).unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,station,ΔT,ΔH,HL,TL,HT,TT,Ground,Day,Night"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2021-01-03 00:00:00,26075,1.5,250.0,0.0,-10.0,250.0,-8.5,1,0,1"
        );

        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let parsed: InversionRecord = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed, rec);
    }
}

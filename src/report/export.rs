//! # CSV 导出
//!
//! ## 输出布局
//! ```text
//! {output}/soundings_{year}_{station}/DATA_{YYYYmmdd_HHMM}.csv   每个含逆温的探空
//! {output}/DATA/df_full.csv                                     12 小时网格左连接
//! {output}/DATA/df_ground.csv ... df_not_ground_day.csv         按标志筛选
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `csv` + `serde` 序列化 `InversionRecord`

use super::{InversionReport, ReportSink};
use crate::error::{Result, SondeError};
use crate::models::inversion::DATE_FORMAT;
use crate::models::InversionRecord;

use chrono::{Datelike, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 表格列名
pub const COLUMNS: [&str; 11] = [
    "date", "station", "ΔT", "ΔH", "HL", "TL", "HT", "TT", "Ground", "Day", "Night",
];

/// 合并数据集目录名
pub const COMBINED_DIR: &str = "DATA";

/// 完整网格表文件名
pub const FULL_TABLE_FILE: &str = "df_full.csv";

/// 筛选表：(文件名, 条件)
const SHEETS: [(&str, fn(&InversionRecord) -> bool); 8] = [
    ("df_ground", |r: &InversionRecord| r.ground),
    ("df_not_ground", |r: &InversionRecord| !r.ground),
    ("df_day", |r: &InversionRecord| r.day),
    ("df_night", |r: &InversionRecord| r.night),
    ("df_ground_night", |r: &InversionRecord| r.ground && r.night),
    ("df_ground_day", |r: &InversionRecord| r.ground && r.day),
    ("df_not_ground_night", |r: &InversionRecord| !r.ground && r.night),
    ("df_not_ground_day", |r: &InversionRecord| !r.ground && r.day),
];

/// 写 CSV 的报告导出器
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    output_dir: PathBuf,
}

impl CsvReportSink {
    pub fn new(output_dir: PathBuf) -> Self {
        CsvReportSink { output_dir }
    }

    /// 合并数据集目录
    pub fn combined_dir(&self) -> PathBuf {
        self.output_dir.join(COMBINED_DIR)
    }
}

impl ReportSink for CsvReportSink {
    fn write_soundings(&self, report: &InversionReport) -> Result<usize> {
        let mut written = 0;

        for group in &report.soundings {
            let first = match group.first() {
                Some(r) => r,
                None => continue,
            };

            let dir = self
                .output_dir
                .join(format!("soundings_{}_{}", first.date.year(), first.station));
            create_dir(&dir)?;

            let path = dir.join(format!("DATA_{}.csv", first.date.format("%Y%m%d_%H%M")));
            write_table(&path, group.iter().map(|r| (r.date, Some(r))))?;
            debug!(path = %path.display(), inversions = group.len(), "wrote sounding file");
            written += 1;
        }

        info!(files = written, "wrote per-sounding records");
        Ok(written)
    }

    fn write_combined(&self, report: &InversionReport) -> Result<PathBuf> {
        let dir = self.combined_dir();
        create_dir(&dir)?;

        write_table(&dir.join(FULL_TABLE_FILE), report.full_table().into_iter())?;

        for (name, keep) in SHEETS {
            let rows = report.records.iter().filter(|r| keep(r)).map(|r| (r.date, Some(r)));
            write_table(&dir.join(format!("{}.csv", name)), rows)?;
        }

        info!(dir = %dir.display(), "wrote combined dataset");
        Ok(dir)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| SondeError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })
}

/// 写一张表；`None` 行只填日期
fn write_table<'a, I>(path: &Path, rows: I) -> Result<()>
where
    I: Iterator<Item = (NaiveDateTime, Option<&'a InversionRecord>)>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(SondeError::CsvError)?;

    wtr.write_record(COLUMNS).map_err(SondeError::CsvError)?;

    for (date, record) in rows {
        match record {
            Some(r) => wtr.serialize(r).map_err(SondeError::CsvError)?,
            None => {
                let mut row = vec![date.format(DATE_FORMAT).to_string()];
                row.resize(COLUMNS.len(), String::new());
                wtr.write_record(&row).map_err(SondeError::CsvError)?;
            }
        }
    }

    wtr.flush().map_err(|e| SondeError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 读回表格，跳过 ΔT 为空的行（网格中无逆温的时次）
pub fn load_records(path: &Path) -> Result<Vec<InversionRecord>> {
    if !path.exists() {
        return Err(SondeError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut rdr = csv::Reader::from_path(path).map_err(SondeError::CsvError)?;
    let headers = rdr.headers().map_err(SondeError::CsvError)?.clone();

    let delta_t = headers.iter().position(|h| h == "ΔT").ok_or_else(|| {
        SondeError::InvalidArgument(format!("{} has no ΔT column", path.display()))
    })?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(SondeError::CsvError)?;
        if row.get(delta_t).map_or(true, |v| v.trim().is_empty()) {
            continue;
        }
        records.push(row.deserialize(Some(&headers))?);
    }

    debug!(path = %path.display(), records = records.len(), "loaded inversion records");
    Ok(records)
}

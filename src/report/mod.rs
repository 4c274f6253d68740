//! # 报告模块
//!
//! 一个批次（站点 × 若干月份）的全部逆温记录与计数，以及导出接口。
//!
//! ## 功能
//! - `InversionReport`: 记录、按探空分组、计数、数据源失败列表
//! - `ReportSink`: 导出接口
//! - `CsvReportSink`: 单次探空 CSV + 合并数据集目录
//! - `load_records`: 读回合并数据集
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 构造
//! - 被 `commands/process.rs`、`commands/summarize.rs`、`commands/plot.rs` 使用
//! - 使用 `csv` + `serde` 读写表格

pub mod export;

pub use export::{load_records, CsvReportSink};

use crate::batch::BatchResult;
use crate::error::Result;
use crate::models::{InversionRecord, PeriodKey};

use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::path::PathBuf;

/// 某个时段的数据源失败
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub period: PeriodKey,
    pub reason: String,
}

/// 一个批次的检测结果
#[derive(Debug, Default)]
pub struct InversionReport {
    /// 请求的时段（已排序）
    pub periods: Vec<PeriodKey>,
    /// 全部记录，按 (日期, 底高) 排序
    pub records: Vec<InversionRecord>,
    /// 按探空分组的记录，按日期排序
    pub soundings: Vec<Vec<InversionRecord>>,
    /// 含逆温的有效探空数
    pub processed: usize,
    /// 无逆温的有效探空数
    pub no_inversion: usize,
    /// 解码失败的探空数
    pub failed: usize,
    /// 解码失败详情 (探空标识, 原因)
    pub failures: Vec<(String, String)>,
    /// 数据源失败
    pub source_failures: Vec<SourceFailure>,
}

impl InversionReport {
    /// 由批量结果构造，并排序保证输出稳定
    pub fn from_batch(
        periods: &[PeriodKey],
        batch: BatchResult,
        source_failures: Vec<SourceFailure>,
    ) -> Self {
        let mut periods = periods.to_vec();
        periods.sort();

        let mut soundings: Vec<Vec<InversionRecord>> = batch
            .groups
            .into_iter()
            .filter(|g| !g.is_empty())
            .collect();
        for group in &mut soundings {
            group.sort_by(|a, b| a.base_height.total_cmp(&b.base_height));
        }
        soundings.sort_by_key(|g| (g[0].date, g[0].station));

        let mut records: Vec<InversionRecord> = soundings.iter().flatten().cloned().collect();
        records.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.base_height.total_cmp(&b.base_height))
        });

        InversionReport {
            periods,
            records,
            soundings,
            processed: batch.processed,
            no_inversion: batch.no_inversion,
            failed: batch.failed,
            failures: batch.failures,
            source_failures,
        }
    }

    /// 有效探空数
    pub fn valid(&self) -> usize {
        self.processed + self.no_inversion
    }

    /// 12 小时间隔的日期网格：首月 1 日 00Z 至末月最后一天 00Z
    pub fn date_grid(&self) -> Vec<NaiveDateTime> {
        let (first, last) = match (self.periods.first(), self.periods.last()) {
            (Some(f), Some(l)) => (f.first_day(), l.last_day()),
            _ => return Vec::new(),
        };

        let end = last.and_time(NaiveTime::default());
        let mut slot = first.and_time(NaiveTime::default());
        let mut grid = Vec::new();
        while slot <= end {
            grid.push(slot);
            slot += Duration::hours(12);
        }
        grid
    }

    /// 网格与记录左连接；无逆温的时次为 `None`
    pub fn full_table(&self) -> Vec<(NaiveDateTime, Option<&InversionRecord>)> {
        let mut rows = Vec::new();
        let mut idx = 0;

        for slot in self.date_grid() {
            while idx < self.records.len() && self.records[idx].date < slot {
                idx += 1;
            }
            let start = idx;
            while idx < self.records.len() && self.records[idx].date == slot {
                rows.push((slot, Some(&self.records[idx])));
                idx += 1;
            }
            if idx == start {
                rows.push((slot, None));
            }
        }

        rows
    }
}

/// 导出结果
#[derive(Debug, Default)]
pub struct SinkSummary {
    /// 写出的单次探空文件数
    pub sounding_files: usize,
    /// 合并数据集目录
    pub combined_dir: Option<PathBuf>,
}

/// 报告导出接口
pub trait ReportSink {
    /// 每个含逆温的探空写一个文件，返回文件数
    fn write_soundings(&self, report: &InversionReport) -> Result<usize>;

    /// 写出合并数据集，返回其目录
    fn write_combined(&self, report: &InversionReport) -> Result<PathBuf>;

    fn write(&self, report: &InversionReport) -> Result<SinkSummary> {
        let sounding_files = self.write_soundings(report)?;
        let combined_dir = self.write_combined(report)?;
        Ok(SinkSummary {
            sounding_files,
            combined_dir: Some(combined_dir),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::batch::ProcessResult;
    use crate::models::StationId;
    use chrono::{Datelike, NaiveDate};

    pub(crate) fn record(day: u32, hour: u32, base: f64, ground: bool) -> InversionRecord {
        InversionRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            station: StationId::new(26075).unwrap(),
            delta_t: 2.0,
            delta_h: 150.0,
            base_height: base,
            base_temperature: -4.0,
            top_height: base + 150.0,
            top_temperature: -2.0,
            ground,
            day: hour == 12,
            night: hour == 0,
        }
    }

    pub(crate) fn january() -> Vec<PeriodKey> {
        vec![PeriodKey::new(2021, 1, StationId::new(26075).unwrap()).unwrap()]
    }

    pub(crate) fn sample_report() -> InversionReport {
        let mut batch = BatchResult::default();
        batch.merge(ProcessResult::Detected(vec![record(2, 12, 0.0, true)]));
        batch.merge(ProcessResult::Detected(vec![
            record(1, 0, 700.0, false),
            record(1, 0, 0.0, true),
        ]));
        batch.merge(ProcessResult::NoInversion);
        InversionReport::from_batch(&january(), batch, Vec::new())
    }

    #[test]
    fn test_records_sorted_by_date_and_base() {
        let report = sample_report();
        let order: Vec<(u32, f64)> = report
            .records
            .iter()
            .map(|r| (r.date.day0() + 1, r.base_height))
            .collect();
        assert_eq!(order, vec![(1, 0.0), (1, 700.0), (2, 0.0)]);
        assert_eq!(report.soundings.len(), 2);
        assert_eq!(report.soundings[0].len(), 2);
        assert_eq!(report.processed, 2);
        assert_eq!(report.no_inversion, 1);
        assert_eq!(report.valid(), 3);
    }

    #[test]
    fn test_date_grid_spans_months() {
        let station = StationId::new(26075).unwrap();
        let report = InversionReport::from_batch(
            &[
                PeriodKey::new(2021, 2, station).unwrap(),
                PeriodKey::new(2021, 1, station).unwrap(),
            ],
            BatchResult::default(),
            Vec::new(),
        );
        let grid = report.date_grid();
        // 1 月 1 日 00Z 至 2 月 28 日 00Z
        assert_eq!(grid.len(), 59 * 2 - 1);
        assert_eq!(grid[0].to_string(), "2021-01-01 00:00:00");
        assert_eq!(grid[1].to_string(), "2021-01-01 12:00:00");
        assert_eq!(grid.last().unwrap().to_string(), "2021-02-28 00:00:00");
    }

    #[test]
    fn test_full_table_left_join() {
        let report = sample_report();
        let rows = report.full_table();

        // 31 天 × 2 - 1 个时次，01 日 00Z 有两个逆温
        assert_eq!(rows.len(), 31 * 2 - 1 + 1);
        assert!(rows[0].1.is_some());
        assert!(rows[1].1.is_some());
        assert_eq!(rows[0].0, rows[1].0);
        assert!(rows[2].1.is_none());
        assert!(rows[4].1.is_some());
        assert_eq!(rows.iter().filter(|r| r.1.is_some()).count(), 3);
    }
}

//! # profile 子命令实现
//!
//! 从合并数据集中取出一条逆温，在本地归档中找回对应探空，绘制温度廓线。
//!
//! ## 依赖关系
//! - 使用 `cli/profile.rs` 定义的 ProfileArgs
//! - 使用 `report::load_records` 读取数据
//! - 使用 `source/local.rs` 找回探空
//! - 使用 `analysis/plot.rs` 绘图

use crate::analysis::plot::generate_profile_plot;
use crate::cli::profile::ProfileArgs;
use crate::error::{Result, SondeError};
use crate::models::inversion::DATE_FORMAT;
use crate::models::{InversionRecord, PeriodKey, Sounding};
use crate::report::load_records;
use crate::source::{DataSource, LocalArchive};
use crate::utils::output;

use chrono::Datelike;

/// 执行廓线绘图
pub fn execute(args: ProfileArgs) -> Result<()> {
    output::print_header("Inversion Profile");

    let records = load_records(&args.input)?;
    let record = records.get(args.index).ok_or_else(|| {
        SondeError::InvalidArgument(format!(
            "Index {} is out of range ({} inversions in '{}')",
            args.index,
            records.len(),
            args.input.display()
        ))
    })?;

    output::print_info(&format!(
        "{} station {}: ΔT {:.2}°C, ΔH {:.0} m, base {:.0} m",
        record.date.format(DATE_FORMAT),
        record.station,
        record.delta_t,
        record.delta_h,
        record.base_height
    ));

    let archive = LocalArchive::new(args.data_dir.clone()).recursive(args.recursive);
    let sounding = find_sounding(&archive, record)?;

    generate_profile_plot(&sounding, record, &args.output, args.width, args.height)?;

    output::print_success(&format!("Profile saved to '{}'", args.output.display()));
    Ok(())
}

/// 在数据源中找回记录对应的探空
pub fn find_sounding(source: &dyn DataSource, record: &InversionRecord) -> Result<Sounding> {
    let key = PeriodKey::new(record.date.year(), record.date.month(), record.station)?;

    source
        .fetch(&key)?
        .into_iter()
        .filter_map(|s| s.ok())
        .find(|s| s.valid_time() == record.date)
        .ok_or_else(|| {
            SondeError::InvalidArgument(format!(
                "No saved sounding for {} at {}",
                key,
                record.date.format(DATE_FORMAT)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationId;
    use crate::test_data::ARCHIVE_PAGE;
    use chrono::NaiveDate;
    use std::fs;

    fn record(month: u32, day: u32, hour: u32) -> InversionRecord {
        InversionRecord {
            date: NaiveDate::from_ymd_opt(2021, month, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            station: StationId::new(26075).unwrap(),
            delta_t: 4.0,
            delta_h: 301.0,
            base_height: 0.0,
            base_temperature: -5.0,
            top_height: 301.0,
            top_temperature: -1.0,
            ground: true,
            day: hour == 12,
            night: hour == 0,
        }
    }

    #[test]
    fn test_find_sounding_for_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("response_2021_01_26075.html"), ARCHIVE_PAGE).unwrap();
        let archive = LocalArchive::new(vec![dir.path().to_path_buf()]);

        let rec = record(1, 1, 0);
        let sounding = find_sounding(&archive, &rec).unwrap();
        assert_eq!(sounding.valid_time(), rec.date);
        assert_eq!(sounding.layer(rec.base_height, rec.top_height).len(), 3);

        let err = find_sounding(&archive, &record(1, 2, 0)).unwrap_err();
        assert!(matches!(err, SondeError::InvalidArgument(_)));

        let err = find_sounding(&archive, &record(2, 1, 0)).unwrap_err();
        assert!(matches!(err, SondeError::NoDataForPeriod { .. }));
    }
}

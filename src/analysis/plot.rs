//! # 逆温图表
//!
//! 使用 `plotters` 生成 2×2 分布图：
//! - ΔT 直方图
//! - ΔH 直方图
//! - 逆温底高直方图
//! - 每日逆温数量柱状图
//!
//! 以及单个逆温的温度廓线图（逆温层高亮，附 ΔT / ΔH / 底高）。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 和 `commands/profile.rs` 调用
//! - 使用 `models/inversion.rs`, `models/sounding.rs`
//! - 使用 `plotters` 渲染图表（PNG/SVG）

use crate::error::{Result, SondeError};
use crate::models::inversion::DATE_FORMAT;
use crate::models::{InversionRecord, Level, Sounding};

use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// 直方图分箱数
const HISTOGRAM_BINS: usize = 12;

const BAR_COLOR: RGBColor = RGBColor(0, 102, 204);

const LAYER_COLOR: RGBColor = RGBColor(204, 0, 0);

/// 廓线图在逆温顶以上额外显示的高度 (m)
pub const PROFILE_MARGIN: f64 = 500.0;

fn plot_err<E: std::fmt::Debug>(e: E) -> SondeError {
    SondeError::PlotError(format!("{:?}", e))
}

/// 等宽分箱，返回 (下界, 上界, 计数)
pub fn histogram(values: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (min + i as f64 * width, min + (i + 1) as f64 * width, c))
        .collect()
}

/// 每日逆温数量
pub fn counts_by_date(records: &[InversionRecord]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.date.date()).or_insert(0) += 1;
    }
    counts
}

/// 生成分布图，SVG 由扩展名决定
pub fn generate_distribution_plot(
    records: &[InversionRecord],
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    if records.is_empty() {
        return Err(SondeError::PlotError("No data to plot".to_string()));
    }

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_distribution(&root, records, title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_distribution(&root, records, title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 廓线图显示的层次：地面至逆温顶以上 `margin` 米
pub fn profile_window(levels: &[Level], top_height: f64, margin: f64) -> &[Level] {
    let end = levels.partition_point(|l| l.height <= top_height + margin);
    &levels[..end]
}

/// 生成单个逆温的温度廓线图，SVG 由扩展名决定
pub fn generate_profile_plot(
    sounding: &Sounding,
    record: &InversionRecord,
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<()> {
    if sounding.layer(record.base_height, record.top_height).len() < 2 {
        return Err(SondeError::PlotError(format!(
            "Sounding at {} has no levels between {} m and {} m",
            record.date.format(DATE_FORMAT),
            record.base_height,
            record.top_height
        )));
    }

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_profile(&root, sounding, record)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_profile(&root, sounding, record)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// 绘制廓线与逆温层
fn draw_profile<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    sounding: &Sounding,
    record: &InversionRecord,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let window = profile_window(sounding.levels(), record.top_height, PROFILE_MARGIN);
    let layer = sounding.layer(record.base_height, record.top_height);

    let t_min = window.iter().map(|l| l.temperature).fold(f64::INFINITY, f64::min) - 1.0;
    let t_max = window
        .iter()
        .map(|l| l.temperature)
        .fold(f64::NEG_INFINITY, f64::max)
        + 1.0;
    let h_max = window.last().map(|l| l.height).unwrap_or(record.top_height) + 50.0;

    let caption = format!(
        "Inversion Profile - {} (surface {:.0} m)",
        record.date.format(DATE_FORMAT),
        sounding.surface_elevation()
    );

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, 0.0..h_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Height above ground (m)")
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            window.iter().map(|l| (l.temperature, l.height)),
            &BLACK.mix(0.4),
        ))
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            layer.iter().map(|l| (l.temperature, l.height)),
            LAYER_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?;

    chart
        .draw_series(
            layer
                .iter()
                .map(|l| Circle::new((l.temperature, l.height), 4, LAYER_COLOR.filled())),
        )
        .map_err(plot_err)?;

    let lines = [
        format!("ΔT: {:.2}°C", record.delta_t),
        format!("ΔH: {:.0} m", record.delta_h),
        format!("Base Height: {:.0} m", record.base_height),
    ];
    let font = ("sans-serif", 16).into_font();
    for (i, line) in lines.iter().enumerate() {
        root.draw(&Text::new(
            line.as_str(),
            (100, 70 + 20 * i as i32),
            font.clone(),
        ))
        .map_err(plot_err)?;
    }

    Ok(())
}

/// 绘制 2×2 面板
fn draw_distribution<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    records: &[InversionRecord],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;
    let root = root
        .titled(title, ("sans-serif", 28).into_font())
        .map_err(plot_err)?;

    let panels = root.split_evenly((2, 2));

    let delta_t: Vec<f64> = records.iter().map(|r| r.delta_t).collect();
    let delta_h: Vec<f64> = records.iter().map(|r| r.delta_h).collect();
    let base: Vec<f64> = records.iter().map(|r| r.base_height).collect();

    draw_histogram(
        &panels[0],
        &delta_t,
        "Temperature Change Distribution",
        "Temperature Change (°C)",
    )?;
    draw_histogram(
        &panels[1],
        &delta_h,
        "Inversion Depth Distribution",
        "Height Change (m)",
    )?;
    draw_histogram(&panels[2], &base, "Base Height Distribution", "Base Height (m)")?;
    draw_date_counts(&panels[3], &counts_by_date(records))?;

    Ok(())
}

/// 绘制单个直方图
fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    values: &[f64],
    caption: &str,
    x_desc: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let bins = histogram(values, HISTOGRAM_BINS);
    let x_min = bins.first().map(|b| b.0).unwrap_or(0.0);
    let x_max = bins.last().map(|b| b.1).unwrap_or(1.0);
    let y_max = bins.iter().map(|b| b.2).max().unwrap_or(1).max(1);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0..(y_max + 1))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Count")
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(bins.iter().map(|&(lo, hi, count)| {
            Rectangle::new([(lo, 0), (hi, count)], BAR_COLOR.mix(0.7).filled())
        }))
        .map_err(plot_err)?;

    Ok(())
}

/// 绘制每日数量柱状图
fn draw_date_counts<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    counts: &BTreeMap<NaiveDate, usize>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let dates: Vec<NaiveDate> = counts.keys().copied().collect();
    let y_max = counts.values().copied().max().unwrap_or(1).max(1);
    let n = dates.len().max(1);

    let mut chart = ChartBuilder::on(area)
        .caption("Inversions by Date", ("sans-serif", 18))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(0..n, 0..(y_max + 1))
        .map_err(plot_err)?;

    let label_dates = dates.clone();
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Count")
        .label_style(("sans-serif", 12))
        .x_labels(n.min(10))
        .x_label_formatter(&|idx| {
            label_dates
                .get(*idx)
                .map(|d| d.format("%m-%d").to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(dates.iter().enumerate().map(|(i, d)| {
            let count = counts.get(d).copied().unwrap_or(0);
            Rectangle::new([(i, 0), (i + 1, count)], BAR_COLOR.filled())
        }))
        .map_err(plot_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationId;

    #[test]
    fn test_histogram_bins() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.2).sum::<usize>(), 5);
        // 最大值落在最后一个箱
        assert_eq!(bins[3].2, 2);
        assert!((bins[0].0 - 0.0).abs() < 1e-9);
        assert!((bins[3].1 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let bins = histogram(&[2.0, 2.0], 3);
        assert_eq!(bins[0].2, 2);
        assert!(histogram(&[], 3).is_empty());
    }

    #[test]
    fn test_counts_by_date() {
        let make = |day: u32, hour: u32| InversionRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            station: StationId::new(26075).unwrap(),
            delta_t: 1.0,
            delta_h: 100.0,
            base_height: 0.0,
            base_temperature: 0.0,
            top_height: 100.0,
            top_temperature: 1.0,
            ground: true,
            day: hour == 12,
            night: hour == 0,
        };

        let counts = counts_by_date(&[make(1, 0), make(1, 12), make(2, 0)]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()], 2);
    }

    #[test]
    fn test_empty_plot_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.svg");
        assert!(generate_distribution_plot(&[], &out, "t", 800, 600).is_err());
    }

    fn profile_sounding() -> Sounding {
        Sounding::new(
            StationId::new(26075).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            4.0,
            [(0.0, -5.0), (97.0, -3.2), (301.0, -1.0), (508.0, -2.2), (930.0, -3.0)]
                .iter()
                .map(|&(h, t)| Level::new(h, t))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_profile_window() {
        let snd = profile_sounding();
        let window = profile_window(snd.levels(), 301.0, PROFILE_MARGIN);
        assert_eq!(window.len(), 4);
        assert_eq!(window.last().unwrap().height, 508.0);
        assert_eq!(profile_window(snd.levels(), 301.0, 0.0).len(), 3);
    }

    #[test]
    fn test_profile_without_layer_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("profile.svg");
        let record = InversionRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            station: StationId::new(26075).unwrap(),
            delta_t: 1.0,
            delta_h: 100.0,
            base_height: 600.0,
            base_temperature: -3.0,
            top_height: 700.0,
            top_temperature: -2.0,
            ground: false,
            day: false,
            night: true,
        };
        let err = generate_profile_plot(&profile_sounding(), &record, &out, 800, 1000).unwrap_err();
        assert!(matches!(err, SondeError::PlotError(_)));
        assert!(!out.exists());
    }
}

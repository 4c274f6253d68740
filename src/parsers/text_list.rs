//! # TEXT:LIST 表格解析器
//!
//! 解析归档页面 `<pre>` 块中的定宽探空表格。
//!
//! ## 格式说明
//! ```text
//! -----------------------------------------------------------------------------
//!    PRES   HGHT   TEMP   DWPT   RELH   MIXR   DRCT   SKNT   THTA   THTE   THTV
//!     hPa     m      C      C      %    g/kg    deg   knot     K      K      K
//! -----------------------------------------------------------------------------
//!  1012.0      4   -5.0   -7.0     86   2.23    200      6  267.2  273.6  267.6
//! ...
//! ```
//! 每列宽 7 个字符；空白单元为缺测。
//!
//! ## 依赖关系
//! - 被 `parsers/wyoming.rs` 调用
//! - 使用 `models/sounding.rs`

use crate::error::{Result, SondeError};
use crate::models::{Level, Sounding, StationId};

use chrono::NaiveDateTime;

/// 定宽列宽度
const COLUMN_WIDTH: usize = 7;

/// 把一行切分为 7 字符宽的单元
fn split_columns(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(COLUMN_WIDTH)
        .map(|chunk| chunk.iter().collect::<String>().trim().to_string())
        .collect()
}

/// 解析单元格，空白为 None
fn parse_cell(row: &[String], idx: Option<usize>, context: &str) -> Result<Option<f64>> {
    let cell = match idx.and_then(|i| row.get(i)) {
        Some(c) if !c.is_empty() => c,
        _ => return Ok(None),
    };

    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| SondeError::malformed(context, format!("non-numeric value '{}'", cell)))
}

/// 解析一个 `<pre>` 数据块为探空
///
/// 缺少高度或温度的行会被丢弃；高度换算为相对最低层的离地高度。
pub fn parse_text_list(
    text: &str,
    station: StationId,
    valid_time: NaiveDateTime,
) -> Result<Sounding> {
    let context = format!("{} {}", station, valid_time.format("%Y-%m-%d %HZ"));

    let rows: Vec<Vec<String>> = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.contains("--"))
        .map(split_columns)
        .collect();

    // 第一行为列名，第二行为单位
    if rows.len() < 3 {
        return Err(SondeError::malformed(&context, "table has no data rows"));
    }

    let header = &rows[0];
    let column = |name: &str| header.iter().position(|h| h == name);

    let h_idx = column("HGHT")
        .ok_or_else(|| SondeError::malformed(&context, "missing HGHT column"))?;
    let t_idx = column("TEMP")
        .ok_or_else(|| SondeError::malformed(&context, "missing TEMP column"))?;
    let p_idx = column("PRES");
    let td_idx = column("DWPT");

    let mut raw_levels: Vec<(f64, Level)> = Vec::new();

    for row in &rows[2..] {
        let height = parse_cell(row, Some(h_idx), &context)?;
        let temperature = parse_cell(row, Some(t_idx), &context)?;

        if let (Some(height), Some(temperature)) = (height, temperature) {
            let level = Level::new(height, temperature)
                .with_pressure(parse_cell(row, p_idx, &context)?)
                .with_dew_point(parse_cell(row, td_idx, &context)?);
            raw_levels.push((height, level));
        }
    }

    let surface_elevation = match raw_levels.first() {
        Some((h, _)) => *h,
        None => return Err(SondeError::malformed(&context, "no levels with height and temperature")),
    };

    let levels = raw_levels
        .into_iter()
        .map(|(h, level)| Level {
            height: h - surface_elevation,
            ..level
        })
        .collect();

    Sounding::new(station, valid_time, surface_elevation, levels)
}

//! # list 子命令实现
//!
//! 列出可用数据：
//! - 数据目录中已保存的归档页面
//! - 输出目录中的 `soundings_*` 目录及其文件数
//! - 合并数据集
//!
//! ## 依赖关系
//! - 使用 `cli/list.rs` 定义的 ListArgs
//! - 使用 `batch/collector.rs` 搜索文件
//! - 使用 `report::load_records` 统计合并数据集

use crate::batch::collector::SOUNDING_FILE_PATTERN;
use crate::batch::FileCollector;
use crate::cli::list::ListArgs;
use crate::error::{Result, SondeError};
use crate::report::export::{COMBINED_DIR, FULL_TABLE_FILE};
use crate::report::load_records;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 输出目录行
#[derive(Debug, Clone, Tabled)]
struct DirRow {
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Files")]
    files: usize,
}

/// 可用数据清单
#[derive(Debug, Default)]
pub struct Inventory {
    /// 已保存的归档页面
    pub pages: Vec<PathBuf>,
    /// `soundings_*` 目录及其中的单次探空文件数
    pub sounding_dirs: Vec<(PathBuf, usize)>,
    /// 合并数据集路径及逆温条数
    pub combined: Option<(PathBuf, usize)>,
}

/// 执行列表
pub fn execute(args: ListArgs) -> Result<()> {
    output::print_header("Available Data");

    let inventory = scan(&args.data_dir, args.recursive, &args.output_dir)?;

    if inventory.pages.is_empty() {
        let dirs: Vec<String> = args
            .data_dir
            .iter()
            .map(|d| format!("'{}'", d.display()))
            .collect();
        output::print_warning(&format!("No raw archive pages found in {}", dirs.join(", ")));
    } else {
        output::print_info(&format!("Raw archive pages ({}):", inventory.pages.len()));
        for page in &inventory.pages {
            println!("  - {}", page.display());
        }
    }

    output::print_separator();
    if inventory.sounding_dirs.is_empty() {
        output::print_warning("No output directories found");
    } else {
        let rows: Vec<DirRow> = inventory
            .sounding_dirs
            .iter()
            .map(|(dir, files)| DirRow {
                directory: dir.display().to_string(),
                files: *files,
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    output::print_separator();
    match &inventory.combined {
        Some((path, count)) => output::print_success(&format!(
            "Combined dataset: '{}' ({} inversions)",
            path.display(),
            count
        )),
        None => output::print_warning("No combined dataset found"),
    }

    Ok(())
}

/// 扫描数据目录与输出目录
pub fn scan(data_dirs: &[PathBuf], recursive: bool, output_dir: &Path) -> Result<Inventory> {
    let pages: Vec<PathBuf> = data_dirs
        .iter()
        .flat_map(|dir| FileCollector::new(dir.clone()).recursive(recursive).collect())
        .collect();

    let mut sounding_dirs = Vec::new();
    if output_dir.is_dir() {
        let entries = fs::read_dir(output_dir).map_err(|e| SondeError::FileReadError {
            path: output_dir.display().to_string(),
            source: e,
        })?;

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            let is_output = path.is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .map_or(false, |name| name.starts_with("soundings_"));
            if !is_output {
                continue;
            }

            let files = FileCollector::new(path.clone())
                .with_pattern(SOUNDING_FILE_PATTERN)?
                .collect()
                .len();
            sounding_dirs.push((path, files));
        }
        sounding_dirs.sort();
    }

    let full = output_dir.join(COMBINED_DIR).join(FULL_TABLE_FILE);
    let combined = if full.is_file() {
        let count = load_records(&full)?.len();
        Some((full, count))
    } else {
        None
    };

    Ok(Inventory {
        pages,
        sounding_dirs,
        combined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;
    use crate::report::{CsvReportSink, ReportSink};

    #[test]
    fn test_scan_empty() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = scan(&[dir.path().join("data")], false, dir.path()).unwrap();
        assert!(inventory.pages.is_empty());
        assert!(inventory.sounding_dirs.is_empty());
        assert!(inventory.combined.is_none());
    }

    #[test]
    fn test_scan_pages_and_outputs() {
        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        let results = root.path().join("test_results");
        fs::create_dir_all(&data).unwrap();
        fs::create_dir_all(&results).unwrap();
        fs::write(data.join("response_2021_02_26075.html"), "").unwrap();
        fs::write(data.join("notes.html"), "").unwrap();
        fs::write(results.join("response_2021_01_26075.html"), "").unwrap();

        CsvReportSink::new(root.path().to_path_buf())
            .write(&sample_report())
            .unwrap();
        fs::create_dir(root.path().join("soundings_2020_26075")).unwrap();

        let inventory = scan(&[data, results], false, root.path()).unwrap();

        let pages: Vec<String> = inventory
            .pages
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            pages,
            vec!["response_2021_02_26075.html", "response_2021_01_26075.html"]
        );

        let dirs: Vec<(String, usize)> = inventory
            .sounding_dirs
            .iter()
            .map(|(d, n)| (d.file_name().unwrap().to_string_lossy().into_owned(), *n))
            .collect();
        assert_eq!(
            dirs,
            vec![
                ("soundings_2020_26075".to_string(), 0),
                ("soundings_2021_26075".to_string(), 2)
            ]
        );

        let (path, count) = inventory.combined.unwrap();
        assert!(path.ends_with("DATA/df_full.csv"));
        assert_eq!(count, 3);
    }
}

//! # wysonde - 探空逆温分析工具
//!
//! 下载 University of Wyoming 探空归档，检测 1000 m 以下的温度逆温，
//! 导出、统计并绘图。
//!
//! ## 子命令
//! - `fetch`     - 下载归档页面
//! - `process`   - 从本地归档检测逆温并导出
//! - `run`       - 缺失时下载，再处理
//! - `summarize` - 统计合并数据集
//! - `plot`      - 绘制分布图
//! - `profile`   - 绘制单个逆温的温度廓线
//! - `list`      - 列出已保存的页面与导出结果
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── pipeline.rs (获取 → 解码 → 检测 → 汇总)
//!   │     ├── source/     (数据源)
//!   │     ├── parsers/    (页面与表格解码)
//!   │     ├── analysis/   (检测、统计、绘图)
//!   │     ├── report/     (CSV 导出)
//!   │     └── models/     (数据模型)
//!   ├── batch/      (并行执行)
//!   ├── utils/      (输出、进度条、日志)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod pipeline;
mod report;
mod source;
#[cfg(test)]
mod test_data;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = utils::logging::init(cli.log_level.as_deref(), cli.log_file.as_deref()) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

//! # plot 子命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 PlotArgs
//! - 使用 `report::load_records` 读取数据
//! - 使用 `analysis/plot.rs` 绘图

use crate::analysis::plot::generate_distribution_plot;
use crate::cli::plot::PlotArgs;
use crate::error::Result;
use crate::report::load_records;
use crate::utils::output;

/// 执行绘图
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Inversion Distribution Plot");

    let records = load_records(&args.input)?;
    output::print_info(&format!(
        "Plotting {} inversions from '{}'",
        records.len(),
        args.input.display()
    ));

    generate_distribution_plot(&records, &args.output, &args.title, args.width, args.height)?;

    output::print_success(&format!("Plot saved to '{}'", args.output.display()));
    Ok(())
}

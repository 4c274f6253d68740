//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `pipeline.rs`, `report/`, `analysis/`, `utils/`
//! - 子模块: fetch, list, plot, process, profile, summarize

pub mod fetch;
pub mod list;
pub mod plot;
pub mod process;
pub mod profile;
pub mod summarize;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Fetch(args) => fetch::execute(args),
        Commands::Process(args) => process::execute_process(args),
        Commands::Run(args) => process::execute_run(args),
        Commands::Summarize(args) => summarize::execute(args),
        Commands::Plot(args) => plot::execute(args),
        Commands::Profile(args) => profile::execute(args),
        Commands::List(args) => list::execute(args),
    }
}

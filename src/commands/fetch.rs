//! # fetch 子命令实现
//!
//! 逐月下载归档页面，保存为 `response_{year}_{mm}_{station}.html`。
//! 已保存的页面默认跳过；不含探空的页面（空页、繁忙页）不保存，下次重试。
//!
//! ## 依赖关系
//! - 使用 `cli/fetch.rs` 定义的 FetchArgs
//! - 使用 `source/wyoming.rs` 下载、`source/local.rs` 检查已保存页面

use crate::cli::fetch::FetchArgs;
use crate::error::Result;
use crate::source::{LocalArchive, WyomingClient};
use crate::utils::{output, progress};

/// 执行下载
pub fn execute(args: FetchArgs) -> Result<()> {
    output::print_header("Fetching Sounding Archive Pages");

    let keys = args.period.keys()?;
    let client = WyomingClient::new(args.archive.config())?;
    let saved_pages = LocalArchive::new(vec![args.data_dir.clone()]);

    output::print_info(&format!(
        "{} month(s) for station {} into '{}'",
        keys.len(),
        keys[0].station,
        args.data_dir.display()
    ));

    let pb = progress::create_progress_bar(keys.len() as u64, "Downloading");
    let mut saved = 0;
    let mut skipped = 0;
    let mut failures = Vec::new();

    for key in &keys {
        if !args.overwrite {
            if let Some(path) = saved_pages.find(key) {
                pb.suspend(|| {
                    output::print_skip(&format!("{} already saved at '{}'", key, path.display()))
                });
                skipped += 1;
                pb.inc(1);
                continue;
            }
        }

        match client.download_to(key, &args.data_dir) {
            Ok(path) => {
                pb.suspend(|| output::print_success(&format!("{} -> '{}'", key, path.display())));
                saved += 1;
            }
            Err(e) if e.is_period_level() => failures.push(e.to_string()),
            Err(e) => return Err(e),
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    output::print_separator();
    output::print_done(&format!(
        "Fetch complete: {} saved, {} skipped, {} failed",
        saved,
        skipped,
        failures.len()
    ));
    for reason in &failures {
        output::print_warning(reason);
    }

    Ok(())
}

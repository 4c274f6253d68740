//! # 处理流水线
//!
//! 获取 → 解码 → 检测 → 汇总。
//!
//! ## 流程
//! 1. 逐个时段顺序获取（数据源内部负责请求间隔）
//! 2. 时段级失败 (`SourceUnavailable` / `NoDataForPeriod`) 记录后继续
//! 3. 解码失败的探空计为失败
//! 4. 在线程池上并行检测
//! 5. 没有任何有效探空时返回 `NoUsableSoundings`
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `source/` (DataSource)、`analysis/detector.rs`、`batch/runner.rs`
//! - 产出 `report/` 的 `InversionReport`

use crate::analysis::Detector;
use crate::batch::{BatchResult, BatchRunner, ProcessResult};
use crate::error::{Result, SondeError};
use crate::models::{InversionRecord, PeriodKey, Sounding};
use crate::report::{InversionReport, SourceFailure};
use crate::source::DataSource;

use tracing::{info, warn};

/// 对一批时段运行完整流程
pub fn run_batch(
    source: &dyn DataSource,
    keys: &[PeriodKey],
    detector: &Detector,
    jobs: usize,
) -> Result<InversionReport> {
    let mut soundings: Vec<Sounding> = Vec::new();
    let mut malformed: Vec<(String, String)> = Vec::new();
    let mut source_failures = Vec::new();

    for key in keys {
        match source.fetch(key) {
            Ok(items) => {
                let before = soundings.len();
                for item in items {
                    match item {
                        Ok(s) => soundings.push(s),
                        Err(e) => {
                            warn!(period = %key, error = %e, "skipping malformed sounding");
                            malformed.push((key.to_string(), e.to_string()));
                        }
                    }
                }
                info!(
                    source = source.name(),
                    period = %key,
                    soundings = soundings.len() - before,
                    "fetched period"
                );
            }
            Err(e) if e.is_period_level() => {
                warn!(source = source.name(), period = %key, error = %e, "period unavailable");
                source_failures.push(SourceFailure {
                    period: *key,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    let mut batch = detect_all(&soundings, detector, jobs)?;
    for (label, reason) in malformed {
        batch.merge(ProcessResult::Failed(label, reason));
    }

    if batch.valid() == 0 {
        return Err(SondeError::NoUsableSoundings);
    }

    info!(
        total = batch.total(),
        processed = batch.processed,
        no_inversion = batch.no_inversion,
        failed = batch.failed,
        "batch complete"
    );

    Ok(InversionReport::from_batch(keys, batch, source_failures))
}

/// 并行检测全部探空
pub fn detect_all(soundings: &[Sounding], detector: &Detector, jobs: usize) -> Result<BatchResult> {
    BatchRunner::new(jobs).run(soundings, |sounding| {
        let inversions = detector.detect(sounding);
        if inversions.is_empty() {
            ProcessResult::NoInversion
        } else {
            ProcessResult::Detected(
                inversions
                    .iter()
                    .map(|inv| InversionRecord::from_inversion(sounding, inv))
                    .collect(),
            )
        }
    })
}

//! # 批量执行器
//!
//! 在 rayon 线程池上并行处理已解码的探空。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，线程数由 `--jobs` 决定（0 = 全部核心）
//! - 进度条显示
//! - 按结果分类计数并汇总
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, SondeError};
use crate::models::InversionRecord;
use crate::utils::progress;

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 单次探空的处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 检测到至少一个逆温
    Detected(Vec<InversionRecord>),
    /// 有效探空但没有逆温
    NoInversion,
    /// 解码失败
    Failed(String, String), // (探空标识, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 含逆温的探空数量
    pub processed: usize,
    /// 无逆温的探空数量
    pub no_inversion: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
    /// 每个探空的逆温记录
    pub groups: Vec<Vec<InversionRecord>>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Detected(records) => {
                self.processed += 1;
                self.groups.push(records);
            }
            ProcessResult::NoInversion => self.no_inversion += 1,
            ProcessResult::Failed(label, err) => {
                self.failed += 1;
                self.failures.push((label, err));
            }
        }
    }

    /// 有效探空数量
    pub fn valid(&self) -> usize {
        self.processed + self.no_inversion
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.valid() + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理，结果顺序不保证
    pub fn run<T, F>(&self, items: &[T], processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, "Detecting");

        let detected = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SondeError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);

                    match &result {
                        ProcessResult::Detected(_) => {
                            detected.fetch_add(1, Ordering::Relaxed);
                        }
                        ProcessResult::Failed(_, _) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                        ProcessResult::NoInversion => {}
                    }

                    pb.set_message(format!(
                        "{} with inversions, {} failed",
                        detected.load(Ordering::Relaxed),
                        failed.load(Ordering::Relaxed)
                    ));
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_counts() {
        let mut result = BatchResult::default();
        result.merge(ProcessResult::Detected(vec![]));
        result.merge(ProcessResult::NoInversion);
        result.merge(ProcessResult::NoInversion);
        result.merge(ProcessResult::Failed("c".into(), "bad".into()));

        assert_eq!(result.processed, 1);
        assert_eq!(result.no_inversion, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.valid(), 3);
        assert_eq!(result.total(), 4);
        assert_eq!(result.failures[0].0, "c");
    }

    #[test]
    fn test_run_in_parallel() {
        let values: Vec<i32> = (0..100).collect();
        let result = BatchRunner::new(4)
            .run(&values, |v| {
                if v % 10 == 0 {
                    ProcessResult::Failed(v.to_string(), "multiple of ten".into())
                } else if v % 2 == 0 {
                    ProcessResult::NoInversion
                } else {
                    ProcessResult::Detected(vec![])
                }
            })
            .unwrap();

        assert_eq!(result.failed, 10);
        assert_eq!(result.no_inversion, 40);
        assert_eq!(result.processed, 50);
        assert_eq!(result.groups.len(), 50);
    }
}

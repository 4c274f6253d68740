//! # 逆温检测器
//!
//! 对单次探空做一次自下而上的扫描，找出低层逆温。
//!
//! ## 算法
//! - 相邻层 (L[i], L[i+1]) 中若 L[i] 低于底高上限且 L[i+1] 温度严格高于 L[i]，
//!   则以 L[i] 为底开始一个逆温段
//! - 温度严格上升时继续延伸，直到温度不再上升或廓线结束
//! - 每个最大上升段输出一个逆温，扫描从该段顶部继续
//! - 等温不开始也不延伸逆温段
//!
//! ## 依赖关系
//! - 被 `pipeline.rs` 调用
//! - 使用 `models/sounding.rs`, `models/inversion.rs`

use crate::models::{Inversion, Sounding};

/// 默认底高上限 (m, 离地)
pub const DEFAULT_MAX_BASE_HEIGHT: f64 = 1000.0;

/// 默认贴地阈值 (m, 离地)
pub const DEFAULT_GROUND_THRESHOLD: f64 = 0.0;

/// 检测器配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// 逆温底必须严格低于此高度
    pub max_base_height: f64,
    /// 底高不超过此值视为贴地逆温
    pub ground_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            max_base_height: DEFAULT_MAX_BASE_HEIGHT,
            ground_threshold: DEFAULT_GROUND_THRESHOLD,
        }
    }
}

/// 逆温检测器（无内部状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn with_config(config: DetectorConfig) -> Self {
        Detector { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// 找出所有底高低于上限的逆温
    pub fn detect(&self, sounding: &Sounding) -> Vec<Inversion> {
        let levels = sounding.levels();
        let mut inversions = Vec::new();

        if levels.len() < 2 {
            return inversions;
        }

        let mut i = 0;
        while i + 1 < levels.len() {
            let base = &levels[i];

            if base.height >= self.config.max_base_height {
                // 高度递增，之后不会再有合格的底
                break;
            }

            if levels[i + 1].temperature <= base.temperature {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j + 1 < levels.len() && levels[j + 1].temperature > levels[j].temperature {
                j += 1;
            }

            let top = &levels[j];
            let inversion = Inversion {
                base_height: base.height,
                base_temperature: base.temperature,
                top_height: top.height,
                top_temperature: top.temperature,
                ground: base.height <= self.config.ground_threshold,
            };

            if inversion.delta_t() > 0.0 && inversion.delta_h() > 0.0 {
                inversions.push(inversion);
            }

            i = j;
        }

        inversions
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ERROR_SAMPLE_PROBABILITY, DEFAULT_EXPERIMENT_DURATION_SECONDS, DEFAULT_SERVICES,
    DEFAULT_TICK_INTERVAL_SECONDS,
};

/// 模拟引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 是否启动周期调度
    pub enabled: bool,
    pub tick_interval_seconds: u64,
    /// 每个周期生成指标的服务列表
    pub services: Vec<String>,
    pub error_sample_probability: f64,
    pub default_experiment_duration_seconds: i64,
    /// 设置后使用固定种子的随机数
    pub random_seed: Option<u64>,
    /// 启动时在空集群上写入演示数据
    pub seed_on_startup: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval_seconds: DEFAULT_TICK_INTERVAL_SECONDS,
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            error_sample_probability: DEFAULT_ERROR_SAMPLE_PROBABILITY,
            default_experiment_duration_seconds: DEFAULT_EXPERIMENT_DURATION_SECONDS,
            random_seed: None,
            seed_on_startup: true,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tick_interval_seconds == 0 {
            return Err(anyhow::anyhow!("调度周期必须大于0"));
        }

        if self.services.is_empty() {
            return Err(anyhow::anyhow!("服务列表不能为空"));
        }

        if self.services.iter().any(|s| s.trim().is_empty()) {
            return Err(anyhow::anyhow!("服务名称不能为空"));
        }

        if !(0.0..=1.0).contains(&self.error_sample_probability) {
            return Err(anyhow::anyhow!(
                "错误样本概率必须在0到1之间: {}",
                self.error_sample_probability
            ));
        }

        if self.default_experiment_duration_seconds <= 0 {
            return Err(anyhow::anyhow!("默认实验持续时间必须大于0"));
        }

        Ok(())
    }
}

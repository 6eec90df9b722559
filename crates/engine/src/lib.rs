//! 集群模拟引擎
//!
//! - `metric_synthesizer` - 每周期生成各服务的流量指标
//! - `chaos_manager` - 混沌实验的过期判断、效果施加与自愈
//! - `reconciler` - 固定周期驱动以上两步的调度器
//! - `trigger` - 创建混沌实验的入口
//! - `seed` - 空集群的演示数据初始化
//! - `engine` - 按配置组装以上组件

pub mod chaos_manager;
pub mod engine;
pub mod metric_synthesizer;
pub mod reconciler;
pub mod seed;
pub mod trigger;

pub use chaos_manager::{ChaosLifecycleManager, ChaosPassReport, ExperimentOutcome};
pub use engine::SimulationEngine;
pub use metric_synthesizer::{MetricSynthesizer, SynthesisReport};
pub use reconciler::{ReconciliationScheduler, TickReport};
pub use seed::{InfrastructureSeeder, SeedReport, SEED_POD_SERVICES};
pub use trigger::ExperimentTrigger;

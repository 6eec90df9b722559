use std::sync::Arc;
use std::time::Duration;

use sentinel_core::{
    config::SimulationConfig,
    traits::{Clock, RandomSource, SeededRandomSource, ThreadRandomSource},
};
use sentinel_infrastructure::{MetricsCollector, Repositories};

use crate::chaos_manager::ChaosLifecycleManager;
use crate::metric_synthesizer::MetricSynthesizer;
use crate::reconciler::ReconciliationScheduler;
use crate::seed::InfrastructureSeeder;
use crate::trigger::ExperimentTrigger;

/// 按配置组装好的引擎组件，共享同一组仓储、时钟和随机数来源
#[derive(Clone)]
pub struct SimulationEngine {
    pub scheduler: Arc<ReconciliationScheduler>,
    pub chaos_manager: Arc<ChaosLifecycleManager>,
    pub trigger: Arc<ExperimentTrigger>,
    pub seeder: Arc<InfrastructureSeeder>,
}

impl SimulationEngine {
    pub fn new(
        repos: &Repositories,
        config: &SimulationConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        metrics: MetricsCollector,
    ) -> Self {
        let synthesizer = Arc::new(MetricSynthesizer::new(
            repos.telemetry.clone(),
            clock.clone(),
            random.clone(),
            config.services.clone(),
            config.error_sample_probability,
            metrics.clone(),
        ));

        let chaos_manager = Arc::new(ChaosLifecycleManager::new(
            repos.cluster.clone(),
            repos.telemetry.clone(),
            repos.chaos.clone(),
            clock.clone(),
            random.clone(),
            config.default_experiment_duration_seconds,
            metrics.clone(),
        ));

        let scheduler = Arc::new(ReconciliationScheduler::new(
            synthesizer,
            chaos_manager.clone(),
            Duration::from_secs(config.tick_interval_seconds),
            metrics.clone(),
        ));

        let trigger = Arc::new(ExperimentTrigger::new(
            repos.chaos.clone(),
            repos.telemetry.clone(),
            clock.clone(),
            metrics,
        ));

        let seeder = Arc::new(InfrastructureSeeder::new(
            repos.cluster.clone(),
            repos.storefront.clone(),
            clock,
            random,
        ));

        Self {
            scheduler,
            chaos_manager,
            trigger,
            seeder,
        }
    }

    /// 配置了 `random_seed` 时使用固定种子
    pub fn random_source(config: &SimulationConfig) -> Arc<dyn RandomSource> {
        match config.random_seed {
            Some(seed) => Arc::new(SeededRandomSource::new(seed)),
            None => Arc::new(ThreadRandomSource),
        }
    }
}

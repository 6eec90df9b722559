use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use sentinel_infrastructure::{MetricsCollector, StructuredLogger};

use crate::chaos_manager::{ChaosLifecycleManager, ChaosPassReport};
use crate::metric_synthesizer::{MetricSynthesizer, SynthesisReport};

/// 一个调度周期的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub synthesis: SynthesisReport,
    pub chaos: ChaosPassReport,
}

/// 周期调度器
///
/// 每个周期先生成指标，再处理混沌实验，两步串行执行。
/// 周期体在独立任务中运行，panic 只会让本周期失败，下一个周期照常执行。
pub struct ReconciliationScheduler {
    synthesizer: Arc<MetricSynthesizer>,
    chaos_manager: Arc<ChaosLifecycleManager>,
    tick_interval: Duration,
    metrics: MetricsCollector,
    ticks: AtomicU64,
}

impl ReconciliationScheduler {
    pub fn new(
        synthesizer: Arc<MetricSynthesizer>,
        chaos_manager: Arc<ChaosLifecycleManager>,
        tick_interval: Duration,
        metrics: MetricsCollector,
    ) -> Self {
        Self {
            synthesizer,
            chaos_manager,
            tick_interval,
            metrics,
            ticks: AtomicU64::new(0),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// 已执行的周期数
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// 执行一个周期，周期体 panic 时返回 `None`
    pub async fn run_tick(&self) -> Option<TickReport> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        let started = Instant::now();

        let synthesizer = self.synthesizer.clone();
        let chaos_manager = self.chaos_manager.clone();
        let handle = tokio::spawn(async move {
            let synthesis = synthesizer.synthesize().await;
            let chaos = chaos_manager.run_pass().await;
            (synthesis, chaos)
        });

        match handle.await {
            Ok((synthesis, chaos)) => {
                let elapsed = started.elapsed();
                self.metrics.record_tick(elapsed.as_secs_f64());
                StructuredLogger::log_tick_completed(
                    tick,
                    synthesis.samples_written,
                    chaos.completed,
                    chaos.pods_healed,
                    elapsed.as_millis() as u64,
                );
                Some(TickReport {
                    tick,
                    synthesis,
                    chaos,
                })
            }
            Err(e) => {
                error!("调度周期 {} 执行失败: {}", tick, e);
                StructuredLogger::log_tick_failed(tick, &e.to_string());
                self.metrics.record_tick_failure();
                None
            }
        }
    }

    /// 运行调度循环直到收到关闭信号
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) {
        info!("模拟调度器启动，周期 {:?}", self.tick_interval);

        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 第一次 tick 立即完成，跳过以保证启动后一个周期才开始
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Some(report) = self.run_tick().await {
                        debug!(
                            "周期 {} 完成: 样本 {}，完成实验 {}",
                            report.tick,
                            report.synthesis.samples_written,
                            report.chaos.completed
                        );
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("模拟调度器收到关闭信号");
                    break;
                }
            }
        }
    }
}

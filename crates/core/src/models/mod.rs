//! # 数据模型
//!
//! 定义集群模拟平台的核心数据结构：节点、Pod、指标样本、日志、告警、
//! 混沌实验，以及演示商城使用的商品与订单。
//!
//! ## 设计原则
//!
//! - 所有时间字段使用 `DateTime<Utc>`
//! - 状态字段使用枚举类型，数据库中以文本存储，读取时解析
//! - JSON 字段采用 camelCase，与仪表盘前端保持一致
//! - `NewXxx` 结构体表示尚未持久化的记录，ID 由存储层分配

/// 为文本枚举生成 `as_str`、`Display` 与 `FromStr` 实现
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::SentinelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(crate::SentinelError::Serialization(format!(
                        concat!("无效的", stringify!($name), ": {}"),
                        s
                    ))),
                }
            }
        }
    };
}

pub mod alert;
pub mod chaos;
pub mod log_entry;
pub mod metric;
pub mod node;
pub mod pod;
pub mod storefront;

pub use alert::{Alert, AlertSeverity, AlertStatus, NewAlert};
pub use chaos::{ChaosExperiment, ExperimentStatus, ExperimentType, NewChaosExperiment};
pub use log_entry::{LogEntry, LogLevel, LogQuery, NewLogEntry};
pub use metric::{MetricLabels, MetricQuery, MetricRange, MetricSample, NewMetricSample};
pub use node::{NewNode, Node, NodeStatus};
pub use pod::{NewPod, Pod, PodStatus};
pub use storefront::{NewProduct, Order, OrderItem, OrderStatus, Product};

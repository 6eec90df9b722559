//! 模拟平台常量

/// 混沌实验默认持续时间（秒）
pub const DEFAULT_EXPERIMENT_DURATION_SECONDS: i64 = 30;

/// 调度周期默认值（秒）
pub const DEFAULT_TICK_INTERVAL_SECONDS: u64 = 5;

/// 每个服务每个周期产生500错误样本的默认概率
pub const DEFAULT_ERROR_SAMPLE_PROBABILITY: f64 = 0.05;

/// 默认模拟的服务集合
pub const DEFAULT_SERVICES: [&str; 3] = ["frontend", "backend", "database"];

pub const METRIC_REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const METRIC_REQUESTS_TOTAL: &str = "http_requests_total";

/// 延迟样本基线与抖动
pub const LATENCY_BASE_MS: f64 = 20.0;
pub const LATENCY_JITTER_MS: f64 = 50.0;

/// 请求数与错误数上界（不含）
pub const REQUEST_COUNT_UPPER: u64 = 100;
pub const ERROR_COUNT_UPPER: u64 = 5;

/// 日志来源组件
pub const COMPONENT_KUBELET: &str = "kubelet";
pub const COMPONENT_KUBE_SCHEDULER: &str = "kube-scheduler";
pub const COMPONENT_CHAOS_CONTROLLER: &str = "chaos-controller";
pub const COMPONENT_FRONTEND: &str = "frontend";

/// 商城订单的模拟单价
pub const MOCK_ORDER_UNIT_PRICE: f64 = 10.0;

/// 查询条数上限
pub const METRICS_QUERY_LIMIT: i64 = 100;
pub const METRICS_BY_NAME_QUERY_LIMIT: i64 = 50;
pub const LOGS_QUERY_LIMIT: i64 = 100;

/// 单个混沌实验允许的最长持续时间（秒）
pub const MAX_EXPERIMENT_DURATION_SECONDS: i32 = 3600;

/// 种子Pod名称的随机后缀长度
pub const POD_NAME_SUFFIX_LEN: usize = 5;

//! 追踪、请求 ID 与客户端计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 单次外发请求的追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 客户端计数快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_sent: u64,
    pub request_failures: u64,
    pub network_failures: u64,
    pub auth_expirations: u64,
    pub validation_rejections: u64,
    pub stale_responses_discarded: u64,
    pub records_skipped: u64,
    pub request_latency_ms_total: u64,
    pub request_latency_ms_count: u64,
}

impl MetricsSnapshot {
    /// 平均请求耗时（毫秒）；无样本时为 0。
    pub fn average_latency_ms(&self) -> u64 {
        self.request_latency_ms_total
            .checked_div(self.request_latency_ms_count)
            .unwrap_or(0)
    }
}

/// 进程级客户端计数。
pub struct ClientMetrics {
    requests_sent: AtomicU64,
    request_failures: AtomicU64,
    network_failures: AtomicU64,
    auth_expirations: AtomicU64,
    validation_rejections: AtomicU64,
    stale_responses_discarded: AtomicU64,
    records_skipped: AtomicU64,
    request_latency_ms_total: AtomicU64,
    request_latency_ms_count: AtomicU64,
}

impl ClientMetrics {
    pub fn new() -> Self {
        Self {
            requests_sent: AtomicU64::new(0),
            request_failures: AtomicU64::new(0),
            network_failures: AtomicU64::new(0),
            auth_expirations: AtomicU64::new(0),
            validation_rejections: AtomicU64::new(0),
            stale_responses_discarded: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
            request_latency_ms_total: AtomicU64::new(0),
            request_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            request_failures: self.request_failures.load(Ordering::Relaxed),
            network_failures: self.network_failures.load(Ordering::Relaxed),
            auth_expirations: self.auth_expirations.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            stale_responses_discarded: self.stale_responses_discarded.load(Ordering::Relaxed),
            records_skipped: self.records_skipped.load(Ordering::Relaxed),
            request_latency_ms_total: self.request_latency_ms_total.load(Ordering::Relaxed),
            request_latency_ms_count: self.request_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for ClientMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<ClientMetrics> = OnceLock::new();

/// 获取全局计数实例。
pub fn metrics() -> &'static ClientMetrics {
    METRICS.get_or_init(ClientMetrics::new)
}

/// 初始化 tracing（默认 info）。
///
/// 日志写 stderr，stdout 留给命令输出。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录已发出的请求。
pub fn record_request_sent() {
    metrics().requests_sent.fetch_add(1, Ordering::Relaxed);
}

/// 记录非 2xx 响应。
pub fn record_request_failure() {
    metrics().request_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录未收到响应的请求（连接失败、超时）。
pub fn record_network_failure() {
    metrics().network_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录 401 导致的会话失效。
pub fn record_auth_expiration() {
    metrics().auth_expirations.fetch_add(1, Ordering::Relaxed);
}

/// 记录本地校验拦截的提交。
pub fn record_validation_rejection() {
    metrics()
        .validation_rejections
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录被丢弃的过期响应。
pub fn record_stale_response() {
    metrics()
        .stale_responses_discarded
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录列表中因字段无法识别而跳过的记录。
pub fn record_skipped_record() {
    metrics().records_skipped.fetch_add(1, Ordering::Relaxed);
}

/// 记录请求往返耗时（毫秒）。
pub fn record_request_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .request_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .request_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

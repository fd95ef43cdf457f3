/// Prometheus metrics for tool invocations.
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Global metrics registry instance
pub static METRICS: Lazy<Arc<MetricsCollector>> = Lazy::new(|| Arc::new(MetricsCollector::new()));

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RequestLabels {
    pub tool: String,
    /// "success" or an error category
    pub status: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ToolLabels {
    pub tool: String,
}

pub struct MetricsCollector {
    registry: RwLock<Registry>,
    pub requests_total: Family<RequestLabels, Counter>,
    pub request_duration_seconds: Family<ToolLabels, Histogram>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("hello_mcp");

        let requests_total = Family::<RequestLabels, Counter>::default();
        registry.register(
            "requests",
            "Total number of MCP tool requests",
            requests_total.clone(),
        );

        let request_duration_seconds = Family::<ToolLabels, Histogram>::new_with_constructor(|| {
            // 10us .. ~2.6s; greetings are sub-millisecond
            Histogram::new(exponential_buckets(0.00001, 4.0, 10))
        });
        registry.register(
            "request_duration_seconds",
            "Tool request latency histogram in seconds",
            request_duration_seconds.clone(),
        );

        Self {
            registry: RwLock::new(registry),
            requests_total,
            request_duration_seconds,
        }
    }

    /// Encode metrics in Prometheus text format
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        let registry = self.registry.read();
        if let Err(error) = encode(&mut buffer, &registry) {
            tracing::error!(%error, "failed to encode metrics");
        }
        buffer
    }

    pub fn record_request(&self, tool: &str, status: &str, duration: Duration) {
        self.requests_total
            .get_or_create(&RequestLabels {
                tool: tool.to_string(),
                status: status.to_string(),
            })
            .inc();

        self.request_duration_seconds
            .get_or_create(&ToolLabels {
                tool: tool.to_string(),
            })
            .observe(duration.as_secs_f64());
    }

    pub fn request_count(&self, tool: &str, status: &str) -> u64 {
        self.requests_total
            .get_or_create(&RequestLabels {
                tool: tool.to_string(),
                status: status.to_string(),
            })
            .get()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard that records a request when dropped.
///
/// Records as `"error"` unless [`RequestMetrics::finish`] is called with
/// another status first.
pub struct RequestMetrics {
    tool: &'static str,
    start: Instant,
    status: Option<&'static str>,
}

impl RequestMetrics {
    pub fn new(tool: &'static str) -> Self {
        Self {
            tool,
            start: Instant::now(),
            status: None,
        }
    }

    pub fn finish(mut self, status: &'static str) {
        self.status = Some(status);
    }
}

impl Drop for RequestMetrics {
    fn drop(&mut self) {
        let status = self.status.unwrap_or("error");
        METRICS.record_request(self.tool, status, self.start.elapsed());
    }
}

// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Tracks the code service's externally visible behavior:
// - reverse lookups by outcome, with latency
// - standalone enrollment checks
// - directory backend failures
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the code service
pub struct Metrics {
    registry: Registry,

    // Reverse Lookup Metrics
    pub code_lookups: IntCounterVec,
    pub code_lookup_duration: HistogramVec,

    // Enrollment Check Metrics
    pub enrollment_checks: IntCounterVec,

    // Directory Backend Metrics
    pub directory_errors: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let code_lookups = IntCounterVec::new(
            Opts::new("code_lookups_total", "Reverse code lookups by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(code_lookups.clone()))?;

        let code_lookup_duration = HistogramVec::new(
            HistogramOpts::new("code_lookup_duration_seconds", "Reverse code lookup duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(code_lookup_duration.clone()))?;

        let enrollment_checks = IntCounterVec::new(
            Opts::new("enrollment_checks_total", "Standalone enrollment checks by result"),
            &["result"],
        )?;
        registry.register(Box::new(enrollment_checks.clone()))?;

        let directory_errors = IntCounterVec::new(
            Opts::new("directory_errors_total", "Directory backend failures by operation"),
            &["operation"],
        )?;
        registry.register(Box::new(directory_errors.clone()))?;

        Ok(Self {
            registry,
            code_lookups,
            code_lookup_duration,
            enrollment_checks,
            directory_errors,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a reverse lookup outcome and its latency
    pub fn record_lookup(&self, outcome: &str, duration_secs: f64) {
        self.code_lookups.with_label_values(&[outcome]).inc();
        self.code_lookup_duration
            .with_label_values(&[outcome])
            .observe(duration_secs);
    }

    /// Helper to record a standalone enrollment check
    pub fn record_enrollment_check(&self, enrolled: bool) {
        let result = if enrolled { "enrolled" } else { "not_enrolled" };
        self.enrollment_checks.with_label_values(&[result]).inc();
    }

    /// Helper to record a directory backend failure
    pub fn record_directory_error(&self, operation: &str) {
        self.directory_errors.with_label_values(&[operation]).inc();
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.registry.gather().len() > 0);
    }

    #[test]
    fn test_record_lookup() {
        let metrics = Metrics::new().unwrap();
        metrics.record_lookup("match", 0.02);
        metrics.record_lookup("unknown_code", 0.01);
        metrics.record_lookup("match", 0.03);

        let gathered = metrics.registry.gather();
        let lookups = gathered
            .iter()
            .find(|m| m.name() == "code_lookups_total")
            .unwrap();
        assert_eq!(lookups.metric.len(), 2); // Two different outcome labels
    }

    #[test]
    fn test_record_enrollment_check() {
        let metrics = Metrics::new().unwrap();
        metrics.record_enrollment_check(true);
        metrics.record_enrollment_check(true);

        let gathered = metrics.registry.gather();
        let checks = gathered
            .iter()
            .find(|m| m.name() == "enrollment_checks_total")
            .unwrap();
        assert_eq!(checks.metric[0].counter.value, Some(2.0));
    }

    #[test]
    fn test_record_directory_error() {
        let metrics = Metrics::new().unwrap();
        metrics.record_directory_error("find_enrollment");

        let gathered = metrics.registry.gather();
        let errors = gathered
            .iter()
            .find(|m| m.name() == "directory_errors_total")
            .unwrap();
        assert_eq!(errors.metric[0].counter.value, Some(1.0));
    }
}

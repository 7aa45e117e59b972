use std::sync::Arc;

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, proto::MetricFamily};

use p4tag_core::{MetricsBackend, StepOutcome};

/// Prometheus metrics backend.
///
/// Label values are bounded:
/// - `step`: step names (`"tag"`);
/// - `outcome`: `labeled`, `not_required`, `no_tag_information`, `aborted`;
/// - `error_kind`: [`p4tag_core::LabelError::kind`] values.
#[derive(Clone)]
pub struct PrometheusMetrics {
    outcomes: CounterVec,
    duration: HistogramVec,
    errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Register the metrics in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let outcomes = CounterVec::new(
            Opts::new("label_outcomes_total", "Label step runs by outcome").namespace("p4tag"),
            &["step", "outcome"],
        )?;
        registry.register(Box::new(outcomes.clone()))?;

        let duration = HistogramVec::new(
            HistogramOpts::new("label_duration_seconds", "Label step duration in seconds")
                .namespace("p4tag")
                .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0]),
            &["step"],
        )?;
        registry.register(Box::new(duration.clone()))?;

        let errors = CounterVec::new(
            Opts::new("label_errors_total", "Label step errors by kind").namespace("p4tag"),
            &["step", "error_kind"],
        )?;
        registry.register(Box::new(errors.clone()))?;

        Ok(Self {
            outcomes,
            duration,
            errors,
            registry,
        })
    }

    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_outcome(&self, step: &str, outcome: StepOutcome, duration_ms: u64) {
        self.outcomes
            .with_label_values(&[step, outcome.as_label()])
            .inc();
        self.duration
            .with_label_values(&[step])
            .observe(duration_ms as f64 / 1000.0);
    }

    fn record_error(&self, step: &str, error_kind: &str) {
        self.errors.with_label_values(&[step, error_kind]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    fn encode(families: &[MetricFamily]) -> String {
        use prometheus::{Encoder, TextEncoder};

        let mut buf = Vec::new();
        TextEncoder::new().encode(families, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn outcomes_feed_counter_and_histogram() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_outcome("tag", StepOutcome::Labeled, 120);
        metrics.record_outcome("tag", StepOutcome::Labeled, 80);
        metrics.record_outcome("tag", StepOutcome::NoTagInformation, 3);

        let families = metrics.gather();
        let outcomes = family(&families, "p4tag_label_outcomes_total");
        assert_eq!(outcomes.get_metric().len(), 2);

        let text = encode(&families);
        assert!(
            text.contains(r#"p4tag_label_outcomes_total{outcome="labeled",step="tag"} 2"#),
            "{text}"
        );
        assert!(
            text.contains(r#"p4tag_label_duration_seconds_count{step="tag"} 3"#),
            "{text}"
        );
    }

    #[test]
    fn errors_are_counted_by_kind() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_error("tag", "job_or_build_not_found");
        metrics.record_error("tag", "job_or_build_not_found");
        metrics.record_error("tag", "label_operation");

        let families = metrics.gather();
        assert_eq!(family(&families, "p4tag_label_errors_total").get_metric().len(), 2);
    }

    #[test]
    fn double_registration_fails() {
        let registry = Arc::new(Registry::new());
        assert!(PrometheusMetrics::new_with_registry(registry.clone()).is_ok());
        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }
}

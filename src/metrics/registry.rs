use super::Metric;
use ohno::{app_err, bail};
use std::collections::BTreeMap;

/// Registry mapping metric names to metric implementations.
///
/// Constructed once at startup and passed by reference to whatever needs to
/// look metrics up; there is deliberately no process-wide instance. The
/// registry is never mutated after startup, so a shared `&Registry` is safe to
/// use from concurrent tasks.
///
/// Registering two metrics under the same name is an error rather than a
/// silent overwrite, so a name collision is caught at startup instead of
/// depending on registration order.
#[derive(Debug, Default)]
pub struct Registry {
    metrics: BTreeMap<&'static str, Box<dyn Metric>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric, keyed by its name.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn register(&mut self, metric: Box<dyn Metric>) -> crate::Result<()> {
        let name = metric.name();
        if self.metrics.contains_key(name) {
            bail!("a metric named '{name}' is already registered");
        }

        let _ = self.metrics.insert(name, metric);
        Ok(())
    }

    /// Look up a metric by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no metric is registered under `name`. Unlike a
    /// metric's internal failures, this is a contract error and is surfaced to
    /// the caller rather than defaulted.
    pub fn get(&self, name: &str) -> crate::Result<&dyn Metric> {
        self.metrics
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| app_err!("no metric is registered under the name '{name}'"))
    }

    /// The names of all registered metrics.
    ///
    /// Iteration order is stable but callers must not rely on any particular
    /// ordering.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics.keys().copied()
    }

    /// All registered metrics.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Metric> + '_ {
        self.metrics.values().map(AsRef::as_ref)
    }

    /// Number of registered metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::ResourceBundle;
    use crate::metrics::MetricResult;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedMetric {
        name: &'static str,
        score: f64,
    }

    #[async_trait]
    impl Metric for FixedMetric {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            "returns a fixed score"
        }

        async fn compute(&self, _resource: &ResourceBundle) -> MetricResult {
            MetricResult::new(self.score, "fixed")
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = Registry::new();
        registry.register(Box::new(FixedMetric { name: "fixed", score: 0.5 })).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("fixed").unwrap().name(), "fixed");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = Registry::new();
        registry.register(Box::new(FixedMetric { name: "fixed", score: 0.5 })).unwrap();

        let err = registry.register(Box::new(FixedMetric { name: "fixed", score: 0.9 })).unwrap_err();
        assert!(err.to_string().contains("already registered"));

        // The original registration survives
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_unknown_name_fails() {
        let registry = Registry::new();
        let err = registry.get("missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_enumeration() {
        let mut registry = Registry::new();
        registry.register(Box::new(FixedMetric { name: "b", score: 0.0 })).unwrap();
        registry.register(Box::new(FixedMetric { name: "a", score: 0.0 })).unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a"));
        assert!(names.contains(&"b"));
        assert_eq!(registry.iter().count(), 2);
    }

    #[tokio::test]
    async fn test_registered_metric_is_invocable() {
        let mut registry = Registry::new();
        registry.register(Box::new(FixedMetric { name: "fixed", score: 0.5 })).unwrap();

        let bundle = ResourceBundle::new("org/model", vec![], vec![]).unwrap();
        let result = registry.get("fixed").unwrap().compute(&bundle).await;
        assert_eq!(result.score(), 0.5);
    }
}

use crate::event::{CounterEvent, MetricEvent};
use config::MetricsConfig;

/// Callback invoked for every emitted event
pub type MetricCallback = Box<dyn Fn(&MetricEvent) + Send + Sync>;

/// Collector that tags metric events and fans them out to callbacks
pub struct MetricsCollector {
    namespace: String,
    default_tags: Vec<String>,
    callbacks: std::sync::RwLock<Vec<MetricCallback>>,
}

impl std::fmt::Debug for MetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsCollector")
            .field("namespace", &self.namespace)
            .field("default_tags", &self.default_tags)
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

impl MetricsCollector {
    /// Create a collector tagging every counter with `env:<environment>`
    pub fn new(namespace: impl Into<String>, environment: &str) -> Self {
        Self {
            namespace: namespace.into(),
            default_tags: vec![format!("env:{}", environment)],
            callbacks: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Create a collector for the current `ENV` environment
    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(config.namespace.clone(), &config::environment())
    }

    /// Add event callback
    pub fn add_callback<F>(&self, callback: F)
    where
        F: Fn(&MetricEvent) + Send + Sync + 'static,
    {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.push(Box::new(callback));
        }
    }

    /// Emit event to all subscribers
    pub fn emit(&self, event: MetricEvent) {
        if let Ok(callbacks) = self.callbacks.read() {
            for callback in callbacks.iter() {
                callback(&event);
            }
        }
    }

    /// Clear all callbacks
    pub fn clear_callbacks(&self) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.clear();
        }
    }

    /// Get number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Increment a counter, prefixed with the namespace when one is set
    pub fn increment_counter(&self, name: &str, value: i64, tags: &[String]) {
        let name = if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.namespace, name)
        };

        let mut all_tags = self.default_tags.clone();
        all_tags.extend(tags.iter().cloned());

        tracing::trace!(counter = %name, value, "counter incremented");

        self.emit(MetricEvent::Counter(CounterEvent {
            name,
            value,
            tags: all_tags,
            timestamp: chrono::Utc::now(),
        }));
    }
}

//! Request context
//!
//! Carries the trace id, the metric tags gathered while serving a request and
//! the collector those tags are reported to.

use crate::manager::MetricsCollector;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;
use uuid::Uuid;

const TAG_REASON: &str = "reason";
const TAG_FLOW: &str = "flow";
const DEFAULT_APP_NAME: &str = "daokit.service";

/// Metric tags keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: BTreeMap<String, String>,
}

impl Tags {
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// `key:value` pairs in key order
    pub fn to_vec(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Context {
    trace_id: Uuid,
    app_name: String,
    tags: Tags,
    span: tracing::Span,
    collector: Option<Arc<MetricsCollector>>,
}

impl Context {
    /// Context without a collector; segments are still traced
    pub fn new_background() -> Self {
        let trace_id = Uuid::new_v4();
        Self {
            trace_id,
            app_name: DEFAULT_APP_NAME.to_string(),
            tags: Tags::default(),
            span: tracing::info_span!("request", trace_id = %trace_id),
            collector: None,
        }
    }

    /// Context reporting to `collector` under `<app_name>.stats`
    pub fn with_collector(collector: Arc<MetricsCollector>, app_name: impl Into<String>) -> Self {
        let mut ctx = Self::new_background();
        ctx.app_name = app_name.into();
        ctx.collector = Some(collector);
        ctx
    }

    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn collector(&self) -> Option<&Arc<MetricsCollector>> {
        self.collector.as_ref()
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tags_as_vec(&self) -> Vec<String> {
        self.tags.to_vec()
    }

    /// Add a tag from any displayable value
    pub fn with_tag(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.tags.add(key, value.to_string());
        self
    }

    pub fn set_err_reason(&mut self, reason: &str) -> &mut Self {
        self.tags.add(TAG_REASON, reason);
        self
    }

    /// Report the request outcome as one `<app_name>.stats` increment
    pub fn send(&mut self, flow: &str) {
        self.tags.add(TAG_FLOW, flow);

        if let Some(collector) = &self.collector {
            let metric = format!("{}.stats", self.app_name);
            collector.increment_counter(&metric, 1, &self.tags_as_vec());
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new_background()
    }
}

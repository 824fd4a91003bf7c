//! Timed segments around backend calls
//!
//! A segment wraps one unit of work in a `tracing` span under the request
//! span and reports its duration and outcome to the context's collector.

use crate::context::Context;
use crate::event::{MetricEvent, Platform, SegmentEvent};
use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tracing::Instrument;

/// Labels for one segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub action: String,
    pub resource: String,
    pub platform: Platform,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Database segment for `action` on `resource`
    pub fn store(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::new()
            .with_action(action)
            .with_resource(resource)
            .with_platform(Platform::Database)
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    fn span(&self, ctx: &Context) -> tracing::Span {
        tracing::info_span!(
            parent: ctx.span(),
            "segment",
            action = %self.action,
            resource = %self.resource,
            platform = %self.platform
        )
    }

    fn finish(self, ctx: &Context, started: Instant, error: Option<String>) {
        if let Some(collector) = ctx.collector() {
            collector.emit(MetricEvent::Segment(SegmentEvent {
                trace_id: ctx.trace_id(),
                action: self.action,
                resource: self.resource,
                platform: self.platform,
                elapsed: started.elapsed(),
                error,
                timestamp: chrono::Utc::now(),
            }));
        }
    }
}

/// Run a fallible store call inside a segment
pub async fn start_store_segment<F, T, E>(ctx: &Context, segment: Segment, work: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let span = segment.span(ctx);
    let started = Instant::now();
    let result = work.instrument(span).await;

    let error = result.as_ref().err().map(ToString::to_string);
    if let Some(error) = &error {
        tracing::warn!(
            parent: ctx.span(),
            action = %segment.action,
            resource = %segment.resource,
            error = %error,
            "store segment failed"
        );
    }

    segment.finish(ctx, started, error);
    result
}

/// Run infallible work inside a segment
pub fn start_segment<T>(ctx: &Context, segment: Segment, work: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let output = segment.span(ctx).in_scope(work);
    segment.finish(ctx, started, None);
    output
}

//! Metrics system for data-access instrumentation
//!
//! This crate provides request contexts, timed store segments and counters
//! for operations in the DaoKit ecosystem. Events are delivered to callbacks
//! registered on a [`MetricsCollector`]; spans are emitted through `tracing`.

pub mod context;
pub mod event;
pub mod manager;
pub mod prelude;
pub mod segment;

pub use context::{Context, Tags};
pub use event::{CounterEvent, MetricEvent, Platform, SegmentEvent};
pub use manager::{MetricCallback, MetricsCollector};
pub use segment::{start_segment, start_store_segment, Segment};

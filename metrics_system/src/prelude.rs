//! Convenience re-exports for common metrics-system usage

pub use crate::context::{Context, Tags};
pub use crate::event::{CounterEvent, MetricEvent, Platform, SegmentEvent};
pub use crate::manager::{MetricCallback, MetricsCollector};
pub use crate::segment::{start_segment, start_store_segment, Segment};

// Re-export centralized config
pub use config::MetricsConfig;

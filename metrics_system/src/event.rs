//! Metric event types and definitions
//!
//! This module defines the events that flow from instrumented code to the
//! callbacks registered on a collector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Kind of backend a segment talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Http,
    Cache,
    Database,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Http => "web",
            Platform::Cache => "cache",
            Platform::Database => "db",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished, timed unit of work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentEvent {
    pub trace_id: Uuid,
    pub action: String,
    pub resource: String,
    pub platform: Platform,
    pub elapsed: Duration,
    /// Error text when the wrapped work failed
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl SegmentEvent {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A counter increment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterEvent {
    pub name: String,
    pub value: i64,
    /// `key:value` pairs
    pub tags: Vec<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MetricEvent {
    Segment(SegmentEvent),
    Counter(CounterEvent),
}

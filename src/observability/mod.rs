//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch / inject produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (call counters, latency histograms, install outcomes)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Every dispatched call carries an X-Request-ID that appears in its logs
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;

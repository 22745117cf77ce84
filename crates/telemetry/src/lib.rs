//! Internal telemetry for the trigger simulator.
//!
//! In-process counters and health state only; there is no external metrics
//! backend in simulation mode.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;

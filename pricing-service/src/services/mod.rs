//! Service-level infrastructure for pricing-service.

pub mod metrics;

pub use metrics::{get_metrics, init_metrics};

//! HTTP handlers for pricing-service.

pub mod pricing;
pub mod print;
pub mod reconcile;

//! Pricing service library.
//!
//! Exposes the shared pricing engine over HTTP so live-preview forms,
//! save-time validation, PDF generation, and AI-extraction checks all price
//! documents through one code path.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;

//! Core types and service wiring for the Mcbay waste collection registration.

/// Ordered price catalogs and their validation.
pub mod catalog;
/// The tiered monthly price estimate.
pub mod estimator;
/// Subscription tiers and usage limit enforcement.
pub mod limits;
/// Domain models and identifiers shared by all tenants.
pub mod model;
/// Registry and helpers for plugging tenant catalog sources into the service.
pub mod plugin;
/// Traits describing the catalog source interface.
pub mod ports;
/// The two-step registration flow.
pub mod registration;
/// The service-details selection priced during registration.
pub mod selection;
/// High-level service facade used by clients.
pub mod service;

pub use catalog::*;
pub use estimator::*;
pub use limits::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use registration::*;
pub use selection::*;
pub use service::*;

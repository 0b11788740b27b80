//! Core types and service wiring for the greenslot booking client.

/// Externalized business configuration.
pub mod config;
/// Price estimator and rate table.
pub mod estimate;
/// Domain models shared by the service, providers, and UI.
pub mod model;
/// Traits describing the backend interfaces.
pub mod ports;
/// High-level booking service facade used by clients.
pub mod service;
/// WhatsApp number normalization and deep-link helpers.
pub mod whatsapp;

pub use config::*;
pub use estimate::*;
pub use model::*;
pub use ports::*;
pub use service::*;
pub use whatsapp::*;

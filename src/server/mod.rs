//! Server module for building the HTTP application
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD routes for every resource descriptor
//! - Health routes
//! - The not-found fallback and request tracing

pub mod builder;
pub mod entity_registry;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use host::ServerHost;
pub use router::not_found;

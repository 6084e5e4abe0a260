//! Endpoint lifecycle versioning for HTTP route tables
//!
//! `apiver` lets one handler set evolve across API versions without
//! duplicating server wiring. Handlers declare the version range in which
//! they exist (introduced / deprecated / removed); a startup-time expansion
//! turns the flat route table into a multi-version one, and a pure
//! per-request gate enforces availability.
//!
//! # Features
//!
//! - `major.minor` version values with total, never-failing parsing
//! - Availability side table keyed by handler identity
//! - Pure route expansion: globals verbatim, hidden discovery stubs,
//!   one gated copy per route per target version under `/v{V}`
//! - Tagged gate decisions (allow / warn / redirect / gone / upgrade)
//!   mapped to HTTP at the transport boundary
//! - Schema listing that hides stubs and unavailable copies
//!
//! # Usage
//!
//! ```rust,ignore
//! use apiver::{expand, AvailabilityRegistry, GateRequest, RouteDescriptor};
//! use http::Method;
//!
//! let mut registry = AvailabilityRegistry::new();
//! registry.mark("legacy".into(), "1.0", None, Some("2.0"))?;
//!
//! let routes = vec![
//!     RouteDescriptor::new("/status", vec![Method::GET], "status".into()),
//!     RouteDescriptor::new("/legacy", vec![Method::GET], "legacy".into()),
//! ];
//!
//! let table = expand(&routes, &registry, &["1.0", "2.0"]);
//! for route in table.routes() {
//!     // mount route.descriptor on the host router; before the handler
//!     // runs, call route.gate.evaluate(&GateRequest::new(path))
//! }
//! ```

mod availability;
mod gate;
mod route;
mod schema;
mod transform;
mod version;

pub use availability::{Availability, AvailabilityError, AvailabilityRegistry};
pub use gate::{GateBinding, GateDecision, GateRequest, DEPRECATION_WARNING};
pub use route::{HandlerId, RouteDescriptor};
pub use schema::{SchemaDocument, SchemaEntry, SchemaInfo};
pub use transform::{expand, ExpandedRoute, RouteKind, VersionedTable};
pub use version::{ApiVersion, VersionParseError};

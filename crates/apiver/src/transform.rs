//! Route-table expansion
//!
//! Turns a flat route table plus per-handler availability metadata into a
//! multi-version table: global routes pass through verbatim, every versioned
//! route gains a hidden discovery stub at its original path, and each target
//! version mounts one gated copy of every versioned route under `/v{V}`.
//!
//! The expansion runs once at startup, is deterministic, and never touches
//! the input table — callers swap the host router's active table themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver::{expand, AvailabilityRegistry, RouteDescriptor};
//!
//! let mut registry = AvailabilityRegistry::new();
//! registry.mark("legacy".into(), "1.0", None, Some("2.0"))?;
//!
//! let table = expand(&routes, &registry, &["1.0", "2.0"]);
//! for route in table.routes() {
//!     host_router.mount(&route.descriptor, route.gate.clone());
//! }
//! ```

use crate::availability::{Availability, AvailabilityRegistry};
use crate::gate::GateBinding;
use crate::route::RouteDescriptor;
use crate::version::ApiVersion;

/// What role an expanded route plays in the output table
#[derive(Debug, Clone, PartialEq)]
pub enum RouteKind {
    /// Unversioned route, emitted verbatim and never gated
    Global,
    /// Hidden unversioned copy whose only job is answering unversioned
    /// requests with a redirect
    DiscoveryStub,
    /// Gated copy mounted under one version prefix
    VersionCopy {
        /// The group's target version
        version: ApiVersion,
    },
}

/// One route in the expanded table, ready to mount on the host router
#[derive(Debug, Clone)]
pub struct ExpandedRoute {
    /// Descriptor with path, visibility, tags and deprecation rewritten
    pub descriptor: RouteDescriptor,
    /// Role of this route in the table
    pub kind: RouteKind,
    /// Gate inputs the host invokes before the handler
    pub gate: GateBinding,
}

/// Expanded multi-version route table
///
/// Order is fixed and reproducible: globals first, then discovery stubs,
/// then version groups in caller-supplied order with routes in original
/// registration order inside each group.
#[derive(Debug, Clone, Default)]
pub struct VersionedTable {
    routes: Vec<ExpandedRoute>,
}

impl VersionedTable {
    /// All routes, in mount order
    pub fn routes(&self) -> &[ExpandedRoute] {
        &self.routes
    }

    /// Number of routes in the table
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Global routes, verbatim from the input table
    pub fn global_routes(&self) -> impl Iterator<Item = &ExpandedRoute> {
        self.routes
            .iter()
            .filter(|r| r.kind == RouteKind::Global)
    }

    /// Hidden discovery stubs
    pub fn discovery_stubs(&self) -> impl Iterator<Item = &ExpandedRoute> {
        self.routes
            .iter()
            .filter(|r| r.kind == RouteKind::DiscoveryStub)
    }

    /// Per-version route copies
    pub fn version_copies(&self) -> impl Iterator<Item = &ExpandedRoute> {
        self.routes
            .iter()
            .filter(|r| matches!(r.kind, RouteKind::VersionCopy { .. }))
    }

    /// Routes that appear in generated documentation
    pub fn schema_visible(&self) -> impl Iterator<Item = &ExpandedRoute> {
        self.routes
            .iter()
            .filter(|r| r.descriptor.include_in_schema)
    }
}

impl<'a> IntoIterator for &'a VersionedTable {
    type Item = &'a ExpandedRoute;
    type IntoIter = std::slice::Iter<'a, ExpandedRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Expand a flat route table against an ordered list of target versions
///
/// Routes whose handler has no registry entry are global and pass through
/// unchanged. Versioned routes are registered in every target version even
/// when unavailable there, so requests reach the gate and receive a
/// structured 410/426 instead of a generic 404.
pub fn expand<S: AsRef<str>>(
    routes: &[RouteDescriptor],
    registry: &AvailabilityRegistry,
    versions: &[S],
) -> VersionedTable {
    let mut out = Vec::new();
    let mut versioned: Vec<(&RouteDescriptor, Availability)> = Vec::new();

    for route in routes {
        match registry.resolve(&route.handler) {
            None => out.push(ExpandedRoute {
                descriptor: route.clone(),
                kind: RouteKind::Global,
                gate: GateBinding::global(),
            }),
            Some(availability) => versioned.push((route, availability)),
        }
    }
    let global_count = out.len();

    for (route, availability) in &versioned {
        let mut descriptor = (*route).clone();
        descriptor.include_in_schema = false;
        out.push(ExpandedRoute {
            descriptor,
            kind: RouteKind::DiscoveryStub,
            gate: GateBinding::new(availability.clone(), ApiVersion::unspecified()),
        });
    }

    for version in versions {
        let version = version.as_ref();
        let target = ApiVersion::parse(Some(version));
        let mut visible = 0usize;

        for (route, availability) in &versioned {
            let is_available = availability.is_available_in(&target);
            let is_deprecated = availability.is_deprecated_in(&target);

            let mut descriptor = (*route).clone();
            descriptor.path = format!("/v{}{}", version, route.path);
            descriptor.include_in_schema = route.include_in_schema && is_available;
            descriptor.deprecated = route.deprecated || is_deprecated;
            descriptor.tags.push(format!("v{}", version));

            if descriptor.include_in_schema {
                visible += 1;
            }

            out.push(ExpandedRoute {
                descriptor,
                kind: RouteKind::VersionCopy {
                    version: target.clone(),
                },
                gate: GateBinding::new(availability.clone(), target.clone()),
            });
        }

        tracing::debug!(
            version = %target,
            routes = versioned.len(),
            visible,
            "mounted version group"
        );
    }

    tracing::info!(
        total = out.len(),
        globals = global_count,
        stubs = versioned.len(),
        versions = versions.len(),
        "expanded route table"
    );

    VersionedTable { routes: out }
}

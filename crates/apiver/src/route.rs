//! Route descriptors and handler identity
//!
//! [`RouteDescriptor`] is the host-framework-facing record for a single
//! endpoint. The expansion step only interprets path, methods, handler,
//! schema visibility, tags and the deprecation flag; everything else rides
//! along untouched in the display fields and the `extensions` bag.

use http::Method;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Opaque, cheaply cloneable identity of a handler
///
/// Availability metadata is keyed by this token instead of being attached to
/// the handler object itself, so handlers stay plain functions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(Arc<str>);

impl HandlerId {
    /// Create a handler identity from a stable name
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into().into_boxed_str()))
    }

    /// The handler's name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Description of one endpoint as understood by the host framework
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    /// Path pattern (e.g. `/users/{id}`)
    pub path: String,
    /// HTTP methods served at this path
    pub methods: Vec<Method>,
    /// Handler identity, used to look up availability metadata
    pub handler: HandlerId,
    /// Whether the route appears in generated documentation
    pub include_in_schema: bool,
    /// Whether the route is flagged deprecated in documentation
    pub deprecated: bool,
    /// Documentation tags, in registration order
    pub tags: Vec<String>,
    /// Route name
    pub name: Option<String>,
    /// Short documentation summary
    pub summary: Option<String>,
    /// Longer documentation text
    pub description: Option<String>,
    /// Stable operation identifier for generated clients
    pub operation_id: Option<String>,
    /// Host-framework fields this crate never interprets, copied verbatim
    pub extensions: Map<String, Value>,
}

impl RouteDescriptor {
    /// Create a descriptor with default display metadata
    pub fn new(path: impl Into<String>, methods: Vec<Method>, handler: HandlerId) -> Self {
        Self {
            path: path.into(),
            methods,
            handler,
            include_in_schema: true,
            deprecated: false,
            tags: Vec::new(),
            name: None,
            summary: None,
            description: None,
            operation_id: None,
            extensions: Map::new(),
        }
    }

    /// Add a documentation tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the route name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the documentation summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Hide the route from generated documentation
    pub fn hidden(mut self) -> Self {
        self.include_in_schema = false;
        self
    }

    /// Flag the route deprecated in documentation
    pub fn deprecate(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Attach an uninterpreted host-framework field
    pub fn extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}

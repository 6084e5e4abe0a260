//! Endpoint availability metadata
//!
//! A handler is either *global* (no lifecycle declared, available in every
//! version) or *versioned* (introduced at some version, optionally
//! deprecated and removed later). Raw version strings are recorded in an
//! [`AvailabilityRegistry`] at registration time and parsed lazily when the
//! route table is expanded, so decoration order and parsing stay decoupled.

use crate::route::HandlerId;
use crate::version::ApiVersion;
use std::collections::HashMap;

/// Lifecycle metadata for one handler, resolved from raw strings
#[derive(Debug, Clone)]
pub struct Availability {
    /// Version the endpoint first appears in
    pub introduced: ApiVersion,
    /// Version from which the endpoint is flagged deprecated
    pub deprecated: ApiVersion,
    /// Version from which the endpoint is gone
    pub removed: ApiVersion,
}

impl Availability {
    /// Metadata for a global handler (no lifecycle at all)
    pub fn global() -> Self {
        Self {
            introduced: ApiVersion::unspecified(),
            deprecated: ApiVersion::unspecified(),
            removed: ApiVersion::unspecified(),
        }
    }

    /// Resolve from raw strings as written at registration time
    pub fn from_raw(introduced: &str, deprecated: Option<&str>, removed: Option<&str>) -> Self {
        Self {
            introduced: ApiVersion::parse(Some(introduced)),
            deprecated: ApiVersion::parse(deprecated),
            removed: ApiVersion::parse(removed),
        }
    }

    /// Whether the handler has no lifecycle (available everywhere, ungated)
    pub fn is_global(&self) -> bool {
        !self.introduced.is_specified()
    }

    /// Whether the endpoint is removed as of `version`
    pub fn is_removed_in(&self, version: &ApiVersion) -> bool {
        self.removed.is_specified() && *version >= self.removed
    }

    /// Whether the endpoint is deprecated as of `version`
    pub fn is_deprecated_in(&self, version: &ApiVersion) -> bool {
        self.deprecated.is_specified() && *version >= self.deprecated
    }

    /// Whether the endpoint exists at all as of `version`
    pub fn is_available_in(&self, version: &ApiVersion) -> bool {
        if self.is_global() {
            return true;
        }
        if *version < self.introduced {
            return false;
        }
        !self.is_removed_in(version)
    }
}

/// Error raised when a declared lifecycle is internally contradictory
///
/// Only well-formed version strings are range-checked; malformed strings
/// fall under the `0.0` degradation policy and carry no checkable intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    /// `deprecated` precedes `introduced`
    #[error("handler `{handler}`: deprecated at {deprecated} before introduced at {introduced}")]
    DeprecatedBeforeIntroduced {
        handler: String,
        introduced: String,
        deprecated: String,
    },
    /// `removed` precedes `introduced`
    #[error("handler `{handler}`: removed at {removed} before introduced at {introduced}")]
    RemovedBeforeIntroduced {
        handler: String,
        introduced: String,
        removed: String,
    },
    /// `removed` precedes `deprecated`
    #[error("handler `{handler}`: removed at {removed} before deprecated at {deprecated}")]
    RemovedBeforeDeprecated {
        handler: String,
        deprecated: String,
        removed: String,
    },
}

/// Raw lifecycle strings as recorded at registration time
#[derive(Debug, Clone)]
struct RawAvailability {
    introduced: String,
    deprecated: Option<String>,
    removed: Option<String>,
}

/// Side table mapping handler identity to lifecycle metadata
///
/// Handlers absent from the registry are global. Parsing into
/// [`ApiVersion`] happens in [`AvailabilityRegistry::resolve`], at
/// route-table-build time.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityRegistry {
    entries: HashMap<HandlerId, RawAvailability>,
}

impl AvailabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a handler's lifecycle
    ///
    /// Rejects lifecycles whose well-formed stages are out of order
    /// (`introduced <= deprecated <= removed` must hold among the stages
    /// that parse cleanly).
    pub fn mark(
        &mut self,
        handler: HandlerId,
        introduced: impl Into<String>,
        deprecated: Option<&str>,
        removed: Option<&str>,
    ) -> Result<(), AvailabilityError> {
        let introduced = introduced.into();

        let intro = introduced.parse::<ApiVersion>().ok();
        let depr = deprecated.and_then(|s| s.parse::<ApiVersion>().ok());
        let rem = removed.and_then(|s| s.parse::<ApiVersion>().ok());

        if let (Some(intro), Some(depr)) = (&intro, &depr) {
            if intro > depr {
                return Err(AvailabilityError::DeprecatedBeforeIntroduced {
                    handler: handler.name().to_string(),
                    introduced,
                    deprecated: depr.to_string(),
                });
            }
        }
        if let (Some(intro), Some(rem)) = (&intro, &rem) {
            if intro > rem {
                return Err(AvailabilityError::RemovedBeforeIntroduced {
                    handler: handler.name().to_string(),
                    introduced,
                    removed: rem.to_string(),
                });
            }
        }
        if let (Some(depr), Some(rem)) = (&depr, &rem) {
            if depr > rem {
                return Err(AvailabilityError::RemovedBeforeDeprecated {
                    handler: handler.name().to_string(),
                    deprecated: depr.to_string(),
                    removed: rem.to_string(),
                });
            }
        }

        self.entries.insert(
            handler,
            RawAvailability {
                introduced,
                deprecated: deprecated.map(str::to_string),
                removed: removed.map(str::to_string),
            },
        );
        Ok(())
    }

    /// Whether the handler has lifecycle metadata
    pub fn is_versioned(&self, handler: &HandlerId) -> bool {
        self.entries.contains_key(handler)
    }

    /// Parse the handler's lifecycle, if any
    pub fn resolve(&self, handler: &HandlerId) -> Option<Availability> {
        self.entries.get(handler).map(|raw| {
            Availability::from_raw(
                &raw.introduced,
                raw.deprecated.as_deref(),
                raw.removed.as_deref(),
            )
        })
    }

    /// Number of versioned handlers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handler carries lifecycle metadata
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Per-request version gate
//!
//! The gate runs once per request, before the handler, and is purely
//! computational: it reads the route's availability metadata and the
//! request's effective version, and returns a [`GateDecision`] value. No
//! exception-style control flow; the transport adapter maps each outcome to
//! status codes and headers at the boundary.

use crate::availability::Availability;
use crate::version::ApiVersion;
use bytes::Bytes;
use http::{header, HeaderName, HeaderValue, Response, StatusCode};
use http_body_util::Full;

/// Fixed warning message emitted for deprecated endpoints
pub const DEPRECATION_WARNING: &str = "Deprecated API";

/// Gate inputs bound to one expanded route at transform time
///
/// `pinned` is the version group's requested version, fixed when the route
/// copy was registered; discovery stubs carry the unspecified sentinel. The
/// per-request header value, when present, takes precedence — both are
/// request-scoped inputs, never process-wide state.
#[derive(Debug, Clone)]
pub struct GateBinding {
    availability: Availability,
    pinned: ApiVersion,
}

impl GateBinding {
    /// Binding for a global route; the gate always allows
    pub fn global() -> Self {
        Self {
            availability: Availability::global(),
            pinned: ApiVersion::unspecified(),
        }
    }

    /// Binding for a versioned route copy or discovery stub
    pub fn new(availability: Availability, pinned: ApiVersion) -> Self {
        Self {
            availability,
            pinned,
        }
    }

    /// The route's availability metadata
    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// The version pinned by the route's group, sentinel for stubs
    pub fn pinned_version(&self) -> &ApiVersion {
        &self.pinned
    }

    /// Decide whether the request may proceed
    pub fn evaluate(&self, request: &GateRequest<'_>) -> GateDecision {
        if self.availability.is_global() {
            return GateDecision::Allow;
        }

        let requested = match request.header_version {
            Some(value) => ApiVersion::parse(Some(value)),
            None => self.pinned.clone(),
        };

        if !requested.is_specified() {
            let mut location = format!(
                "/v{}{}",
                self.availability.introduced, request.path
            );
            if let Some(query) = request.query {
                if !query.is_empty() {
                    location.push('?');
                    location.push_str(query);
                }
            }
            return GateDecision::Redirect { location };
        }

        if self.availability.is_removed_in(&requested) {
            return GateDecision::Gone;
        }

        if !self.availability.is_available_in(&requested) {
            return GateDecision::UpgradeRequired {
                introduced: self.availability.introduced.clone(),
            };
        }

        if self.availability.is_deprecated_in(&requested) {
            return GateDecision::AllowWithWarning {
                warning: DEPRECATION_WARNING,
            };
        }

        GateDecision::Allow
    }
}

/// Request-scoped inputs to the gate
#[derive(Debug, Clone, Copy)]
pub struct GateRequest<'a> {
    /// Path as resolved by the host router, without the version prefix
    pub path: &'a str,
    /// Raw query string, preserved on redirect
    pub query: Option<&'a str>,
    /// Version carried by the request itself (e.g. an `X-API-Version`
    /// header read upstream), overriding the group's pinned version
    pub header_version: Option<&'a str>,
}

impl<'a> GateRequest<'a> {
    /// A request with no query string and no version header
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            query: None,
            header_version: None,
        }
    }

    /// Attach the raw query string
    pub fn with_query(mut self, query: &'a str) -> Self {
        self.query = Some(query);
        self
    }

    /// Attach a request-supplied version value
    pub fn with_header_version(mut self, version: &'a str) -> Self {
        self.header_version = Some(version);
        self
    }
}

/// Outcome of gating one request
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Proceed to the handler
    Allow,
    /// Proceed, appending a deprecation warning header to the response
    AllowWithWarning {
        /// Value for the `Warning` response header
        warning: &'static str,
    },
    /// Unversioned request for a versioned route; send the client to the
    /// introduced version's path
    Redirect {
        /// Value for the `Location` response header
        location: String,
    },
    /// The endpoint is removed as of the requested version
    Gone,
    /// The endpoint does not exist yet at the requested version
    UpgradeRequired {
        /// Advisory version for the `Upgrade` response header
        introduced: ApiVersion,
    },
}

impl GateDecision {
    /// Whether the handler should run
    pub fn is_allowed(&self) -> bool {
        matches!(
            self,
            GateDecision::Allow | GateDecision::AllowWithWarning { .. }
        )
    }

    /// Header to append to the handler's response, if any
    pub fn warning_header(&self) -> Option<(HeaderName, HeaderValue)> {
        match self {
            GateDecision::AllowWithWarning { warning } => Some((
                HeaderName::from_static("warning"),
                HeaderValue::from_static(warning),
            )),
            _ => None,
        }
    }

    /// Render a denying decision as a ready HTTP response
    ///
    /// Allowing decisions return `None`; the host runs the handler and, for
    /// [`GateDecision::AllowWithWarning`], appends [`Self::warning_header`].
    pub fn into_response(self) -> Option<Response<Full<Bytes>>> {
        match self {
            GateDecision::Allow | GateDecision::AllowWithWarning { .. } => None,
            GateDecision::Redirect { location } => Some(
                Response::builder()
                    .status(StatusCode::TEMPORARY_REDIRECT)
                    .header(header::LOCATION, location)
                    .body(Full::new(Bytes::from("Temporary Redirect")))
                    .unwrap(),
            ),
            GateDecision::Gone => Some(
                Response::builder()
                    .status(StatusCode::GONE)
                    .body(Full::new(Bytes::from("Gone")))
                    .unwrap(),
            ),
            GateDecision::UpgradeRequired { introduced } => Some(
                Response::builder()
                    .status(StatusCode::UPGRADE_REQUIRED)
                    .header(header::UPGRADE, introduced.to_string())
                    .body(Full::new(Bytes::from("Upgrade Required")))
                    .unwrap(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned(introduced: &str, deprecated: Option<&str>, removed: Option<&str>) -> Availability {
        Availability::from_raw(introduced, deprecated, removed)
    }

    fn pinned(availability: Availability, version: &str) -> GateBinding {
        GateBinding::new(availability, ApiVersion::parse(Some(version)))
    }

    #[test]
    fn test_global_always_allows() {
        let gate = GateBinding::global();
        assert_eq!(
            gate.evaluate(&GateRequest::new("/status")),
            GateDecision::Allow
        );
        assert_eq!(
            gate.evaluate(&GateRequest::new("/status").with_header_version("9.9")),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_unversioned_request_redirects() {
        let gate = GateBinding::new(
            versioned("1.0", None, None),
            ApiVersion::unspecified(),
        );
        let decision = gate.evaluate(&GateRequest::new("/users"));
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/v1.0/users".to_string()
            }
        );
    }

    #[test]
    fn test_redirect_preserves_query() {
        let gate = GateBinding::new(
            versioned("1.0", None, None),
            ApiVersion::unspecified(),
        );
        let decision = gate.evaluate(&GateRequest::new("/users").with_query("page=2&limit=10"));
        assert_eq!(
            decision,
            GateDecision::Redirect {
                location: "/v1.0/users?page=2&limit=10".to_string()
            }
        );
    }

    #[test]
    fn test_removed_is_gone() {
        let gate = pinned(versioned("1.0", None, Some("2.0")), "2.0");
        assert_eq!(gate.evaluate(&GateRequest::new("/legacy")), GateDecision::Gone);
    }

    #[test]
    fn test_before_introduction_requires_upgrade() {
        let gate = pinned(versioned("2.0", None, None), "1.0");
        assert_eq!(
            gate.evaluate(&GateRequest::new("/new")),
            GateDecision::UpgradeRequired {
                introduced: ApiVersion::parse(Some("2.0"))
            }
        );
    }

    #[test]
    fn test_deprecated_allows_with_warning() {
        let gate = pinned(versioned("1.0", Some("1.5"), None), "1.5");
        assert_eq!(
            gate.evaluate(&GateRequest::new("/old")),
            GateDecision::AllowWithWarning {
                warning: DEPRECATION_WARNING
            }
        );
    }

    #[test]
    fn test_in_window_allows() {
        let gate = pinned(versioned("1.0", Some("1.5"), Some("2.0")), "1.2");
        assert_eq!(gate.evaluate(&GateRequest::new("/ok")), GateDecision::Allow);
    }

    #[test]
    fn test_header_overrides_pinned_version() {
        // Stub binding (no pinned version) gated like a version copy when
        // the request itself names a version
        let gate = GateBinding::new(versioned("2.0", None, None), ApiVersion::unspecified());
        let decision = gate.evaluate(&GateRequest::new("/new").with_header_version("1.0"));
        assert_eq!(
            decision,
            GateDecision::UpgradeRequired {
                introduced: ApiVersion::parse(Some("2.0"))
            }
        );
    }

    #[test]
    fn test_redirect_response_shape() {
        let response = GateDecision::Redirect {
            location: "/v1.0/users".into(),
        }
        .into_response()
        .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/v1.0/users");
    }

    #[test]
    fn test_upgrade_response_shape() {
        let response = GateDecision::UpgradeRequired {
            introduced: ApiVersion::parse(Some("2.0")),
        }
        .into_response()
        .unwrap();
        assert_eq!(response.status(), StatusCode::UPGRADE_REQUIRED);
        assert_eq!(response.headers()[header::UPGRADE], "2.0");
    }

    #[test]
    fn test_allow_has_no_response() {
        assert!(GateDecision::Allow.into_response().is_none());
        let warn = GateDecision::AllowWithWarning {
            warning: DEPRECATION_WARNING,
        };
        let (name, value) = warn.warning_header().unwrap();
        assert_eq!(name.as_str(), "warning");
        assert_eq!(value.to_str().unwrap(), "Deprecated API");
        assert!(warn.into_response().is_none());
    }
}

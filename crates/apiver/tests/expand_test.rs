//! End-to-end expansion and gating across a realistic route table

use apiver::{
    expand, AvailabilityRegistry, GateDecision, GateRequest, RouteDescriptor, RouteKind,
    SchemaDocument,
};
use http::Method;

/// One global route plus two versioned routes with overlapping lifecycles,
/// mirroring a table that evolved across two releases.
fn build() -> (Vec<RouteDescriptor>, AvailabilityRegistry) {
    let routes = vec![
        RouteDescriptor::new("/health", vec![Method::GET], "health".into()),
        RouteDescriptor::new("/legacy", vec![Method::GET], "legacy".into()),
        RouteDescriptor::new("/new", vec![Method::GET], "new_feature".into()),
    ];

    let mut registry = AvailabilityRegistry::new();
    registry
        .mark("legacy".into(), "1.0", None, Some("2.0"))
        .unwrap();
    registry
        .mark("new_feature".into(), "2.0", None, None)
        .unwrap();

    (routes, registry)
}

#[test]
fn expansion_produces_seven_routes() {
    let (routes, registry) = build();
    let table = expand(&routes, &registry, &["1.0", "2.0"]);

    // 1 global + 2 stubs + 2 versioned routes x 2 versions
    assert_eq!(table.len(), 7);
    assert_eq!(table.global_routes().count(), 1);
    assert_eq!(table.discovery_stubs().count(), 2);
    assert_eq!(table.version_copies().count(), 4);
}

#[test]
fn documentation_exposes_three_of_four_copies() {
    let (routes, registry) = build();
    let table = expand(&routes, &registry, &["1.0", "2.0"]);

    let visible_copies = table
        .version_copies()
        .filter(|r| r.descriptor.include_in_schema)
        .count();
    assert_eq!(visible_copies, 3);

    let doc = SchemaDocument::from_table(&table, "Demo API", "2.0");
    assert!(doc.contains_path("/health"));
    assert!(doc.contains_path("/v1.0/legacy"));
    assert!(doc.contains_path("/v1.0/new"));
    assert!(doc.contains_path("/v2.0/new"));
    assert!(!doc.contains_path("/v2.0/legacy"));
    assert!(!doc.contains_path("/legacy"));
    assert!(!doc.contains_path("/new"));
    assert_eq!(doc.path_count(), 4);
}

#[test]
fn gate_outcomes_per_version() {
    let (routes, registry) = build();
    let table = expand(&routes, &registry, &["1.0", "2.0"]);

    let find = |path: &str| {
        table
            .routes()
            .iter()
            .find(|r| r.descriptor.path == path)
            .unwrap()
    };

    // Legacy exists at 1.0, gone at 2.0
    assert_eq!(
        find("/v1.0/legacy").gate.evaluate(&GateRequest::new("/legacy")),
        GateDecision::Allow
    );
    assert_eq!(
        find("/v2.0/legacy").gate.evaluate(&GateRequest::new("/legacy")),
        GateDecision::Gone
    );

    // New feature requires an upgrade below 2.0
    match find("/v1.0/new").gate.evaluate(&GateRequest::new("/new")) {
        GateDecision::UpgradeRequired { introduced } => {
            assert_eq!(introduced.to_string(), "2.0");
        }
        other => panic!("expected UpgradeRequired, got {:?}", other),
    }
    assert_eq!(
        find("/v2.0/new").gate.evaluate(&GateRequest::new("/new")),
        GateDecision::Allow
    );
}

#[test]
fn discovery_stub_redirects_with_query() {
    let (routes, registry) = build();
    let table = expand(&routes, &registry, &["1.0", "2.0"]);

    let stub = table
        .discovery_stubs()
        .find(|r| r.descriptor.path == "/legacy")
        .unwrap();
    let decision = stub
        .gate
        .evaluate(&GateRequest::new("/legacy").with_query("page=2"));
    assert_eq!(
        decision,
        GateDecision::Redirect {
            location: "/v1.0/legacy?page=2".to_string()
        }
    );

    // The stub redirects toward the introduced version, not the newest one
    let new_stub = table
        .discovery_stubs()
        .find(|r| r.descriptor.path == "/new")
        .unwrap();
    assert_eq!(
        new_stub.gate.evaluate(&GateRequest::new("/new")),
        GateDecision::Redirect {
            location: "/v2.0/new".to_string()
        }
    );
}

#[test]
fn global_route_ignores_versions() {
    let (routes, registry) = build();
    let table = expand(&routes, &registry, &["1.0", "2.0"]);

    let health = table.global_routes().next().unwrap();
    assert_eq!(health.kind, RouteKind::Global);
    assert_eq!(
        health.gate.evaluate(&GateRequest::new("/health")),
        GateDecision::Allow
    );
    assert_eq!(
        health
            .gate
            .evaluate(&GateRequest::new("/health").with_header_version("0.1")),
        GateDecision::Allow
    );
}

#[test]
fn deprecated_route_allows_with_warning() {
    let routes = vec![RouteDescriptor::new(
        "/old",
        vec![Method::GET],
        "old".into(),
    )];
    let mut registry = AvailabilityRegistry::new();
    registry
        .mark("old".into(), "1.0", Some("1.5"), None)
        .unwrap();

    let table = expand(&routes, &registry, &["1.5"]);
    let copy = table.version_copies().next().unwrap();

    let decision = copy.gate.evaluate(&GateRequest::new("/old"));
    assert!(decision.is_allowed());
    let (name, value) = decision.warning_header().unwrap();
    assert_eq!(name.as_str(), "warning");
    assert_eq!(value.to_str().unwrap(), "Deprecated API");

    // The copy itself is flagged deprecated for documentation
    assert!(copy.descriptor.deprecated);
}

// Integration tests for silcrow-router

use pretty_assertions::assert_eq;
use rstest::rstest;
use silcrow_router::path::split_path;
use silcrow_router::{
    generate, match_pattern, patterns_overlap, DiagnosticKind, Pattern, RouteDeclaration,
    RouteError, RouteManifest, RouteTable, RouterConfig, Severity, SharedRouteTable,
};
use std::collections::HashMap;

fn pattern(source: &str) -> Pattern {
    Pattern::parse(source).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_empty_pattern_matches_only_root() {
    let root = Pattern::root();
    assert!(match_pattern(&root, &[] as &[&str]).is_some());
    assert!(match_pattern(&root, &["a"]).is_none());
}

#[rstest]
#[case(&["x"], &[])]
#[case(&["x", "a"], &["a"])]
#[case(&["x", "a", "b", "c"], &["a", "b", "c"])]
fn test_catch_all_matches_any_trailing_pieces(#[case] pieces: &[&str], #[case] rest: &[&str]) {
    let m = match_pattern(&pattern("x/[...rest]"), pieces).unwrap();
    assert_eq!(m.catch_all["rest"], rest);
}

#[test]
fn test_leading_optional_matching() {
    let p = pattern("[[lang]]/about");

    let m = match_pattern(&p, &["about"]).unwrap();
    assert_eq!(m.params.get("lang"), None);

    let m = match_pattern(&p, &["en", "about"]).unwrap();
    assert_eq!(m.params.get("lang").map(String::as_str), Some("en"));

    assert!(match_pattern(&p, &["en", "fr", "about"]).is_none());
}

#[test]
fn test_table_prefers_static_routes() {
    let table = RouteTable::build(vec![
        RouteDeclaration::parse("blog/[slug]", "post"),
        RouteDeclaration::parse("blog/new", "editor"),
        RouteDeclaration::parse("[...all]", "fallback"),
    ])
    .unwrap();

    assert_eq!(*table.match_path("/blog/new").unwrap().handler(), "editor");
    assert_eq!(*table.match_path("/blog/hello").unwrap().handler(), "post");
    assert_eq!(*table.match_path("/anything/else").unwrap().handler(), "fallback");
    assert_eq!(*table.match_path("/").unwrap().handler(), "fallback");
}

#[test]
fn test_base_path_applies_to_matching_and_generation() {
    let config = RouterConfig::default().with_base_path("/app/");
    let table = RouteTable::build_with_config(
        vec![
            RouteDeclaration::parse("", "home"),
            RouteDeclaration::parse("users/[id]", "user"),
        ],
        &config,
    )
    .unwrap();

    assert_eq!(table.base_path(), "/app");
    assert_eq!(*table.match_path("/app").unwrap().handler(), "home");
    assert_eq!(*table.match_path("/app/").unwrap().handler(), "home");
    assert_eq!(table.match_path("/app/users/9").unwrap().param("id"), Some("9"));

    assert_eq!(table.url_for("/users/:id", &[("id", "9")]).unwrap(), "/app/users/9");
    assert_eq!(table.url_for("/", &[("id", "9")]).unwrap(), "/app");
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generate_missing_param_degrades_to_root() {
    let params: HashMap<String, String> = HashMap::new();
    assert_eq!(generate(&pattern("users/[id]"), &params), "/");
}

#[rstest]
#[case("users/[id]", &[("id", "42")])]
#[case("users/[id]/[[tab]]", &[("id", "a b"), ("tab", "posts")])]
#[case("[[lang]]/docs/[...rest]", &[("lang", "en"), ("rest", "guide/intro")])]
#[case("docs/[...rest]", &[("rest", "caf\u{e9}/x%y")])]
#[case("about", &[])]
fn test_generate_then_match_round_trip(#[case] source: &str, #[case] params: &[(&str, &str)]) {
    let p = pattern(source);
    let table = RouteTable::build(vec![RouteDeclaration::parse(source, ())]).unwrap();

    let path = generate(&p, params);
    let m = table.match_path(&path).unwrap();

    let mut expected: HashMap<String, String> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    expected.retain(|_, v| !v.is_empty());
    assert_eq!(m.generation_params(), expected);
    assert_eq!(table.url_for(m.id(), &m.generation_params()).unwrap(), path);
}

// ============================================================================
// Table construction
// ============================================================================

#[test]
fn test_duplicate_route_id_names_both_sources() {
    let err = RouteTable::build(vec![
        RouteDeclaration::from_file_path("routes/users/[id].purs", "routes", ()),
        RouteDeclaration::from_file_path("routes/users/[id]/index.purs", "routes", ()),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        RouteError::DuplicateRouteId {
            id: "/users/:id".to_string(),
            first: "routes/users/[id].purs".to_string(),
            second: "routes/users/[id]/index.purs".to_string(),
        }
    );
    assert_eq!(err.to_diagnostic().severity, Severity::Fatal);
}

#[test]
fn test_percent_escaped_literal_rejected() {
    // A literal is emitted verbatim but compared against decoded pieces
    let err = RouteTable::build(vec![RouteDeclaration::parse("a%20b/[id]", ())]).unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::InvalidSegmentSyntax);
}

#[test]
fn test_catch_all_not_final_aborts_build() {
    let err = RouteTable::build(vec![RouteDeclaration::parse("docs/[...rest]/edit", ())])
        .unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::CatchAllNotFinal);
}

#[test]
fn test_listing_order_is_independent_of_registration() {
    let forward = RouteTable::build(vec![
        RouteDeclaration::parse("b", ()),
        RouteDeclaration::parse("a/[id]", ()),
    ])
    .unwrap();
    let backward = RouteTable::build(vec![
        RouteDeclaration::parse("a/[id]", ()),
        RouteDeclaration::parse("b", ()),
    ])
    .unwrap();

    let ids = |t: &RouteTable<()>| t.entries().iter().map(|e| e.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&forward), ids(&backward));
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_equivalent_shapes_flagged() {
    init_tracing();
    let table = RouteTable::build(vec![
        RouteDeclaration::from_file_path("routes/users/[id].purs", "routes", ()),
        RouteDeclaration::from_file_path("routes/users/[userId].purs", "routes", ()),
    ])
    .unwrap();

    let diagnostics = table.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::EquivalentShapeConflict);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        diagnostics[0].sources,
        vec!["routes/users/[id].purs", "routes/users/[userId].purs"]
    );
}

#[test]
fn test_param_and_optional_are_not_equivalent_but_overlap() {
    let table = RouteTable::build(vec![
        RouteDeclaration::parse("users/[id]", ()),
        RouteDeclaration::parse("users/[[id]]", ()),
    ])
    .unwrap();

    let kinds: Vec<_> = table.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::OverlapConflict]);
}

#[rstest]
#[case("users/[id]", "users/[[id]]", true)]
#[case("a/[...rest]", "a/b/[id]", true)]
#[case("[[a]]", "[[b]]/x", true)]
#[case("[[lang]]/about", "about", true)]
#[case("[[lang]]/about", "en/fr/about", false)]
#[case("a/[...rest]", "b/[[c]]", false)]
#[case("x/[[y]]/z", "x/[...rest]", true)]
#[case("", "[[page]]/[[size]]", true)]
fn test_overlap_is_symmetric(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
    let (a, b) = (pattern(a), pattern(b));
    assert_eq!(patterns_overlap(&a, &b), expected);
    assert_eq!(patterns_overlap(&b, &a), expected);
}

#[test]
fn test_overlapping_paths_are_accepted_by_both() {
    let a = pattern("a/[...rest]");
    let b = pattern("a/b/[id]");
    let pieces = split_path("/a/b/5");
    assert!(match_pattern(&a, &pieces).is_some());
    assert!(match_pattern(&b, &pieces).is_some());
}

#[test]
fn test_deny_warnings_fails_build() {
    let config = RouterConfig::default().with_deny_warnings(true);
    let err = RouteTable::build_with_config(
        vec![
            RouteDeclaration::parse("a/[...rest]", ()),
            RouteDeclaration::parse("a/b/[id]", ()),
        ],
        &config,
    )
    .unwrap_err();

    match err {
        RouteError::DeniedDiagnostics { count, diagnostics } => {
            assert_eq!(count, 1);
            assert_eq!(diagnostics[0].involved_ids, vec!["/a/*rest", "/a/b/:id"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_disabled_detectors_produce_no_diagnostics() {
    let config = RouterConfig::from_toml_str(
        r#"
        [diagnostics]
        equivalent_shapes = false
        overlaps = false
        deny_warnings = true
        "#,
    )
    .unwrap();

    let table = RouteTable::build_with_config(
        vec![
            RouteDeclaration::parse("users/[id]", ()),
            RouteDeclaration::parse("users/[[name]]", ()),
        ],
        &config,
    )
    .unwrap();
    assert!(table.diagnostics().is_empty());
}

// ============================================================================
// Manifests and reload
// ============================================================================

#[test]
fn test_manifest_to_shared_table() {
    init_tracing();
    let config = RouterConfig::from_toml_str("[routing]\nroutes_dir = \"src/routes\"").unwrap();
    let manifest: RouteManifest<String> = RouteManifest::from_toml_str(
        r#"
        [[routes]]
        file = "src/routes/index.purs"
        handler = "home"

        [[routes]]
        file = "src/routes/posts/[[page]].purs"
        handler = "posts"
        "#,
    )
    .unwrap();

    let table = RouteTable::build_with_config(manifest.into_declarations(&config), &config).unwrap();
    let shared = SharedRouteTable::new(table);
    let snapshot = shared.load();

    assert_eq!(snapshot.match_path("/posts/3").unwrap().param("page"), Some("3"));
    assert_eq!(snapshot.match_path("/").unwrap().handler(), "home");

    let reloaded = shared
        .reload(
            vec![RouteDeclaration::parse("posts/[[page]]", "posts".to_string())],
            &config,
        )
        .unwrap();

    assert!(reloaded.match_path("/").is_none());
    assert!(snapshot.match_path("/").is_some());
}

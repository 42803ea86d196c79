use std::sync::Once;

use pulse_core::{
    CatalogError, Delivery, StatKind, UpstreamCatalog, UpstreamSpec, Username, USER_SLOT,
};
use url::Url;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pulse_logging::initialize_for_tests);
}

fn user(raw: &str) -> Username {
    Username::parse(raw).expect("test username is valid")
}

#[test]
fn standard_catalog_covers_every_kind_with_valid_urls() {
    init_logging();
    let catalog = UpstreamCatalog::standard();
    let octocat = user("octocat");

    assert_eq!(catalog.specs().len(), StatKind::ALL.len());
    for (spec, kind) in catalog.specs().iter().zip(StatKind::ALL) {
        assert_eq!(spec.kind, kind);
        let rendered = spec.url_for(&octocat);
        assert!(!rendered.contains(USER_SLOT), "unrendered slot in {rendered}");
        assert!(rendered.contains("octocat"), "username missing in {rendered}");
        Url::parse(&rendered).expect("standard template renders to a valid URL");
    }
}

#[test]
fn standard_catalog_passes_its_own_validation() {
    let catalog = UpstreamCatalog::standard();
    let revalidated = UpstreamCatalog::from_specs(catalog.specs().to_vec())
        .expect("standard specs validate");
    assert_eq!(revalidated, catalog);
}

#[test]
fn profile_lookup_targets_the_github_users_api() {
    let catalog = UpstreamCatalog::standard();
    let rendered = catalog.spec(StatKind::Profile).url_for(&user("octocat"));
    assert_eq!(rendered, "https://api.github.com/users/octocat");
}

#[test]
fn trophies_are_delivered_by_reference() {
    let catalog = UpstreamCatalog::standard();
    let trophies = catalog.spec(StatKind::Trophies);
    assert_eq!(trophies.delivery, Delivery::Linked);
    assert_eq!(trophies.accept.as_deref(), Some("text/html"));

    for kind in [
        StatKind::StatsCard,
        StatKind::StreakStats,
        StatKind::TopLanguages,
        StatKind::Heatmap,
    ] {
        assert_eq!(catalog.spec(kind).delivery, Delivery::Inline);
    }
}

#[test]
fn from_specs_reorders_into_catalog_order() {
    let mut specs: Vec<UpstreamSpec> = UpstreamCatalog::standard().specs().to_vec();
    specs.reverse();

    let catalog = UpstreamCatalog::from_specs(specs).expect("shuffled specs validate");
    for (spec, kind) in catalog.specs().iter().zip(StatKind::ALL) {
        assert_eq!(spec.kind, kind);
    }
    assert_eq!(catalog, UpstreamCatalog::standard());
}

#[test]
fn from_specs_rejects_a_missing_kind() {
    let specs: Vec<UpstreamSpec> = UpstreamCatalog::standard()
        .specs()
        .iter()
        .filter(|spec| spec.kind != StatKind::Heatmap)
        .cloned()
        .collect();

    match UpstreamCatalog::from_specs(specs) {
        Err(CatalogError::MissingKind(StatKind::Heatmap)) => {}
        other => panic!("expected MissingKind(Heatmap), got {other:?}"),
    }
}

#[test]
fn from_specs_rejects_a_duplicate_kind() {
    let mut specs: Vec<UpstreamSpec> = UpstreamCatalog::standard().specs().to_vec();
    specs.push(UpstreamSpec::new(
        StatKind::Heatmap,
        "https://example.com/{user}",
        Delivery::Inline,
    ));

    match UpstreamCatalog::from_specs(specs) {
        Err(CatalogError::DuplicateKind(StatKind::Heatmap)) => {}
        other => panic!("expected DuplicateKind(Heatmap), got {other:?}"),
    }
}

#[test]
fn from_specs_rejects_a_template_without_placeholder() {
    let mut specs: Vec<UpstreamSpec> = UpstreamCatalog::standard().specs().to_vec();
    specs[1] = UpstreamSpec::new(
        StatKind::StatsCard,
        "https://example.com/static",
        Delivery::Inline,
    );

    match UpstreamCatalog::from_specs(specs) {
        Err(CatalogError::MissingPlaceholder { kind, .. }) => {
            assert_eq!(kind, StatKind::StatsCard);
        }
        other => panic!("expected MissingPlaceholder, got {other:?}"),
    }
}

#[test]
fn from_specs_rejects_a_template_that_is_not_a_url() {
    let mut specs: Vec<UpstreamSpec> = UpstreamCatalog::standard().specs().to_vec();
    specs[4] = UpstreamSpec::new(StatKind::Heatmap, "not a url {user}", Delivery::Inline);

    match UpstreamCatalog::from_specs(specs) {
        Err(CatalogError::BadTemplate { kind, .. }) => assert_eq!(kind, StatKind::Heatmap),
        other => panic!("expected BadTemplate, got {other:?}"),
    }
}

#[test]
fn placeholder_may_appear_more_than_once() {
    let spec = UpstreamSpec::new(
        StatKind::Heatmap,
        "https://example.com/{user}?fallback={user}",
        Delivery::Inline,
    );
    assert_eq!(
        spec.url_for(&user("octocat")),
        "https://example.com/octocat?fallback=octocat"
    );
}

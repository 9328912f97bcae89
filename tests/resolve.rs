//! Resolution integration tests
//!
//! Exercises normalization, synonyms, indexing, and property matching together

use serde_json::{Value, json};
use things_gateway::resolve::{Method, PropertyMatcher, RegistryIndex, translate};
use things_gateway::{
    Action, ActionRequest, Attribute, CanonicalName, Property, Resolution, Resolver,
    SynonymTable, Thing, normalize,
};

mod common;

fn kitchen_resolver() -> Resolver {
    Resolver::from_things(common::registry(common::KITCHEN_REGISTRY), &SynonymTable::default())
}

#[test]
fn test_normalize_idempotent() {
    let samples = [
        "Kitchen Light",
        "  kitchen light  ",
        "\tLIVING ROOM\n",
        "Über Lamp",
        "",
        "on/off",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "input: {s:?}");
    }
}

#[test]
fn test_synonyms_resolve_to_same_device() {
    let resolver = kitchen_resolver();

    let light = resolver.lookup("Kitchen Light").unwrap();
    assert_eq!(resolver.lookup("kitchen lamp"), Some(light));
    assert_eq!(resolver.lookup("Kitchen Lights"), Some(light));
}

#[test]
fn test_colliding_names_last_registered_wins() {
    let things = common::registry(
        r#"[
            {"title": "Hall Lamp", "properties": {"on": {"links": [{"href": "/things/a/properties/on"}]}}},
            {"title": "Hall Light", "properties": {"on": {"links": [{"href": "/things/b/properties/on"}]}}}
        ]"#,
    );
    let index = RegistryIndex::build(things.clone(), &SynonymTable::default());

    // "hall lamp" is the first thing's title and a synonym of the second
    let resolved = index.lookup(&CanonicalName::from("hall lamp")).unwrap();
    assert_eq!(resolved, &things[1]);

    // Building again gives the same answer
    let again = RegistryIndex::build(things.clone(), &SynonymTable::default());
    assert_eq!(again.lookup(&CanonicalName::from("hall lamp")), Some(&things[1]));
}

#[test]
fn test_translate_table() {
    assert_eq!(
        translate(Action::On, Some(Attribute::from("anything")), Some(json!(7))),
        (Some(Attribute::from("on")), Some(json!(true)))
    );
    assert_eq!(
        translate(Action::Off, None, Some(json!("x"))),
        (Some(Attribute::from("on")), Some(json!(false)))
    );
    assert_eq!(
        translate(Action::Set, Some(Attribute::from("brightness")), Some(json!(50))),
        (Some(Attribute::from("brightness")), Some(json!(50)))
    );
}

#[test]
fn test_property_match_by_title() {
    let lamp = Thing::new("Lamp").with_property(
        "level",
        Property::new("Brightness Level", "/things/lamp1/properties/level"),
    );
    let matcher = PropertyMatcher::default();

    let (key, _) = matcher
        .find(&lamp, Some(&Attribute::from(" Brightness LEVEL ")))
        .unwrap();
    assert_eq!(key, "level");
    assert!(matcher.find(&lamp, Some(&Attribute::from("volume"))).is_none());
}

#[test]
fn test_default_attribute_is_level() {
    let lamp = Thing::new("Lamp").with_property(
        "level",
        Property::new("Brightness Level", "/things/lamp1/properties/level"),
    );

    let descriptor = PropertyMatcher::default()
        .descriptor(&lamp, None, Some(json!(30)))
        .unwrap();

    assert_eq!(descriptor.method, Method::Put);
    assert_eq!(descriptor.url, "/things/lamp1/properties/level");
    assert_eq!(Value::Object(descriptor.payload), json!({"level": 30}));
}

#[test]
fn test_end_to_end_on_via_synonym() {
    let resolution = kitchen_resolver().resolve(&ActionRequest::new("kitchen lamp", Action::On));

    assert!(resolution.can_handle());
    let descriptor = resolution.into_descriptor().unwrap();
    assert_eq!(
        serde_json::to_value(&descriptor).unwrap(),
        json!({
            "method": "PUT",
            "url": "/things/1/properties/on",
            "payload": {"on": true}
        })
    );
}

#[test]
fn test_unknown_device_cannot_handle() {
    let resolution = kitchen_resolver().resolve(&ActionRequest::new("garage door", Action::On));

    assert!(!resolution.can_handle());
    assert_eq!(resolution, Resolution::UnknownDevice("garage door".into()));
}

#[test]
fn test_unmatched_property_cannot_handle() {
    let request = ActionRequest::new("kitchen light", Action::Set).with_attribute("color");
    assert_eq!(kitchen_resolver().resolve(&request), Resolution::NoMatchingProperty);
}

#[test]
fn test_query_actions_are_deferred() {
    for action in [Action::BinaryQuery, Action::InformationQuery, Action::Toggle, Action::Locate] {
        let resolution = kitchen_resolver().resolve(&ActionRequest::new("kitchen light", action));
        assert_eq!(resolution, Resolution::Deferred(action));
    }
}

#[test]
fn test_untitled_records_are_skipped() {
    let things = common::registry(
        r#"[
            {"properties": {"on": {"links": [{"href": "/things/0/properties/on"}]}}},
            {"title": "Fan", "properties": {}}
        ]"#,
    );
    let resolver = Resolver::from_things(things, &SynonymTable::default());

    let names: Vec<_> = resolver.entities().map(CanonicalName::as_str).collect();
    assert_eq!(names, ["fan"]);
}

#[test]
fn test_records_without_properties_do_not_shadow_devices() {
    let things = common::registry(
        r#"[
            {"title": "Hall Light", "properties": {"on": {"links": [{"href": "/things/a/properties/on"}]}}},
            {"title": "Hall Lamp"}
        ]"#,
    );
    let resolver = Resolver::from_things(things, &SynonymTable::default());

    assert_eq!(
        resolver.lookup("hall light").and_then(|thing| thing.title.as_deref()),
        Some("Hall Light")
    );

    let resolution = resolver.resolve(&ActionRequest::new("hall light", Action::On));
    assert!(resolution.can_handle());
    assert_eq!(resolution.descriptor().unwrap().url, "/things/a/properties/on");
}

#[test]
fn test_link_without_href_keeps_device() {
    let things = common::registry(
        r#"[
            {"title": "Fan", "properties": {
                "on": {"links": [{"rel": "property"}]},
                "level": {"links": [{"href": "/things/fan/properties/level"}]}
            }}
        ]"#,
    );
    let resolver = Resolver::from_things(things, &SynonymTable::default());

    let level = ActionRequest::new("fan", Action::Set).with_value(3);
    let descriptor = resolver.resolve(&level).into_descriptor().unwrap();
    assert_eq!(descriptor.url, "/things/fan/properties/level");

    let on = resolver.resolve(&ActionRequest::new("fan", Action::On)).into_descriptor().unwrap();
    assert_eq!(on.url, "");
}

//! Deterministic identifiers for standard library content.

use sema_tests::prelude::*;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn id_of(graph: &Graph, element: ElementRef) -> Option<Uuid> {
    graph.get(element.instance).and_then(|i| i.element_id)
}

// ========== TEST: separately_built_libraries_agree ==========
#[test]
fn test_separately_built_libraries_agree() {
    init_tracing();
    // GIVEN the same library built twice, in separate stores
    let registry = kernel();
    let first = StandardLibrary::build(&registry);
    let second = StandardLibrary::build(&registry);
    assert_ne!(first.graph.store_id(), second.graph.store_id());

    // THEN every element carries the same id in both
    let ids = |graph: &Graph| graph.all_instances().map(|i| i.element_id).collect::<Vec<_>>();
    assert_eq!(ids(&*first.graph), ids(&*second.graph));

    // AND named elements agree by qualified name
    for name in ["Base", "Base::Anything", "Links::Link::participant", "Occurrences::Occurrence"] {
        let a = id_of(&first.graph, first.element(name));
        let b = id_of(&second.graph, second.element(name));
        assert!(a.is_some(), "{name} has no id");
        assert_eq!(a, b, "{name}");
    }
}

#[test]
fn test_top_level_ids_hash_the_base_url() {
    let library = StandardLibrary::build(&kernel());

    let base = id_of(&library.graph, library.element("Base")).unwrap();
    let anything = id_of(&library.graph, library.element("Base::Anything")).unwrap();

    let expected = Uuid::new_v5(&Uuid::NAMESPACE_URL, b"https://www.omg.org/spec/KerML/Base");
    assert_eq!(base, expected);
    assert_eq!(anything, Uuid::new_v5(&expected, b"Base::Anything"));
    assert_eq!(base.get_version_num(), 5);
}

#[test]
fn test_every_contained_element_is_stamped() {
    let library = StandardLibrary::build(&kernel());

    // Only the root namespace itself sits outside any top-level member.
    let unstamped: Vec<&str> = library
        .graph
        .all_instances()
        .filter(|i| i.element_id.is_none())
        .map(|i| i.class_name.as_str())
        .collect();
    assert_eq!(unstamped, vec!["Namespace"]);
}

// ========== TEST: user_ids_are_stable_and_session_ids_fill_gaps ==========
#[test]
fn test_user_ids_are_stable_and_session_ids_fill_gaps() {
    // GIVEN a processed user package and one loose class
    let (model, _library) = model_with_library();
    let mut model = model.with_identity(IdentityConfig::with_base_url("urn:vehicles:"));
    let root = model.create("Namespace").unwrap();
    let vehicle = member(&mut model, root, "Package", "Vehicle");
    let engine = member(&mut model, vehicle, "Class", "Engine");
    let loose = model.create("Class").unwrap();
    model.process_all_pending().unwrap();

    // WHEN assigning standard ids twice
    model.assign_standard_ids().unwrap();
    let first = model.store().get(engine).unwrap().element_id;
    model.assign_standard_ids().unwrap();

    // THEN they are stable, and the implied edge got a positional id
    assert_eq!(model.store().get(engine).unwrap().element_id, first);
    let edge = model.navigate(engine, "ownedRelationship").unwrap()[0];
    let namespace = Uuid::new_v5(&Uuid::NAMESPACE_URL, b"urn:vehicles:Vehicle");
    assert_eq!(id_of(model.graph(), edge), Some(Uuid::new_v5(&namespace, b"Vehicle::Engine/1")));

    // WHEN filling the rest
    model.assign_session_ids().unwrap();

    // THEN the loose class gets a random id
    let session = model.store().get(loose).unwrap().element_id.unwrap();
    assert_eq!(session.get_version_num(), 4);
}

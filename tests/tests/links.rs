//! Associations with exactly two ends bind to Links::BinaryLink.

use sema_tests::prelude::*;
use pretty_assertions::assert_eq;

/// An association with `ends` end features, each linked as an association
/// end and owned by the association.
fn association(model: &mut Model, name: &str, ends: usize) -> (InstanceId, Vec<InstanceId>) {
    let assoc = named(model, "Association", name);
    let ends = (0..ends)
        .map(|i| {
            let end = feature(model, assoc, &format!("end{i}"));
            model.set_property(end, "isEnd", true).unwrap();
            model.link(assoc, end, "associationEnd").unwrap();
            end
        })
        .collect();
    (assoc, ends)
}

// ========== TEST: two_ends_bind_to_binary_link ==========
#[test]
fn test_two_ends_bind_to_binary_link() {
    init_tracing();
    // GIVEN an association with two ends
    let (mut model, _library) = model_with_library();
    let (connection, ends) = association(&mut model, "Connection", 2);

    // WHEN processing
    model.process_all_pending().unwrap();

    // THEN it specializes BinaryLink only
    assert_implied(&model, connection, &["Links::BinaryLink"]);

    // AND each end subsets the link participant
    for end in ends {
        assert_implied(&model, end, &["Links::Link::participant"]);
    }
}

// ========== TEST: three_ends_bind_nothing ==========
#[test]
fn test_three_ends_bind_nothing() {
    init_tracing();
    // GIVEN an association with three ends
    let (mut model, _library) = model_with_library();
    let (triangle, ends) = association(&mut model, "Triangle", 3);

    // WHEN processing
    let stats = model.process_all_pending().unwrap();

    // THEN the association gets no implied edge
    assert_no_implied(&model, triangle);
    assert_eq!(model.binding_state(triangle), BindingState::Resolved);

    // AND only the ends bind
    assert_eq!(stats.edges_created, 3);
    for end in ends {
        assert_implied(&model, end, &["Links::Link::participant"]);
    }
}

#[test]
fn test_non_end_feature_of_association_is_a_thing() {
    let (mut model, _library) = model_with_library();
    let (connection, _) = association(&mut model, "Connection", 2);
    let label = feature(&mut model, connection, "label");

    model.process_all_pending().unwrap();

    assert_implied(&model, label, &["Base::things"]);
    assert_implied(&model, connection, &["Links::BinaryLink"]);
}

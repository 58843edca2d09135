//! Semantic binding against the mounted standard library.

use sema_tests::prelude::*;
use pretty_assertions::assert_eq;

mod classifiers {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: class_and_data_type_bind ==========
    #[test]
    fn test_class_and_data_type_bind() {
        init_tracing();
        // GIVEN a class and a data type in a user model
        let (mut model, _library) = model_with_library();
        let engine = named(&mut model, "Class", "Engine");
        let mass = named(&mut model, "DataType", "Mass");

        // WHEN processing
        let stats = model.process_all_pending().unwrap();

        // THEN each gets one implied subclassification
        assert_eq!(stats.edges_created, 2);
        assert_implied(&model, engine, &["Occurrences::Occurrence"]);
        assert_implied(&model, mass, &["Base::DataValue"]);
        assert_eq!(owned_edges(&model, engine)[0].class_name, "Subclassification");
    }

    // ========== TEST: processing_is_idempotent ==========
    #[test]
    fn test_processing_is_idempotent() {
        init_tracing();
        // GIVEN a processed model
        let (mut model, _library) = model_with_library();
        let engine = named(&mut model, "Class", "Engine");
        model.process_all_pending().unwrap();
        let before = owned_edges(&model, engine);
        let size = model.graph().len();

        // WHEN processing again
        let stats = model.process_all_pending().unwrap();

        // THEN nothing changes
        assert_eq!(stats.edges_created, 0);
        assert_eq!(owned_edges(&model, engine), before);
        assert_eq!(model.graph().len(), size);
    }

    // ========== TEST: library_has_no_self_edges ==========
    #[test]
    fn test_library_has_no_self_edges() {
        // GIVEN the standard library, bound against itself
        let library = StandardLibrary::build(&kernel());

        // THEN concepts that target themselves were skipped
        assert!(library.stats.skipped_self >= 4);

        // AND no implied edge has the same specific and general
        for id in library.graph.instances_of("Specialization") {
            let specific = library.graph.navigate_one(id, "specific").unwrap();
            let general = library.graph.navigate_one(id, "general").unwrap();
            assert_ne!(specific, general, "self edge {id}");
        }
    }

    // ========== TEST: explicit_edge_suppresses_implied ==========
    #[test]
    fn test_explicit_edge_suppresses_implied() {
        init_tracing();
        // GIVEN a class that already specializes the library concept
        let (mut model, library) = model_with_library();
        let engine = named(&mut model, "Class", "Engine");
        let occurrence = library.element("Occurrences::Occurrence");
        add_owned_edge(model.store_mut(), "Subclassification", engine, occurrence).unwrap();

        // WHEN processing
        let stats = model.process_all_pending().unwrap();

        // THEN no implied edge is added
        assert_eq!(stats.skipped_redundant, 1);
        assert_no_implied(&model, engine);
        assert_eq!(owned_edges(&model, engine).len(), 1);
    }

    // ========== TEST: redundancy_check_only_inspects_own_edges ==========
    /// An explicit edge to any general suppresses the implied one, even when
    /// that general does not lead to the rule's target. Only the element's
    /// own edges are inspected.
    #[test]
    fn test_redundancy_check_only_inspects_own_edges() {
        init_tracing();
        // GIVEN Part (plain class) and Piston, which specializes Base::Anything
        let (mut model, library) = model_with_library();
        let part = named(&mut model, "Class", "Part");
        let piston = named(&mut model, "Class", "Piston");
        let anything = library.element("Base::Anything");
        add_owned_edge(model.store_mut(), "Subclassification", piston, anything).unwrap();

        // WHEN processing
        model.process_all_pending().unwrap();

        // THEN Part binds but Piston keeps only its explicit edge
        assert_implied(&model, part, &["Occurrences::Occurrence"]);
        assert_no_implied(&model, piston);
        assert_eq!(model.binding_state(piston), BindingState::Resolved);
    }

    // ========== TEST: rules_inherit_three_levels_deep ==========
    #[test]
    fn test_rules_inherit_three_levels_deep() {
        init_tracing();
        // GIVEN Class <- Block <- Engine <- V8, with a rule declared on Block
        let mut registry = sema_registry::kernel::unsealed_kernel_metamodel().unwrap();
        registry
            .register_class(
                ClassDef::new("Block")
                    .extends("Class")
                    .rule(sema_registry::BindingRule::specializes("Base::Anything")),
            )
            .unwrap();
        registry.register_class(ClassDef::new("Engine").extends("Block")).unwrap();
        registry.register_class(ClassDef::new("V8").extends("Engine")).unwrap();
        registry.seal().unwrap();
        let registry = Arc::new(registry);

        let library = StandardLibrary::build(&registry);
        let mounts = Arc::new(MountRegistry::new());
        library.mount(&mounts);
        let mut model = user_model(&registry, &mounts);
        let v8 = named(&mut model, "V8", "v8");

        // WHEN processing
        model.process_all_pending().unwrap();

        // THEN both inherited rules apply
        assert_implied(&model, v8, &["Base::Anything", "Occurrences::Occurrence"]);
    }
}

mod features {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: features_subset_by_kind ==========
    #[test]
    fn test_features_subset_by_kind() {
        init_tracing();
        // GIVEN an Engine class with three features
        let (mut model, _library) = model_with_library();
        let engine = named(&mut model, "Class", "Engine");
        let kilograms = named(&mut model, "DataType", "Kilograms");

        let mass = feature(&mut model, engine, "mass");
        model.link(mass, kilograms, "type").unwrap();

        let cylinder = feature(&mut model, engine, "cylinder");
        model.set_property(cylinder, "isComposite", true).unwrap();

        let head = feature(&mut model, engine, "head");
        model.set_property(head, "isComposite", true).unwrap();
        model.set_property(head, "isPortion", true).unwrap();

        // WHEN processing
        model.process_all_pending().unwrap();

        // THEN each subsets the library features its kind calls for
        assert_implied(&model, mass, &["Base::dataValues"]);
        assert_implied(&model, cylinder, &["Base::things", "Occurrences::Occurrence::suboccurrences"]);
        assert_implied(
            &model,
            head,
            &[
                "Base::things",
                "Occurrences::Occurrence::portions",
                "Occurrences::Occurrence::suboccurrences",
            ],
        );
        assert!(owned_edges(&model, mass).iter().all(|e| e.class_name == "Subsetting"));
        assert!(model.check_constraints().unwrap().is_empty());
    }

    // ========== TEST: portion_without_composite_warns ==========
    #[test]
    fn test_portion_without_composite_warns() {
        let (mut model, _library) = model_with_library();
        let engine = named(&mut model, "Class", "Engine");
        let slice = feature(&mut model, engine, "slice");
        model.set_property(slice, "isPortion", true).unwrap();

        model.process_all_pending().unwrap();
        let violations = model.check_constraints().unwrap();

        assert_implied(&model, slice, &["Base::things", "Occurrences::Occurrence::portions"]);
        assert!(violations.has_only_warnings());
        assert_eq!(violations.all()[0].element, model.element_ref(slice));
    }
}

mod processing {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: unresolved_targets_are_deferred ==========
    #[test]
    fn test_unresolved_targets_are_deferred() {
        init_tracing();
        // GIVEN a model whose mounts are still empty
        let registry = kernel();
        let mounts = Arc::new(MountRegistry::new());
        let mut model = user_model(&registry, &mounts);
        let engine = named(&mut model, "Class", "Engine");

        // WHEN processing
        let stats = model.process_all_pending().unwrap();

        // THEN the class waits
        assert_eq!(stats.deferred, 1);
        assert_eq!(model.binding_state(engine), BindingState::Pending);
        assert_eq!(model.pending_count(), 1);
        assert_no_implied(&model, engine);

        // WHEN the library is mounted and processing runs again
        StandardLibrary::build(&registry).mount(&mounts);
        let stats = model.process_all_pending().unwrap();

        // THEN it binds
        assert_eq!(stats.edges_created, 1);
        assert_eq!(model.binding_state(engine), BindingState::Resolved);
        assert_implied(&model, engine, &["Occurrences::Occurrence"]);
    }

    // ========== TEST: disabled_processing_does_nothing ==========
    #[test]
    fn test_disabled_processing_does_nothing() {
        let registry = kernel();
        let mounts = Arc::new(MountRegistry::new());
        StandardLibrary::build(&registry).mount(&mounts);
        let config = KernelConfig::default().with_implied_relationships(false);
        let mut model = Model::new(registry, mounts, config).unwrap();
        let engine = named(&mut model, "Class", "Engine");

        let stats = model.process_all_pending().unwrap();

        assert_eq!(stats, ProcessStats::default());
        assert_eq!(model.binding_state(engine), BindingState::Unprocessed);
        assert_no_implied(&model, engine);
    }

    // ========== TEST: step_limit_keeps_work_queued ==========
    #[test]
    fn test_step_limit_keeps_work_queued() {
        init_tracing();
        // GIVEN three classes and room for one rule evaluation per call
        let registry = kernel();
        let mounts = Arc::new(MountRegistry::new());
        StandardLibrary::build(&registry).mount(&mounts);
        let config = KernelConfig::default().with_max_steps(1);
        let mut model = Model::new(registry, mounts, config).unwrap();
        let classes: Vec<InstanceId> = ["A", "B", "C"]
            .into_iter()
            .map(|name| named(&mut model, "Class", name))
            .collect();

        // WHEN processing
        let result = model.process_all_pending();

        // THEN the call fails with the rest still queued
        assert!(matches!(
            result,
            Err(SessionError::Binding(BindingError::StepLimitExceeded { limit: 1, remaining: 2 }))
        ));
        assert_implied(&model, classes[0], &["Occurrences::Occurrence"]);

        // WHEN processing continues
        assert!(model.process_all_pending().is_err());
        model.process_all_pending().unwrap();

        // THEN every class is bound exactly once
        for &class in &classes {
            assert_implied(&model, class, &["Occurrences::Occurrence"]);
        }
        assert_eq!(model.pending_count(), 0);
    }

    // ========== TEST: long_rule_lists_finish_across_calls ==========
    #[test]
    fn test_long_rule_lists_finish_across_calls() {
        init_tracing();
        // GIVEN a feature (five rules) ahead of a class, with four steps per call
        let registry = kernel();
        let mounts = Arc::new(MountRegistry::new());
        StandardLibrary::build(&registry).mount(&mounts);
        let config = KernelConfig::default().with_max_steps(4);
        let mut model = Model::new(registry, mounts, config).unwrap();
        let part = model.create("Feature").unwrap();
        let engine = named(&mut model, "Class", "Engine");

        // WHEN processing until the queue drains
        let mut failures = 0;
        for _ in 0..10 {
            match model.process_all_pending() {
                Ok(_) if model.pending_count() == 0 => break,
                Ok(_) => {}
                Err(_) => failures += 1,
            }
        }

        // THEN only the first call hits the limit and both instances bind
        assert_eq!(failures, 1);
        assert_eq!(model.pending_count(), 0);
        assert_implied(&model, part, &["Base::things"]);
        assert_implied(&model, engine, &["Occurrences::Occurrence"]);
    }
}

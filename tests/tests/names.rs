//! Name resolution across the model and its mounts.

use sema_tests::prelude::*;
use pretty_assertions::assert_eq;

mod mounts {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: base_anything_needs_the_mount ==========
    #[test]
    fn test_base_anything_needs_the_mount() {
        init_tracing();
        // GIVEN a model and a library that is not yet mounted
        let registry = kernel();
        let mounts = Arc::new(MountRegistry::new());
        let library = StandardLibrary::build(&registry);
        let model = user_model(&registry, &mounts);

        // THEN Base::Anything does not resolve
        assert_eq!(model.resolve_global("Base::Anything"), None);

        // WHEN the library is mounted
        assert!(library.mount(&mounts));

        // THEN it resolves to the library element
        let anything = library.element("Base::Anything");
        assert_eq!(model.resolve_global("Base::Anything"), Some(anything));
        assert_eq!(model.qualified_name_of(anything).as_deref(), Some("Base::Anything"));
    }

    #[test]
    fn test_mounting_twice_keeps_the_first() {
        let registry = kernel();
        let mounts = MountRegistry::new();
        let first = StandardLibrary::build(&registry);
        let second = StandardLibrary::build(&registry);

        assert!(first.mount(&mounts));
        assert!(!second.mount(&mounts));

        assert_eq!(mounts.len(), 1);
        let mounted = mounts.get(STANDARD_LIBRARY).unwrap();
        assert!(Arc::ptr_eq(&mounted.graph, &first.graph));
    }

    // ========== TEST: higher_priority_mount_wins ==========
    #[test]
    fn test_higher_priority_mount_wins() {
        // GIVEN two libraries defining the same names
        let registry = kernel();
        let mounts = Arc::new(MountRegistry::new());
        let low = StandardLibrary::build(&registry);
        let high = StandardLibrary::build(&registry);
        mounts.register_mount("low", Arc::clone(&low.graph), 0, false);
        mounts.register_mount("high", Arc::clone(&high.graph), 10, false);

        // WHEN resolving from a model
        let model = user_model(&registry, &mounts);

        // THEN the higher priority mount answers
        assert_eq!(model.resolve_global("Links::Link"), Some(high.element("Links::Link")));
    }
}

mod scopes {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A local root namespace with a `Base` package.
    fn local_base(model: &mut Model) -> InstanceId {
        let root = model.create("Namespace").unwrap();
        member(model, root, "Package", "Base")
    }

    // ========== TEST: local_definitions_shadow_mounts ==========
    #[test]
    fn test_local_definitions_shadow_mounts() {
        // GIVEN a local Base::Anything next to the mounted one
        let (mut model, library) = model_with_library();
        let base = local_base(&mut model);
        let local = member(&mut model, base, "Classifier", "Anything");

        // THEN the local one wins
        assert_eq!(model.resolve_global("Base::Anything"), Some(model.element_ref(local)));

        // AND names the local package lacks still come from the mount
        assert_eq!(model.resolve_global("Base::DataValue"), Some(library.element("Base::DataValue")));
    }

    #[test]
    fn test_unresolvable_names() {
        let (model, _library) = model_with_library();

        assert_eq!(model.resolve_global("Base::Nothing"), None);
        assert_eq!(model.resolve_global("Base::"), None);
        assert_eq!(model.resolve_global("'Base"), None);
        assert_eq!(model.resolve_global(""), None);
    }

    // ========== TEST: quoted_names_round_trip ==========
    #[test]
    fn test_quoted_names_round_trip() {
        // GIVEN an element whose name is not a basic name
        let (mut model, _library) = model_with_library();
        let root = model.create("Namespace").unwrap();
        let vehicle = member(&mut model, root, "Package", "Vehicle");
        let part = member(&mut model, vehicle, "Class", "front wheel's hub");
        let part_ref = model.element_ref(part);

        // THEN its qualified name is escaped
        let name = model.qualified_name_of(part_ref).unwrap();
        assert_eq!(name, r"Vehicle::'front wheel\'s hub'");

        // AND resolves back to it
        assert_eq!(model.resolve_global(&name), Some(part_ref));
    }

    // ========== TEST: aliases_and_imports ==========
    #[test]
    fn test_aliases_and_imports() {
        // GIVEN a package aliasing one library element and importing Links
        let (mut model, library) = model_with_library();
        let root = model.create("Namespace").unwrap();
        let vehicle = member(&mut model, root, "Package", "Vehicle");
        add_alias(model.store_mut(), vehicle, "Thing", library.element("Base::Anything")).unwrap();
        add_import(model.store_mut(), vehicle, ImportKind::Namespace, library.element("Links")).unwrap();

        // THEN both are visible through the package
        assert_eq!(model.resolve_global("Vehicle::Thing"), Some(library.element("Base::Anything")));
        assert_eq!(model.resolve_global("Vehicle::BinaryLink"), Some(library.element("Links::BinaryLink")));

        // AND imports are not followed into nested namespaces
        assert_eq!(model.resolve_global("Vehicle::participant"), None);
        assert_eq!(
            model.resolve_global("Vehicle::Link::participant"),
            Some(library.element("Links::Link::participant"))
        );
    }
}

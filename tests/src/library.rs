//! Kernel registry and standard library fixtures.

use sema_binding::{KernelConfig, ProcessStats};
use sema_core::{ElementRef, InstanceId};
use sema_graph::Graph;
use sema_names::{add_owned_edge, add_owned_feature, add_owned_member, resolve_global, MountRegistry};
use sema_registry::kernel::kernel_metamodel;
use sema_registry::Registry;
use sema_session::{Library, Model};
use std::sync::Arc;

/// Mount id of the standard library fixture.
pub const STANDARD_LIBRARY: &str = "kernel-library";

/// The sealed kernel metamodel.
pub fn kernel() -> Arc<Registry> {
    Arc::new(kernel_metamodel().expect("kernel metamodel seals"))
}

/// An empty model over `mounts` with the default configuration.
pub fn user_model(registry: &Arc<Registry>, mounts: &Arc<MountRegistry>) -> Model {
    Model::new(Arc::clone(registry), Arc::clone(mounts), KernelConfig::default())
        .expect("model over a sealed registry")
}

/// Create a named instance.
pub fn named(model: &mut Model, class: &str, name: &str) -> InstanceId {
    let id = model.create(class).expect("class exists");
    model
        .set_property(id, "declaredName", name)
        .expect("declaredName is an Element attribute");
    id
}

/// Create a named instance owned by `owner` through an owning membership.
pub fn member(model: &mut Model, owner: InstanceId, class: &str, name: &str) -> InstanceId {
    let id = named(model, class, name);
    add_owned_member(model.store_mut(), owner, id).expect("owner is a namespace");
    id
}

/// Create a named feature owned by the type `owner`.
pub fn feature(model: &mut Model, owner: InstanceId, name: &str) -> InstanceId {
    let id = named(model, "Feature", name);
    add_owned_feature(model.store_mut(), owner, id).expect("owner is a type");
    id
}

/// A reduced standard library:
///
/// ```text
/// Base::{Anything, DataValue, things, dataValues}
/// Links::{Link, BinaryLink :> Link, Link::participant}
/// Occurrences::{Occurrence, Occurrence::suboccurrences, Occurrence::portions}
/// ```
///
/// Built as an ordinary model, processed, stamped with standard ids and
/// frozen.
pub struct StandardLibrary {
    pub graph: Arc<Graph>,
    /// Result of processing the library's own bindings.
    pub stats: ProcessStats,
}

impl StandardLibrary {
    pub fn build(registry: &Arc<Registry>) -> Self {
        let mut model = user_model(registry, &Arc::new(MountRegistry::new()));
        let root = model.create("Namespace").expect("namespace");

        let base = member(&mut model, root, "LibraryPackage", "Base");
        model.set_property(base, "isStandard", true).expect("isStandard");
        member(&mut model, base, "Classifier", "Anything");
        let data_value = member(&mut model, base, "DataType", "DataValue");
        member(&mut model, base, "Feature", "things");
        let data_values = member(&mut model, base, "Feature", "dataValues");
        model.link(data_values, data_value, "type").expect("type");

        let links = member(&mut model, root, "LibraryPackage", "Links");
        let link = member(&mut model, links, "Association", "Link");
        let binary_link = member(&mut model, links, "Association", "BinaryLink");
        let link_ref = model.element_ref(link);
        add_owned_edge(model.store_mut(), "Subclassification", binary_link, link_ref)
            .expect("subclassification");
        feature(&mut model, link, "participant");

        let occurrences = member(&mut model, root, "LibraryPackage", "Occurrences");
        let occurrence = member(&mut model, occurrences, "Class", "Occurrence");
        let suboccurrences = feature(&mut model, occurrence, "suboccurrences");
        model.set_property(suboccurrences, "isComposite", true).expect("isComposite");
        let portions = feature(&mut model, occurrence, "portions");
        model.set_property(portions, "isComposite", true).expect("isComposite");
        model.set_property(portions, "isPortion", true).expect("isPortion");

        let stats = model.process_all_pending().expect("library binds against itself");
        model.assign_standard_ids().expect("library ids");
        let graph = model
            .into_library(STANDARD_LIBRARY, 0)
            .expect("fresh mount registry");

        Self { graph, stats }
    }

    /// Look up a library element by qualified name.
    pub fn element(&self, name: &str) -> ElementRef {
        resolve_global(&*self.graph, name).unwrap_or_else(|| panic!("library has no {name}"))
    }

    pub fn library(&self) -> Library {
        Library::new(STANDARD_LIBRARY, Arc::clone(&self.graph), 0)
    }

    /// Mount the library as an implicit mount. Returns false if already
    /// mounted.
    pub fn mount(&self, mounts: &MountRegistry) -> bool {
        mounts.register_mount(STANDARD_LIBRARY, Arc::clone(&self.graph), 0, true)
    }
}

/// A user model with the standard library mounted.
pub fn model_with_library() -> (Model, StandardLibrary) {
    let registry = kernel();
    let library = StandardLibrary::build(&registry);
    let mounts = Arc::new(MountRegistry::new());
    library.mount(&mounts);
    (user_model(&registry, &mounts), library)
}

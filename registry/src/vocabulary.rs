//! Well-known metaclass and property names.
//!
//! The store is generic, but binding resolution, name resolution and identity
//! assignment need to know which classes play the roles of classifier,
//! feature, membership and so on. The defaults match the bundled kernel
//! metamodel in [`crate::kernel`].

/// Names of the metaclasses and properties the kernel layers depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    // Metaclasses
    pub namespace_class: String,
    pub classifier_class: String,
    pub feature_class: String,
    pub specialization_class: String,
    pub subclassification_class: String,
    pub subsetting_class: String,
    pub membership_class: String,
    pub owning_membership_class: String,
    pub namespace_import_class: String,
    pub membership_import_class: String,

    // Containment
    pub owned_relationship: String,
    pub owning_related_element: String,
    pub owned_related_element: String,
    pub owning_relationship: String,

    // Relationship ends
    pub specific: String,
    pub general: String,
    pub member_element: String,
    pub owned_member_element: String,
    pub imported_namespace: String,
    pub imported_membership: String,

    // Feature navigation
    pub type_end: String,
    pub owning_type: String,

    // Attributes
    pub declared_name: String,
    pub declared_short_name: String,
    pub member_name: String,
    pub is_implied: String,
    pub is_end: String,
    pub is_composite: String,
    pub is_portion: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            namespace_class: "Namespace".into(),
            classifier_class: "Classifier".into(),
            feature_class: "Feature".into(),
            specialization_class: "Specialization".into(),
            subclassification_class: "Subclassification".into(),
            subsetting_class: "Subsetting".into(),
            membership_class: "Membership".into(),
            owning_membership_class: "OwningMembership".into(),
            namespace_import_class: "NamespaceImport".into(),
            membership_import_class: "MembershipImport".into(),

            owned_relationship: "ownedRelationship".into(),
            owning_related_element: "owningRelatedElement".into(),
            owned_related_element: "ownedRelatedElement".into(),
            owning_relationship: "owningRelationship".into(),

            specific: "specific".into(),
            general: "general".into(),
            member_element: "memberElement".into(),
            owned_member_element: "ownedMemberElement".into(),
            imported_namespace: "importedNamespace".into(),
            imported_membership: "importedMembership".into(),

            type_end: "type".into(),
            owning_type: "owningType".into(),

            declared_name: "declaredName".into(),
            declared_short_name: "declaredShortName".into(),
            member_name: "memberName".into(),
            is_implied: "isImplied".into(),
            is_end: "isEnd".into(),
            is_composite: "isComposite".into(),
            is_portion: "isPortion".into(),
        }
    }
}

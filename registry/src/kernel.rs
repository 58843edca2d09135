//! A reduced kernel metamodel.
//!
//! Covers the element, relationship, namespace and type hierarchy the
//! binding resolver and name layer work with, plus the semantic binding
//! rules that tie model elements to the standard library:
//!
//! | Class       | Kind        | Target                                      | When                                  |
//! |-------------|-------------|---------------------------------------------|---------------------------------------|
//! | DataType    | specializes | `Base::DataValue`                           | always                                |
//! | Class       | specializes | `Occurrences::Occurrence`                   | always                                |
//! | Association | specializes | `Links::BinaryLink`                         | exactly two ends                      |
//! | Feature     | subsets     | `Base::dataValues`                          | typed by a data type                  |
//! | Feature     | subsets     | `Base::things`                              | not an end, not typed by a data type  |
//! | Feature     | subsets     | `Links::Link::participant`                  | end of an association                 |
//! | Feature     | subsets     | `Occurrences::Occurrence::suboccurrences`   | composite, owned by or typed as Class |
//! | Feature     | subsets     | `Occurrences::Occurrence::portions`         | portion                               |

use crate::{
    AssociationEndDef, AttributeDef, BindingRule, ClassDef, Condition, ConstraintDef, Registry,
    RegistryResult,
};

/// Build and seal the kernel metamodel.
pub fn kernel_metamodel() -> RegistryResult<Registry> {
    let mut registry = unsealed_kernel_metamodel()?;
    registry.seal()?;
    Ok(registry)
}

/// Register the kernel classes without sealing, so callers can add their own
/// classes on top.
pub fn unsealed_kernel_metamodel() -> RegistryResult<Registry> {
    let mut registry = Registry::new();
    for class in kernel_classes() {
        registry.register_class(class)?;
    }
    Ok(registry)
}

fn kernel_classes() -> Vec<ClassDef> {
    vec![
        // ---------- Elements and relationships ----------
        ClassDef::new("Element")
            .abstract_class()
            .attr(AttributeDef::new("declaredName", "String"))
            .attr(AttributeDef::new("declaredShortName", "String"))
            .end(AssociationEndDef::new("ownedRelationship", "Relationship"))
            .end(AssociationEndDef::new("owningRelationship", "Relationship").optional()),
        ClassDef::new("Relationship")
            .extends("Element")
            .abstract_class()
            .attr(AttributeDef::new("isImplied", "Bool").with_default(false))
            .end(AssociationEndDef::new("source", "Element"))
            .end(AssociationEndDef::new("target", "Element"))
            .end(AssociationEndDef::new("owningRelatedElement", "Element").optional())
            .end(AssociationEndDef::new("ownedRelatedElement", "Element")),
        // ---------- Namespaces ----------
        ClassDef::new("Namespace").extends("Element"),
        ClassDef::new("Package").extends("Namespace"),
        ClassDef::new("LibraryPackage")
            .extends("Package")
            .attr(AttributeDef::new("isStandard", "Bool").with_default(false)),
        ClassDef::new("Membership")
            .extends("Relationship")
            .attr(AttributeDef::new("memberName", "String"))
            .end(
                AssociationEndDef::new("memberElement", "Element")
                    .required()
                    .subsets("target"),
            ),
        ClassDef::new("OwningMembership").extends("Membership").end(
            AssociationEndDef::new("ownedMemberElement", "Element")
                .required()
                .redefines("memberElement")
                .subsets("ownedRelatedElement"),
        ),
        ClassDef::new("Import").extends("Relationship").abstract_class(),
        ClassDef::new("NamespaceImport").extends("Import").end(
            AssociationEndDef::new("importedNamespace", "Namespace")
                .required()
                .subsets("target"),
        ),
        ClassDef::new("MembershipImport").extends("Import").end(
            AssociationEndDef::new("importedMembership", "Membership")
                .required()
                .subsets("target"),
        ),
        // ---------- Types ----------
        ClassDef::new("Type")
            .extends("Namespace")
            .attr(AttributeDef::new("isAbstract", "Bool").with_default(false)),
        ClassDef::new("Classifier").extends("Type"),
        ClassDef::new("DataType")
            .extends("Classifier")
            .rule(BindingRule::specializes("Base::DataValue")),
        ClassDef::new("Class")
            .extends("Classifier")
            .rule(BindingRule::specializes("Occurrences::Occurrence")),
        ClassDef::new("Association")
            .extends("Classifier")
            .extends("Relationship")
            .end(AssociationEndDef::new("associationEnd", "Feature"))
            .rule(
                BindingRule::specializes("Links::BinaryLink")
                    .when(Condition::size_equals("associationEnd", 2)),
            ),
        ClassDef::new("Feature")
            .extends("Type")
            .attr(AttributeDef::new("isEnd", "Bool").with_default(false))
            .attr(AttributeDef::new("isComposite", "Bool").with_default(false))
            .attr(AttributeDef::new("isPortion", "Bool").with_default(false))
            .end(AssociationEndDef::new("type", "Type"))
            .end(AssociationEndDef::new("owningType", "Type").optional())
            .constraint(
                ConstraintDef::new(
                    "portionsAreComposite",
                    Condition::or([Condition::not(Condition::IsPortion), Condition::IsComposite]),
                )
                .soft(),
            )
            .rule(BindingRule::subsets("Base::dataValues").when(Condition::typed_by("DataType")))
            .rule(BindingRule::subsets("Base::things").when(Condition::and([
                Condition::not(Condition::IsEnd),
                Condition::not(Condition::typed_by("DataType")),
            ])))
            .rule(BindingRule::subsets("Links::Link::participant").when(Condition::and([
                Condition::IsEnd,
                Condition::owning_type_is("Association"),
            ])))
            .rule(
                BindingRule::subsets("Occurrences::Occurrence::suboccurrences").when(
                    Condition::and([
                        Condition::IsComposite,
                        Condition::or([
                            Condition::owning_type_is("Class"),
                            Condition::owning_type_typed_by("Class"),
                        ]),
                    ]),
                ),
            )
            .rule(BindingRule::subsets("Occurrences::Occurrence::portions").when(Condition::IsPortion)),
        // ---------- Specializations ----------
        ClassDef::new("Specialization")
            .extends("Relationship")
            .end(
                AssociationEndDef::new("specific", "Type")
                    .required()
                    .redefines("source"),
            )
            .end(
                AssociationEndDef::new("general", "Type")
                    .required()
                    .redefines("target"),
            ),
        ClassDef::new("Subclassification")
            .extends("Specialization")
            .end(
                AssociationEndDef::new("subclassifier", "Classifier")
                    .required()
                    .redefines("specific"),
            )
            .end(
                AssociationEndDef::new("superclassifier", "Classifier")
                    .required()
                    .redefines("general"),
            ),
        ClassDef::new("FeatureTyping")
            .extends("Specialization")
            .end(
                AssociationEndDef::new("typedFeature", "Feature")
                    .required()
                    .redefines("specific"),
            )
            .end(
                AssociationEndDef::new("featureType", "Type")
                    .required()
                    .redefines("general"),
            ),
        ClassDef::new("Subsetting")
            .extends("Specialization")
            .end(
                AssociationEndDef::new("subsettingFeature", "Feature")
                    .required()
                    .redefines("specific"),
            )
            .end(
                AssociationEndDef::new("subsettedFeature", "Feature")
                    .required()
                    .redefines("general"),
            ),
        ClassDef::new("Redefinition")
            .extends("Subsetting")
            .end(
                AssociationEndDef::new("redefiningFeature", "Feature")
                    .required()
                    .redefines("subsettingFeature"),
            )
            .end(
                AssociationEndDef::new("redefinedFeature", "Feature")
                    .required()
                    .redefines("subsettedFeature"),
            ),
    ]
}

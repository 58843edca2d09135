//! The Registry - metamodel schema lookup.

use crate::{
    AssociationEndDef, AttributeDef, BindingRule, ClassDef, ConstraintDef, RegistryError,
    RegistryResult, Vocabulary,
};
use sema_core::RuleId;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// A binding rule together with its identity and declaring class.
#[derive(Debug, Clone, Copy)]
pub struct BoundRule<'r> {
    pub id: RuleId,
    pub declaring_class: &'r str,
    pub rule: &'r BindingRule,
}

/// Per-class association aliasing, computed once at seal time.
///
/// Navigating a general end also yields the values of every end that
/// (transitively) subsets or redefines it. Linking through a redefined end
/// stores into the redefining end.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// All ends visible on the class, nearest declaration first.
    ends: Vec<AssociationEndDef>,
    /// General end -> transitively more specific ends.
    specializations: HashMap<String, Vec<String>>,
    /// Redefined end -> redefining end.
    redefinitions: HashMap<String, String>,
}

impl AliasTable {
    /// Get the end definition visible on the class under this name.
    pub fn end(&self, name: &str) -> Option<&AssociationEndDef> {
        self.ends.iter().find(|e| e.name == name)
    }

    /// All ends visible on the class.
    pub fn ends(&self) -> &[AssociationEndDef] {
        &self.ends
    }

    /// The slot in which values linked under `name` are stored.
    pub fn storage_slot<'a>(&'a self, name: &'a str) -> &'a str {
        let mut slot = name;
        // Bounded by the number of ends so a malformed redefinition loop terminates.
        for _ in 0..=self.ends.len() {
            match self.redefinitions.get(slot) {
                Some(next) => slot = next,
                None => break,
            }
        }
        slot
    }

    /// The slots whose values are visible when navigating `name`.
    pub fn navigation_slots<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        let mut slots = vec![name];
        if let Some(specifics) = self.specializations.get(name) {
            slots.extend(specifics.iter().map(|s| s.as_str()));
        }
        slots
    }

    fn build(ends: Vec<AssociationEndDef>) -> Self {
        let mut direct: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut redefinitions = HashMap::new();

        for end in &ends {
            for general in end.subsets.iter().chain(end.redefines.iter()) {
                direct.entry(general.as_str()).or_default().push(end.name.as_str());
            }
            for redefined in &end.redefines {
                redefinitions
                    .entry(redefined.clone())
                    .or_insert_with(|| end.name.clone());
            }
        }

        let mut specializations = HashMap::new();
        for &general in direct.keys() {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut closure = Vec::new();
            let mut queue: VecDeque<&str> = VecDeque::from([general]);
            seen.insert(general);
            while let Some(current) = queue.pop_front() {
                for &specific in direct.get(current).into_iter().flatten() {
                    if seen.insert(specific) {
                        closure.push(specific.to_string());
                        queue.push_back(specific);
                    }
                }
            }
            specializations.insert(general.to_string(), closure);
        }

        Self {
            ends,
            specializations,
            redefinitions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// The Registry provides runtime lookup of the metamodel.
///
/// Classes may be registered in any order; superclass names are checked when
/// an ancestry is first walked. After [`Registry::seal`] the registry is
/// immutable and ancestries and alias tables are served from caches.
#[derive(Debug, Default)]
pub struct Registry {
    /// Class definitions by name.
    classes: HashMap<String, ClassDef>,
    /// Class names in registration order.
    order: Vec<String>,
    /// Rule ids per class, parallel to `ClassDef::binding_rules`.
    rule_ids: HashMap<String, Vec<RuleId>>,
    /// Next rule ID to allocate.
    next_rule_id: u32,
    vocabulary: Vocabulary,
    sealed: bool,
    /// Cached breadth-first ancestry (sealed only).
    ancestry: HashMap<String, Vec<String>>,
    /// Cached association aliasing (sealed only).
    aliases: HashMap<String, AliasTable>,
}

impl Registry {
    /// Create an empty registry using the default vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom vocabulary.
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            ..Self::default()
        }
    }

    /// The well-known names used by the kernel layers.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    // ==================== Registration ====================

    /// Register a class definition.
    pub fn register_class(&mut self, def: ClassDef) -> RegistryResult<()> {
        if self.sealed {
            return Err(RegistryError::Sealed("register a class"));
        }
        if self.classes.contains_key(&def.name) {
            return Err(RegistryError::DuplicateClass(def.name));
        }

        let ids = def
            .binding_rules
            .iter()
            .map(|_| {
                let id = RuleId::new(self.next_rule_id);
                self.next_rule_id += 1;
                id
            })
            .collect();

        self.rule_ids.insert(def.name.clone(), ids);
        self.order.push(def.name.clone());
        self.classes.insert(def.name.clone(), def);
        Ok(())
    }

    /// Returns true once the registry has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Validate the schema and freeze it.
    ///
    /// Fails on unknown superclasses, inheritance cycles and unknown class
    /// names inside conditions.
    pub fn seal(&mut self) -> RegistryResult<()> {
        if self.sealed {
            return Err(RegistryError::Sealed("seal twice"));
        }

        self.check_cycles()?;

        let mut ancestry = HashMap::new();
        for name in &self.order {
            let names: Vec<String> = self
                .walk_ancestry(name)?
                .into_iter()
                .map(str::to_string)
                .collect();
            ancestry.insert(name.clone(), names);
        }

        self.check_condition_classes()?;

        let mut aliases = HashMap::new();
        for (name, lineage) in &ancestry {
            let mut ends: Vec<AssociationEndDef> = Vec::new();
            for class_name in lineage {
                if let Some(def) = self.classes.get(class_name) {
                    for end in &def.associations {
                        if !ends.iter().any(|e| e.name == end.name) {
                            ends.push(end.clone());
                        }
                    }
                }
            }
            aliases.insert(name.clone(), AliasTable::build(ends));
        }

        self.ancestry = ancestry;
        self.aliases = aliases;
        self.sealed = true;
        debug!(classes = self.order.len(), rules = self.next_rule_id, "registry sealed");
        Ok(())
    }

    // ==================== Class Lookups ====================

    /// Get a class definition by name.
    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }

    /// All classes in registration order.
    pub fn all_classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.order.iter().filter_map(|name| self.classes.get(name))
    }

    /// Get the number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// The class and its ancestors, breadth-first, each class once.
    pub fn collect_ancestry(&self, name: &str) -> RegistryResult<Vec<&ClassDef>> {
        if let Some(cached) = self.ancestry.get(name) {
            return Ok(cached
                .iter()
                .filter_map(|n| self.classes.get(n))
                .collect());
        }
        Ok(self
            .walk_ancestry(name)?
            .into_iter()
            .filter_map(|n| self.classes.get(n))
            .collect())
    }

    /// Check if `class` is `ancestor` or inherits from it. Unknown classes
    /// are never related.
    pub fn is_a(&self, class: &str, ancestor: &str) -> bool {
        if class == ancestor {
            return self.classes.contains_key(class);
        }
        if let Some(cached) = self.ancestry.get(class) {
            return cached.iter().any(|n| n == ancestor);
        }
        self.walk_ancestry(class)
            .map(|names| names.contains(&ancestor))
            .unwrap_or(false)
    }

    /// Binding rules declared on the class or any ancestor, in ancestry order
    /// then declaration order, each rule once.
    pub fn collect_inherited_binding_rules(&self, name: &str) -> RegistryResult<Vec<BoundRule<'_>>> {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();
        for class in self.collect_ancestry(name)? {
            let ids = self.rule_ids.get(&class.name).map(Vec::as_slice).unwrap_or(&[]);
            for (rule, &id) in class.binding_rules.iter().zip(ids) {
                if seen.insert(id) {
                    rules.push(BoundRule {
                        id,
                        declaring_class: &class.name,
                        rule,
                    });
                }
            }
        }
        Ok(rules)
    }

    /// Constraints declared on the class or any ancestor.
    pub fn collect_inherited_constraints(&self, name: &str) -> RegistryResult<Vec<&ConstraintDef>> {
        Ok(self
            .collect_ancestry(name)?
            .into_iter()
            .flat_map(|class| class.constraints.iter())
            .collect())
    }

    /// Get an attribute definition from a class, including inherited ones.
    /// The nearest declaration wins.
    pub fn find_attribute(&self, class: &str, attr: &str) -> Option<&AttributeDef> {
        self.collect_ancestry(class)
            .ok()?
            .into_iter()
            .find_map(|def| def.get_attr(attr))
    }

    /// All attributes visible on a class, nearest declaration first.
    pub fn all_attributes(&self, class: &str) -> Vec<&AttributeDef> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for def in self.collect_ancestry(class).unwrap_or_default() {
            for attr in &def.attributes {
                if seen.insert(attr.name.as_str()) {
                    result.push(attr);
                }
            }
        }
        result
    }

    /// Get an association end from a class, including inherited ones.
    pub fn find_association(&self, class: &str, end: &str) -> Option<&AssociationEndDef> {
        if let Some(table) = self.aliases.get(class) {
            return table.end(end);
        }
        self.collect_ancestry(class)
            .ok()?
            .into_iter()
            .find_map(|def| def.get_end(end))
    }

    /// The precomputed alias table of a class (sealed registries only).
    pub fn aliases(&self, class: &str) -> Option<&AliasTable> {
        self.aliases.get(class)
    }

    // ==================== Internals ====================

    fn walk_ancestry<'a>(&'a self, name: &str) -> RegistryResult<Vec<&'a str>> {
        let root = self
            .classes
            .get(name)
            .ok_or_else(|| RegistryError::UnknownClass(name.to_string()))?;

        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        seen.insert(root.name.as_str());
        queue.push_back(root);

        while let Some(class) = queue.pop_front() {
            out.push(class.name.as_str());
            for superclass in &class.superclass_names {
                let super_def = self.classes.get(superclass).ok_or_else(|| {
                    RegistryError::UnknownSuperclass {
                        class: class.name.clone(),
                        superclass: superclass.clone(),
                    }
                })?;
                if seen.insert(super_def.name.as_str()) {
                    queue.push_back(super_def);
                }
            }
        }

        Ok(out)
    }

    fn check_cycles(&self) -> RegistryResult<()> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        for name in &self.order {
            self.visit(name, &mut marks)?;
        }
        Ok(())
    }

    fn visit<'a>(&'a self, name: &'a str, marks: &mut HashMap<&'a str, Mark>) -> RegistryResult<()> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => return Err(RegistryError::InheritanceCycle(name.to_string())),
            None => {}
        }
        marks.insert(name, Mark::Visiting);
        if let Some(def) = self.classes.get(name) {
            for superclass in &def.superclass_names {
                self.visit(superclass, marks)?;
            }
        }
        marks.insert(name, Mark::Done);
        Ok(())
    }

    fn check_condition_classes(&self) -> RegistryResult<()> {
        for def in self.all_classes() {
            let conditions = def
                .binding_rules
                .iter()
                .map(|r| &r.condition)
                .chain(def.constraints.iter().map(|c| &c.condition));
            for condition in conditions {
                for referenced in condition.referenced_classes() {
                    if !self.classes.contains_key(referenced) {
                        return Err(RegistryError::UnknownClassInCondition {
                            class: def.name.clone(),
                            referenced: referenced.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

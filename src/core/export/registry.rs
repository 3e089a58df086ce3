//! Dependency registry
//!
//! The registry maps an [`EntityKind`] to the GUIDs that exported objects
//! reference. Only registered kinds accumulate GUIDs: an exporter registers
//! the kinds it depends on before the job starts, and the exporter that owns
//! a kind later reads the accumulated GUIDs back to decide what to emit.
//!
//! Changes made while one primary object is exported are journaled. They
//! stay visible to the dependents of that object and are kept on
//! [`DependencyRegistry::commit_object`] once it is written, or undone by
//! [`DependencyRegistry::rollback_object`] if it fails.

use crate::domain::ids::Guid;
use crate::domain::kinds::EntityKind;
use std::collections::{BTreeMap, HashSet};

/// Insertion-ordered GUID set
#[derive(Debug, Clone, Default)]
struct GuidSet {
    order: Vec<Guid>,
    seen: HashSet<Guid>,
}

impl GuidSet {
    fn insert(&mut self, guid: Guid) -> bool {
        if self.seen.contains(&guid) {
            return false;
        }
        self.seen.insert(guid.clone());
        self.order.push(guid);
        true
    }

    fn contains(&self, guid: &Guid) -> bool {
        self.seen.contains(guid)
    }

    fn remove(&mut self, guid: &Guid) {
        if self.seen.remove(guid) {
            self.order.retain(|g| g != guid);
        }
    }
}

/// Journaled registry change
#[derive(Debug, Clone)]
enum Change {
    Dependency(EntityKind, Guid),
    Emitted(EntityKind, Guid),
}

/// Accumulator of cross-entity GUID references
#[derive(Debug, Clone, Default)]
pub struct DependencyRegistry {
    dependencies: BTreeMap<EntityKind, GuidSet>,
    emitted: BTreeMap<EntityKind, HashSet<Guid>>,
    journal: Option<Vec<Change>>,
}

impl DependencyRegistry {
    /// Create a registry tracking `kinds`
    pub fn new(kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        let mut registry = Self::default();
        for kind in kinds {
            registry.register_kind(kind);
        }
        registry
    }

    /// Start tracking a kind; registering twice keeps existing GUIDs
    pub fn register_kind(&mut self, kind: EntityKind) {
        self.dependencies.entry(kind).or_default();
    }

    /// Whether GUIDs of `kind` are being tracked
    pub fn is_registered(&self, kind: EntityKind) -> bool {
        self.dependencies.contains_key(&kind)
    }

    /// Kinds currently tracked
    pub fn registered_kinds(&self) -> Vec<EntityKind> {
        self.dependencies.keys().copied().collect()
    }

    /// Record a reference to `guid`
    ///
    /// Returns `true` if the GUID was new. References to unregistered kinds
    /// are ignored.
    pub fn add_dependency(&mut self, kind: EntityKind, guid: Guid) -> bool {
        let added = match self.dependencies.get_mut(&kind) {
            Some(set) => set.insert(guid.clone()),
            None => return false,
        };
        if added {
            tracing::trace!(kind = %kind, "Registered dependency");
            self.record(Change::Dependency(kind, guid));
        }
        added
    }

    /// Record several references; returns how many were new
    pub fn add_dependencies(
        &mut self,
        kind: EntityKind,
        guids: impl IntoIterator<Item = Guid>,
    ) -> usize {
        if !self.is_registered(kind) {
            return 0;
        }
        guids
            .into_iter()
            .filter(|guid| self.add_dependency(kind, guid.clone()))
            .count()
    }

    /// GUIDs referenced so far, in discovery order
    pub fn dependent_guids(&self, kind: EntityKind) -> Vec<Guid> {
        self.dependencies
            .get(&kind)
            .map(|set| set.order.clone())
            .unwrap_or_default()
    }

    /// Whether `guid` has been referenced
    pub fn contains(&self, kind: EntityKind, guid: &Guid) -> bool {
        self.dependencies
            .get(&kind)
            .is_some_and(|set| set.contains(guid))
    }

    /// Number of GUIDs referenced across all kinds
    pub fn total_dependencies(&self) -> usize {
        self.dependencies.values().map(|set| set.order.len()).sum()
    }

    /// Record that an object has been written to the bundle
    ///
    /// Returns `false` if it was already marked. Used for global objects
    /// that several catalogs would otherwise each emit. A mark made for a
    /// primary object that then fails is undone with its other changes.
    pub fn mark_emitted(&mut self, kind: EntityKind, guid: &Guid) -> bool {
        let marked = self.emitted.entry(kind).or_default().insert(guid.clone());
        if marked {
            self.record(Change::Emitted(kind, guid.clone()));
        }
        marked
    }

    /// Whether an object has already been written to the bundle
    pub fn is_emitted(&self, kind: EntityKind, guid: &Guid) -> bool {
        self.emitted
            .get(&kind)
            .is_some_and(|set| set.contains(guid))
    }

    /// Start journaling the changes made for one primary object
    pub fn begin_object(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Keep the changes made since [`Self::begin_object`]
    pub fn commit_object(&mut self) {
        self.journal = None;
    }

    /// Undo the changes made since [`Self::begin_object`]
    ///
    /// Returns the number of changes undone.
    pub fn rollback_object(&mut self) -> usize {
        let Some(changes) = self.journal.take() else {
            return 0;
        };
        for change in changes.iter().rev() {
            match change {
                Change::Dependency(kind, guid) => {
                    if let Some(set) = self.dependencies.get_mut(kind) {
                        set.remove(guid);
                    }
                }
                Change::Emitted(kind, guid) => {
                    if let Some(set) = self.emitted.get_mut(kind) {
                        set.remove(guid);
                    }
                }
            }
        }
        tracing::debug!(undone = changes.len(), "Rolled back registry changes");
        changes.len()
    }

    fn record(&mut self, change: Change) {
        if let Some(journal) = &mut self.journal {
            journal.push(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn guid(s: &str) -> Guid {
        Guid::from_str(s).unwrap()
    }

    #[test]
    fn test_unregistered_kind_is_ignored() {
        let mut registry = DependencyRegistry::new([EntityKind::Brand]);

        assert!(!registry.add_dependency(EntityKind::Attribute, guid("A1")));
        assert!(registry.dependent_guids(EntityKind::Attribute).is_empty());
        assert!(!registry.is_registered(EntityKind::Attribute));
    }

    #[test]
    fn test_guids_kept_in_discovery_order_without_duplicates() {
        let mut registry = DependencyRegistry::new([EntityKind::Brand]);

        assert!(registry.add_dependency(EntityKind::Brand, guid("B2")));
        assert!(registry.add_dependency(EntityKind::Brand, guid("B1")));
        assert!(!registry.add_dependency(EntityKind::Brand, guid("B2")));

        assert_eq!(
            registry.dependent_guids(EntityKind::Brand),
            vec![guid("B2"), guid("B1")]
        );
        assert!(registry.contains(EntityKind::Brand, &guid("B1")));
        assert_eq!(registry.total_dependencies(), 2);
    }

    #[test]
    fn test_add_dependencies_counts_new_only() {
        let mut registry = DependencyRegistry::new([EntityKind::Attribute]);
        registry.add_dependency(EntityKind::Attribute, guid("A1"));

        let added = registry.add_dependencies(
            EntityKind::Attribute,
            vec![guid("A1"), guid("A2"), guid("A3"), guid("A2")],
        );

        assert_eq!(added, 2);
        assert_eq!(registry.dependent_guids(EntityKind::Attribute).len(), 3);
    }

    #[test]
    fn test_register_twice_keeps_guids() {
        let mut registry = DependencyRegistry::new([EntityKind::Catalog]);
        registry.add_dependency(EntityKind::Catalog, guid("MASTER"));
        registry.register_kind(EntityKind::Catalog);

        assert_eq!(registry.dependent_guids(EntityKind::Catalog), vec![guid("MASTER")]);
        assert_eq!(registry.registered_kinds(), vec![EntityKind::Catalog]);
    }

    #[test]
    fn test_mark_emitted_once() {
        let mut registry = DependencyRegistry::default();

        assert!(!registry.is_emitted(EntityKind::Attribute, &guid("AG")));
        assert!(registry.mark_emitted(EntityKind::Attribute, &guid("AG")));
        assert!(!registry.mark_emitted(EntityKind::Attribute, &guid("AG")));
        assert!(registry.is_emitted(EntityKind::Attribute, &guid("AG")));
    }

    #[test]
    fn test_rollback_undoes_object_changes() {
        let mut registry = DependencyRegistry::new([EntityKind::Brand]);
        registry.add_dependency(EntityKind::Brand, guid("B1"));

        registry.begin_object();
        registry.add_dependency(EntityKind::Brand, guid("B1"));
        registry.add_dependency(EntityKind::Brand, guid("B2"));
        registry.mark_emitted(EntityKind::Attribute, &guid("AG"));
        assert!(registry.contains(EntityKind::Brand, &guid("B2")));

        assert_eq!(registry.rollback_object(), 2);
        assert_eq!(registry.dependent_guids(EntityKind::Brand), vec![guid("B1")]);
        assert!(!registry.is_emitted(EntityKind::Attribute, &guid("AG")));
    }

    #[test]
    fn test_commit_keeps_object_changes() {
        let mut registry = DependencyRegistry::new([EntityKind::Brand]);

        registry.begin_object();
        registry.add_dependency(EntityKind::Brand, guid("B1"));
        registry.mark_emitted(EntityKind::Attribute, &guid("AG"));
        registry.commit_object();

        assert_eq!(registry.rollback_object(), 0);
        assert!(registry.contains(EntityKind::Brand, &guid("B1")));
        assert!(registry.is_emitted(EntityKind::Attribute, &guid("AG")));
    }
}

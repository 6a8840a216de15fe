//! Per-page entity store.
//!
//! A [`Collection`] owns the authoritative, ordered list of records behind a
//! dashboard page. Records are held in [`Arc`]s: a mutation replaces only the
//! touched record with a fresh allocation, so every other record stays
//! pointer-equal across the operation.
//!
//! Operations on ids that are not in the collection are no-ops. They return
//! `None` (or a zero count) instead of an error so callers can decide whether
//! the miss matters, and they emit a `debug` event for diagnostics.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// A domain record that can live in a [`Collection`].
pub trait Record: Clone {
    /// Type-safe identifier, unique within a collection.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + From<i32> + Into<i32>;

    /// Shallow patch: every `Some` field overwrites the record's field.
    type Patch;

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// Overwrite the identifier. Only [`Collection::add`] calls this.
    fn set_id(&mut self, id: Self::Id);

    /// Merge a patch into the record.
    fn apply(&mut self, patch: &Self::Patch);
}

/// A record with named boolean-like fields that can be flipped.
pub trait Toggle: Record {
    /// Names the field to flip.
    type Flag: Copy + fmt::Debug;

    /// Flip the named field.
    fn flip(&mut self, flag: Self::Flag);
}

/// Errors raised while building a collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// Two seed records share an id.
    #[error("duplicate record id {0} in seed")]
    DuplicateId(i32),
}

/// Ordered, id-unique list of records.
#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    records: Vec<Arc<R>>,
    next_id: i32,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Collection<R> {
    /// Create an empty collection. The first added record gets id 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a collection from seed records, keeping their order and ids.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] if two records share an id.
    pub fn from_seed(seed: impl IntoIterator<Item = R>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut max_id = 0;

        for record in seed {
            let raw: i32 = record.id().into();
            if !seen.insert(raw) {
                return Err(CollectionError::DuplicateId(raw));
            }
            max_id = max_id.max(raw);
            records.push(Arc::new(record));
        }

        Ok(Self {
            records,
            next_id: max_id + 1,
        })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<R>> {
        self.records.iter()
    }

    /// Shared handles to every record, in collection order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<R>> {
        self.records.clone()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<&Arc<R>> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Whether a record with this id exists.
    #[must_use]
    pub fn contains(&self, id: R::Id) -> bool {
        self.get(id).is_some()
    }

    /// Count records matching a predicate.
    pub fn count(&self, mut predicate: impl FnMut(&R) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(r)).count()
    }

    /// Append a record under a freshly generated id and return that id.
    ///
    /// Whatever id the record carried is replaced. Ids are never reused,
    /// even after the record holding the largest id is removed.
    pub fn add(&mut self, mut record: R) -> R::Id {
        let id = R::Id::from(self.next_id);
        self.next_id += 1;
        record.set_id(id);
        self.records.push(Arc::new(record));
        id
    }

    /// Remove the record with this id, returning it.
    ///
    /// Returns `None` and leaves the collection untouched if the id is absent.
    pub fn remove(&mut self, id: R::Id) -> Option<Arc<R>> {
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            debug!(%id, "remove: no record with this id");
            return None;
        };
        Some(self.records.remove(index))
    }

    /// Remove every record matching a predicate, returning how many were removed.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&R) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !predicate(r));
        before - self.records.len()
    }

    /// Replace the record with a copy that has `patch` merged in.
    ///
    /// Returns the new record, or `None` if the id is absent.
    pub fn update_field(&mut self, id: R::Id, patch: &R::Patch) -> Option<Arc<R>> {
        self.update_with(id, |record| record.apply(patch))
    }

    /// Replace the record with a copy mutated by `f`.
    ///
    /// Returns the new record, or `None` if the id is absent.
    pub fn update_with(&mut self, id: R::Id, f: impl FnOnce(&mut R)) -> Option<Arc<R>> {
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) else {
            debug!(%id, "update: no record with this id");
            return None;
        };

        let mut updated = R::clone(slot);
        f(&mut updated);
        // Ids are owned by the collection.
        updated.set_id(id);
        *slot = Arc::new(updated);
        Some(Arc::clone(slot))
    }

    /// Flip a boolean-like field on one record.
    ///
    /// Returns the new record, or `None` if the id is absent.
    pub fn toggle(&mut self, id: R::Id, flag: R::Flag) -> Option<Arc<R>>
    where
        R: Toggle,
    {
        self.update_with(id, |record| record.flip(flag))
    }

    /// Merge `patch` into every record matching `predicate`.
    ///
    /// Returns the number of records replaced. Records that do not match keep
    /// their existing allocation.
    pub fn bulk_update(
        &mut self,
        predicate: impl FnMut(&R) -> bool,
        patch: &R::Patch,
    ) -> usize {
        self.bulk_update_with(predicate, |record| record.apply(patch))
    }

    /// Mutate every record matching `predicate` with `f`.
    pub fn bulk_update_with(
        &mut self,
        mut predicate: impl FnMut(&R) -> bool,
        mut f: impl FnMut(&mut R),
    ) -> usize {
        let mut changed = 0;
        for slot in &mut self.records {
            if !predicate(slot) {
                continue;
            }
            let id = slot.id();
            let mut updated = R::clone(slot);
            f(&mut updated);
            updated.set_id(id);
            *slot = Arc::new(updated);
            changed += 1;
        }
        changed
    }
}

impl<'a, R: Record> IntoIterator for &'a Collection<R> {
    type Item = &'a Arc<R>;
    type IntoIter = std::slice::Iter<'a, Arc<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::define_id;

    define_id!(NoteId);

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Note {
        pub id: NoteId,
        pub name: String,
        pub read: bool,
        pub pinned: bool,
    }

    #[derive(Debug, Default)]
    pub struct NotePatch {
        pub name: Option<String>,
        pub read: Option<bool>,
    }

    #[derive(Debug, Clone, Copy)]
    pub enum NoteFlag {
        Read,
        Pinned,
    }

    impl Record for Note {
        type Id = NoteId;
        type Patch = NotePatch;

        fn id(&self) -> NoteId {
            self.id
        }

        fn set_id(&mut self, id: NoteId) {
            self.id = id;
        }

        fn apply(&mut self, patch: &NotePatch) {
            if let Some(name) = &patch.name {
                self.name.clone_from(name);
            }
            if let Some(read) = patch.read {
                self.read = read;
            }
        }
    }

    impl Toggle for Note {
        type Flag = NoteFlag;

        fn flip(&mut self, flag: NoteFlag) {
            match flag {
                NoteFlag::Read => self.read = !self.read,
                NoteFlag::Pinned => self.pinned = !self.pinned,
            }
        }
    }

    pub fn note(id: i32, name: &str, read: bool) -> Note {
        Note {
            id: NoteId::new(id),
            name: name.to_string(),
            read,
            pinned: false,
        }
    }

    pub fn notes() -> Collection<Note> {
        Collection::from_seed(vec![
            note(1, "Order #1024 shipped", true),
            note(2, "Low stock: Linen Shirt", false),
            note(3, "New customer signup", true),
            note(4, "Payout sent", false),
            note(5, "Password changed", true),
        ])
        .unwrap()
    }

    fn all_ptr_eq(a: &[Arc<Note>], b: &[Arc<Note>]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
    }

    #[test]
    fn test_from_seed_rejects_duplicate_ids() {
        let err = Collection::from_seed(vec![note(1, "a", false), note(1, "b", false)]);
        assert_eq!(err.unwrap_err(), CollectionError::DuplicateId(1));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut c = notes();
        let before = c.snapshot();

        assert!(c.remove(NoteId::new(99)).is_none());
        assert!(all_ptr_eq(&before, &c.snapshot()));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut c = notes();
        let removed = c.remove(NoteId::new(2)).unwrap();
        assert_eq!(removed.name, "Low stock: Linen Shirt");

        let ids: Vec<i32> = c.iter().map(|n| n.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_update_field_touches_only_target() {
        let mut c = notes();
        let before = c.snapshot();
        let patch = NotePatch {
            name: Some("Payout delayed".to_string()),
            ..NotePatch::default()
        };

        let updated = c.update_field(NoteId::new(4), &patch).unwrap();
        assert_eq!(updated.name, "Payout delayed");
        assert!(!updated.read, "fields absent from the patch are kept");

        let after = c.snapshot();
        for (old, new) in before.iter().zip(&after) {
            if old.id == NoteId::new(4) {
                assert!(!Arc::ptr_eq(old, new));
            } else {
                assert!(Arc::ptr_eq(old, new));
            }
        }
    }

    #[test]
    fn test_update_field_absent_id_is_noop() {
        let mut c = notes();
        let before = c.snapshot();
        assert!(c.update_field(NoteId::new(42), &NotePatch::default()).is_none());
        assert!(all_ptr_eq(&before, &c.snapshot()));
    }

    #[test]
    fn test_toggle_flips_named_flag() {
        let mut c = notes();
        let toggled = c.toggle(NoteId::new(1), NoteFlag::Pinned).unwrap();
        assert!(toggled.pinned);
        assert!(toggled.read);

        let toggled = c.toggle(NoteId::new(1), NoteFlag::Read).unwrap();
        assert!(!toggled.read);
    }

    #[test]
    fn test_bulk_update_zero_matches_is_noop() {
        let mut c = notes();
        let before = c.snapshot();
        let patch = NotePatch {
            read: Some(true),
            ..NotePatch::default()
        };

        assert_eq!(c.bulk_update(|n| n.name.is_empty(), &patch), 0);
        assert!(all_ptr_eq(&before, &c.snapshot()));
    }

    #[test]
    fn test_bulk_update_marks_all_read() {
        let mut c = notes();
        assert_eq!(c.count(|n| !n.read), 2);

        let patch = NotePatch {
            read: Some(true),
            ..NotePatch::default()
        };
        assert_eq!(c.bulk_update(|n| !n.read, &patch), 2);
        assert_eq!(c.count(|n| !n.read), 0);
    }

    #[test]
    fn test_add_assigns_fresh_unique_id() {
        let mut c = Collection::from_seed(vec![
            note(1, "a", false),
            note(2, "b", false),
            note(3, "c", false),
        ])
        .unwrap();

        let id = c.add(note(0, "X", false));
        assert_eq!(c.len(), 4);

        let last = c.iter().last().unwrap();
        assert_eq!(last.name, "X");
        assert_eq!(last.id, id);
        assert_eq!(c.count(|n| n.id == id), 1);
    }

    #[test]
    fn test_add_never_reuses_ids() {
        let mut c = notes();
        c.remove(NoteId::new(5));
        let id = c.add(note(0, "later", false));
        assert_eq!(id, NoteId::new(6));
    }

    #[test]
    fn test_remove_where() {
        let mut c = notes();
        assert_eq!(c.remove_where(|n| n.read), 3);
        assert_eq!(c.len(), 2);
        assert!(c.iter().all(|n| !n.read));
    }
}

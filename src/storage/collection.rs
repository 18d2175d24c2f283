//! In-memory record collection
//!
//! One `Collection` holds every record of a single entity type in insertion
//! order. Readers always receive clones, so the only way to change a stored
//! record is through the collection's own methods.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{FinboardError, FinboardResult};
use crate::models::Entity;

#[derive(Debug)]
struct CollectionState<T> {
    records: Vec<T>,
    next_sequence: u64,
}

impl<T: Entity> CollectionState<T> {
    fn seeded(records: Vec<T>) -> Self {
        let next_sequence = records
            .iter()
            .filter_map(|r| r.sequence())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            records,
            next_sequence,
        }
    }

    fn position(&self, key: T::Key) -> Option<usize> {
        self.records.iter().position(|r| r.key() == key)
    }
}

/// Ordered store for one entity type
#[derive(Debug)]
pub struct Collection<T: Entity> {
    state: RwLock<CollectionState<T>>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Entity> Collection<T> {
    /// Create a collection seeded with `records`
    ///
    /// New ids continue after the highest sequence number in the seed.
    pub fn new(records: Vec<T>) -> Self {
        Self {
            state: RwLock::new(CollectionState::seeded(records)),
        }
    }

    fn read(&self) -> FinboardResult<RwLockReadGuard<'_, CollectionState<T>>> {
        self.state.read().map_err(|e| {
            FinboardError::Storage(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> FinboardResult<RwLockWriteGuard<'_, CollectionState<T>>> {
        self.state.write().map_err(|e| {
            FinboardError::Storage(format!("Failed to acquire write lock: {}", e))
        })
    }

    /// Copies of every record, in insertion order
    pub fn get_all(&self) -> FinboardResult<Vec<T>> {
        Ok(self.read()?.records.clone())
    }

    /// Copy of the record with `key`, if any
    pub fn get(&self, key: T::Key) -> FinboardResult<Option<T>> {
        let state = self.read()?;
        Ok(state.records.iter().find(|r| r.key() == key).cloned())
    }

    /// Copies of the records matching `predicate`, in insertion order
    pub fn filter<F>(&self, predicate: F) -> FinboardResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let state = self.read()?;
        Ok(state.records.iter().filter(|r| predicate(r)).cloned().collect())
    }

    pub fn contains(&self, key: T::Key) -> FinboardResult<bool> {
        Ok(self.read()?.position(key).is_some())
    }

    pub fn count(&self) -> FinboardResult<usize> {
        Ok(self.read()?.records.len())
    }

    /// Build a record from `draft` and append it
    ///
    /// Fails with `Duplicate` if the built record's key is already present
    /// (only possible for entities with natural keys, such as budgets).
    pub fn insert(&self, draft: &T::Draft) -> FinboardResult<T> {
        self.insert_with(draft, |_| Ok(()))
    }

    /// Like [`Collection::insert`], but `commit` runs before the record is
    /// stored. If `commit` fails nothing is stored and no id is consumed.
    pub fn insert_with<C>(&self, draft: &T::Draft, commit: C) -> FinboardResult<T>
    where
        C: FnOnce(&T) -> FinboardResult<()>,
    {
        let mut state = self.write()?;
        let record = T::from_draft(draft, state.next_sequence)?;

        if state.position(record.key()).is_some() {
            return Err(FinboardError::Duplicate {
                entity_type: T::KIND.name(),
                identifier: record.key().to_string(),
            });
        }

        commit(&record)?;

        if record.sequence().is_some() {
            state.next_sequence += 1;
        }
        state.records.push(record.clone());
        Ok(record)
    }

    /// Apply `change` to the record with `key`
    ///
    /// Returns the record before and after the change, or `None` when no
    /// record matches. If `change` fails, the stored record is untouched.
    pub fn modify<F>(&self, key: T::Key, change: F) -> FinboardResult<Option<(T, T)>>
    where
        F: FnOnce(&mut T) -> FinboardResult<()>,
    {
        self.modify_with(key, change, |_, _| Ok(()))
    }

    /// Like [`Collection::modify`], but `commit` sees the before and after
    /// records first. If `commit` fails the stored record is untouched.
    pub fn modify_with<F, C>(
        &self,
        key: T::Key,
        change: F,
        commit: C,
    ) -> FinboardResult<Option<(T, T)>>
    where
        F: FnOnce(&mut T) -> FinboardResult<()>,
        C: FnOnce(&T, &T) -> FinboardResult<()>,
    {
        let mut state = self.write()?;
        let Some(index) = state.position(key) else {
            return Ok(None);
        };

        let before = state.records[index].clone();
        let mut after = before.clone();
        change(&mut after)?;
        commit(&before, &after)?;
        state.records[index] = after.clone();
        Ok(Some((before, after)))
    }

    /// Remove the record with `key`, returning it
    pub fn remove(&self, key: T::Key) -> FinboardResult<Option<T>> {
        self.remove_with(key, |_| Ok(()))
    }

    /// Like [`Collection::remove`], but `commit` sees the record first. If
    /// `commit` fails the record stays.
    pub fn remove_with<C>(&self, key: T::Key, commit: C) -> FinboardResult<Option<T>>
    where
        C: FnOnce(&T) -> FinboardResult<()>,
    {
        let mut state = self.write()?;
        let Some(index) = state.position(key) else {
            return Ok(None);
        };

        commit(&state.records[index])?;
        Ok(Some(state.records.remove(index)))
    }

    /// Replace the whole collection, restarting id assignment from the new
    /// records
    pub fn reset(&self, records: Vec<T>) -> FinboardResult<()> {
        let mut state = self.write()?;
        *state = CollectionState::seeded(records);
        Ok(())
    }
}

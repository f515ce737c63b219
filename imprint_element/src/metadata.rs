// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use crate::{ElementId, PersistedPlacement, PlacementError};

/// Encoded placement snapshots keyed by element id.
///
/// Values are the JSON strings written by the capture pass. They are decoded
/// on demand, so a corrupted entry only affects the operation reading it.
#[derive(Clone, Debug, Default)]
pub struct PlacementMetadata {
    entries: HashMap<ElementId, String>,
}

impl PlacementMetadata {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no snapshot is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` has a snapshot.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.entries.contains_key(id)
    }

    /// Raw encoded snapshot for `id`.
    #[must_use]
    pub fn raw(&self, id: &ElementId) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Stores an already encoded snapshot, replacing any previous one.
    pub fn insert_raw(&mut self, id: ElementId, encoded: String) {
        self.entries.insert(id, encoded);
    }

    /// Encodes and stores `placement` for `id`.
    ///
    /// # Errors
    ///
    /// Propagates [`PersistedPlacement::encode`] failures; the previous
    /// snapshot is kept in that case.
    pub fn store(
        &mut self,
        id: &ElementId,
        placement: &PersistedPlacement,
    ) -> Result<(), PlacementError> {
        let encoded = placement.encode()?;
        self.entries.insert(id.clone(), encoded);
        Ok(())
    }

    /// Decodes the snapshot for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MissingSnapshot`] if none is stored, or the
    /// decoding error of a corrupted entry.
    pub fn load(&self, id: &ElementId) -> Result<PersistedPlacement, PlacementError> {
        let raw = self.raw(id).ok_or(PlacementError::MissingSnapshot)?;
        PersistedPlacement::decode(raw)
    }

    /// Removes the snapshot for `id`, returning whether one existed.
    pub fn remove(&mut self, id: &ElementId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Removes every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Ids with a stored snapshot, in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.entries.keys()
    }
}

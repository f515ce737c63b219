// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imprint Layers: paint order for elements placed on a product canvas.
//!
//! The core type is [`LayerRegistry`], a small ordered list of [`LayerEntry`]
//! values shared by every element of an editing surface. The list position of
//! an entry is its **rank**: rank `0` paints first (bottom), the last rank
//! paints on top. Elements never store their own stacking order; they derive a
//! CSS-style z-index from their rank with a [`ZIndexScale`]:
//!
//! ```text
//! z_index = (rank + 1) * step + base
//! ```
//!
//! The registry also carries a monotonically increasing **revision** counter
//! that bumps whenever the order changes, so element views can cheaply tell
//! whether their z-index needs to be recomputed.
//!
//! Ids live in a `Vec` with uniqueness enforced by equality. No hashing or
//! ordering constraints are placed on the id type.
//!
//! ## Minimal example
//!
//! ```rust
//! use imprint_layers::{ElementKind, LayerRegistry, ZIndexScale};
//!
//! let mut layers = LayerRegistry::<u32>::new();
//! layers.add_element_layer(1, ElementKind::PrintedImage);
//! layers.add_element_layer(2, ElementKind::Text);
//! layers.add_element_layer(3, ElementKind::Sticker);
//!
//! // The sticker was added last and paints on top.
//! assert_eq!(layers.rank_of(&3), Some(2));
//! assert_eq!(layers.z_index_of(&3, ZIndexScale::default()), Some(31));
//!
//! // Send it to the bottom; the others move up one rank each.
//! layers.send_to_back(&3);
//! assert_eq!(layers.ids().copied().collect::<Vec<_>>(), [3, 1, 2]);
//! ```
//!
//! ## Restoring a saved design
//!
//! Saved designs carry the z-index each element had when it was saved. Those
//! values are not necessarily contiguous (elements may have been deleted in
//! between), so [`LayerRegistry::add_element_layers_on_restore`] only uses
//! them to *order* the restored entries, then assigns fresh contiguous ranks.
//!
//! ```rust
//! use imprint_layers::{ElementKind, LayerEntry, LayerRegistry};
//!
//! let mut layers = LayerRegistry::new();
//! layers.add_element_layers_on_restore([
//!     (LayerEntry::new("logo", ElementKind::PrintedImage), 41),
//!     (LayerEntry::new("caption", ElementKind::Text), 11),
//!     (LayerEntry::new("star", ElementKind::Sticker), 41),
//! ]);
//! // Sorted by saved z-index; ties keep their input order.
//! assert_eq!(layers.ids().copied().collect::<Vec<_>>(), ["caption", "logo", "star"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// The kind of element a layer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A text element.
    Text,
    /// A sticker from the sticker catalog.
    Sticker,
    /// A user-supplied image printed on the product.
    PrintedImage,
}

/// One slot of the layer list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerEntry<K> {
    /// Id of the element this layer paints.
    pub element_id: K,
    /// Kind of the element.
    pub element_kind: ElementKind,
}

impl<K> LayerEntry<K> {
    /// Creates an entry for `element_id`.
    #[must_use]
    pub const fn new(element_id: K, element_kind: ElementKind) -> Self {
        Self {
            element_id,
            element_kind,
        }
    }
}

/// Maps ranks to z-index values: `(rank + 1) * step + base`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZIndexScale {
    /// Distance between adjacent layers.
    pub step: i32,
    /// Offset added to every layer.
    pub base: i32,
}

impl Default for ZIndexScale {
    fn default() -> Self {
        Self { step: 10, base: 1 }
    }
}

impl ZIndexScale {
    /// Z-index for the layer at `rank`.
    ///
    /// Saturates instead of overflowing for absurdly deep stacks.
    #[must_use]
    pub fn z_index(self, rank: usize) -> i32 {
        let slot = i32::try_from(rank).unwrap_or(i32::MAX).saturating_add(1);
        slot.saturating_mul(self.step).saturating_add(self.base)
    }
}

/// Ordered list of element layers plus a revision counter.
///
/// Ids are unique. Ranks are always contiguous `0..len`.
#[derive(Clone, Debug, Default)]
pub struct LayerRegistry<K> {
    layers: Vec<LayerEntry<K>>,
    revision: u64,
}

impl<K> LayerRegistry<K> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if no layers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of registered layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Layers from bottom (rank `0`) to top.
    #[must_use]
    pub fn layers(&self) -> &[LayerEntry<K>] {
        &self.layers
    }

    /// Element ids from bottom to top.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.layers.iter().map(|entry| &entry.element_id)
    }

    /// Returns the current revision.
    ///
    /// The revision increases whenever an operation changes the order or the
    /// membership of the list. No-op operations leave it unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes every layer.
    pub fn clear(&mut self) {
        if self.layers.is_empty() {
            return;
        }
        self.layers.clear();
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K> LayerRegistry<K>
where
    K: PartialEq,
{
    /// Returns `true` if `id` has a layer.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.position_of(id).is_some()
    }

    /// Rank of `id`, if registered.
    #[must_use]
    pub fn rank_of(&self, id: &K) -> Option<usize> {
        self.position_of(id)
    }

    /// Kind of the element `id`, if registered.
    #[must_use]
    pub fn kind_of(&self, id: &K) -> Option<ElementKind> {
        self.position_of(id).map(|idx| self.layers[idx].element_kind)
    }

    /// Z-index of `id` under `scale`, if registered.
    #[must_use]
    pub fn z_index_of(&self, id: &K, scale: ZIndexScale) -> Option<i32> {
        self.position_of(id).map(|rank| scale.z_index(rank))
    }

    /// Adds a layer for `id` on top of the stack and returns its rank.
    ///
    /// An id that is already registered keeps its rank.
    pub fn add_element_layer(&mut self, id: K, kind: ElementKind) -> usize {
        if let Some(idx) = self.position_of(&id) {
            return idx;
        }
        self.layers.push(LayerEntry::new(id, kind));
        self.bump_revision();
        self.layers.len() - 1
    }

    /// Moves `id` to `rank`, shifting the layers in between by one.
    ///
    /// `rank` is clamped to the top of the stack. Returns the resulting rank,
    /// or `None` if `id` is not registered.
    pub fn update_element_layer_index(&mut self, id: &K, rank: usize) -> Option<usize> {
        let from = self.position_of(id)?;
        let to = rank.min(self.layers.len() - 1);
        self.move_layer(from, to);
        Some(to)
    }

    /// Removes the layers of every id in `ids`, returning how many were removed.
    ///
    /// Unknown ids are ignored. The remaining layers keep their relative order.
    pub fn remove_element_layers<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut removed = 0;
        for id in ids {
            if let Some(idx) = self.position_of(id) {
                self.layers.remove(idx);
                removed += 1;
            }
        }
        if removed > 0 {
            self.bump_revision();
        }
        removed
    }

    /// Adds the layers of a restored design on top of the stack.
    ///
    /// Entries are ordered by their saved z-index (stable, so equal values
    /// keep their input order). An entry whose id is already registered
    /// replaces the existing layer. Duplicate ids in the input keep the last
    /// occurrence.
    pub fn add_element_layers_on_restore<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (LayerEntry<K>, i32)>,
    {
        let mut incoming: Vec<(LayerEntry<K>, i32)> = Vec::new();
        for (entry, z_index) in entries {
            if let Some(idx) = incoming
                .iter()
                .position(|(existing, _)| existing.element_id == entry.element_id)
            {
                incoming.remove(idx);
            }
            incoming.push((entry, z_index));
        }
        if incoming.is_empty() {
            return;
        }
        incoming.sort_by_key(|(_, z_index)| *z_index);

        self.layers.retain(|layer| {
            !incoming
                .iter()
                .any(|(entry, _)| entry.element_id == layer.element_id)
        });
        self.layers
            .extend(incoming.into_iter().map(|(entry, _)| entry));

        #[cfg(debug_assertions)]
        debug_assert_unique(&self.layers);
        self.bump_revision();
    }

    /// Moves `id` one rank up. Returns `false` if already on top or unknown.
    pub fn bring_forward(&mut self, id: &K) -> bool {
        match self.position_of(id) {
            Some(idx) if idx + 1 < self.layers.len() => {
                self.move_layer(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves `id` one rank down. Returns `false` if already at the bottom or
    /// unknown.
    pub fn send_backward(&mut self, id: &K) -> bool {
        match self.position_of(id) {
            Some(idx) if idx > 0 => {
                self.move_layer(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Moves `id` to the top. Returns `false` if already there or unknown.
    pub fn bring_to_front(&mut self, id: &K) -> bool {
        match self.position_of(id) {
            Some(idx) if idx + 1 < self.layers.len() => {
                self.move_layer(idx, self.layers.len() - 1);
                true
            }
            _ => false,
        }
    }

    /// Moves `id` to the bottom. Returns `false` if already there or unknown.
    pub fn send_to_back(&mut self, id: &K) -> bool {
        match self.position_of(id) {
            Some(idx) if idx > 0 => {
                self.move_layer(idx, 0);
                true
            }
            _ => false,
        }
    }

    fn position_of(&self, id: &K) -> Option<usize> {
        self.layers.iter().position(|entry| &entry.element_id == id)
    }

    fn move_layer(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        if from < to {
            self.layers[from..=to].rotate_left(1);
        } else {
            self.layers[to..=from].rotate_right(1);
        }
        self.bump_revision();
    }
}

#[cfg(debug_assertions)]
fn debug_assert_unique<K>(layers: &[LayerEntry<K>])
where
    K: PartialEq,
{
    for i in 0..layers.len() {
        for j in (i + 1)..layers.len() {
            debug_assert!(
                layers[i].element_id != layers[j].element_id,
                "duplicate layer id at {i} and {j}"
            );
        }
    }
}

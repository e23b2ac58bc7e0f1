// Copyright 2025 the Scenecull Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `PartitionSet` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::{Backend, Item, TreeStats};
use crate::config::PartitionConfig;
use crate::error::PartitionError;
use crate::types::{Aabb2D, Scalar};

/// Generational handle for objects in a [`PartitionSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Set keys are 32-bit; more than 4 billion live objects are not supported."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot number of this key, as reported by [`Backend`] queries.
    pub const fn slot(self) -> usize {
        self.idx()
    }

    /// Generation of the slot when this key was issued. Starts at 1 and grows on reuse.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

#[derive(Clone, Debug)]
struct Entry<T, P> {
    generation: u32,
    aabb: Aabb2D<T>,
    payload: P,
}

/// A set of boxed objects partitioned by a rebuild-on-demand spatial backend.
///
/// Objects are referenced through a copyable payload; the set tracks membership
/// and bounds, never object lifetimes. Any change to membership or bounds marks
/// the tree stale. A stale tree keeps answering [`query_rect`](Self::query_rect)
/// from its last build; [`select_in`](Self::select_in) rebuilds it first.
#[derive(Debug)]
pub struct PartitionSet<T: Scalar, P: Copy + Debug, B: Backend<T>> {
    entries: Vec<Option<Entry<T, P>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    selection: Vec<(Key, P)>,
    config: PartitionConfig,
    stale: bool,
    backend: B,
}

impl<T, P, B> Default for PartitionSet<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, B> PartitionSet<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    /// Create an empty set with the default [`PartitionConfig`].
    pub fn new() -> Self {
        Self::from_backend(B::default(), PartitionConfig::default())
    }

    /// Create an empty set with explicit limits.
    pub fn with_config(config: PartitionConfig) -> Result<Self, PartitionError> {
        config.validate()?;
        Ok(Self::from_backend(B::default(), config))
    }

    /// Add every object from `items` and build the tree right away.
    pub fn from_items<I>(items: I, config: PartitionConfig) -> Result<Self, PartitionError>
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        let mut set = Self::with_config(config)?;
        let items = items.into_iter();
        set.reserve(items.size_hint().0);
        for (aabb, payload) in items {
            set.add(aabb, payload);
        }
        set.rebuild()?;
        Ok(set)
    }
}

impl<T, P, B> PartitionSet<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Create an empty set around an existing backend value.
    ///
    /// The config is not validated here; [`rebuild`](Self::rebuild) will reject it.
    pub fn from_backend(backend: B, config: PartitionConfig) -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            selection: Vec::new(),
            config,
            stale: false,
            backend,
        }
    }

    /// Reserve space for at least `n` more objects.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n);
        self.generations.reserve(n);
    }

    /// Add an object. The tree is not touched until the next rebuild.
    pub fn add(&mut self, aabb: Aabb2D<T>, payload: P) -> Key {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.generations.push(1);
            self.entries.push(None);
            (self.entries.len() - 1, 1)
        };
        self.entries[idx] = Some(Entry {
            generation,
            aabb,
            payload,
        });
        self.stale = true;
        Key::new(idx, generation)
    }

    /// Move an existing object. Stale keys are ignored.
    pub fn update(&mut self, key: Key, aabb: Aabb2D<T>) {
        if let Some(e) = self.entry_mut(key)
            && e.aabb != aabb
        {
            e.aabb = aabb;
            self.stale = true;
        }
    }

    /// Remove an object and return its payload. Stale keys return `None`.
    pub fn remove(&mut self, key: Key) -> Option<P> {
        let payload = self.entry(key)?.payload;
        self.entries[key.idx()] = None;
        self.free_list.push(key.idx());
        self.stale = true;
        Some(payload)
    }

    /// Replace the payload of a live object. Bounds are untouched, so the tree stays fresh.
    pub fn set_payload(&mut self, key: Key, payload: P) -> bool {
        match self.entry_mut(key) {
            Some(e) => {
                e.payload = payload;
                true
            }
            None => false,
        }
    }

    /// Bounds and payload of a live object.
    pub fn get(&self, key: Key) -> Option<(Aabb2D<T>, P)> {
        self.entry(key).map(|e| (e.aabb, e.payload))
    }

    /// Whether `key` refers to a live object.
    pub fn contains(&self, key: Key) -> bool {
        self.entry(key).is_some()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.entries.len() - self.free_list.len()
    }

    /// True if the set holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if objects changed since the last rebuild.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Limits used by [`rebuild`](Self::rebuild).
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// The spatial backend, for inspection.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Shape of the current tree.
    pub fn stats(&self) -> TreeStats {
        self.backend.stats()
    }

    /// Iterate over all live objects in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, P)> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, e)| {
            e.as_ref()
                .map(|e| (Key::new(i, e.generation), e.payload))
        })
    }

    /// Tear down the tree and build a new one from the current objects.
    ///
    /// Every box is validated first; on error the previous tree is left in place.
    pub fn rebuild(&mut self) -> Result<(), PartitionError> {
        self.config.validate()?;
        let mut items: Vec<Item<T>> = Vec::with_capacity(self.len());
        for (slot, e) in self.entries.iter().enumerate() {
            let Some(e) = e else {
                continue;
            };
            if !e.aabb.is_valid() {
                return Err(PartitionError::InvalidBounds { slot });
            }
            items.push((slot, e.aabb));
        }
        self.backend.build(&items, &self.config);
        self.stale = false;
        log::debug!(
            "rebuilt {} over {} objects: {:?}",
            core::any::type_name::<B>(),
            items.len(),
            self.backend.stats()
        );
        Ok(())
    }

    /// Drop the tree but keep the objects. The set becomes stale.
    pub fn clear_tree(&mut self) {
        self.backend.clear();
        self.selection.clear();
        self.stale = !self.is_empty();
    }

    /// Drop every object and the tree.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generations.clear();
        self.free_list.clear();
        self.selection.clear();
        self.backend.clear();
        self.stale = false;
    }

    /// Select every object whose bounds intersect `rect`, rebuilding first if stale.
    ///
    /// The result is kept until the next selection and is also available from
    /// [`selection`](Self::selection). It is ordered by tree traversal, not by slot.
    pub fn select_in(&mut self, rect: Aabb2D<T>) -> Result<&[(Key, P)], PartitionError> {
        if self.stale {
            self.rebuild()?;
        }
        self.selection.clear();
        for slot in self.backend.query_rect(rect) {
            if let Some(Some(e)) = self.entries.get(slot) {
                self.selection.push((Key::new(slot, e.generation), e.payload));
            }
        }
        log::trace!("selected {} objects in {rect:?}", self.selection.len());
        Ok(&self.selection)
    }

    /// Result of the last [`select_in`](Self::select_in).
    pub fn selection(&self) -> &[(Key, P)] {
        &self.selection
    }

    /// Query the last built tree for objects whose bounds intersect `rect`.
    ///
    /// On a stale tree, objects added or moved since the last build may be
    /// missed, but every result does intersect `rect`.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Key, P)> + '_ {
        self.resolve(self.backend.query_rect(rect), rect)
    }

    /// Query the last built tree for objects whose bounds contain the point.
    ///
    /// The same staleness caveat as [`query_rect`](Self::query_rect) applies.
    pub fn query_point(&self, x: T, y: T) -> impl Iterator<Item = (Key, P)> + '_ {
        self.resolve(self.backend.query_point(x, y), Aabb2D::new(x, y, x, y))
    }

    /// The object closest to the point, measured to the nearest edge of its box.
    ///
    /// Objects containing the point are at distance zero. Ties go to the lowest
    /// slot. This scans every object, so it does not depend on the tree being fresh.
    pub fn nearest_to(&self, x: T, y: T) -> Option<(Key, P)> {
        self.nearest_to_where(x, y, |_| true)
    }

    /// Like [`nearest_to`](Self::nearest_to), but only objects whose payload passes
    /// `filter` are considered.
    pub fn nearest_to_where(
        &self,
        x: T,
        y: T,
        mut filter: impl FnMut(&P) -> bool,
    ) -> Option<(Key, P)> {
        let mut best: Option<(T::Acc, Key, P)> = None;
        for (i, e) in self.entries.iter().enumerate() {
            let Some(e) = e else {
                continue;
            };
            if !filter(&e.payload) {
                continue;
            }
            let d = e.aabb.distance_sq_to_point(x, y);
            if best.as_ref().is_none_or(|(bd, _, _)| d < *bd) {
                best = Some((d, Key::new(i, e.generation), e.payload));
            }
        }
        best.map(|(_, k, p)| (k, p))
    }

    /// Map tree slots to live entries. A slot freed and reused since the last
    /// build holds a different box, so the current box is checked against `rect`.
    fn resolve<'a>(
        &'a self,
        slots: impl Iterator<Item = usize> + 'a,
        rect: Aabb2D<T>,
    ) -> impl Iterator<Item = (Key, P)> + 'a {
        slots.filter_map(move |i| {
            let e = self.entries.get(i)?.as_ref()?;
            e.aabb
                .intersects(&rect)
                .then(|| (Key::new(i, e.generation), e.payload))
        })
    }

    fn entry(&self, key: Key) -> Option<&Entry<T, P>> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        (e.generation == key.1).then_some(e)
    }

    fn entry_mut(&mut self, key: Key) -> Option<&mut Entry<T, P>> {
        let e = self.entries.get_mut(key.idx())?.as_mut()?;
        if e.generation != key.1 {
            return None;
        }
        Some(e)
    }
}

/// Set partitioned by [`Bsp`](crate::Bsp), the binary split along the widest spread of centers.
pub type BspSet<T, P> = PartitionSet<T, P, crate::backends::bsp::Bsp<T>>;

/// Set partitioned by [`QuadTree`](crate::QuadTree), the quad/binary hybrid around centroids.
pub type QtStorage<T, P> = PartitionSet<T, P, crate::backends::quadtree::QuadTree<T>>;

/// Set with no partitioning at all; queries scan every object.
pub type FlatSet<T, P> = PartitionSet<T, P, crate::backends::flatvec::FlatVec<T>>;

use crate::error::QuadtrieResult;
use common::shapes::{Aabb, Point};
use fxhash::FxHashMap;

/// Kind of entity stored in an index. Creatures and food are inserted in
/// separate passes each tick and counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Creature,
    Food,
}

/// Per-tick spatial index over entity positions.
///
/// The index is rebuilt from scratch every tick: `reset`, then one
/// `insert_entity` per live entity, then any number of box queries. Query
/// boxes are open on every side; an entity lying exactly on a box edge is
/// not returned.
pub trait SpatialIndex {
    fn reset(&mut self);

    fn insert_entity(
        &mut self,
        value: u32,
        position: Point,
        category: EntityCategory,
    ) -> QuadtrieResult<()>;

    /// Calls `f` once for every entity strictly inside the box.
    fn query_with(&self, begin: Point, end: Point, f: &mut dyn FnMut(u32));

    /// Appends matches to `out` without clearing it.
    fn query(&self, begin: Point, end: Point, out: &mut Vec<u32>) {
        self.query_with(begin, end, &mut |value| out.push(value));
    }

    fn query_box(&self, aabb: &Aabb, out: &mut Vec<u32>) {
        self.query(aabb.begin, aabb.end, out);
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn count_of(&self, category: EntityCategory) -> u64;
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryCounts {
    counts: FxHashMap<EntityCategory, u64>,
}

impl CategoryCounts {
    pub(crate) fn clear(&mut self) {
        self.counts.clear();
    }

    pub(crate) fn bump(&mut self, category: EntityCategory) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub(crate) fn get(&self, category: EntityCategory) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}

mod config;
mod core;
mod insert;
pub mod morton;
mod query_rect;
mod types;

pub use config::Config;
pub use types::{DISPLACED_ENTITY, EMPTY_ENTITY};

use crate::error::QuadtrieResult;
use crate::index::{CategoryCounts, EntityCategory, SpatialIndex};
use common::shapes::Point;
use types::*;

/// Sparse quad-trie keyed on Morton codes, rebuilt from scratch every tick.
///
/// Nodes live in a flat arena and refer to each other by index. A node holds
/// at most one entity; a second entity arriving at an occupied node pushes the
/// resident one down a level, so nodes only exist where entity keys diverge.
pub struct MortonTree {
    half_extent: f32,
    nodes: Vec<Node>,
    overflow: Vec<OverflowEntry>,
    counts: CategoryCounts,
    entity_count: usize,
    max_depth_reached: u32,
}

impl SpatialIndex for MortonTree {
    fn reset(&mut self) {
        MortonTree::reset(self);
    }

    fn insert_entity(
        &mut self,
        value: u32,
        position: Point,
        category: EntityCategory,
    ) -> QuadtrieResult<()> {
        MortonTree::insert_entity(self, value, position, category)
    }

    fn query_with(&self, begin: Point, end: Point, f: &mut dyn FnMut(u32)) {
        MortonTree::query_with(self, begin, end, f);
    }

    fn len(&self) -> usize {
        self.entity_count
    }

    fn count_of(&self, category: EntityCategory) -> u64 {
        self.counts.get(category)
    }
}

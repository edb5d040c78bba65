use super::*;
use crate::error::validate_half_extent;

impl MortonTree {
    pub fn new(world_half_extent: f32) -> QuadtrieResult<Self> {
        Self::new_with_config(Config::with_world_half_extent(world_half_extent))
    }

    pub fn new_with_config(config: Config) -> QuadtrieResult<Self> {
        validate_half_extent(config.world_half_extent)?;
        let mut nodes = Vec::with_capacity(config.node_reserve.max(1));
        nodes.push(Node::empty());
        let mut overflow = Vec::new();
        overflow.push(OverflowEntry::sentinel());
        Ok(Self {
            half_extent: config.world_half_extent,
            nodes,
            overflow,
            counts: CategoryCounts::default(),
            entity_count: 0,
            max_depth_reached: 0,
        })
    }

    /// Drops every entity and node, leaving a single empty root. Arena
    /// capacity is kept for the next tick.
    pub fn reset(&mut self) {
        log::debug!(
            "resetting morton tree: {} entities, {} nodes, {} overflowed, depth {}",
            self.entity_count,
            self.nodes.len(),
            self.overflow_count(),
            self.max_depth_reached
        );
        self.nodes.clear();
        self.nodes.push(Node::empty());
        self.overflow.clear();
        self.overflow.push(OverflowEntry::sentinel());
        self.counts.clear();
        self.entity_count = 0;
        self.max_depth_reached = 0;
    }

    pub fn world_half_extent(&self) -> f32 {
        self.half_extent
    }

    pub fn len(&self) -> usize {
        self.entity_count
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count == 0
    }

    pub fn count_of(&self, category: EntityCategory) -> u64 {
        self.counts.get(category)
    }

    /// Arena size, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Entities stored in max-depth overflow chains rather than in nodes.
    pub fn overflow_count(&self) -> usize {
        self.overflow.len() - 1
    }

    pub fn max_depth_reached(&self) -> u32 {
        self.max_depth_reached
    }

    /// Every stored entity with the (clamped) position it was indexed at.
    pub fn all_entities(&self, entities: &mut Vec<(u32, Point)>) {
        for node in self.nodes.iter().filter(|node| node.is_leaf()) {
            entities.push((node.value, node.position));
            let mut link = node.overflow;
            while link != NO_OVERFLOW {
                let entry = &self.overflow[link as usize];
                entities.push((entry.value, entry.position));
                link = entry.next;
            }
        }
    }
}

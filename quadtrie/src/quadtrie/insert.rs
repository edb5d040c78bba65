use super::*;
use crate::error::{validate_position, QuadtrieError};

impl MortonTree {
    /// Inserts a creature. See [`MortonTree::insert_entity`].
    pub fn insert(&mut self, value: u32, position: Point) -> QuadtrieResult<()> {
        self.insert_entity(value, position, EntityCategory::Creature)
    }

    /// Adds one entity for the current tick.
    ///
    /// Positions outside the world square are clamped onto its edge and the
    /// clamped position is what later queries test against. Non-finite
    /// positions and the two reserved marker ids are rejected.
    pub fn insert_entity(
        &mut self,
        value: u32,
        position: Point,
        category: EntityCategory,
    ) -> QuadtrieResult<()> {
        if is_reserved_entity(value) {
            log::warn!("rejecting reserved entity id {}", value);
            return Err(QuadtrieError::ReservedEntityId { value });
        }
        validate_position(position)?;
        let clamped = position.clamped(self.half_extent);
        if clamped != position {
            log::trace!(
                "clamped entity {} from ({}, {}) to ({}, {})",
                value,
                position.x,
                position.y,
                clamped.x,
                clamped.y
            );
        }
        let key = morton::quadrant_key(morton::encode(clamped, self.half_extent));
        self.insert_key(value, key, clamped);
        self.entity_count += 1;
        self.counts.bump(category);
        Ok(())
    }

    fn insert_key(&mut self, value: u32, mut key: u64, position: Point) {
        let mut node_idx = 0usize;
        let mut depth = 0u32;
        loop {
            let node = self.nodes[node_idx];
            if node.is_empty() {
                self.nodes[node_idx] = Node::leaf(value, key, position);
                return;
            }
            if node.is_leaf() {
                if depth == morton::MAX_DEPTH {
                    self.push_overflow(node_idx, value, position);
                    return;
                }
                // Push the resident entity one level down before branching.
                let resident = Node::leaf(node.value, node.tail << 2, node.position);
                let child = self.push_node(resident, depth + 1);
                let slot = &mut self.nodes[node_idx];
                slot.children[morton::quadrant(node.tail)] = child;
                slot.value = DISPLACED_ENTITY;
            }

            let quadrant = morton::quadrant(key);
            let child = self.nodes[node_idx].children[quadrant];
            if child == NO_CHILD {
                let child = self.push_node(Node::leaf(value, key << 2, position), depth + 1);
                self.nodes[node_idx].children[quadrant] = child;
                return;
            }
            node_idx = child as usize;
            key <<= 2;
            depth += 1;
        }
    }

    #[inline(always)]
    fn push_node(&mut self, node: Node, depth: u32) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(node);
        self.max_depth_reached = self.max_depth_reached.max(depth);
        idx
    }

    fn push_overflow(&mut self, node_idx: usize, value: u32, position: Point) {
        let idx = self.overflow.len() as u32;
        let node = &mut self.nodes[node_idx];
        log::trace!(
            "entity {} shares the max-depth cell of entity {}, chaining into overflow",
            value,
            node.value
        );
        self.overflow.push(OverflowEntry {
            value,
            position,
            next: node.overflow,
        });
        node.overflow = idx;
    }
}

use crate::error::{
    validate_cell_size, validate_half_extent, validate_position, QuadtrieError, QuadtrieResult,
};
use crate::index::{CategoryCounts, EntityCategory, SpatialIndex};
use crate::quadtrie::{Config, DISPLACED_ENTITY, EMPTY_ENTITY};
use common::shapes::{Aabb, Point};

/// Fixed-resolution hash grid over the world square.
///
/// Simpler than [`crate::quadtrie::MortonTree`] and with the same reset,
/// insert and open-box query contract. Query cost grows with the number of
/// cells the box covers, so it suits boxes close to the cell size.
pub struct UniformGrid {
    half_extent: f32,
    cell_size: f32,
    grid_size: usize,
    cells: Vec<Vec<(u32, Point)>>,
    counts: CategoryCounts,
    entity_count: usize,
}

impl UniformGrid {
    pub fn new(world_half_extent: f32, cell_size: f32) -> QuadtrieResult<Self> {
        validate_half_extent(world_half_extent)?;
        validate_cell_size(cell_size)?;
        let grid_size = ((world_half_extent * 2.0) / cell_size) as usize + 1;
        Ok(Self {
            half_extent: world_half_extent,
            cell_size,
            grid_size,
            cells: vec![Vec::new(); grid_size * grid_size],
            counts: CategoryCounts::default(),
            entity_count: 0,
        })
    }

    pub fn new_with_config(config: &Config) -> QuadtrieResult<Self> {
        Self::new(config.world_half_extent, config.cell_size())
    }

    pub fn reset(&mut self) {
        log::debug!(
            "resetting uniform grid: {} entities in {}x{} cells",
            self.entity_count,
            self.grid_size,
            self.grid_size
        );
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        self.counts.clear();
        self.entity_count = 0;
    }

    pub fn insert(&mut self, value: u32, position: Point) -> QuadtrieResult<()> {
        self.insert_entity(value, position, EntityCategory::Creature)
    }

    /// Same contract as the trie: out-of-world positions are clamped, non-finite
    /// ones and the reserved marker ids are rejected.
    pub fn insert_entity(
        &mut self,
        value: u32,
        position: Point,
        category: EntityCategory,
    ) -> QuadtrieResult<()> {
        if value == EMPTY_ENTITY || value == DISPLACED_ENTITY {
            log::warn!("rejecting reserved entity id {}", value);
            return Err(QuadtrieError::ReservedEntityId { value });
        }
        validate_position(position)?;
        let clamped = position.clamped(self.half_extent);
        let idx = self.cell_coord(clamped.y) * self.grid_size + self.cell_coord(clamped.x);
        self.cells[idx].push((value, clamped));
        self.entity_count += 1;
        self.counts.bump(category);
        Ok(())
    }

    pub fn query(&self, begin: Point, end: Point, out: &mut Vec<u32>) {
        self.query_with(begin, end, |value| out.push(value));
    }

    pub fn query_with<F>(&self, begin: Point, end: Point, mut f: F)
    where
        F: FnMut(u32),
    {
        let query = Aabb::new(begin, end);
        if query.is_empty() || self.entity_count == 0 {
            return;
        }
        let (x0, x1) = (self.cell_coord(begin.x), self.cell_coord(end.x));
        let (y0, y1) = (self.cell_coord(begin.y), self.cell_coord(end.y));
        for y in y0..=y1 {
            let row = y * self.grid_size;
            for cell in &self.cells[row + x0..=row + x1] {
                for (value, position) in cell {
                    if query.strictly_contains(position) {
                        f(*value);
                    }
                }
            }
        }
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

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline(always)]
    fn cell_coord(&self, coordinate: f32) -> usize {
        let clamped = coordinate.clamp(-self.half_extent, self.half_extent);
        let cell = ((clamped + self.half_extent) / self.cell_size) as usize;
        cell.min(self.grid_size - 1)
    }
}

impl SpatialIndex for UniformGrid {
    fn reset(&mut self) {
        UniformGrid::reset(self);
    }

    fn insert_entity(
        &mut self,
        value: u32,
        position: Point,
        category: EntityCategory,
    ) -> QuadtrieResult<()> {
        UniformGrid::insert_entity(self, value, position, category)
    }

    fn query_with(&self, begin: Point, end: Point, f: &mut dyn FnMut(u32)) {
        UniformGrid::query_with(self, begin, end, f);
    }

    fn len(&self) -> usize {
        self.entity_count
    }

    fn count_of(&self, category: EntityCategory) -> u64 {
        self.counts.get(category)
    }
}

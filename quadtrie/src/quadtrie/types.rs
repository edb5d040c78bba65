use common::shapes::Point;
use smallvec::SmallVec;

/// Entity slot of a node that holds nothing. Only the root is ever empty.
pub const EMPTY_ENTITY: u32 = u32::MAX;
/// Entity slot of a node whose entity was pushed down into a child.
pub const DISPLACED_ENTITY: u32 = u32::MAX - 1;

/// Child slot marker; the root is nobody's child so index 0 is free to mean "none".
pub(crate) const NO_CHILD: u32 = 0;
pub(crate) const NO_OVERFLOW: u32 = 0;

// Bounds of a query box not yet proven to hold for a whole subtree.
pub(crate) const FLAG_LEFT: u8 = 0b0001;
pub(crate) const FLAG_BOTTOM: u8 = 0b0010;
pub(crate) const FLAG_RIGHT: u8 = 0b0100;
pub(crate) const FLAG_TOP: u8 = 0b1000;
pub(crate) const FLAGS_ALL: u8 = FLAG_LEFT | FLAG_BOTTOM | FLAG_RIGHT | FLAG_TOP;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) value: u32,
    /// Unconsumed, left-aligned key bits of the resident entity.
    pub(crate) tail: u64,
    pub(crate) position: Point,
    pub(crate) children: [u32; 4],
    /// Head of the chain of further entities sharing this max-depth cell.
    pub(crate) overflow: u32,
}

impl Node {
    #[inline(always)]
    pub(crate) fn empty() -> Self {
        Self {
            value: EMPTY_ENTITY,
            tail: 0,
            position: Point::default(),
            children: [NO_CHILD; 4],
            overflow: NO_OVERFLOW,
        }
    }

    #[inline(always)]
    pub(crate) fn leaf(value: u32, tail: u64, position: Point) -> Self {
        Self {
            value,
            tail,
            position,
            children: [NO_CHILD; 4],
            overflow: NO_OVERFLOW,
        }
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.value == EMPTY_ENTITY
    }

    #[inline(always)]
    pub(crate) fn is_displaced(&self) -> bool {
        self.value == DISPLACED_ENTITY
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        !self.is_empty() && !self.is_displaced()
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct OverflowEntry {
    pub(crate) value: u32,
    pub(crate) position: Point,
    pub(crate) next: u32,
}

impl OverflowEntry {
    pub(crate) fn sentinel() -> Self {
        Self {
            value: EMPTY_ENTITY,
            position: Point::default(),
            next: NO_OVERFLOW,
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct QueryFrame {
    pub(crate) node: u32,
    pub(crate) flags: u8,
    pub(crate) begin: u64,
    pub(crate) end: u64,
}

// Depth-first with at most three pending siblings per level.
pub(crate) type QueryStack = SmallVec<[QueryFrame; 96]>;

#[inline(always)]
pub(crate) fn is_reserved_entity(value: u32) -> bool {
    value == EMPTY_ENTITY || value == DISPLACED_ENTITY
}

use common::shapes::Point;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtrieError {
    InvalidWorldHalfExtent { half_extent: f32 },
    InvalidCellSize { cell_size: f32 },
    NonFinitePosition { x: f32, y: f32 },
    ReservedEntityId { value: u32 },
}

pub type QuadtrieResult<T> = Result<T, QuadtrieError>;

impl fmt::Display for QuadtrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtrieError::InvalidWorldHalfExtent { half_extent } => {
                write!(
                    f,
                    "world half extent must be finite and positive (half_extent: {})",
                    half_extent
                )
            }
            QuadtrieError::InvalidCellSize { cell_size } => {
                write!(
                    f,
                    "grid cell size must be finite and positive (cell_size: {})",
                    cell_size
                )
            }
            QuadtrieError::NonFinitePosition { x, y } => {
                write!(f, "entity position must be finite (x: {}, y: {})", x, y)
            }
            QuadtrieError::ReservedEntityId { value } => {
                write!(
                    f,
                    "entity id {} is reserved for internal node markers",
                    value
                )
            }
        }
    }
}

impl std::error::Error for QuadtrieError {}

pub(crate) fn validate_half_extent(half_extent: f32) -> QuadtrieResult<()> {
    if !(half_extent.is_finite() && half_extent > 0.0) {
        return Err(QuadtrieError::InvalidWorldHalfExtent { half_extent });
    }
    Ok(())
}

pub(crate) fn validate_cell_size(cell_size: f32) -> QuadtrieResult<()> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(QuadtrieError::InvalidCellSize { cell_size });
    }
    Ok(())
}

pub(crate) fn validate_position(position: Point) -> QuadtrieResult<()> {
    if !position.is_finite() {
        let Point { x, y } = position;
        log::warn!("rejecting entity at non-finite position ({}, {})", x, y);
        return Err(QuadtrieError::NonFinitePosition { x, y });
    }
    Ok(())
}

pub mod error;
pub mod grid;
pub mod index;
pub mod quadtrie;

pub use error::{QuadtrieError, QuadtrieResult};
pub use index::{EntityCategory, SpatialIndex};

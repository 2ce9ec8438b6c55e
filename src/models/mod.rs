pub mod point;
pub mod table;

pub use point::{GeographicBounds, Point, PointGeometry};
pub use table::{CanonicalTable, Cell, RawTable, TableSlice};

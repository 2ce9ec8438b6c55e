pub mod cache;
pub mod geometry;
pub mod normalizer;
pub mod session;

pub use cache::{content_digest, MemoCache};
pub use geometry::GeometryDeriver;
pub use normalizer::{ColumnMapping, NormalizedTable, Normalizer};
pub use session::{LoadedDataset, Session};

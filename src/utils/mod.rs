pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{is_null_value, median, parse_coordinate};
pub use filename::generate_default_points_filename;
pub use progress::ProgressReporter;

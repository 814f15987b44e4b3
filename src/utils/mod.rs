pub mod constants;
pub mod coordinates;
pub mod progress;
pub mod text;

pub use constants::*;
pub use coordinates::{ensure_finite, parse_bounds, parse_coordinate};
pub use progress::ProgressReporter;
pub use text::capitalize_words;

pub mod points;
pub mod probabilities;

pub use points::synthesize_points;
pub use probabilities::synthesize_prediction;

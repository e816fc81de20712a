//! Data repair applied to an instance before routing.

mod normalize;

pub use normalize::{normalize_demands, DemandAdjustment, NormalizedInstance};

//! Feasibility checking and route measurement.
//!
//! - [`check_fleet_capacity`] — demand-versus-fleet admission test run
//!   before any routing
//! - [`RouteEvaluator`] — builds tours with load and distance filled in, and
//!   audits existing routes against a live instance

mod evaluator;
mod feasibility;

pub use evaluator::RouteEvaluator;
pub use feasibility::{check_fleet_capacity, FleetCapacity};

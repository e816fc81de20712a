//! Domain model types for multi-depot routing.
//!
//! Provides depot and customer nodes located by latitude and longitude, the
//! problem instance that owns them, closed depot tours, and the solution
//! that aggregates one planning request's routes.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::ProblemInstance;
pub use node::{Node, NodeId, NodeKind, ServiceWindow};
pub use route::Route;
pub use solution::{DepotSummary, RouteId, Solution, Violation, ViolationType};

//! # u-depot-routing
//!
//! Multi-depot capacitated vehicle routing over geographic coordinates:
//! a fleet capacity admission check, demand normalization, nearest-depot
//! clustering and greedy nearest-neighbor tours per depot.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, ProblemInstance, Route, Solution)
//! - [`distance`] — Haversine distance and id-keyed distance matrix
//! - [`evaluation`] — Fleet capacity check, route measurement and audit
//! - [`preprocessing`] — Minimum-demand normalization
//! - [`constructive`] — Nearest-depot clustering and nearest-neighbor tours
//! - [`planner`] — End-to-end planning pipeline
//! - [`config`] — Planner configuration and capacity resolution
//! - [`document`] — JSON instance documents and the response contract
//! - [`error`] — Error type
//!
//! ## Quick start
//!
//! ```
//! use u_depot_routing::distance::GeoPoint;
//! use u_depot_routing::models::{Node, ProblemInstance};
//! use u_depot_routing::planner::plan_routes;
//!
//! let instance = ProblemInstance::from_nodes([
//!     Node::depot(1, "North", GeoPoint::new(40.45, -3.70), 1),
//!     Node::depot(2, "South", GeoPoint::new(40.40, -3.70), 1),
//!     Node::customer(10, "a", GeoPoint::new(40.44, -3.70), 250.0),
//!     Node::customer(11, "b", GeoPoint::new(40.41, -3.70), 300.0),
//! ])
//! .unwrap();
//!
//! let outcome = plan_routes(&instance, Some(1000.0)).unwrap();
//! assert_eq!(outcome.solution.num_routes(), 2);
//! assert_eq!(outcome.solution.route_of(11), Some(2));
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod planner;
pub mod preprocessing;

pub use error::RoutingError;

//! Route construction for multi-depot instances.
//!
//! - [`cluster_by_nearest_depot`] — assigns every customer to its closest
//!   depot, O(n·d)
//! - [`nearest_neighbor_routes`] — capacity-constrained nearest-neighbor
//!   tours over each depot's cluster, O(n²)

mod clustering;
mod nearest_neighbor;

pub use clustering::{cluster_by_nearest_depot, DepotClusters};
pub use nearest_neighbor::{nearest_neighbor_routes, ConstructedRoutes};

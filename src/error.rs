//! Error types raised while planning routes.

use thiserror::Error;

use crate::models::NodeId;

/// Errors raised while building or planning a routing instance.
///
/// Every variant is fatal to the request that produced it: a planner never
/// returns routes alongside an error.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Total declared customer demand exceeds the declared fleet capacity.
    #[error("total demand {total_demand} exceeds total fleet capacity {total_capacity}")]
    InfeasibleDemand {
        /// Sum of declared customer demands.
        total_demand: f64,
        /// Sum of `vehicles × capacity` over all depots.
        total_capacity: f64,
    },
    /// The instance has no depot to cluster customers around.
    #[error("no depots available to assign customers to")]
    NoDepotsAvailable,
    /// Some customers could not be placed on any route (strict policy only).
    #[error("{} customer(s) left unserved: {unserved:?}", unserved.len())]
    PartialService {
        /// Customers left out of every route, ascending by id.
        unserved: Vec<NodeId>,
    },
    /// Two nodes share the same identifier.
    #[error("node {id} is already present in the instance")]
    DuplicateNode {
        /// Identifier that was inserted twice.
        id: NodeId,
    },
    /// A node carries unusable data.
    #[error("node {id} is invalid: {reason}")]
    InvalidNode {
        /// Identifier of the offending node.
        id: NodeId,
        /// What is wrong with it.
        reason: String,
    },
    /// Reading or writing an instance document failed.
    #[error("invalid instance document")]
    Document(#[from] serde_json::Error),
}

impl RoutingError {
    /// Human-readable reason reported to the caller in place of routes.
    pub fn reason(&self) -> String {
        match self {
            Self::Document(source) => format!("{self}: {source}"),
            _ => self.to_string(),
        }
    }
}

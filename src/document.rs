//! JSON instance documents and the planning response contract.
//!
//! An instance document holds the node set, the last plan's routes and its
//! total distance:
//!
//! ```json
//! {
//!   "totalDistance": 0,
//!   "status": "NotRun",
//!   "nodes": {
//!     "1":  { "name": "North", "demand": 0, "E": 0, "L": 1440, "lat": 40.45, "lon": -3.70, "depot": true, "vehicles": 2 },
//!     "10": { "name": "Shop A", "demand": 200, "E": 0, "L": 480, "lat": 40.4168, "lon": -3.7038 }
//!   },
//!   "routes": {}
//! }
//! ```
//!
//! Node ids are string keys in JSON and integers in Rust.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::distance::GeoPoint;
use crate::error::RoutingError;
use crate::models::{
    Node, NodeId, NodeKind, ProblemInstance, Route, RouteId, ServiceWindow, Solution,
};
use crate::planner::{PlanOutcome, RoutePlanner};

/// Status of a document whose routes were never computed.
pub const STATUS_NOT_RUN: &str = "NotRun";

/// Status of a document whose routes come from the greedy planner.
pub const STATUS_HEURISTIC: &str = "Heuristic";

/// Latest service time used when a record gives none (end of day).
const DEFAULT_LATEST: f64 = 1440.0;

/// One node as stored in an instance document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Units to deliver; 0 for depots.
    #[serde(default)]
    pub demand: f64,
    /// Earliest service time in minutes.
    #[serde(rename = "E", default)]
    pub earliest: f64,
    /// Latest service time in minutes.
    #[serde(rename = "L", default = "default_latest")]
    pub latest: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Whether this node is a depot.
    #[serde(default, skip_serializing_if = "is_false")]
    pub depot: bool,
    /// Declared fleet size of a depot; 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<u32>,
}

fn default_latest() -> f64 {
    DEFAULT_LATEST
}

fn default_status() -> String {
    STATUS_NOT_RUN.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl NodeRecord {
    /// Converts the record into a node with the given id.
    ///
    /// A customer's window is kept only when `E <= L`.
    pub fn to_node(&self, id: NodeId) -> Node {
        let position = GeoPoint::new(self.lat, self.lon);
        if self.depot {
            return Node::depot(id, self.name.clone(), position, self.vehicles.unwrap_or(1));
        }
        let node = Node::customer(id, self.name.clone(), position, self.demand);
        match ServiceWindow::new(self.earliest, self.latest) {
            Some(window) => node.with_window(window),
            None => node,
        }
    }

    /// Builds the record of a node.
    pub fn from_node(node: &Node) -> Self {
        let (earliest, latest) = node
            .window()
            .map_or((0.0, DEFAULT_LATEST), |w| (w.earliest(), w.latest()));
        let (depot, vehicles) = match node.kind() {
            NodeKind::Depot { vehicles } => (true, Some(*vehicles)),
            NodeKind::Customer { .. } => (false, None),
        };
        Self {
            name: node.name().to_string(),
            demand: node.demand(),
            earliest,
            latest,
            lat: node.position().lat(),
            lon: node.position().lon(),
            depot,
            vehicles,
        }
    }
}

/// A persisted routing instance together with its last computed plan.
///
/// # Examples
///
/// ```
/// use u_depot_routing::document::InstanceDocument;
/// use u_depot_routing::planner::RoutePlanner;
///
/// let json = r#"{
///     "nodes": {
///         "1":  { "name": "North", "lat": 40.45, "lon": -3.70, "depot": true, "vehicles": 1 },
///         "10": { "name": "Shop", "demand": 50, "lat": 40.44, "lon": -3.70 }
///     }
/// }"#;
///
/// let mut doc = InstanceDocument::from_json(json).unwrap();
/// assert_eq!(doc.status, "NotRun");
///
/// doc.plan_with(&RoutePlanner::default(), true).unwrap();
/// assert_eq!(doc.status, "Heuristic");
/// assert_eq!(doc.routes[&1].sequence(), &[1, 10, 1]);
/// assert_eq!(doc.nodes[&10].demand, 200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDocument {
    /// Total distance of `routes` in kilometers.
    #[serde(default)]
    pub total_distance: f64,
    /// [`STATUS_NOT_RUN`] or [`STATUS_HEURISTIC`].
    #[serde(default = "default_status")]
    pub status: String,
    /// Depots and customers keyed by id.
    pub nodes: BTreeMap<NodeId, NodeRecord>,
    /// Routes of the last plan keyed by route id.
    #[serde(default)]
    pub routes: BTreeMap<RouteId, Route>,
}

impl Default for InstanceDocument {
    fn default() -> Self {
        Self {
            total_distance: 0.0,
            status: default_status(),
            nodes: BTreeMap::new(),
            routes: BTreeMap::new(),
        }
    }
}

impl InstanceDocument {
    /// Parses a document. A document without `nodes` is rejected.
    pub fn from_json(json: &str) -> Result<Self, RoutingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the document as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, RoutingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a document holding the nodes of `instance` and no plan.
    pub fn from_instance(instance: &ProblemInstance) -> Self {
        Self {
            nodes: instance
                .nodes()
                .map(|node| (node.id(), NodeRecord::from_node(node)))
                .collect(),
            ..Self::default()
        }
    }

    /// Builds the problem instance described by `nodes`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidNode`] for unusable coordinates, demands or
    /// fleet sizes.
    pub fn to_instance(&self) -> Result<ProblemInstance, RoutingError> {
        ProblemInstance::from_nodes(self.nodes.iter().map(|(&id, record)| record.to_node(id)))
    }

    /// Stores a plan's routes and total distance and marks the document as
    /// solved.
    ///
    /// With `persist_normalized`, customer demands raised during planning
    /// are written back into `nodes`.
    pub fn record_plan(&mut self, outcome: &PlanOutcome, persist_normalized: bool) {
        self.routes = outcome.solution.routes().clone();
        self.total_distance = outcome.solution.total_distance();
        self.status = STATUS_HEURISTIC.to_string();

        if persist_normalized {
            for adjustment in &outcome.adjustments {
                if let Some(record) = self.nodes.get_mut(&adjustment.customer) {
                    record.demand = adjustment.normalized;
                }
            }
        }
    }

    /// Plans this document's instance and records the result.
    ///
    /// On error the document is left unchanged.
    pub fn plan_with(
        &mut self,
        planner: &RoutePlanner,
        persist_normalized: bool,
    ) -> Result<PlanOutcome, RoutingError> {
        let outcome = planner.plan(&self.to_instance()?)?;
        self.record_plan(&outcome, persist_normalized);
        Ok(outcome)
    }
}

/// Output of one planning request: routes and total distance, or the
/// reason no routes were produced.
///
/// ```json
/// { "routes": { "1": { "sequence": [1, 10, 1], … } }, "totalKm": 6.0 }
/// { "error": "total demand 1500 exceeds total fleet capacity 800" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanResponse {
    /// Routes keyed by sequential id, plus `totalKm`.
    Success(Solution),
    /// Why planning failed.
    Failure {
        /// Human-readable reason.
        error: String,
    },
}

impl PlanResponse {
    /// Converts a planner result into the response contract.
    pub fn from_result(result: Result<PlanOutcome, RoutingError>) -> Self {
        match result {
            Ok(outcome) => Self::Success(outcome.solution),
            Err(err) => Self::Failure {
                error: err.reason(),
            },
        }
    }

    /// Returns `true` if routes were produced.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

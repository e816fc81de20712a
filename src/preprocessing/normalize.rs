//! Minimum-demand normalization.

use serde::Serialize;

use crate::models::{NodeId, ProblemInstance};

/// A customer whose demand was raised to the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandAdjustment {
    /// Customer id.
    pub customer: NodeId,
    /// Demand as supplied.
    pub declared: f64,
    /// Demand used for routing.
    pub normalized: f64,
}

/// A normalized copy of an instance and the changes made to it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInstance {
    /// Instance with every customer demand at or above the floor.
    pub instance: ProblemInstance,
    /// Customers whose demand was raised, ascending by id.
    pub adjustments: Vec<DemandAdjustment>,
}

/// Raises every customer demand below `floor` to `floor`.
///
/// The input is left untouched; callers that want the repaired values in
/// their own records apply [`NormalizedInstance::adjustments`] themselves.
/// Running this on an already normalized instance changes nothing.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::GeoPoint;
/// use u_depot_routing::models::{Node, ProblemInstance};
/// use u_depot_routing::preprocessing::normalize_demands;
///
/// let instance = ProblemInstance::from_nodes([
///     Node::depot(1, "d", GeoPoint::new(40.45, -3.70), 1),
///     Node::customer(10, "small", GeoPoint::new(40.44, -3.70), 50.0),
///     Node::customer(11, "large", GeoPoint::new(40.43, -3.70), 300.0),
/// ])
/// .unwrap();
///
/// let normalized = normalize_demands(&instance, 200.0);
/// assert_eq!(normalized.instance.demand(10), Some(200.0));
/// assert_eq!(normalized.instance.demand(11), Some(300.0));
/// assert_eq!(normalized.adjustments.len(), 1);
/// assert_eq!(instance.demand(10), Some(50.0));
/// ```
pub fn normalize_demands(instance: &ProblemInstance, floor: f64) -> NormalizedInstance {
    let mut adjustments = Vec::new();
    let repaired = instance.map_nodes(|node| {
        if node.is_customer() && node.demand() < floor {
            log::debug!(
                "customer {} demand {} raised to {floor}",
                node.id(),
                node.demand()
            );
            adjustments.push(DemandAdjustment {
                customer: node.id(),
                declared: node.demand(),
                normalized: floor,
            });
            node.clone().with_demand(floor)
        } else {
            node.clone()
        }
    });

    NormalizedInstance {
        instance: repaired,
        adjustments,
    }
}

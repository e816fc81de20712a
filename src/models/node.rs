//! Depot and customer nodes.

use crate::distance::GeoPoint;
use crate::error::RoutingError;

/// Identifier of a node, unique within a problem instance.
pub type NodeId = u64;

/// Earliest/latest service bounds of a customer, in minutes.
///
/// Carried with the customer data but not enforced during route
/// construction.
///
/// # Examples
///
/// ```
/// use u_depot_routing::models::ServiceWindow;
///
/// let w = ServiceWindow::new(0.0, 480.0).unwrap();
/// assert!(w.contains(120.0));
/// assert!(ServiceWindow::new(500.0, 480.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceWindow {
    earliest: f64,
    latest: f64,
}

impl ServiceWindow {
    /// Creates a service window.
    ///
    /// Returns `None` if `earliest > latest` or either value is non-finite.
    pub fn new(earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || !latest.is_finite() || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest service time.
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Latest service time.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.earliest && time <= self.latest
    }
}

/// Role-specific data of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Origin and destination of routes, owning a fleet.
    Depot {
        /// Declared number of vehicles based at this depot.
        vehicles: u32,
    },
    /// Demand point to be visited by at most one route.
    Customer {
        /// Units to deliver.
        demand: f64,
        /// Service bounds, if any.
        window: Option<ServiceWindow>,
    },
}

/// A depot or a customer located by latitude and longitude.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::GeoPoint;
/// use u_depot_routing::models::Node;
///
/// let depot = Node::depot(1, "North", GeoPoint::new(40.45, -3.70), 2);
/// assert!(depot.is_depot());
/// assert_eq!(depot.fleet_size(), Some(2));
/// assert_eq!(depot.demand(), 0.0);
///
/// let shop = Node::customer(10, "Shop A", GeoPoint::new(40.4168, -3.7038), 200.0);
/// assert!(shop.is_customer());
/// assert_eq!(shop.demand(), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    name: String,
    position: GeoPoint,
    kind: NodeKind,
}

impl Node {
    /// Creates a depot with the given declared fleet size.
    pub fn depot(id: NodeId, name: impl Into<String>, position: GeoPoint, vehicles: u32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            kind: NodeKind::Depot { vehicles },
        }
    }

    /// Creates a customer with the given demand and no service window.
    pub fn customer(id: NodeId, name: impl Into<String>, position: GeoPoint, demand: f64) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            kind: NodeKind::Customer {
                demand,
                window: None,
            },
        }
    }

    /// Sets the service window. Has no effect on depots.
    pub fn with_window(mut self, window: ServiceWindow) -> Self {
        if let NodeKind::Customer { window: w, .. } = &mut self.kind {
            *w = Some(window);
        }
        self
    }

    /// Replaces the demand. Has no effect on depots.
    pub fn with_demand(mut self, demand: f64) -> Self {
        if let NodeKind::Customer { demand: d, .. } = &mut self.kind {
            *d = demand;
        }
        self
    }

    /// Node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic position.
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Role-specific data.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` for depots.
    pub fn is_depot(&self) -> bool {
        matches!(self.kind, NodeKind::Depot { .. })
    }

    /// Returns `true` for customers.
    pub fn is_customer(&self) -> bool {
        matches!(self.kind, NodeKind::Customer { .. })
    }

    /// Customer demand; zero for depots.
    pub fn demand(&self) -> f64 {
        match self.kind {
            NodeKind::Customer { demand, .. } => demand,
            NodeKind::Depot { .. } => 0.0,
        }
    }

    /// Declared fleet size; `None` for customers.
    pub fn fleet_size(&self) -> Option<u32> {
        match self.kind {
            NodeKind::Depot { vehicles } => Some(vehicles),
            NodeKind::Customer { .. } => None,
        }
    }

    /// Service window; `None` for depots and customers without one.
    pub fn window(&self) -> Option<&ServiceWindow> {
        match &self.kind {
            NodeKind::Customer { window, .. } => window.as_ref(),
            NodeKind::Depot { .. } => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), RoutingError> {
        let invalid = |reason: String| RoutingError::InvalidNode {
            id: self.id,
            reason,
        };
        if !self.position.is_valid() {
            return Err(invalid(format!(
                "coordinates ({}, {}) are out of range",
                self.position.lat(),
                self.position.lon()
            )));
        }
        match self.kind {
            NodeKind::Depot { vehicles: 0 } => {
                Err(invalid("depot must have at least one vehicle".to_string()))
            }
            NodeKind::Customer { demand, .. } if !demand.is_finite() || demand < 0.0 => {
                Err(invalid(format!("demand {demand} is not a non-negative number")))
            }
            _ => Ok(()),
        }
    }
}

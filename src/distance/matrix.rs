//! Dense haversine distance matrix keyed by node id.

use std::collections::HashMap;

use super::{haversine_km, GeoPoint};
use crate::models::{NodeId, ProblemInstance};

/// A dense n×n distance matrix stored in row-major order.
///
/// Rows and columns follow the order in which ids were supplied; for a
/// matrix built from a [`ProblemInstance`] that is ascending id order.
/// Distances are in kilometers.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::{DistanceMatrix, GeoPoint};
///
/// let dm = DistanceMatrix::from_points(&[
///     (1, GeoPoint::new(40.45, -3.70)),
///     (10, GeoPoint::new(40.4168, -3.7038)),
/// ]);
/// assert_eq!(dm.size(), 2);
/// assert_eq!(dm.get(1, 1), 0.0);
/// assert_eq!(dm.get(1, 10), dm.get(10, 1));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the matrix for every node of an instance.
    pub fn from_instance(instance: &ProblemInstance) -> Self {
        let points: Vec<(NodeId, GeoPoint)> = instance
            .nodes()
            .map(|node| (node.id(), node.position()))
            .collect();
        Self::from_points(&points)
    }

    /// Computes the matrix for an explicit list of located ids.
    ///
    /// A repeated id keeps its first position.
    pub fn from_points(points: &[(NodeId, GeoPoint)]) -> Self {
        let mut ids = Vec::with_capacity(points.len());
        let mut positions = Vec::with_capacity(points.len());
        let mut index = HashMap::with_capacity(points.len());
        for &(id, position) in points {
            if index.contains_key(&id) {
                continue;
            }
            index.insert(id, ids.len());
            ids.push(id);
            positions.push(position);
        }

        let n = ids.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(positions[i], positions[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        Self { ids, index, data }
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id is not part of this matrix.
    pub fn get(&self, from: NodeId, to: NodeId) -> f64 {
        self.data[self.index[&from] * self.size() + self.index[&to]]
    }

    /// Returns the distance from `from` to `to`, or `None` for unknown ids.
    pub fn try_get(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let i = *self.index.get(&from)?;
        let j = *self.index.get(&to)?;
        Some(self.data[i * self.size() + j])
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    /// Ids covered by this matrix, in row order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Returns `true` if the id has a row in this matrix.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest<I>(&self, from: NodeId, candidates: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        candidates
            .into_iter()
            .map(|id| (id, self.get(from, id)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Sum of consecutive legs along `sequence`.
    pub fn path_length(&self, sequence: &[NodeId]) -> f64 {
        sequence.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            (1, GeoPoint::new(0.0, 0.0)),
            (2, GeoPoint::new(0.0, 1.0)),
            (3, GeoPoint::new(0.0, 2.0)),
            (4, GeoPoint::new(0.0, -1.0)),
        ])
    }

    #[test]
    fn test_from_points() {
        let dm = sample();
        assert_eq!(dm.size(), 4);
        assert_eq!(dm.ids(), &[1, 2, 3, 4]);
        assert_eq!(dm.get(1, 1), 0.0);
        assert!((dm.get(1, 3) - 2.0 * dm.get(1, 2)).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let dm = sample();
        for &a in dm.ids() {
            for &b in dm.ids() {
                assert_eq!(dm.get(a, b), dm.get(b, a));
            }
        }
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let dm = DistanceMatrix::from_points(&[
            (1, GeoPoint::new(0.0, 0.0)),
            (2, GeoPoint::new(0.0, 1.0)),
            (1, GeoPoint::new(10.0, 10.0)),
        ]);
        assert_eq!(dm.size(), 2);
        assert!(dm.get(1, 2) < 112.0);
    }

    #[test]
    fn test_try_get_unknown() {
        let dm = sample();
        assert!(dm.try_get(1, 99).is_none());
        assert!(dm.try_get(1, 2).is_some());
        assert!(!dm.contains(99));
    }

    #[test]
    fn test_nearest() {
        let dm = sample();
        assert_eq!(dm.nearest(1, [3, 2]), Some(2));
        assert_eq!(dm.nearest(1, Vec::new()), None);
    }

    #[test]
    fn test_nearest_tie_goes_to_first_candidate() {
        let dm = sample();
        // 2 and 4 are both one degree of longitude away from 1
        assert_eq!(dm.nearest(1, [4, 2]), Some(4));
        assert_eq!(dm.nearest(1, [2, 4]), Some(2));
    }

    #[test]
    fn test_path_length() {
        let dm = sample();
        let closed = dm.path_length(&[1, 2, 3, 1]);
        let expected = dm.get(1, 2) + dm.get(2, 3) + dm.get(3, 1);
        assert!((closed - expected).abs() < 1e-12);
        assert_eq!(dm.path_length(&[1]), 0.0);
    }
}

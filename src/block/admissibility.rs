//! Admissibility criteria deciding which cluster pairs are far-field.

use crate::cluster::ClusterNode;

/// Decides whether a (row cluster, column cluster) pair may be compressed.
pub trait Admissibility {
    fn is_admissible(&self, row: &ClusterNode, column: &ClusterNode) -> bool;
}

impl<F> Admissibility for F
where
    F: Fn(&ClusterNode, &ClusterNode) -> bool,
{
    fn is_admissible(&self, row: &ClusterNode, column: &ClusterNode) -> bool {
        self(row, column)
    }
}

/// Standard (strong) admissibility:
/// `min(diam(r), diam(c)) <= eta * dist(r, c)`.
///
/// Clusters without bounding boxes are never admissible, and neither are
/// touching clusters (distance zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaAdmissibility {
    pub eta: f64,
}

impl EtaAdmissibility {
    pub fn new(eta: f64) -> Self {
        Self { eta }
    }
}

impl Default for EtaAdmissibility {
    fn default() -> Self {
        Self { eta: 1.0 }
    }
}

impl Admissibility for EtaAdmissibility {
    fn is_admissible(&self, row: &ClusterNode, column: &ClusterNode) -> bool {
        let (Some(r), Some(c)) = (row.bounding_box(), column.bounding_box()) else {
            return false;
        };
        let dist = r.distance(c);
        dist > 0.0 && r.diameter().min(c.diameter()) <= self.eta * dist
    }
}

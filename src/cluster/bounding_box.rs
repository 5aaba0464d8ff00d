//! Axis-aligned bounding boxes for DOFs and clusters.

/// Axis-aligned box in 3-D. Lower-dimensional geometry pads with zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
}

impl BoundingBox {
    pub fn new(lower: [f64; 3], upper: [f64; 3]) -> Self {
        Self { lower, upper }
    }

    /// Degenerate box around a single point.
    pub fn from_point(p: [f64; 3]) -> Self {
        Self { lower: p, upper: p }
    }

    /// Box containing nothing; the identity for [`BoundingBox::merge`].
    pub fn empty() -> Self {
        Self {
            lower: [f64::INFINITY; 3],
            upper: [f64::NEG_INFINITY; 3],
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|d| self.lower[d] > self.upper[d])
    }

    /// Grow to contain `p`.
    pub fn extend(&mut self, p: [f64; 3]) {
        for d in 0..3 {
            self.lower[d] = self.lower[d].min(p[d]);
            self.upper[d] = self.upper[d].max(p[d]);
        }
    }

    /// Smallest box containing both.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        for d in 0..3 {
            out.lower[d] = out.lower[d].min(other.lower[d]);
            out.upper[d] = out.upper[d].max(other.upper[d]);
        }
        out
    }

    /// Length of the box diagonal.
    pub fn diameter(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (0..3)
            .map(|d| (self.upper[d] - self.lower[d]).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Euclidean distance between the closest points of two boxes; zero if they intersect.
    pub fn distance(&self, other: &BoundingBox) -> f64 {
        (0..3)
            .map(|d| {
                let gap = (self.lower[d] - other.upper[d])
                    .max(other.lower[d] - self.upper[d])
                    .max(0.0);
                gap * gap
            })
            .sum::<f64>()
            .sqrt()
    }
}

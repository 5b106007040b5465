pub mod spherical;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Dimensionality of a point, fixed when the point is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensions {
    /// Planar point: `z` and `phi` are pinned to zero.
    Two,
    /// Spatial point.
    Three,
}

impl Dimensions {
    /// Number of coordinates rendered for this dimensionality.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Maps an explicit coordinate count to a dimensionality.
    ///
    /// Only 2 and 3 are meaningful; any other count yields `None`.
    #[must_use]
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        DEFAULT_DIMENSIONS
    }
}

/// Dimensionality used when a constructor gets neither 2 nor 3 coordinates.
pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions::Three;

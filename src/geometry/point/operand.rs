use super::SpatialPoint;

/// Right-hand side of a broadcast arithmetic operation.
///
/// Built at the call site through the `From` impls below: numbers become
/// [`Operand::Scalar`], numeric arrays and tuples become
/// [`Operand::Coordinates`], points become [`Operand::Point`]. Mixed lists
/// are written with [`operands!`](crate::operands), which yields a
/// [`Operand::Sequence`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Applied to every coordinate.
    Scalar(f64),
    /// A bare coordinate list, read like [`SpatialPoint::from_array`].
    Coordinates(Vec<f64>),
    /// Each element is applied in turn. May nest.
    Sequence(Vec<Operand>),
    /// Applied component-wise.
    Point(SpatialPoint),
}

/// Builds an [`Operand::Sequence`] from a heterogeneous list of operands.
///
/// ```
/// use geopolar::geometry::SpatialPoint;
/// use geopolar::operands;
///
/// let mut p = SpatialPoint::planar(0.0, 0.0);
/// p.add(operands![1.0, SpatialPoint::planar(2.0, 3.0), [10.0, 0.0]]);
/// assert_eq!(p.to_array(None), vec![13.0, 4.0]);
/// ```
#[macro_export]
macro_rules! operands {
    ($($operand:expr),* $(,)?) => {
        $crate::geometry::Operand::Sequence(vec![$($crate::geometry::Operand::from($operand)),*])
    };
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Scalar(f64::from(value))
    }
}

impl<const N: usize> From<[f64; N]> for Operand {
    fn from(values: [f64; N]) -> Self {
        Self::Coordinates(values.to_vec())
    }
}

impl From<&[f64]> for Operand {
    fn from(values: &[f64]) -> Self {
        Self::Coordinates(values.to_vec())
    }
}

impl From<Vec<f64>> for Operand {
    fn from(values: Vec<f64>) -> Self {
        Self::Coordinates(values)
    }
}

impl From<(f64, f64)> for Operand {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Coordinates(vec![x, y])
    }
}

impl From<(f64, f64, f64)> for Operand {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::Coordinates(vec![x, y, z])
    }
}

impl From<SpatialPoint> for Operand {
    fn from(point: SpatialPoint) -> Self {
        Self::Point(point)
    }
}

impl From<&SpatialPoint> for Operand {
    fn from(point: &SpatialPoint) -> Self {
        Self::Point(point.clone())
    }
}

impl From<Vec<Operand>> for Operand {
    fn from(operands: Vec<Operand>) -> Self {
        Self::Sequence(operands)
    }
}

type BinaryOp = fn(f64, f64) -> f64;

fn divide_or_zero(a: f64, b: f64) -> f64 {
    // A zero (or NaN) divisor collapses the component to zero.
    if b == 0.0 || b.is_nan() {
        0.0
    } else {
        a / b
    }
}

impl SpatialPoint {
    /// Applies `op(component, operand_component)` to every coordinate.
    fn broadcast(&mut self, op: BinaryOp, operand: &Operand) -> &mut Self {
        match operand {
            Operand::Sequence(items) => {
                for item in items {
                    self.broadcast(op, item);
                }
            }
            Operand::Coordinates(values) => {
                self.apply_component_wise(op, &SpatialPoint::from_array(values));
            }
            Operand::Point(other) => self.apply_component_wise(op, other),
            Operand::Scalar(s) => {
                let c = self.cartesian();
                self.set_cartesian(op(c.x, *s), op(c.y, *s), op(c.z, *s));
            }
        }
        self
    }

    fn apply_component_wise(&mut self, op: BinaryOp, other: &SpatialPoint) {
        let c = self.cartesian();
        let o = other.cartesian();
        self.set_cartesian(op(c.x, o.x), op(c.y, o.y), op(c.z, o.z));
    }

    /// Adds the operand in place.
    pub fn add(&mut self, operand: impl Into<Operand>) -> &mut Self {
        self.broadcast(|a, b| a + b, &operand.into())
    }

    /// Subtracts the operand in place.
    pub fn subtract(&mut self, operand: impl Into<Operand>) -> &mut Self {
        self.broadcast(|a, b| a - b, &operand.into())
    }

    /// Multiplies by the operand in place.
    pub fn multiply(&mut self, operand: impl Into<Operand>) -> &mut Self {
        self.broadcast(|a, b| a * b, &operand.into())
    }

    /// Divides by the operand in place. Division by zero yields zero.
    pub fn divide_by(&mut self, operand: impl Into<Operand>) -> &mut Self {
        self.broadcast(divide_or_zero, &operand.into())
    }

    /// Flips the sign of every coordinate in place.
    pub fn negate(&mut self) -> &mut Self {
        self.broadcast(|a, _| -a, &Operand::Scalar(0.0))
    }

    /// Returns `point + operand`, leaving both untouched.
    #[must_use]
    pub fn sum(point: &SpatialPoint, operand: impl Into<Operand>) -> SpatialPoint {
        let mut result = point.clone();
        result.add(operand);
        result
    }

    /// Returns `point - operand`, leaving both untouched.
    #[must_use]
    pub fn difference(point: &SpatialPoint, operand: impl Into<Operand>) -> SpatialPoint {
        let mut result = point.clone();
        result.subtract(operand);
        result
    }

    /// Returns `point * operand`, leaving both untouched.
    #[must_use]
    pub fn product(point: &SpatialPoint, operand: impl Into<Operand>) -> SpatialPoint {
        let mut result = point.clone();
        result.multiply(operand);
        result
    }

    /// Returns `point / operand`, leaving both untouched.
    #[must_use]
    pub fn quotient(point: &SpatialPoint, operand: impl Into<Operand>) -> SpatialPoint {
        let mut result = point.clone();
        result.divide_by(operand);
        result
    }

    /// Returns `-point`, leaving it untouched.
    #[must_use]
    pub fn negation(point: &SpatialPoint) -> SpatialPoint {
        let mut result = point.clone();
        result.negate();
        result
    }
}

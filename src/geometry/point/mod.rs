mod input;
mod operand;

pub use input::{CoordinateMap, PointInput};
pub use operand::Operand;

use std::cell::Cell;
use std::fmt;

use nalgebra::Rotation2;

use crate::math::spherical::{cartesian_to_spherical, spherical_to_cartesian};
use crate::math::{Dimensions, Point2, Point3, Vector2, DEFAULT_DIMENSIONS};

/// Cartesian coordinate triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianCoords {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianCoords {
    fn to_spherical(self, dimensions: Dimensions) -> SphericalCoords {
        let (r, theta, phi) = cartesian_to_spherical(dimensions, self.x, self.y, self.z);
        SphericalCoords { r, theta, phi }
    }
}

/// Spherical coordinate triple.
///
/// `theta` is the azimuth on the xy-plane, `phi` the inclination from the
/// z-axis. Both are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

impl SphericalCoords {
    fn to_cartesian(self, dimensions: Dimensions) -> CartesianCoords {
        let (x, y, z) = spherical_to_cartesian(dimensions, self.r, self.theta, self.phi);
        CartesianCoords { x, y, z }
    }
}

/// Which coordinate triples are currently valid.
///
/// The variant written last is authoritative. `Both` only appears after a
/// read derived the missing triple; there is no "neither" state.
#[derive(Debug, Clone, Copy)]
enum Representation {
    Cartesian(CartesianCoords),
    Spherical(SphericalCoords),
    Both(CartesianCoords, SphericalCoords),
}

/// A 2D or 3D point addressable in Cartesian or spherical coordinates.
///
/// Reads of the non-authoritative representation are derived on demand and
/// cached. Any write replaces the cache with the triple that was written,
/// so the other representation is always recomputed as a whole.
///
/// Mutating methods work in place and return `&mut Self` for chaining:
///
/// ```
/// use geopolar::geometry::SpatialPoint;
///
/// let mut p = SpatialPoint::planar(1.0, 2.0);
/// p.add([3.0, 4.0]).multiply(2.0);
/// assert_eq!(p.to_string(), "8,12");
/// ```
///
/// A planar point keeps `z` and `phi` pinned at zero.
#[derive(Debug, Clone)]
pub struct SpatialPoint {
    dimensions: Dimensions,
    coords: Cell<Representation>,
}

impl SpatialPoint {
    /// Creates a point with an explicit dimensionality.
    #[must_use]
    pub fn with_dimensions(dimensions: Dimensions, x: f64, y: f64, z: f64) -> Self {
        Self {
            dimensions,
            coords: Cell::new(Representation::Cartesian(pin_cartesian(
                dimensions,
                CartesianCoords { x, y, z },
            ))),
        }
    }

    /// Creates a 3D point.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::with_dimensions(Dimensions::Three, x, y, z)
    }

    /// Creates a 2D point.
    #[must_use]
    pub fn planar(x: f64, y: f64) -> Self {
        Self::with_dimensions(Dimensions::Two, x, y, 0.0)
    }

    /// Creates a point at the origin with the default dimensionality.
    #[must_use]
    pub fn origin() -> Self {
        Self::with_dimensions(DEFAULT_DIMENSIONS, 0.0, 0.0, 0.0)
    }

    /// Creates a point from up to three explicit coordinates.
    ///
    /// Missing trailing coordinates are zero. Exactly two or three
    /// coordinates fix the dimensionality; any other count falls back to
    /// [`DEFAULT_DIMENSIONS`]. Coordinates past the third are ignored.
    #[must_use]
    pub fn from_coords(coords: &[f64]) -> Self {
        let dimensions = Dimensions::from_count(coords.len()).unwrap_or(DEFAULT_DIMENSIONS);
        let at = |i: usize| coords.get(i).copied().unwrap_or(0.0);
        Self::with_dimensions(dimensions, at(0), at(1), at(2))
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the Cartesian triple, deriving it from the spherical one if needed.
    #[must_use]
    pub fn cartesian(&self) -> CartesianCoords {
        match self.coords.get() {
            Representation::Cartesian(c) | Representation::Both(c, _) => c,
            Representation::Spherical(s) => {
                let c = s.to_cartesian(self.dimensions);
                self.coords.set(Representation::Both(c, s));
                c
            }
        }
    }

    /// Returns the spherical triple, deriving it from the Cartesian one if needed.
    #[must_use]
    pub fn spherical(&self) -> SphericalCoords {
        match self.coords.get() {
            Representation::Spherical(s) | Representation::Both(_, s) => s,
            Representation::Cartesian(c) => {
                let s = c.to_spherical(self.dimensions);
                self.coords.set(Representation::Both(c, s));
                s
            }
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.cartesian().x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.cartesian().y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.cartesian().z
    }

    /// Distance from the origin.
    #[must_use]
    pub fn r(&self) -> f64 {
        self.spherical().r
    }

    /// Azimuth on the xy-plane, in radians.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.spherical().theta
    }

    /// Inclination from the z-axis, in radians. Always zero for planar points.
    #[must_use]
    pub fn phi(&self) -> f64 {
        self.spherical().phi
    }

    /// Sets all Cartesian coordinates at once, dropping the spherical cache.
    pub fn set_cartesian(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        let c = pin_cartesian(self.dimensions, CartesianCoords { x, y, z });
        *self.coords.get_mut() = Representation::Cartesian(c);
        self
    }

    /// Sets all spherical coordinates at once, dropping the Cartesian cache.
    pub fn set_polar(&mut self, r: f64, theta: f64, phi: f64) -> &mut Self {
        let phi = match self.dimensions {
            Dimensions::Two => 0.0,
            Dimensions::Three => phi,
        };
        *self.coords.get_mut() = Representation::Spherical(SphericalCoords { r, theta, phi });
        self
    }

    pub fn set_x(&mut self, x: f64) -> &mut Self {
        let c = self.cartesian();
        self.set_cartesian(x, c.y, c.z)
    }

    pub fn set_y(&mut self, y: f64) -> &mut Self {
        let c = self.cartesian();
        self.set_cartesian(c.x, y, c.z)
    }

    /// Sets `z`. Has no effect on the value of a planar point.
    pub fn set_z(&mut self, z: f64) -> &mut Self {
        let c = self.cartesian();
        self.set_cartesian(c.x, c.y, z)
    }

    pub fn set_r(&mut self, r: f64) -> &mut Self {
        let s = self.spherical();
        self.set_polar(r, s.theta, s.phi)
    }

    pub fn set_theta(&mut self, theta: f64) -> &mut Self {
        let s = self.spherical();
        self.set_polar(s.r, theta, s.phi)
    }

    /// Sets `phi`. Has no effect on the value of a planar point.
    pub fn set_phi(&mut self, phi: f64) -> &mut Self {
        let s = self.spherical();
        self.set_polar(s.r, s.theta, phi)
    }

    /// Returns the point at `ratio` along the segment from `self` to `other`.
    ///
    /// `0` yields `self`, `1` yields `other`; values outside `[0, 1]`
    /// extrapolate.
    #[must_use]
    pub fn fraction(&self, other: &SpatialPoint, ratio: f64) -> SpatialPoint {
        let mut result = Self::negation(self);
        result.add(other).multiply(ratio).add(self);
        result
    }

    /// Returns a new planar point rotated about the origin.
    ///
    /// * `degrees` - Rotation angle in degrees, counter-clockwise.
    ///
    /// The receiver is not modified.
    #[must_use]
    pub fn rotate(&self, degrees: f64) -> SpatialPoint {
        let rotation = Rotation2::new(degrees.to_radians());
        let rotated = rotation * Point2::new(self.x(), self.y());
        SpatialPoint::planar(rotated.x, rotated.y)
    }

    /// Moves the point to the given (x, y), leaving `z` untouched.
    pub fn move_to(&mut self, target: impl PlanarCoords) -> &mut Self {
        let (x, y) = target.xy();
        let z = self.z();
        self.set_cartesian(x, y, z)
    }

    /// Moves the point by the given (dx, dy), leaving `z` untouched.
    pub fn move_by(&mut self, offset: impl PlanarCoords) -> &mut Self {
        let (dx, dy) = offset.xy();
        let c = self.cartesian();
        self.set_cartesian(c.x + dx, c.y + dy, c.z)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &SpatialPoint) -> f64 {
        (Point3::from(self) - Point3::from(other)).norm()
    }

    /// Returns the coordinates as `[x, y]` or `[x, y, z]`.
    ///
    /// `dimensions` defaults to the point's own dimensionality.
    #[must_use]
    pub fn to_array(&self, dimensions: Option<Dimensions>) -> Vec<f64> {
        let c = self.cartesian();
        match dimensions.unwrap_or(self.dimensions) {
            Dimensions::Two => vec![c.x, c.y],
            Dimensions::Three => vec![c.x, c.y, c.z],
        }
    }

    /// Returns the coordinates formatted `"x,y"` or `"x,y,z"`.
    #[must_use]
    pub fn to_string_with(&self, dimensions: Option<Dimensions>) -> String {
        self.to_array(dimensions)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn pin_cartesian(dimensions: Dimensions, c: CartesianCoords) -> CartesianCoords {
    match dimensions {
        Dimensions::Two => CartesianCoords { z: 0.0, ..c },
        Dimensions::Three => c,
    }
}

impl Default for SpatialPoint {
    fn default() -> Self {
        Self::origin()
    }
}

impl PartialEq for SpatialPoint {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.cartesian() == other.cartesian()
    }
}

impl fmt::Display for SpatialPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(None))
    }
}

impl From<Point2> for SpatialPoint {
    fn from(p: Point2) -> Self {
        Self::planar(p.x, p.y)
    }
}

impl From<Point3> for SpatialPoint {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<&SpatialPoint> for Point3 {
    fn from(p: &SpatialPoint) -> Self {
        let c = p.cartesian();
        Point3::new(c.x, c.y, c.z)
    }
}

/// Anything exposing a planar (x, y) position.
///
/// Accepted by [`SpatialPoint::move_to`] and [`SpatialPoint::move_by`], so
/// callers can pass either a pair of scalars or a point-like value.
pub trait PlanarCoords {
    /// Returns the `(x, y)` position.
    fn xy(&self) -> (f64, f64);
}

impl PlanarCoords for SpatialPoint {
    fn xy(&self) -> (f64, f64) {
        let c = self.cartesian();
        (c.x, c.y)
    }
}

impl PlanarCoords for (f64, f64) {
    fn xy(&self) -> (f64, f64) {
        *self
    }
}

impl PlanarCoords for [f64; 2] {
    fn xy(&self) -> (f64, f64) {
        (self[0], self[1])
    }
}

impl PlanarCoords for Point2 {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl PlanarCoords for Point3 {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl PlanarCoords for Vector2 {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl<T: PlanarCoords + ?Sized> PlanarCoords for &T {
    fn xy(&self) -> (f64, f64) {
        (**self).xy()
    }
}

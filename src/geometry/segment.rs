use std::cell::RefCell;
use std::fmt;

use super::point::{PlanarCoords, SpatialPoint};

/// The extent of a segment, as angle/norm, as an end point, or both.
#[derive(Debug, Clone)]
enum Extent {
    Polar { angle: f64, norm: f64 },
    End(SpatialPoint),
    Both { angle: f64, norm: f64, end: SpatialPoint },
}

/// A directed segment (vector) anchored at a planar start point.
///
/// The segment is described either by its `angle` and `norm` or by its
/// `end` point. Whichever was written last is authoritative; the other is
/// derived on demand from `end - start` (or `start + polar(norm, angle)`)
/// and cached until the next write.
#[derive(Debug, Clone)]
pub struct DirectedSegment {
    position: SpatialPoint,
    extent: RefCell<Extent>,
}

impl DirectedSegment {
    /// Creates a segment starting at `(x, y)`.
    ///
    /// * `angle` - Direction in radians.
    /// * `norm` - Length.
    #[must_use]
    pub fn new(x: f64, y: f64, angle: f64, norm: f64) -> Self {
        Self {
            position: SpatialPoint::planar(x, y),
            extent: RefCell::new(Extent::Polar { angle, norm }),
        }
    }

    /// Creates the segment running from `start` to `end`.
    #[must_use]
    pub fn from_points(start: &SpatialPoint, end: &SpatialPoint) -> Self {
        let mut segment = Self::default();
        segment.set_start(start).set_end(end);
        segment
    }

    /// Returns a planar point at unit distance from the origin in direction `angle`.
    #[must_use]
    pub fn unit(angle: f64) -> SpatialPoint {
        SpatialPoint::planar(angle.cos(), angle.sin())
    }

    /// The segment's own position, which is also its start.
    #[must_use]
    pub fn position(&self) -> &SpatialPoint {
        &self.position
    }

    /// Returns a copy of the start point.
    #[must_use]
    pub fn start(&self) -> SpatialPoint {
        let (x, y) = self.position.xy();
        SpatialPoint::planar(x, y)
    }

    /// Returns the end point, deriving it from angle and norm if needed.
    #[must_use]
    pub fn end(&self) -> SpatialPoint {
        let mut extent = self.extent.borrow_mut();
        let (angle, norm) = match &*extent {
            Extent::End(end) | Extent::Both { end, .. } => return end.clone(),
            Extent::Polar { angle, norm } => (*angle, *norm),
        };
        let mut end = SpatialPoint::planar(0.0, 0.0);
        end.set_polar(norm, angle, 0.0).add(&self.position);
        *extent = Extent::Both {
            angle,
            norm,
            end: end.clone(),
        };
        end
    }

    /// Direction in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.polar().0
    }

    /// Length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.polar().1
    }

    fn polar(&self) -> (f64, f64) {
        let mut extent = self.extent.borrow_mut();
        let end = match &*extent {
            Extent::Polar { angle, norm } | Extent::Both { angle, norm, .. } => {
                return (*angle, *norm)
            }
            Extent::End(end) => end.clone(),
        };
        let delta = SpatialPoint::difference(&end, &self.start());
        let (angle, norm) = (delta.theta(), delta.r());
        *extent = Extent::Both { angle, norm, end };
        (angle, norm)
    }

    /// Moves the start, keeping the end where it is.
    ///
    /// Angle and norm are re-derived on the next read.
    pub fn set_start(&mut self, start: impl PlanarCoords) -> &mut Self {
        let end = self.end();
        let (x, y) = start.xy();
        self.position.set_cartesian(x, y, 0.0);
        *self.extent.get_mut() = Extent::End(end);
        self
    }

    /// Sets the end point. Angle and norm are re-derived on the next read.
    pub fn set_end(&mut self, end: &SpatialPoint) -> &mut Self {
        *self.extent.get_mut() = Extent::End(end.clone());
        self
    }

    /// Sets the direction, keeping the length. The end is re-derived on the next read.
    pub fn set_angle(&mut self, angle: f64) -> &mut Self {
        let (_, norm) = self.polar();
        *self.extent.get_mut() = Extent::Polar { angle, norm };
        self
    }

    /// Sets the length, keeping the direction. The end is re-derived on the next read.
    pub fn set_norm(&mut self, norm: f64) -> &mut Self {
        let (angle, _) = self.polar();
        *self.extent.get_mut() = Extent::Polar { angle, norm };
        self
    }

    /// Shifts start and end by `(dx, dy)`, keeping angle and norm.
    pub fn move_by(&mut self, offset: impl PlanarCoords) -> &mut Self {
        let (dx, dy) = offset.xy();
        self.position.move_by((dx, dy));
        match self.extent.get_mut() {
            Extent::Polar { .. } => {}
            Extent::End(end) | Extent::Both { end, .. } => {
                end.move_by((dx, dy));
            }
        }
        self
    }

    /// Moves the start to `target`, carrying the end along.
    pub fn move_to(&mut self, target: impl PlanarCoords) -> &mut Self {
        let (x, y) = target.xy();
        let (sx, sy) = self.position.xy();
        self.move_by((x - sx, y - sy))
    }

    /// Returns the point at `ratio` along the segment from start to end.
    #[must_use]
    pub fn fraction(&self, ratio: f64) -> SpatialPoint {
        let start = self.start();
        let mut point = SpatialPoint::difference(&self.end(), &start);
        point.multiply(ratio).add(&start);
        point
    }
}

impl Default for DirectedSegment {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl AsRef<SpatialPoint> for DirectedSegment {
    fn as_ref(&self) -> &SpatialPoint {
        &self.position
    }
}

impl PlanarCoords for DirectedSegment {
    fn xy(&self) -> (f64, f64) {
        self.position.xy()
    }
}

impl fmt::Display for DirectedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start(), self.end())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn from_points_derives_norm_and_angle() {
        let segment =
            DirectedSegment::from_points(&SpatialPoint::planar(0.0, 0.0), &SpatialPoint::planar(3.0, 4.0));
        assert_relative_eq!(segment.norm(), 5.0, epsilon = TOL);
        assert_relative_eq!(segment.angle(), 0.927_295_218_001_612_2, epsilon = TOL);
    }

    #[test]
    fn angle_points_from_start_to_end() {
        let segment =
            DirectedSegment::from_points(&SpatialPoint::planar(2.0, 2.0), &SpatialPoint::planar(2.0, -1.0));
        assert_relative_eq!(segment.angle(), -FRAC_PI_2, epsilon = TOL);
        assert_relative_eq!(segment.norm(), 3.0, epsilon = TOL);
    }

    #[test]
    fn end_derived_from_angle_and_norm() {
        let segment = DirectedSegment::new(1.0, 1.0, FRAC_PI_2, 2.0);
        let end = segment.end();
        assert!((end.x() - 1.0).abs() < TOL, "x={}", end.x());
        assert!((end.y() - 3.0).abs() < TOL, "y={}", end.y());
    }

    #[test]
    fn default_is_unit_along_x() {
        let segment = DirectedSegment::default();
        assert_eq!(segment.angle(), 0.0);
        assert_eq!(segment.norm(), 1.0);
        let end = segment.end();
        assert!((end.x() - 1.0).abs() < TOL);
        assert!(end.y().abs() < TOL);
    }

    #[test]
    fn start_mirrors_position() {
        let segment = DirectedSegment::new(4.0, -2.0, 0.0, 1.0);
        assert_eq!(segment.start(), SpatialPoint::planar(4.0, -2.0));
        assert_eq!(segment.position(), &SpatialPoint::planar(4.0, -2.0));
    }

    #[test]
    fn setting_end_invalidates_angle_and_norm() {
        let mut segment = DirectedSegment::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(segment.norm(), 1.0);
        segment.set_end(&SpatialPoint::planar(0.0, 2.0));
        assert_relative_eq!(segment.norm(), 2.0, epsilon = TOL);
        assert_relative_eq!(segment.angle(), FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn setting_start_keeps_end_and_invalidates_angle_and_norm() {
        let mut segment = DirectedSegment::new(0.0, 0.0, 0.0, 2.0);
        segment.set_start((2.0, 4.0));
        assert_eq!(segment.start(), SpatialPoint::planar(2.0, 4.0));
        let end = segment.end();
        assert!((end.x() - 2.0).abs() < TOL);
        assert!(end.y().abs() < TOL);
        assert_relative_eq!(segment.norm(), 4.0, epsilon = TOL);
        assert_relative_eq!(segment.angle(), -FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn setting_angle_invalidates_end_keeps_norm() {
        let mut segment =
            DirectedSegment::from_points(&SpatialPoint::planar(0.0, 0.0), &SpatialPoint::planar(3.0, 4.0));
        segment.set_angle(PI);
        assert_relative_eq!(segment.norm(), 5.0, epsilon = TOL);
        let end = segment.end();
        assert!((end.x() + 5.0).abs() < TOL, "x={}", end.x());
        assert!(end.y().abs() < TOL, "y={}", end.y());
    }

    #[test]
    fn setting_norm_invalidates_end_keeps_angle() {
        let mut segment = DirectedSegment::new(1.0, 0.0, FRAC_PI_2, 1.0);
        let _ = segment.end();
        segment.set_norm(3.0);
        assert_relative_eq!(segment.angle(), FRAC_PI_2, epsilon = TOL);
        let end = segment.end();
        assert!((end.x() - 1.0).abs() < TOL);
        assert!((end.y() - 3.0).abs() < TOL);
    }

    #[test]
    fn move_by_carries_cached_end() {
        let mut segment =
            DirectedSegment::from_points(&SpatialPoint::planar(1.0, 1.0), &SpatialPoint::planar(4.0, 5.0));
        segment.move_by((2.0, -1.0));
        assert_eq!(segment.start(), SpatialPoint::planar(3.0, 0.0));
        let end = segment.end();
        assert!((end.x() - 6.0).abs() < TOL, "x={}", end.x());
        assert!((end.y() - 4.0).abs() < TOL, "y={}", end.y());
        assert_relative_eq!(segment.norm(), 5.0, epsilon = TOL);
        assert_relative_eq!(segment.angle(), 0.927_295_218_001_612_2, epsilon = TOL);
    }

    #[test]
    fn move_to_keeps_polar_extent() {
        let mut segment = DirectedSegment::new(0.0, 0.0, FRAC_PI_2, 2.0);
        segment.move_to(&SpatialPoint::planar(-1.0, 3.0));
        assert_eq!(segment.start(), SpatialPoint::planar(-1.0, 3.0));
        assert_relative_eq!(segment.angle(), FRAC_PI_2, epsilon = TOL);
        assert_relative_eq!(segment.norm(), 2.0, epsilon = TOL);
        let end = segment.end();
        assert!((end.x() + 1.0).abs() < TOL, "x={}", end.x());
        assert!((end.y() - 5.0).abs() < TOL, "y={}", end.y());
    }

    #[test]
    fn unit_has_length_one() {
        let u = DirectedSegment::unit(0.3);
        assert_relative_eq!(u.r(), 1.0, epsilon = TOL);
        assert_relative_eq!(u.theta(), 0.3, epsilon = TOL);
    }

    #[test]
    fn fraction_along_segment() {
        let segment =
            DirectedSegment::from_points(&SpatialPoint::planar(1.0, 1.0), &SpatialPoint::planar(5.0, 3.0));
        assert_eq!(segment.fraction(0.0), SpatialPoint::planar(1.0, 1.0));
        assert_eq!(segment.fraction(0.5), SpatialPoint::planar(3.0, 2.0));
        let end = segment.fraction(1.0);
        assert!((end.x() - 5.0).abs() < TOL);
        assert!((end.y() - 3.0).abs() < TOL);
    }

    #[test]
    fn display_renders_start_and_end() {
        let segment =
            DirectedSegment::from_points(&SpatialPoint::planar(1.0, 2.0), &SpatialPoint::planar(3.0, 4.0));
        assert_eq!(segment.to_string(), "1,2 3,4");
    }
}

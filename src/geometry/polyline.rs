use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::SlotMap;

use super::point::SpatialPoint;
use crate::error::{CollectionError, Result};

slotmap::new_key_type! {
    struct PointKey;
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

fn next_owner() -> u64 {
    NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
}

/// Stable identity of a point stored in a [`Polyline`].
///
/// An ID is tied to the polyline that issued it; every other polyline
/// treats it as a non-member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId {
    owner: u64,
    key: PointKey,
}

/// An ordered sequence of points.
///
/// Points are owned by the polyline and addressed by [`PointId`], which
/// stays valid while other points are inserted around it. A clone is a
/// separate polyline and issues its own IDs.
#[derive(Debug)]
pub struct Polyline {
    owner: u64,
    points: SlotMap<PointKey, SpatialPoint>,
    order: Vec<PointKey>,
}

impl Polyline {
    /// Creates a new, empty polyline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: next_owner(),
            points: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Creates a polyline holding `points` in iteration order.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = SpatialPoint>) -> Self {
        let mut polyline = Self::new();
        for point in points {
            polyline.append(point);
        }
        polyline
    }

    /// Number of points in the polyline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn id(&self, key: PointKey) -> PointId {
        PointId {
            owner: self.owner,
            key,
        }
    }

    /// Returns the local key of `id`, or `None` if another polyline issued it.
    fn key(&self, id: PointId) -> Option<PointKey> {
        (id.owner == self.owner).then_some(id.key)
    }

    /// Adds a point at the end and returns its ID.
    pub fn append(&mut self, point: SpatialPoint) -> PointId {
        self.insert_at(point, None)
    }

    /// Adds a point at the beginning and returns its ID.
    pub fn prepend(&mut self, point: SpatialPoint) -> PointId {
        self.insert_at(point, Some(0))
    }

    /// Inserts a point before position `index` and returns its ID.
    ///
    /// `None`, or an index past the end, appends.
    pub fn insert_at(&mut self, point: SpatialPoint, index: Option<usize>) -> PointId {
        let len = self.order.len();
        let index = index.map_or(len, |i| i.min(len));
        let key = self.points.insert(point);
        self.order.insert(index, key);
        tracing::trace!(index, len = len + 1, "inserted point into polyline");
        self.id(key)
    }

    /// Inserts a point just before `reference`, or appends if `reference` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ReferenceNotFound`] if `reference` is not
    /// a point of this polyline.
    pub fn insert_before(
        &mut self,
        point: SpatialPoint,
        reference: Option<PointId>,
    ) -> Result<PointId> {
        let index = match reference {
            Some(id) => Some(
                self.index_of(id)
                    .ok_or(CollectionError::ReferenceNotFound)?,
            ),
            None => None,
        };
        Ok(self.insert_at(point, index))
    }

    /// Returns the position of a point, or `None` if it is not a member.
    #[must_use]
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        let key = self.key(id)?;
        self.order.iter().position(|&member| member == key)
    }

    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&SpatialPoint> {
        self.points.get(self.key(id)?)
    }

    pub fn get_mut(&mut self, id: PointId) -> Option<&mut SpatialPoint> {
        let key = self.key(id)?;
        self.points.get_mut(key)
    }

    /// Returns the point at position `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&SpatialPoint> {
        self.order.get(index).and_then(|&key| self.points.get(key))
    }

    /// IDs in polyline order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.order.iter().map(|&key| self.id(key))
    }

    /// Points in polyline order.
    pub fn iter(&self) -> impl Iterator<Item = &SpatialPoint> + '_ {
        self.order.iter().filter_map(|&key| self.points.get(key))
    }

    /// Replaces every point. Previously handed-out IDs become stale.
    pub fn set_points(&mut self, points: impl IntoIterator<Item = SpatialPoint>) {
        self.points.clear();
        self.order.clear();
        for point in points {
            self.append(point);
        }
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Polyline {
    fn clone(&self) -> Self {
        Self {
            owner: next_owner(),
            points: self.points.clone(),
            order: self.order.clone(),
        }
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

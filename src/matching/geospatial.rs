// src/matching/geospatial.rs - Planar point geometry, buffers and the candidate index
//!
//! Coordinates are taken to be in one projected planar system with metre
//! units (British National Grid for the REPD/ECR registers), so distances are
//! plain Euclidean.

use log::debug;
use rstar::{RTree, RTreeObject, AABB};

use crate::utils::constants::METERS_PER_KM;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A usable point needs both coordinates present and finite.
    pub fn from_coords(x: Option<f64>, y: Option<f64>) -> Option<Self> {
        match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Self { x, y }),
            _ => None,
        }
    }

    pub fn distance_2(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_2(other).sqrt()
    }
}

/// A closed disc of `radius` metres around `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buffer {
    pub center: Point,
    pub radius: f64,
}

impl Buffer {
    /// Boundary inclusive.
    pub fn contains(&self, point: &Point) -> bool {
        self.center.distance_2(point) <= self.radius * self.radius
    }

    fn envelope(&self) -> AABB<[f64; 2]> {
        AABB::from_corners(
            [self.center.x - self.radius, self.center.y - self.radius],
            [self.center.x + self.radius, self.center.y + self.radius],
        )
    }
}

pub fn buffer(point: Point, radius_meters: f64) -> Buffer {
    Buffer {
        center: point,
        radius: radius_meters,
    }
}

/// An indexed point for R-tree storage.
#[derive(Clone, Debug)]
struct IndexedPoint {
    coords: [f64; 2],
    /// Position of the point's record in the original collection.
    position: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

/// Spatial index over the point geometries of a record collection.
///
/// Records without a usable point are left out of the tree and can never be
/// returned by a query.
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
    excluded: usize,
}

impl PointIndex {
    /// Builds the index from one optional point per record, in record order.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Option<Point>>,
    {
        let mut indexed = Vec::new();
        let mut excluded = 0;
        for (position, point) in points.into_iter().enumerate() {
            match point {
                Some(p) => indexed.push(IndexedPoint {
                    coords: [p.x, p.y],
                    position,
                }),
                None => excluded += 1,
            }
        }
        debug!(
            "Built point index: {} indexed, {} without usable coordinates",
            indexed.len(),
            excluded
        );
        Self {
            tree: RTree::bulk_load(indexed),
            excluded,
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Records that produced no usable geometry.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Positions of every indexed point inside `buffer`, in ascending record
    /// order. Tree traversal order is discarded so that callers see the same
    /// order as the source collection.
    pub fn intersects(&self, buffer: &Buffer) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&buffer.envelope())
            .filter(|p| buffer.contains(&Point::new(p.coords[0], p.coords[1])))
            .map(|p| p.position)
            .collect();
        positions.sort_unstable();
        positions
    }
}

/// Positions of all indexed records within `radius_km` of `origin`.
pub fn find_candidates(origin: Point, index: &PointIndex, radius_km: f64) -> Vec<usize> {
    let search_area = buffer(origin, radius_km * METERS_PER_KM);
    index.intersects(&search_area)
}

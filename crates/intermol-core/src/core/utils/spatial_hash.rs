//! Uniform-grid spatial index over a fixed set of points.
//!
//! Points are bucketed into cubic cells and stored cell by cell in a single
//! packed array (counting sort), so construction is **O(N)** and a radius
//! query only visits the cells overlapping the query cube.

use nalgebra::Point3;
use std::ops::ControlFlow;
use thiserror::Error;

const MAX_CELLS: usize = 1 << 24;

#[derive(Debug, Error, PartialEq)]
pub enum SpatialHashError {
    #[error("Cannot build a spatial hash over zero points")]
    Empty,
    #[error("Cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
    #[error("Point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),
}

/// Immutable uniform-grid index answering "all points within `r` of `p`".
///
/// If the indexed coordinates change, a new hash must be built.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    origin: Point3<f64>,
    cell_size: f64,
    dims: [usize; 3],
    /// Offsets into `entries`, one per cell plus a trailing end marker.
    cell_starts: Vec<u32>,
    /// Point indices grouped by cell, ascending inside each cell.
    entries: Vec<u32>,
    points: Vec<Point3<f64>>,
}

impl SpatialHash {
    pub const DEFAULT_CELL_SIZE: f64 = 4.0;

    pub fn new(points: &[Point3<f64>]) -> Result<Self, SpatialHashError> {
        Self::with_cell_size(points, Self::DEFAULT_CELL_SIZE)
    }

    /// Builds the index with the given cell edge length. The cell size grows
    /// automatically when the bounding box would need an excessive number of
    /// cells.
    pub fn with_cell_size(points: &[Point3<f64>], cell_size: f64) -> Result<Self, SpatialHashError> {
        if points.is_empty() {
            return Err(SpatialHashError::Empty);
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialHashError::InvalidCellSize(cell_size));
        }
        if let Some(index) = points.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(SpatialHashError::NonFinitePoint(index));
        }

        let mut min = points[0];
        let mut max = points[0];
        for p in points {
            min = min.inf(p);
            max = max.sup(p);
        }
        let extent = max - min;

        let mut cell_size = cell_size;
        let dims = loop {
            let dims = [
                ((extent.x / cell_size).floor() as usize).saturating_add(1),
                ((extent.y / cell_size).floor() as usize).saturating_add(1),
                ((extent.z / cell_size).floor() as usize).saturating_add(1),
            ];
            let total = dims[0].saturating_mul(dims[1]).saturating_mul(dims[2]);
            if total <= MAX_CELLS {
                break dims;
            }
            cell_size *= 2.0;
        };

        let mut hash = Self {
            origin: min,
            cell_size,
            dims,
            cell_starts: Vec::new(),
            entries: Vec::new(),
            points: points.to_vec(),
        };

        let n_cells = dims[0] * dims[1] * dims[2];
        let cells: Vec<usize> = points.iter().map(|p| hash.cell_of(p)).collect();

        let mut counts = vec![0u32; n_cells + 1];
        for &c in &cells {
            counts[c + 1] += 1;
        }
        for i in 0..n_cells {
            counts[i + 1] += counts[i];
        }
        let mut cursor = counts.clone();
        let mut entries = vec![0u32; points.len()];
        for (i, &c) in cells.iter().enumerate() {
            entries[cursor[c] as usize] = i as u32;
            cursor[c] += 1;
        }

        hash.cell_starts = counts;
        hash.entries = entries;
        Ok(hash)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> &Point3<f64> {
        &self.points[index]
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn axis_coord(&self, value: f64, axis: usize) -> isize {
        ((value - self.origin[axis]) / self.cell_size).floor() as isize
    }

    fn cell_of(&self, p: &Point3<f64>) -> usize {
        let clamp = |v: isize, axis: usize| v.clamp(0, self.dims[axis] as isize - 1) as usize;
        let x = clamp(self.axis_coord(p.x, 0), 0);
        let y = clamp(self.axis_coord(p.y, 1), 1);
        let z = clamp(self.axis_coord(p.z, 2), 2);
        x + self.dims[0] * (y + self.dims[1] * z)
    }

    /// Calls `f(index, dist_sq)` for every point with `dist_sq <= radius²`.
    ///
    /// Cells are visited in z, y, x order and points ascending inside a cell, so
    /// the visiting order is deterministic. Returning `ControlFlow::Break` from
    /// the closure stops the query. Negative or NaN radii match nothing.
    pub fn each_within<F>(&self, center: &Point3<f64>, radius: f64, mut f: F)
    where
        F: FnMut(usize, f64) -> ControlFlow<()>,
    {
        if !(radius >= 0.0) {
            return;
        }
        let radius_sq = radius * radius;

        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        for axis in 0..3 {
            let min = self.axis_coord(center[axis] - radius, axis);
            let max = self.axis_coord(center[axis] + radius, axis);
            let last = self.dims[axis] as isize - 1;
            if max < 0 || min > last {
                return;
            }
            lo[axis] = min.max(0) as usize;
            hi[axis] = max.min(last) as usize;
        }

        for z in lo[2]..=hi[2] {
            for y in lo[1]..=hi[1] {
                let row = self.dims[0] * (y + self.dims[1] * z);
                for x in lo[0]..=hi[0] {
                    let cell = row + x;
                    let start = self.cell_starts[cell] as usize;
                    let end = self.cell_starts[cell + 1] as usize;
                    for &entry in &self.entries[start..end] {
                        let index = entry as usize;
                        let dist_sq = (self.points[index] - center).norm_squared();
                        if dist_sq <= radius_sq && f(index, dist_sq).is_break() {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Collects `(index, dist_sq)` for every point within `radius`, in query order.
    pub fn within(&self, center: &Point3<f64>, radius: f64) -> Vec<(usize, f64)> {
        let mut found = Vec::new();
        self.each_within(center, radius, |i, d| {
            found.push((i, d));
            ControlFlow::Continue(())
        });
        found
    }
}

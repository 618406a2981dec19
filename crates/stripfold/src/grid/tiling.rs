//! Tiling geometry: cell corners, centroids and the unfolded strip outline.
//!
//! Conventions
//! - Triangle `(x, y)` spans `[x·s/2, x·s/2 + s]` horizontally and
//!   `[y·h, (y+1)·h]` vertically, `h = s·√3/2`; it points down when
//!   [`Coord::is_upside_down`].
//! - Square `(x, y)` is `[x·s, (x+1)·s] × [y·s, (y+1)·s]`.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Vector2;

use super::{Coord, GridKind};
use crate::walk::{fold_path, map_to_cell};

/// Height of an equilateral triangle with side `side`.
#[inline]
pub fn triangle_height(side: f64) -> f64 {
    side * 3f64.sqrt() / 2.0
}

/// Shared capability set of the two tilings.
pub trait Tiling: Sync {
    fn kind(&self) -> GridKind;

    /// Corner coordinates of `coord` for cells of side `side`.
    fn corners(&self, coord: Coord, side: f64) -> Vec<Vector2<f64>>;

    /// Centroid of `coord`; the mean of [`Tiling::corners`].
    fn center(&self, coord: Coord, side: f64) -> Vector2<f64> {
        let corners = self.corners(coord, side);
        let sum = corners.iter().fold(Vector2::zeros(), |acc, p| acc + p);
        sum / corners.len() as f64
    }

    /// Polygon covering the unfolded strip of `length` creases.
    fn strip_outline(&self, length: u32, side: f64, flipped: bool) -> Vec<Vector2<f64>>;

    /// Landing cell of `bits` on this tiling.
    fn map_to_cell(&self, bits: u64, start: Coord, length: u32) -> Coord {
        map_to_cell(bits, start, length, self.kind())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TriangleTiling;

#[derive(Clone, Copy, Debug, Default)]
pub struct SquareTiling;

static TRIANGLE: TriangleTiling = TriangleTiling;
static SQUARE: SquareTiling = SquareTiling;

impl GridKind {
    /// Geometry implementation for this kind.
    pub fn tiling(self) -> &'static dyn Tiling {
        match self {
            GridKind::Triangle => &TRIANGLE,
            GridKind::Square => &SQUARE,
        }
    }
}

impl Tiling for TriangleTiling {
    fn kind(&self) -> GridKind {
        GridKind::Triangle
    }

    /// Order: left base corner, apex, right base corner.
    ///
    /// ```text
    ///    2      1-----3
    ///   / \  or  \   /
    ///  /   \      \ /
    /// 1-----3      2
    /// ```
    fn corners(&self, coord: Coord, side: f64) -> Vec<Vector2<f64>> {
        let h = triangle_height(side);
        let left = side * coord.x as f64 / 2.0;
        let bottom = coord.y as f64 * h;
        let (base_y, apex_y) = if coord.is_upside_down() {
            (bottom + h, bottom)
        } else {
            (bottom, bottom + h)
        };
        vec![
            Vector2::new(left, base_y),
            Vector2::new(left + side / 2.0, apex_y),
            Vector2::new(left + side, base_y),
        ]
    }

    fn center(&self, coord: Coord, side: f64) -> Vector2<f64> {
        let h = triangle_height(side);
        let third = if coord.is_upside_down() { 2.0 } else { 1.0 };
        Vector2::new(
            side * coord.x as f64 / 2.0 + side / 2.0,
            coord.y as f64 * h + third * h / 3.0,
        )
    }

    /// Parallelogram from the start triangle's left corners to the end
    /// triangle's right corners, all in the start row.
    fn strip_outline(&self, length: u32, side: f64, flipped: bool) -> Vec<Vector2<f64>> {
        let start = Coord::start(flipped);
        let end = Coord::new(i64::from(length), start.y);
        let first = self.corners(start, side);
        let last = self.corners(end, side);
        // the side closing the polygon must run from the top edge back to the bottom
        let (a, b) = if start.is_upside_down() == end.is_upside_down() {
            (1, 2)
        } else {
            (2, 1)
        };
        vec![first[0], first[1], last[a], last[b]]
    }
}

impl Tiling for SquareTiling {
    fn kind(&self) -> GridKind {
        GridKind::Square
    }

    /// Clockwise from the lower-left corner.
    fn corners(&self, coord: Coord, side: f64) -> Vec<Vector2<f64>> {
        let (x0, y0) = (coord.x as f64 * side, coord.y as f64 * side);
        let (x1, y1) = (x0 + side, y0 + side);
        vec![
            Vector2::new(x0, y0),
            Vector2::new(x0, y1),
            Vector2::new(x1, y1),
            Vector2::new(x1, y0),
        ]
    }

    fn center(&self, coord: Coord, side: f64) -> Vector2<f64> {
        Vector2::new(
            (coord.x as f64 + 0.5) * side,
            (coord.y as f64 + 0.5) * side,
        )
    }

    /// Boundary of the staircase of squares the unfolded strip covers.
    fn strip_outline(&self, length: u32, side: f64, flipped: bool) -> Vec<Vector2<f64>> {
        let cells = fold_path(0, Coord::start(flipped), length, GridKind::Square);
        union_boundary(&cells)
            .into_iter()
            .map(|(x, y)| Vector2::new(x as f64 * side, y as f64 * side))
            .collect()
    }
}

type Lattice = (i64, i64);

/// Counter-clockwise boundary of a simply connected union of unit squares, in
/// lattice units, without collinear intermediate vertices.
fn union_boundary(cells: &[Coord]) -> Vec<Lattice> {
    let unique: BTreeSet<Coord> = cells.iter().copied().collect();
    let mut edges: BTreeSet<(Lattice, Lattice)> = BTreeSet::new();
    for c in &unique {
        let ring = [(c.x, c.y), (c.x + 1, c.y), (c.x + 1, c.y + 1), (c.x, c.y + 1)];
        for i in 0..4 {
            let edge = (ring[i], ring[(i + 1) % 4]);
            // a shared edge shows up once per neighbour, in opposite directions
            if !edges.remove(&(edge.1, edge.0)) {
                edges.insert(edge);
            }
        }
    }
    let next: BTreeMap<Lattice, Lattice> = edges.into_iter().collect();
    let Some(&origin) = next.keys().next() else {
        return Vec::new();
    };
    let mut ring = vec![origin];
    let mut at = next[&origin];
    while at != origin && ring.len() <= next.len() {
        ring.push(at);
        match next.get(&at) {
            Some(&to) => at = to,
            None => break,
        }
    }
    drop_collinear(ring)
}

fn drop_collinear(ring: Vec<Lattice>) -> Vec<Lattice> {
    let n = ring.len();
    if n < 3 {
        return ring;
    }
    (0..n)
        .filter(|&i| {
            let (p, q, r) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
            let cross = (q.0 - p.0) * (r.1 - q.1) - (q.1 - p.1) * (r.0 - q.0);
            cross != 0
        })
        .map(|i| ring[i])
        .collect()
}

use super::*;
use crate::error::FoldError;
use nalgebra::Vector2;

fn close(a: Vector2<f64>, b: Vector2<f64>) -> bool {
    (a - b).norm() < 1e-12
}

#[test]
fn empty_grid_reports_sentinels() {
    let g = Grid::new(GridKind::Triangle, 4, false);
    assert!(g.is_empty());
    assert_eq!(g.max_score(), 0);
    assert_eq!(g.bounds().as_tuple(), (1, 1, 0, 0));
    assert!(g.bounds().is_empty());
    assert!(g.get(Coord::new(0, 0)).is_none());
}

#[test]
fn single_cell_bounds_are_tight() {
    let mut g = Grid::new(GridKind::Square, 4, false);
    g.add(Coord::new(3, -2), 1).unwrap();
    let b = g.bounds();
    assert_eq!(b.as_tuple(), (3, -2, 3, -2));
    assert!(!b.is_empty());
}

#[test]
fn bounds_cover_all_cells() {
    let mut g = Grid::new(GridKind::Triangle, 4, false);
    for (x, y) in [(2, 5), (-4, 1), (0, -3)] {
        g.add(Coord::new(x, y), 0).unwrap();
    }
    assert_eq!(g.bounds().as_tuple(), (-4, -3, 2, 5));
}

#[test]
fn duplicate_add_is_rejected() {
    let mut g = Grid::new(GridKind::Triangle, 2, false);
    g.add(Coord::new(1, 1), 3).unwrap();
    let err = g.add(Coord::new(1, 1), 0).unwrap_err();
    assert_eq!(err, FoldError::DuplicateCell { x: 1, y: 1 });
    // the existing cell is untouched
    assert_eq!(g.get(Coord::new(1, 1)).unwrap().score(), 3);
}

#[test]
fn recording_on_missing_cell_fails() {
    let mut g = Grid::new(GridKind::Triangle, 2, false);
    let err = g.record_fold(Coord::new(0, 0), 0b1, Mode::Min).unwrap_err();
    assert!(matches!(err, FoldError::MissingCell { x: 0, y: 0 }));
}

#[test]
fn min_mode_keeps_fewest_folds_and_first_best() {
    let at = Coord::new(0, 0);
    let mut g = Grid::new(GridKind::Triangle, 6, false);
    g.add(at, 3).unwrap();
    g.record_fold(at, 0b000111, Mode::Min).unwrap();
    assert_eq!(g.get(at).unwrap().score(), 3);
    assert_eq!(g.get(at).unwrap().best(), Some(0b000111));

    g.record_fold(at, 0b110000, Mode::Min).unwrap();
    g.record_fold(at, 0b101000, Mode::Min).unwrap();
    let cell = g.get(at).unwrap();
    assert_eq!(cell.score(), 2);
    // equal popcount later does not replace the first
    assert_eq!(cell.best(), Some(0b110000));

    g.record_fold(at, 0b111111, Mode::Min).unwrap();
    assert_eq!(g.get(at).unwrap().score(), 2);
}

#[test]
fn min_mode_never_raises_a_low_seed() {
    let at = Coord::new(2, 0);
    let mut g = Grid::new(GridKind::Triangle, 4, false);
    g.add(at, 0).unwrap();
    g.record_fold(at, 0b11, Mode::Min).unwrap();
    assert_eq!(g.get(at).unwrap().score(), 0);
    assert_eq!(g.get(at).unwrap().best(), Some(0b11));
}

#[test]
fn count_mode_counts_every_landing() {
    let at = Coord::new(-1, 4);
    let mut g = Grid::new(GridKind::Square, 5, false);
    g.add(at, Mode::Count.seed_score(2)).unwrap();
    for bits in [0b11, 0b1, 0b10101, 0b1] {
        g.record_fold(at, bits, Mode::Count).unwrap();
    }
    let cell = g.get(at).unwrap();
    assert_eq!(cell.score(), 4);
    assert_eq!(cell.best(), Some(0b1));
    assert_eq!(g.max_score(), 4);
}

#[test]
fn count_overflow_is_reported() {
    let at = Coord::new(2, -1);
    let mut g = Grid::new(GridKind::Triangle, 4, false);
    g.add(at, u32::MAX - 1).unwrap();
    g.record_fold(at, 0b0001, Mode::Count).unwrap();
    assert_eq!(g.get(at).unwrap().score(), u32::MAX);
    let err = g.record_fold(at, 0b0011, Mode::Count).unwrap_err();
    assert_eq!(err, FoldError::ScoreOverflow { x: 2, y: -1 });
    let cell = g.get(at).unwrap();
    assert_eq!(cell.score(), u32::MAX);
    assert_eq!(cell.best(), Some(0b0001));
}

#[test]
fn history_is_optional_and_sorts_by_weight() {
    let at = Coord::new(0, 0);
    let mut plain = Grid::new(GridKind::Triangle, 4, false);
    plain.add(at, 4).unwrap();
    plain.record_fold(at, 0b1111, Mode::Min).unwrap();
    assert!(plain.get(at).unwrap().history().is_empty());

    let mut g = Grid::new(GridKind::Triangle, 4, false).with_history(true);
    g.add(at, 4).unwrap();
    for bits in [0b1111, 0b0011, 0b1000, 0b0101, 0b0001] {
        g.record_fold(at, bits, Mode::Min).unwrap();
    }
    let cell = g.get(at).unwrap();
    assert_eq!(cell.history(), &[0b1111, 0b0011, 0b1000, 0b0101, 0b0001]);
    assert_eq!(
        cell.history_by_weight(),
        vec![0b1000, 0b0001, 0b0011, 0b0101, 0b1111]
    );
}

#[test]
fn cells_iterate_in_coordinate_order() {
    let mut g = Grid::new(GridKind::Triangle, 3, false);
    for (x, y) in [(1, 0), (-1, 2), (1, -1), (0, 0)] {
        g.add(Coord::new(x, y), 0).unwrap();
    }
    let order: Vec<Coord> = g.cells().map(Cell::coord).collect();
    assert_eq!(
        order,
        vec![
            Coord::new(-1, 2),
            Coord::new(0, 0),
            Coord::new(1, -1),
            Coord::new(1, 0)
        ]
    );
    assert_eq!(g.len(), 4);
}

#[test]
fn centroid_is_mean_of_corners() {
    for kind in [GridKind::Triangle, GridKind::Square] {
        let tiling = kind.tiling();
        for side in [0.5, 1.0, 2.0, 3.75] {
            for x in -3..=3 {
                for y in -3..=3 {
                    let c = Coord::new(x, y);
                    let corners = tiling.corners(c, side);
                    let mean = corners.iter().fold(Vector2::zeros(), |a, p| a + p)
                        / corners.len() as f64;
                    assert!(
                        close(tiling.center(c, side), mean),
                        "{kind} {c} side={side}"
                    );
                }
            }
        }
    }
}

#[test]
fn triangle_corners_follow_orientation() {
    let t = TriangleTiling;
    let h = triangle_height(1.0);
    let up = t.corners(Coord::new(0, 0), 1.0);
    assert!(close(up[0], Vector2::new(0.0, 0.0)));
    assert!(close(up[1], Vector2::new(0.5, h)));
    assert!(close(up[2], Vector2::new(1.0, 0.0)));
    let down = t.corners(Coord::new(1, 0), 1.0);
    assert!(close(down[0], Vector2::new(0.5, h)));
    assert!(close(down[1], Vector2::new(1.0, 0.0)));
    assert!(close(down[2], Vector2::new(1.5, h)));
}

#[test]
fn neighbouring_triangles_share_an_edge() {
    let t = TriangleTiling;
    let a = t.corners(Coord::new(0, 0), 1.0);
    let b = t.corners(Coord::new(1, 0), 1.0);
    let shared = a.iter().filter(|p| b.iter().any(|q| close(**p, *q))).count();
    assert_eq!(shared, 2);
    let below = t.corners(Coord::new(0, -1), 1.0);
    let shared = a.iter().filter(|p| below.iter().any(|q| close(**p, *q))).count();
    assert_eq!(shared, 2);
}

#[test]
fn triangle_strip_outline_is_parallelogram_in_start_row() {
    let h = triangle_height(1.0);
    let outline = TriangleTiling.strip_outline(2, 1.0, false);
    let expected = [
        Vector2::new(0.0, 0.0),
        Vector2::new(0.5, h),
        Vector2::new(1.5, h),
        Vector2::new(2.0, 0.0),
    ];
    assert_eq!(outline.len(), 4);
    for (got, want) in outline.iter().zip(expected) {
        assert!(close(*got, want));
    }

    // odd length: the end triangle points the other way
    let outline = TriangleTiling.strip_outline(3, 1.0, false);
    assert!(close(outline[2], Vector2::new(2.5, h)));
    assert!(close(outline[3], Vector2::new(2.0, 0.0)));

    let flipped = TriangleTiling.strip_outline(2, 1.0, true);
    assert!(close(flipped[0], Vector2::new(0.0, 2.0 * h)));
    assert!(close(flipped[1], Vector2::new(0.5, h)));
}

#[test]
fn square_strip_outline_traces_staircase() {
    let outline = SquareTiling.strip_outline(2, 1.0, false);
    // cells (0,0), (0,1), (1,1)
    let expected = [
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (2.0, 1.0),
        (2.0, 2.0),
        (0.0, 2.0),
    ];
    assert_eq!(outline.len(), expected.len());
    for (got, (x, y)) in outline.iter().zip(expected) {
        assert!(close(*got, Vector2::new(x, y)));
    }
    let scaled = SquareTiling.strip_outline(2, 2.0, true);
    assert!(close(scaled[0], Vector2::new(0.0, 2.0)));
}

#[test]
fn square_outline_of_overlong_strip_is_finite() {
    let g = Grid::new(GridKind::Square, 70, false);
    let outline = g.strip_outline(1.0);
    assert!(!outline.is_empty());
    assert!(outline.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn shapes_carry_geometry() {
    let mut g = Grid::new(GridKind::Square, 1, false);
    g.add(Coord::new(2, 3), 7).unwrap();
    let shapes: Vec<ShapeView> = g.shapes(2.0).collect();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].score, 7);
    assert_eq!(shapes[0].corners.len(), 4);
    assert!(close(shapes[0].center, Vector2::new(5.0, 7.0)));
}

#[test]
fn tiling_factory_matches_kind() {
    assert_eq!(GridKind::Triangle.tiling().kind(), GridKind::Triangle);
    assert_eq!(GridKind::Square.tiling().kind(), GridKind::Square);
    assert_eq!(
        GridKind::Square.tiling().map_to_cell(0, Coord::new(0, 0), 2),
        Coord::new(1, 1)
    );
}

#[test]
fn kinds_and_modes_parse() {
    assert_eq!("Triangle".parse::<GridKind>().unwrap(), GridKind::Triangle);
    assert_eq!("sq".parse::<GridKind>().unwrap(), GridKind::Square);
    assert!("hex".parse::<GridKind>().is_err());
    assert_eq!("count".parse::<Mode>().unwrap(), Mode::Count);
    assert_eq!(Mode::Min.to_string(), "min");
}

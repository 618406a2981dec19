//! Figures: colored score fields and pixel-strip diagrams.
//!
//! No text is drawn, so neither backend needs fonts. The output format follows
//! the file extension: `.svg` goes through the SVG backend, anything else is
//! encoded as a bitmap (PNG by default).

use std::path::Path;

use anyhow::{bail, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use stripfold::bits::is_folded;
use stripfold::{Grid, Mode};

use crate::colormap::ScoreColors;

const MAX_FIGURE_PX: f64 = 4000.0;
const COLOR_BAR_PX: u32 = 90;
const GRID_LINE: RGBColor = RGBColor(225, 225, 225);

/// Figure options.
#[derive(Clone, Copy, Debug)]
pub struct RenderCfg {
    /// Side length of one cell in world units.
    pub side: f64,
    pub log_scale: bool,
    /// Overlay the outline of the unfolded strip.
    pub draw_strip: bool,
    /// Pixels per world unit (shrunk for very large grids).
    pub pixels_per_unit: f64,
    /// Empty cells of margin around the populated bounds.
    pub padding: f64,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            side: 1.0,
            log_scale: false,
            draw_strip: true,
            pixels_per_unit: 48.0,
            padding: 2.0,
        }
    }
}

/// `{length}_max_{max}_{mode}_{kind}-grid[_log]`
pub fn figure_stem(grid: &Grid, mode: Mode, log_scale: bool) -> String {
    format!(
        "{}_max_{}_{}_{}-grid{}",
        grid.length(),
        grid.max_score(),
        mode,
        grid.kind(),
        if log_scale { "_log" } else { "" }
    )
}

type Pt = (f64, f64);

/// Everything a score-field figure draws, in world coordinates.
struct Scene {
    cells: Vec<(Vec<Pt>, RGBColor)>,
    outline: Option<Vec<Pt>>,
    grid_lines: Vec<[Pt; 2]>,
    x_range: std::ops::Range<f64>,
    y_range: std::ops::Range<f64>,
    bands: Vec<RGBColor>,
}

impl Scene {
    fn build(grid: &Grid, cfg: &RenderCfg) -> Result<Self> {
        if grid.is_empty() {
            bail!("grid has no populated cells to draw");
        }
        let colors = ScoreColors::for_max_score(grid.max_score(), cfg.log_scale);
        let cells: Vec<(Vec<Pt>, RGBColor)> = grid
            .shapes(cfg.side)
            .map(|s| {
                let pts = s.corners.iter().map(|p| (p.x, p.y)).collect();
                (pts, colors.color(s.score))
            })
            .collect();
        let outline: Option<Vec<Pt>> = cfg.draw_strip.then(|| {
            grid.strip_outline(cfg.side)
                .iter()
                .map(|p| (p.x, p.y))
                .collect()
        });

        let all = cells
            .iter()
            .flat_map(|(pts, _)| pts.iter())
            .chain(outline.iter().flatten());
        let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for &(x, y) in all {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        let pad = cfg.padding * cfg.side;
        let (x0, y0, x1, y1) = (x0 - pad, y0 - pad, x1 + pad, y1 + pad);

        let step = cfg.side.max(f64::EPSILON);
        let mut grid_lines = Vec::new();
        let mut x = (x0 / step).ceil() * step;
        while x <= x1 {
            grid_lines.push([(x, y0), (x, y1)]);
            x += step;
        }
        let mut y = (y0 / step).ceil() * step;
        while y <= y1 {
            grid_lines.push([(x0, y), (x1, y)]);
            y += step;
        }

        Ok(Self {
            cells,
            outline,
            grid_lines,
            x_range: x0..x1,
            y_range: y0..y1,
            bands: colors.bands(),
        })
    }

    /// Pixel size keeping world units square, capped at `MAX_FIGURE_PX`.
    fn size(&self, cfg: &RenderCfg) -> (u32, u32) {
        let w = self.x_range.end - self.x_range.start;
        let h = self.y_range.end - self.y_range.start;
        let scale = cfg.pixels_per_unit.min(MAX_FIGURE_PX / w.max(h));
        let px = |v: f64| (v * scale).round().max(64.0) as u32;
        (px(w) + COLOR_BAR_PX, px(h))
    }
}

fn closed(pts: &[Pt]) -> Vec<Pt> {
    let mut ring = pts.to_vec();
    if let Some(&first) = pts.first() {
        ring.push(first);
    }
    ring
}

fn draw_scene<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    scene: &Scene,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (width, _) = root.dim_in_pixel();
    let (plot, bar) = root.split_horizontally(width.saturating_sub(COLOR_BAR_PX));

    let mut chart = ChartBuilder::on(&plot)
        .margin(8)
        .build_cartesian_2d(scene.x_range.clone(), scene.y_range.clone())?;
    chart.draw_series(
        scene
            .grid_lines
            .iter()
            .map(|seg| PathElement::new(seg.to_vec(), GRID_LINE)),
    )?;
    chart.draw_series(
        scene
            .cells
            .iter()
            .map(|(pts, color)| Polygon::new(pts.clone(), color.filled())),
    )?;
    chart.draw_series(
        scene
            .cells
            .iter()
            .map(|(pts, _)| PathElement::new(closed(pts), BLACK.mix(0.2))),
    )?;
    if let Some(outline) = &scene.outline {
        chart.draw_series(std::iter::once(PathElement::new(
            closed(outline),
            BLACK.stroke_width(2),
        )))?;
    }

    let bar = bar.margin(20, 20, 25, 25);
    let levels = scene.bands.len().max(1) as f64;
    let mut legend = ChartBuilder::on(&bar).build_cartesian_2d(0.0..1.0, 0.0..levels)?;
    legend.draw_series(scene.bands.iter().enumerate().map(|(i, c)| {
        let lo = i as f64;
        Rectangle::new([(0.0, lo), (1.0, lo + 1.0)], c.filled())
    }))?;
    legend.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, levels), (0.0, levels), (0.0, 0.0)],
        BLACK,
    )))?;

    root.present()?;
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Draw the score field of `grid` to `path`.
pub fn render_grid(grid: &Grid, path: &Path, cfg: &RenderCfg) -> Result<()> {
    let scene = Scene::build(grid, cfg)?;
    let size = scene.size(cfg);
    tracing::debug!(
        path = %path.display(),
        width = size.0,
        height = size.1,
        cells = scene.cells.len(),
        "render_grid"
    );
    if is_svg(path) {
        draw_scene(SVGBackend::new(path, size).into_drawing_area(), &scene)?;
    } else {
        draw_scene(BitMapBackend::new(path, size).into_drawing_area(), &scene)?;
    }
    Ok(())
}

fn draw_pixels<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    rows: &[u64],
    length: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let width = f64::from(length.max(1));
    let height = rows.len().max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .margin(8)
        .build_cartesian_2d(-1.0..width + 1.0, -1.0..height + 1.0)?;

    let mut lines = Vec::new();
    for i in 0..=length {
        lines.push(vec![(f64::from(i), 0.0), (f64::from(i), height)]);
    }
    for j in 0..=rows.len() {
        lines.push(vec![(0.0, j as f64), (width, j as f64)]);
    }
    chart.draw_series(lines.into_iter().map(|l| PathElement::new(l, GRID_LINE)))?;

    // column 0 is the most significant crease, matching the zero-padded binary form
    let squares = rows.iter().enumerate().flat_map(|(row, &bits)| {
        (0..length)
            .filter(move |&col| is_folded(bits, length - 1 - col))
            .map(move |col| {
                let (x, y) = (f64::from(col), row as f64);
                Rectangle::new([(x, y), (x + 1.0, y + 1.0)], BLACK.filled())
            })
    });
    chart.draw_series(squares)?;
    root.present()?;
    Ok(())
}

/// Draw one row per bit-string (folded creases black) to `path`.
pub fn render_pixels(rows: &[u64], length: u32, path: &Path, pixels_per_unit: f64) -> Result<()> {
    let px = |cells: f64| ((cells + 2.0) * pixels_per_unit).round().clamp(64.0, MAX_FIGURE_PX) as u32;
    let size = (px(f64::from(length)), px(rows.len() as f64));
    tracing::debug!(path = %path.display(), rows = rows.len(), length, "render_pixels");
    if is_svg(path) {
        draw_pixels(SVGBackend::new(path, size).into_drawing_area(), rows, length)?;
    } else {
        draw_pixels(BitMapBackend::new(path, size).into_drawing_area(), rows, length)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripfold::{enumerate, EnumCfg, GridKind};

    #[test]
    fn stem_encodes_run_parameters() {
        let run = enumerate(&EnumCfg::new(2)).unwrap();
        assert_eq!(figure_stem(&run.grid, Mode::Min, false), "2_max_2_min_triangle-grid");
        let sq = enumerate(&EnumCfg {
            kind: GridKind::Square,
            mode: Mode::Count,
            ..EnumCfg::new(3)
        })
        .unwrap();
        let stem = figure_stem(&sq.grid, Mode::Count, true);
        assert!(stem.starts_with("3_max_"));
        assert!(stem.ends_with("_count_square-grid_log"));
    }

    #[test]
    fn scene_bounds_include_padding_and_outline() {
        let run = enumerate(&EnumCfg::new(3)).unwrap();
        let cfg = RenderCfg::default();
        let scene = Scene::build(&run.grid, &cfg).unwrap();
        assert_eq!(scene.cells.len(), run.grid.len());
        assert!(scene.outline.is_some());
        assert!(scene.x_range.start <= -2.0 && scene.x_range.end >= 4.5);
        assert_eq!(scene.bands.len() as u32, run.grid.max_score() + 1);
        let (w, h) = scene.size(&cfg);
        assert!(w > COLOR_BAR_PX && h >= 64);
    }

    #[test]
    fn empty_grid_is_refused() {
        let grid = Grid::new(GridKind::Triangle, 3, false);
        assert!(Scene::build(&grid, &RenderCfg::default()).is_err());
    }

    #[test]
    fn writes_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let run = enumerate(&EnumCfg::new(5)).unwrap();
        let cfg = RenderCfg {
            pixels_per_unit: 16.0,
            ..RenderCfg::default()
        };
        let png = dir.path().join("field.png");
        render_grid(&run.grid, &png, &cfg).unwrap();
        assert!(std::fs::metadata(&png).unwrap().len() > 0);
        let svg = dir.path().join("field.svg");
        render_grid(&run.grid, &svg, &cfg).unwrap();
        assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
    }

    #[test]
    fn writes_pixel_diagram() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixels.png");
        render_pixels(&[0b0001, 0b1000, 0b0110], 4, &path, 12.0).unwrap();
        assert!(path.exists());
    }
}

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use stripfold::bits::{bit_length, format_bits, popcount, reverse_bits, MAX_STRIP_LENGTH};
use stripfold::{enumerate, fold_path, Coord, EnumCfg, GridKind, Mode};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

mod colormap;
mod provenance;
mod render;
mod table;

use provenance::{write_sidecar, Payload};
use render::{figure_stem, render_grid, render_pixels, RenderCfg};

#[derive(Parser)]
#[command(name = "stripfold")]
#[command(about = "Fold strips onto triangle and square grids and map the fewest folds per cell")]
struct Cmd {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    action: Action,
}

/// Which strip is folded onto which tiling.
#[derive(Args, Clone, Debug)]
struct StripArgs {
    #[arg(long, default_value = "triangle")]
    grid: GridKind,
    /// Start the strip on the upside-down row
    #[arg(long)]
    flipped: bool,
    /// Skip bit-strings with more folds than this
    #[arg(long)]
    max_folds: Option<u32>,
}

#[derive(Args, Clone, Debug)]
struct DrawArgs {
    /// Cell side length in world units
    #[arg(long, default_value_t = 1.0)]
    side: f64,
    /// Logarithmic color scale
    #[arg(long)]
    log_scale: bool,
    /// Do not overlay the unfolded strip outline
    #[arg(long)]
    no_strip: bool,
}

impl DrawArgs {
    fn render_cfg(&self) -> Result<RenderCfg> {
        if !(self.side.is_finite() && self.side > 0.0) {
            bail!("--side must be positive, got {}", self.side);
        }
        Ok(RenderCfg {
            side: self.side,
            log_scale: self.log_scale,
            draw_strip: !self.no_strip,
            ..RenderCfg::default()
        })
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    fn ext(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TableFormat {
    Csv,
    Parquet,
    #[value(name = "none")]
    Off,
}

impl TableFormat {
    fn ext(self) -> Option<&'static str> {
        match self {
            TableFormat::Csv => Some("csv"),
            TableFormat::Parquet => Some("parquet"),
            TableFormat::Off => None,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Enumerate one or more strips and write a figure, a cell table and provenance per strip
    Run {
        /// Strip length in creases; repeat for several strips
        #[arg(long = "length", required = true)]
        lengths: Vec<u32>,
        #[command(flatten)]
        strip: StripArgs,
        #[arg(long, default_value = "min")]
        mode: Mode,
        /// Keep every landing bit-string per cell
        #[arg(long)]
        keep_history: bool,
        #[command(flatten)]
        draw: DrawArgs,
        #[arg(long, default_value = "figures")]
        out_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
        format: ImageFormat,
        #[arg(long, value_enum, default_value_t = TableFormat::Csv)]
        table: TableFormat,
    },
    /// Draw every bit-string landing on one cell, fewest folds first
    Pixels {
        #[arg(long)]
        length: u32,
        #[arg(long, allow_negative_numbers = true)]
        x: i64,
        #[arg(long, allow_negative_numbers = true)]
        y: i64,
        #[command(flatten)]
        strip: StripArgs,
        #[arg(long, default_value_t = 24.0)]
        pixels_per_unit: f64,
        /// Output image (defaults to figures/<length>_<x>_<y>_<grid>-pixels.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Re-render a score field from a saved cell table
    Figure {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        length: u32,
        #[arg(long, default_value = "triangle")]
        grid: GridKind,
        #[arg(long)]
        flipped: bool,
        #[arg(long, default_value = "min")]
        mode: Mode,
        #[command(flatten)]
        draw: DrawArgs,
        /// Output image (defaults to the usual figure name next to the table)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the cells one bit-string walks through as JSON
    Trace {
        #[arg(long)]
        length: u32,
        /// Crease bit-string, `0b...` or decimal
        #[arg(long, value_parser = parse_bits)]
        bits: u64,
        #[arg(long, default_value = "triangle")]
        grid: GridKind,
        #[arg(long)]
        flipped: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.quiet {
        LevelFilter::WARN
    } else {
        match cmd.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cmd.action {
        Action::Run {
            lengths,
            strip,
            mode,
            keep_history,
            draw,
            out_dir,
            format,
            table,
        } => {
            let render_cfg = draw.render_cfg()?;
            for length in lengths {
                let cfg = EnumCfg {
                    length,
                    flipped: strip.flipped,
                    kind: strip.grid,
                    mode,
                    max_folds: strip.max_folds,
                    keep_history,
                };
                run(&cfg, &render_cfg, &out_dir, format, table)?;
            }
            Ok(())
        }
        Action::Pixels {
            length,
            x,
            y,
            strip,
            pixels_per_unit,
            out,
        } => pixels(length, Coord::new(x, y), &strip, pixels_per_unit, out),
        Action::Figure {
            from,
            length,
            grid,
            flipped,
            mode,
            draw,
            out,
        } => figure(&from, length, grid, flipped, mode, &draw, out),
        Action::Trace {
            length,
            bits,
            grid,
            flipped,
        } => trace(length, bits, grid, flipped),
        Action::Report => report(),
    }
}

fn parse_bits(s: &str) -> Result<u64, String> {
    let s = s.trim().replace('_', "");
    let parsed = match s.strip_prefix("0b") {
        Some(binary) => u64::from_str_radix(binary, 2),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid bit-string `{s}`: {e}"))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn cfg_params(cfg: &EnumCfg) -> serde_json::Value {
    serde_json::json!({
        "length": cfg.length,
        "flipped": cfg.flipped,
        "grid": cfg.kind.name(),
        "mode": cfg.mode.name(),
        "max_folds": cfg.max_folds,
        "keep_history": cfg.keep_history,
    })
}

fn run(
    cfg: &EnumCfg,
    render_cfg: &RenderCfg,
    out_dir: &Path,
    format: ImageFormat,
    table: TableFormat,
) -> Result<()> {
    tracing::info!(
        length = cfg.length,
        grid = %cfg.kind,
        mode = %cfg.mode,
        flipped = cfg.flipped,
        max_folds = ?cfg.max_folds,
        "run"
    );
    let started = Instant::now();
    let result = enumerate(cfg)?;
    let grid = &result.grid;
    tracing::info!(
        visited = result.visited,
        cells = grid.len(),
        max_score = grid.max_score(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "enumerated"
    );

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let stem = figure_stem(grid, cfg.mode, render_cfg.log_scale);
    let figure_path = out_dir.join(format!("{stem}.{}", format.ext()));
    render_grid(grid, &figure_path, render_cfg)?;
    tracing::info!(path = %figure_path.display(), "figure_written");

    let mut params = cfg_params(cfg);
    params["side"] = render_cfg.side.into();
    params["log_scale"] = render_cfg.log_scale.into();
    params["draw_strip"] = render_cfg.draw_strip.into();
    params["visited"] = result.visited.into();
    params["cells"] = grid.len().into();
    params["max_score"] = grid.max_score().into();
    let mut payload = Payload::new(params).with_output(&figure_path);

    if let Some(ext) = table.ext() {
        let table_path = out_dir.join(format!("{stem}.{ext}"));
        table::write_table(grid, &table_path)?;
        payload = payload.with_output(table_path);
    }
    write_sidecar(&figure_path, payload)?;
    Ok(())
}

fn pixels(
    length: u32,
    at: Coord,
    strip: &StripArgs,
    pixels_per_unit: f64,
    out: Option<PathBuf>,
) -> Result<()> {
    let cfg = EnumCfg {
        length,
        flipped: strip.flipped,
        kind: strip.grid,
        mode: Mode::Min,
        max_folds: strip.max_folds,
        keep_history: true,
    };
    tracing::info!(length, x = at.x, y = at.y, grid = %cfg.kind, "pixels");
    let result = enumerate(&cfg)?;
    let Some(cell) = result.grid.get(at) else {
        bail!("no bit-string of length {length} lands on cell {at}");
    };
    let rows = cell.history_by_weight();

    let path = out.unwrap_or_else(|| {
        PathBuf::from("figures").join(format!(
            "{length}_{}_{}_{}-pixels.png",
            at.x, at.y, cfg.kind
        ))
    });
    ensure_parent(&path)?;
    render_pixels(&rows, length, &path, pixels_per_unit)?;
    tracing::info!(path = %path.display(), rows = rows.len(), min_folds = cell.score(), "pixels_written");

    let mut params = cfg_params(&cfg);
    params["x"] = at.x.into();
    params["y"] = at.y.into();
    params["rows"] = rows.len().into();
    write_sidecar(&path, Payload::new(params))?;
    Ok(())
}

fn figure(
    from: &Path,
    length: u32,
    kind: GridKind,
    flipped: bool,
    mode: Mode,
    draw: &DrawArgs,
    out: Option<PathBuf>,
) -> Result<()> {
    if length > MAX_STRIP_LENGTH {
        bail!("--length {length} exceeds the maximum of {MAX_STRIP_LENGTH}");
    }
    tracing::info!(from = %from.display(), length, grid = %kind, "figure");
    let render_cfg = draw.render_cfg()?;
    let grid = table::read_table(from, kind, length, flipped)?;
    let path = out.unwrap_or_else(|| {
        let stem = figure_stem(&grid, mode, render_cfg.log_scale);
        from.with_file_name(format!("{stem}.png"))
    });
    ensure_parent(&path)?;
    render_grid(&grid, &path, &render_cfg)?;
    tracing::info!(path = %path.display(), cells = grid.len(), "figure_written");

    let params = serde_json::json!({
        "from": from.to_string_lossy(),
        "length": length,
        "flipped": flipped,
        "grid": kind.name(),
        "mode": mode.name(),
        "log_scale": render_cfg.log_scale,
        "draw_strip": render_cfg.draw_strip,
    });
    write_sidecar(&path, Payload::new(params))?;
    Ok(())
}

#[derive(Serialize)]
struct TraceOut {
    grid: &'static str,
    length: u32,
    bits: String,
    reversed: String,
    folds: u32,
    start: (i64, i64),
    landing: (i64, i64),
    path: Vec<(i64, i64)>,
}

fn trace(length: u32, bits: u64, kind: GridKind, flipped: bool) -> Result<()> {
    if length > MAX_STRIP_LENGTH {
        bail!("--length {length} exceeds the maximum of {MAX_STRIP_LENGTH}");
    }
    if bit_length(bits) > length {
        bail!("bit-string {bits:#b} has creases beyond length {length}");
    }
    let start = Coord::start(flipped);
    let path = fold_path(bits, start, length, kind);
    let landing = path.last().copied().unwrap_or(start);
    tracing::debug!(length, bits, grid = %kind, landing = %landing, "trace");
    let out = TraceOut {
        grid: kind.name(),
        length,
        bits: format_bits(bits, length),
        reversed: format_bits(reverse_bits(bits, length), length),
        folds: popcount(bits),
        start: (start.x, start.y),
        landing: (landing.x, landing.y),
        path: path.iter().map(|c| (c.x, c.y)).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "stripfold_version": stripfold::VERSION,
        "max_strip_length": MAX_STRIP_LENGTH,
        "grids": [GridKind::Triangle.name(), GridKind::Square.name()],
        "modes": [Mode::Min.name(), Mode::Count.name()],
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

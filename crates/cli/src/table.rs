//! Cell tables: one row per populated cell, written with Polars.
//!
//! Columns: `x`, `y`, `score`, `best` (bit-string as integer), `best_folds`,
//! `best_bits` (zero-padded binary, most significant crease first). CSV or
//! Parquet by file extension.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use stripfold::bits::{format_bits, popcount};
use stripfold::{Coord, Grid, GridKind};

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"))
}

/// Grid cells as a DataFrame, in coordinate order.
pub fn grid_frame(grid: &Grid) -> PolarsResult<DataFrame> {
    let n = grid.len();
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    let mut scores = Vec::with_capacity(n);
    let mut best = Vec::with_capacity(n);
    let mut best_folds = Vec::with_capacity(n);
    let mut best_bits = Vec::with_capacity(n);
    for cell in grid.cells() {
        xs.push(cell.coord().x);
        ys.push(cell.coord().y);
        scores.push(cell.score());
        best.push(cell.best());
        best_folds.push(cell.best().map(popcount));
        best_bits.push(cell.best().map(|b| format_bits(b, grid.length())));
    }
    df!(
        "x" => xs,
        "y" => ys,
        "score" => scores,
        "best" => best,
        "best_folds" => best_folds,
        "best_bits" => best_bits
    )
}

/// Write the cell table of `grid` to `path`.
pub fn write_table(grid: &Grid, path: &Path) -> Result<()> {
    let mut df = grid_frame(grid)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_parquet(path) {
        ParquetWriter::new(&mut file)
            .finish(&mut df)
            .with_context(|| format!("writing parquet {}", path.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("writing csv {}", path.display()))?;
    }
    tracing::info!(path = %path.display(), rows = df.height(), "table_written");
    Ok(())
}

/// Rebuild a score grid (scores only) from a table written by [`write_table`].
pub fn read_table(path: &Path, kind: GridKind, length: u32, flipped: bool) -> Result<Grid> {
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    let df = lf
        .select([col("x"), col("y"), col("score")])
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;

    let xs = df.column("x")?.cast(&DataType::Int64)?;
    let ys = df.column("y")?.cast(&DataType::Int64)?;
    let scores = df.column("score")?.cast(&DataType::Int64)?;

    let mut grid = Grid::new(kind, length, flipped);
    let rows = xs.i64()?.into_iter().zip(ys.i64()?).zip(scores.i64()?);
    for (row, ((x, y), score)) in rows.enumerate() {
        let (Some(x), Some(y), Some(score)) = (x, y, score) else {
            bail!("row {row} of {} has a missing value", path.display());
        };
        let score = u32::try_from(score)
            .with_context(|| format!("row {row}: score {score} out of range"))?;
        grid.add(Coord::new(x, y), score)?;
    }
    tracing::debug!(path = %path.display(), cells = grid.len(), "table_read");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripfold::{enumerate, EnumCfg, Mode};

    #[test]
    fn frame_has_one_row_per_cell() {
        let run = enumerate(&EnumCfg::new(2)).unwrap();
        let df = grid_frame(&run.grid).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(df.width(), 6);
        let bits: Vec<Option<&str>> = df
            .column("best_bits")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(bits, vec![Some("01"), Some("11"), Some("10"), Some("00")]);
    }

    #[test]
    fn csv_table_restores_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells.csv");
        let cfg = EnumCfg {
            mode: Mode::Count,
            ..EnumCfg::new(6)
        };
        let run = enumerate(&cfg).unwrap();
        write_table(&run.grid, &path).unwrap();
        let back = read_table(&path, GridKind::Triangle, 6, false).unwrap();
        let a: Vec<(Coord, u32)> = run.grid.cells().map(|c| (c.coord(), c.score())).collect();
        let b: Vec<(Coord, u32)> = back.cells().map(|c| (c.coord(), c.score())).collect();
        assert_eq!(a, b);
        assert_eq!(back.max_score(), run.grid.max_score());
    }

    #[test]
    fn parquet_table_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells.parquet");
        let run = enumerate(&EnumCfg::new(4)).unwrap();
        write_table(&run.grid, &path).unwrap();
        let back = read_table(&path, GridKind::Triangle, 4, false).unwrap();
        assert_eq!(back.len(), run.grid.len());
    }
}

//! Print the minimum-fold field of a short triangle strip as text.
//!
//! Rows run top to bottom, one character per triangle: the fold count, or `.`
//! where the strip end cannot land.

use stripfold::{enumerate, Coord, EnumCfg};

fn main() -> stripfold::Result<()> {
    let length = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    let run = enumerate(&EnumCfg::new(length))?;
    let b = run.grid.bounds();
    println!(
        "length={length} visited={} cells={} max_score={}",
        run.visited,
        run.grid.len(),
        run.grid.max_score()
    );
    if b.is_empty() {
        return Ok(());
    }
    for y in (b.min_y..=b.max_y).rev() {
        let row: String = (b.min_x..=b.max_x)
            .map(|x| match run.grid.get(Coord::new(x, y)) {
                Some(cell) => std::char::from_digit(cell.score().min(35), 36).unwrap_or('#'),
                None => '.',
            })
            .collect();
        println!("{row}");
    }
    Ok(())
}

//! Discrete color maps for score fields.
//!
//! Two palettes: a sequential `Oranges` for linear scales and a diverging
//! `Spectral` for log scales. Both are resampled to `max_score + 1` levels so
//! every integer score gets its own band, and the color bar shows exactly those
//! bands.

use plotters::style::RGBColor;

const ORANGES: [(u8, u8, u8); 5] = [
    (255, 245, 235),
    (253, 208, 162),
    (253, 141, 60),
    (217, 72, 1),
    (127, 39, 4),
];

const SPECTRAL: [(u8, u8, u8); 7] = [
    (158, 1, 66),
    (244, 109, 67),
    (254, 224, 139),
    (255, 255, 191),
    (230, 245, 152),
    (102, 194, 165),
    (94, 79, 162),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMap {
    Oranges,
    Spectral,
}

impl ColorMap {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorMap::Oranges => &ORANGES,
            ColorMap::Spectral => &SPECTRAL,
        }
    }

    /// Continuous lookup, `t` clamped to `[0, 1]`.
    pub fn at(self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let f = scaled - i as f64;
        let (a, b) = (stops[i], stops[i + 1]);
        let mix = |p: u8, q: u8| (p as f64 + (q as f64 - p as f64) * f).round() as u8;
        RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    /// Lookup in the palette resampled to `levels` colors.
    pub fn discrete(self, levels: u32, t: f64) -> RGBColor {
        let levels = levels.max(1);
        if levels == 1 {
            return self.at(0.0);
        }
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let band = ((t * levels as f64).floor() as u32).min(levels - 1);
        self.at(band as f64 / (levels - 1) as f64)
    }
}

/// Maps a score onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Norm {
    Linear { vmin: f64, vmax: f64 },
    /// Values at or below `vmin` map to `0`.
    Log { vmin: f64, vmax: f64 },
}

impl Norm {
    pub fn apply(&self, v: f64) -> f64 {
        let t = match *self {
            Norm::Linear { vmin, vmax } => {
                if vmax <= vmin {
                    0.0
                } else {
                    (v - vmin) / (vmax - vmin)
                }
            }
            Norm::Log { vmin, vmax } => {
                if v <= vmin || vmax <= vmin {
                    0.0
                } else {
                    (v.ln() - vmin.ln()) / (vmax.ln() - vmin.ln())
                }
            }
        };
        t.clamp(0.0, 1.0)
    }
}

/// Score → color for one grid.
#[derive(Clone, Copy, Debug)]
pub struct ScoreColors {
    pub map: ColorMap,
    pub norm: Norm,
    pub levels: u32,
}

impl ScoreColors {
    /// `Oranges` over `[0, max + 1]`, or `Spectral` over `[1, max + 1]` on a log scale.
    pub fn for_max_score(max_score: u32, log_scale: bool) -> Self {
        let top = f64::from(max_score) + 1.0;
        let (map, norm) = if log_scale {
            (ColorMap::Spectral, Norm::Log { vmin: 1.0, vmax: top })
        } else {
            (ColorMap::Oranges, Norm::Linear { vmin: 0.0, vmax: top })
        };
        Self {
            map,
            norm,
            levels: max_score + 1,
        }
    }

    pub fn color(&self, score: u32) -> RGBColor {
        self.map
            .discrete(self.levels, self.norm.apply(f64::from(score)))
    }

    /// One color per level, lowest first, for the color bar.
    pub fn bands(&self) -> Vec<RGBColor> {
        (0..self.levels)
            .map(|i| self.map.discrete(self.levels, (i as f64 + 0.5) / self.levels as f64))
            .collect()
    }
}

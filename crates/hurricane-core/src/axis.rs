// File: crates/hurricane-core/src/axis.rs
// Summary: Axis model (label + range), tick placement and data-to-pixel mapping.

use skia_safe as skia;

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        let (min, max) = if (max - min).abs() < 1e-12 { (min - 0.5, max + 0.5) } else { (min, max) };
        Self { label: label.into(), min, max }
    }

    pub fn span(&self) -> f64 { self.max - self.min }

    /// Ticks at "nice" steps (1, 2, 2.5, 5 x 10^k) inside the range.
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        nice_ticks(self.min, self.max, target)
    }
}

pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return vec![min];
    }
    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);
    let first = (min / step).ceil() * step;
    let mut out = Vec::new();
    let mut v = first;
    while v <= max + step * 1e-9 {
        // snap -0.0 and float drift
        out.push(if v.abs() < step * 1e-9 { 0.0 } else { v });
        v += step;
    }
    out
}

/// Compact tick label: integers without decimals, otherwise up to 3 significant decimals.
pub fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Maps data coordinates into a pixel rectangle (y grows downward on screen).
#[derive(Clone, Debug)]
pub struct PlotArea {
    pub rect: skia::Rect,
    pub x: Axis,
    pub y: Axis,
}

impl PlotArea {
    pub fn new(rect: skia::Rect, x: Axis, y: Axis) -> Self {
        Self { rect, x, y }
    }

    pub fn sx(&self, x: f64) -> f32 {
        self.rect.left + ((x - self.x.min) / self.x.span()) as f32 * self.rect.width()
    }

    pub fn sy(&self, y: f64) -> f32 {
        self.rect.bottom - ((y - self.y.min) / self.y.span()) as f32 * self.rect.height()
    }

    pub fn to_px(&self, x: f64, y: f64) -> skia::Point {
        skia::Point::new(self.sx(x), self.sy(y))
    }
}

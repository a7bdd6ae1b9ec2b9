// File: crates/hurricane-core/src/render/bar.rs
// Summary: Row-wise x/y pairing with duplicate-key policy, and categorical bar drawing.

use indexmap::{IndexMap, IndexSet};

use super::{require_numeric, ResolvedStyle};
use crate::axis::{format_tick, Axis, PlotArea};
use crate::dataset::{Column, Value};
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::spec::{ChartSpec, DuplicatePolicy};
use crate::text::Align;
use crate::types::Insets;

/// One bar: an x key, its (possibly aggregated) height, and how many rows fed it.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    pub key: Value,
    pub value: f64,
    pub count: usize,
}

impl BarDatum {
    pub fn label(&self) -> String {
        self.key.to_string()
    }
}

/// Pair `x` and `y` row-wise into one bar per distinct x, in first-seen order.
///
/// Rows with a missing x or y are skipped. Repeated x-values are averaged,
/// summed or rejected according to `policy`; rejection looks at every row with
/// an x-value, including rows whose y is missing.
pub fn bars(x: &Column, y: &Column, policy: DuplicatePolicy) -> Result<Vec<BarDatum>> {
    require_numeric(y, "y")?;

    let mut seen: IndexSet<&Value> = IndexSet::new();
    let mut acc: IndexMap<&Value, (f64, usize)> = IndexMap::new();
    for (xv, yv) in x.values().iter().zip(y.values()) {
        if xv.is_missing() {
            continue;
        }
        if policy == DuplicatePolicy::Reject && !seen.insert(xv) {
            return Err(Error::InvalidInput(format!(
                "x column '{}' repeats the key '{xv}'; choose the mean or sum duplicate policy to aggregate",
                x.name()
            )));
        }
        let Some(yf) = yv.as_f64() else { continue };
        let (sum, n) = acc.entry(xv).or_insert((0.0, 0));
        *sum += yf;
        *n += 1;
    }
    if acc.is_empty() {
        return Err(Error::InvalidInput(format!(
            "columns '{}' and '{}' have no rows with both values present",
            x.name(),
            y.name()
        )));
    }

    Ok(acc
        .into_iter()
        .map(|(key, (sum, count))| {
            let value = match policy {
                DuplicatePolicy::Sum => sum,
                DuplicatePolicy::Mean | DuplicatePolicy::Reject => sum / count as f64,
            };
            BarDatum { key: key.clone(), value, count }
        })
        .collect())
}

pub(super) fn draw(fig: &mut Figure, spec: &ChartSpec, style: &ResolvedStyle, bars: &[BarDatum], x_name: &str, y_name: &str) {
    let (w, h) = (fig.width() as f32, fig.height() as f32);
    let insets = Insets::scaled(w, h, 0.09, 0.03, 0.10, 0.22);
    let rect = insets.inner(w, h);

    let lo = bars.iter().map(|b| b.value).fold(0.0f64, f64::min);
    let hi = bars.iter().map(|b| b.value).fold(0.0f64, f64::max);
    let pad = (hi - lo).abs() * 0.05;
    let y_axis = Axis::new(y_name, if lo < 0.0 { lo - pad } else { 0.0 }, if hi > 0.0 { hi + pad } else { 0.0 });
    let x_axis = Axis::new(x_name, 0.0, bars.len() as f64);
    let area = PlotArea::new(rect, x_axis, y_axis);
    let ticks = area.y.ticks(6);

    let theme = *fig.theme();
    let colors = match &style.color_map {
        Some(cmap) => cmap.discrete(bars.len()),
        None => crate::colormap::categorical(bars.len()),
    };
    let fills: Vec<_> = colors.iter().map(|&c| fig.fill(c)).collect();
    let edge = fig.stroke(theme.edge, 0.5);
    let grid = fig.stroke(theme.grid, 0.8);
    let axis_line = fig.stroke(theme.axis_line, 1.0);

    {
        let canvas = fig.canvas();
        for &t in &ticks {
            let y = area.sy(t);
            canvas.draw_line((rect.left, y), (rect.right, y), &grid);
        }
        let base = area.sy(0.0);
        for (i, (bar, fill)) in bars.iter().zip(&fills).enumerate() {
            let l = area.sx(i as f64 + 0.1);
            let r = area.sx(i as f64 + 0.9);
            let top = area.sy(bar.value);
            let bar_rect = skia_safe::Rect::from_ltrb(l, top.min(base), r, top.max(base));
            canvas.draw_rect(bar_rect, fill);
            canvas.draw_rect(bar_rect, &edge);
        }
        canvas.draw_line((rect.left, rect.bottom), (rect.right, rect.bottom), &axis_line);
        canvas.draw_line((rect.left, rect.top), (rect.left, rect.bottom), &axis_line);
    }

    for &t in &ticks {
        let y = area.sy(t);
        fig.text(&format_tick(t), rect.left - fig.pt(4.0), y + fig.pt(3.5), 10.0, theme.text, false, Align::Right);
    }
    for (i, bar) in bars.iter().enumerate() {
        let x = area.sx(i as f64 + 0.5);
        fig.text_rotated(&bar.label(), x, rect.bottom + fig.pt(8.0), 10.0, theme.text, -45.0, Align::Right);
    }

    fig.text(&area.x.label, rect.center_x(), h - fig.pt(8.0), 12.0, theme.text, false, Align::Center);
    fig.text_rotated(&area.y.label, fig.pt(14.0), rect.center_y(), 12.0, theme.text, -90.0, Align::Center);
    fig.title(&spec.title(), 16.0);
}

// File: crates/hurricane-core/src/render/pie.rs
// Summary: Category counting and pie wedge drawing.

use indexmap::IndexMap;
use skia_safe as skia;

use super::ResolvedStyle;
use crate::colormap;
use crate::dataset::{Column, Value};
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::spec::{ChartSpec, DEFAULT_START_ANGLE};
use crate::text::Align;

/// One slice: a distinct value and its share of the non-missing cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Wedge {
    pub value: Value,
    pub count: usize,
    pub fraction: f64,
}

impl Wedge {
    pub fn label(&self) -> String {
        self.value.to_string()
    }

    /// Share as a percentage with one decimal place, e.g. `"60.0%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// Count distinct values of `column`, largest first; equal counts keep first-seen order.
pub fn wedges(column: &Column) -> Result<Vec<Wedge>> {
    let mut counts: IndexMap<&Value, usize> = IndexMap::new();
    for v in column.values().iter().filter(|v| !v.is_missing()) {
        *counts.entry(v).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();
    if total == 0 {
        return Err(Error::InvalidInput(format!(
            "column '{}' has no non-missing values to count",
            column.name()
        )));
    }

    let mut out: Vec<Wedge> = counts
        .into_iter()
        .map(|(value, count)| Wedge { value: value.clone(), count, fraction: count as f64 / total as f64 })
        .collect();
    // stable: ties stay in insertion order
    out.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(out)
}

pub(super) fn draw(fig: &mut Figure, spec: &ChartSpec, style: &ResolvedStyle, wedges: &[Wedge]) {
    let (w, h) = (fig.width() as f32, fig.height() as f32);
    let title_band = fig.pt(16.0) * 3.0;
    let cx = w * 0.5;
    let cy = title_band + (h - title_band) * 0.5;
    let radius = ((w.min(h - title_band)) * 0.5 * 0.72).max(1.0);
    let oval = skia::Rect::from_xywh(cx - radius, cy - radius, radius * 2.0, radius * 2.0);

    let colors = match &style.color_map {
        Some(cmap) => cmap.discrete(wedges.len()),
        None => colormap::categorical(wedges.len()),
    };
    let start = spec.style().start_angle.unwrap_or(DEFAULT_START_ANGLE) as f64;
    let edge = fig.stroke(fig.theme().edge, 1.0);
    let text_color = fig.theme().text;

    // Angles follow the math convention (counter-clockwise from 3 o'clock);
    // Skia measures clockwise on a y-down canvas, hence the negations.
    let mut labels = Vec::with_capacity(wedges.len());
    let mut cursor = start;
    {
        let fills: Vec<skia::Paint> = colors.iter().map(|&c| fig.fill(c)).collect();
        let canvas = fig.canvas();
        for (wedge, fill) in wedges.iter().zip(&fills) {
            let sweep = wedge.fraction * 360.0;
            if wedge.fraction >= 1.0 {
                canvas.draw_circle((cx, cy), radius, fill);
                canvas.draw_circle((cx, cy), radius, &edge);
            } else {
                canvas.draw_arc(oval, -cursor as f32, -sweep as f32, true, fill);
                canvas.draw_arc(oval, -cursor as f32, -sweep as f32, true, &edge);
            }
            let mid = (cursor + sweep * 0.5).to_radians();
            labels.push((wedge.label(), wedge.percent_label(), mid.cos() as f32, mid.sin() as f32));
            cursor += sweep;
        }
    }

    for (label, pct, dx, dy) in labels {
        let (ox, oy) = (cx + dx * radius * 1.1, cy - dy * radius * 1.1);
        let align = if dx > 0.05 { Align::Left } else if dx < -0.05 { Align::Right } else { Align::Center };
        fig.text(&label, ox, oy + fig.pt(5.0), 12.0, text_color, false, align);
        let (ix, iy) = (cx + dx * radius * 0.6, cy - dy * radius * 0.6);
        fig.text(&pct, ix, iy + fig.pt(5.0), 11.0, text_color, false, Align::Center);
    }

    fig.title(&spec.title(), 16.0);
}

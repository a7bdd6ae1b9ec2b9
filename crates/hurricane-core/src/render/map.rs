// File: crates/hurricane-core/src/render/map.rs
// Summary: Geographic scatter over the bundled world outline, with a horizontal colorbar.
// Notes:
// - Equirectangular frame fixed to lon [-180, 180] and lat [-90, 90].
// - Marker size is an area in points squared; radius = sqrt(size) / 2 points.

use skia_safe as skia;

use super::{require_numeric, ResolvedStyle};
use crate::axis::{format_tick, Axis, PlotArea};
use crate::colormap::Colormap;
use crate::dataset::Column;
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::geo::ReferenceLayer;
use crate::spec::{ChartSpec, DEFAULT_ALPHA, DEFAULT_MARKER_SIZE};
use crate::text::Align;
use crate::types::{fit_aspect, Insets};

/// One plotted observation in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapPoint {
    pub lon: f64,
    pub lat: f64,
    pub value: f64,
}

/// Pair the three columns row-wise; rows missing any of them are skipped.
pub fn points(lon: &Column, lat: &Column, value: &Column) -> Result<Vec<MapPoint>> {
    require_numeric(lon, "longitude")?;
    require_numeric(lat, "latitude")?;
    require_numeric(value, "value")?;

    let out: Vec<MapPoint> = lon
        .values()
        .iter()
        .zip(lat.values())
        .zip(value.values())
        .filter_map(|((x, y), v)| {
            Some(MapPoint { lon: x.as_f64()?, lat: y.as_f64()?, value: v.as_f64()? })
        })
        .collect();
    if out.is_empty() {
        return Err(Error::InvalidInput(format!(
            "columns '{}', '{}' and '{}' have no rows with all values present",
            lon.name(),
            lat.name(),
            value.name()
        )));
    }
    Ok(out)
}

/// Inclusive value range of the points.
fn value_range(points: &[MapPoint]) -> (f64, f64) {
    points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)))
}

pub(super) fn draw(fig: &mut Figure, spec: &ChartSpec, style: &ResolvedStyle, points: &[MapPoint], value_name: &str) -> Result<()> {
    let layer = ReferenceLayer::bundled()?;
    let cmap = match &style.color_map {
        Some(c) => c.clone(),
        None => Colormap::by_name("autumn_r")
            .ok_or_else(|| Error::Render("default color map is unavailable".to_string()))?,
    };

    let (w, h) = (fig.width() as f32, fig.height() as f32);
    let outer = Insets::scaled(w, h, 0.07, 0.03, 0.08, 0.22).inner(w, h);
    let frame = fit_aspect(outer, 2.0);
    let area = PlotArea::new(frame, Axis::new("Longitude", -180.0, 180.0), Axis::new("Latitude", -90.0, 90.0));

    let (vmin, vmax) = value_range(points);
    let norm = |v: f64| if vmax > vmin { (v - vmin) / (vmax - vmin) } else { 0.5 };

    let theme = *fig.theme();
    let alpha = spec.style().alpha.unwrap_or(DEFAULT_ALPHA);
    let radius = fig.pt(spec.style().marker_size.unwrap_or(DEFAULT_MARKER_SIZE).sqrt() * 0.5);
    let ocean = fig.fill(theme.ocean);
    let land = fig.fill(theme.land);
    let coast = fig.stroke(theme.coastline, 0.5);
    let grid = fig.stroke(theme.grid, 0.5);
    let border = fig.stroke(theme.axis_line, 1.0);
    let markers: Vec<skia::Paint> = points
        .iter()
        .map(|p| {
            let mut paint = fig.fill(cmap.sample(norm(p.value)));
            paint.set_alpha_f(alpha);
            paint
        })
        .collect();

    let lon_ticks: Vec<f64> = (-3..=3).map(|i| i as f64 * 60.0).collect();
    let lat_ticks: Vec<f64> = (-3..=3).map(|i| i as f64 * 30.0).collect();

    let bar_h = fig.pt(10.0);
    let bar_top = frame.bottom + fig.pt(40.0);
    let bar_rect = skia::Rect::from_ltrb(
        frame.left + frame.width() * 0.2,
        bar_top,
        frame.right - frame.width() * 0.2,
        bar_top + bar_h,
    );
    let strip: Vec<skia::Paint> = cmap.discrete(128).into_iter().map(|c| fig.fill(c)).collect();

    {
        let canvas = fig.canvas();
        canvas.draw_rect(frame, &ocean);

        canvas.save();
        canvas.clip_rect(frame, skia::ClipOp::Intersect, true);
        for ring in layer.rings() {
            let mut path = skia::Path::new();
            let mut pts = ring.points.iter().map(|&(x, y)| area.to_px(x, y));
            if let Some(first) = pts.next() {
                path.move_to(first);
                for p in pts {
                    path.line_to(p);
                }
                path.close();
            }
            canvas.draw_path(&path, &land);
            canvas.draw_path(&path, &coast);
        }
        for &t in &lon_ticks {
            let x = area.sx(t);
            canvas.draw_line((x, frame.top), (x, frame.bottom), &grid);
        }
        for &t in &lat_ticks {
            let y = area.sy(t);
            canvas.draw_line((frame.left, y), (frame.right, y), &grid);
        }
        for (p, paint) in points.iter().zip(&markers) {
            canvas.draw_circle(area.to_px(p.lon, p.lat), radius, paint);
        }
        canvas.restore();
        canvas.draw_rect(frame, &border);

        let step = bar_rect.width() / strip.len() as f32;
        for (i, paint) in strip.iter().enumerate() {
            let l = bar_rect.left + step * i as f32;
            // overlap by a pixel so antialiasing leaves no seams
            canvas.draw_rect(skia::Rect::from_ltrb(l, bar_rect.top, l + step + 1.0, bar_rect.bottom), paint);
        }
        canvas.draw_rect(bar_rect, &border);
    }

    for &t in &lon_ticks {
        fig.text(&format_tick(t), area.sx(t), frame.bottom + fig.pt(12.0), 9.0, theme.text, false, Align::Center);
    }
    for &t in &lat_ticks {
        fig.text(&format_tick(t), frame.left - fig.pt(4.0), area.sy(t) + fig.pt(3.0), 9.0, theme.text, false, Align::Right);
    }
    fig.text(&area.x.label, frame.center_x(), frame.bottom + fig.pt(26.0), 11.0, theme.text, false, Align::Center);
    fig.text_rotated(&area.y.label, frame.left - fig.pt(30.0), frame.center_y(), 11.0, theme.text, -90.0, Align::Center);

    let tick_y = bar_rect.bottom + fig.pt(11.0);
    fig.text(&format_tick(vmin), bar_rect.left, tick_y, 9.0, theme.text, false, Align::Center);
    fig.text(&format_tick(vmax), bar_rect.right, tick_y, 9.0, theme.text, false, Align::Center);
    fig.text(value_name, bar_rect.center_x(), tick_y + fig.pt(14.0), 11.0, theme.text, false, Align::Center);

    fig.title(&spec.title(), 16.0);
    Ok(())
}


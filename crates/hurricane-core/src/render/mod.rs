// File: crates/hurricane-core/src/render/mod.rs
// Summary: Validate-compute-draw-persist pipeline shared by the pie, bar and map renderers.
// Notes:
// - Validation (columns, kinds, output format, style) runs before a Figure is opened.
// - The Figure is dropped before persisting; the encoded image is written from its snapshot.

mod bar;
mod map;
mod pie;

pub use bar::{bars, BarDatum};
pub use map::{points, MapPoint};
pub use pie::{wedges, Wedge};

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use skia_safe as skia;

use crate::colormap::Colormap;
use crate::dataset::{Column, ColumnKind, Dataset};
use crate::error::{Error, Result};
use crate::figure::{self, Figure, ImageFormat};
use crate::spec::{ChartKind, ChartSpec, Columns};
use crate::theme::Theme;

/// Series a chart was drawn from.
#[derive(Clone, Debug, PartialEq)]
pub enum Derived {
    Pie(Vec<Wedge>),
    Bar(Vec<BarDatum>),
    Map(Vec<MapPoint>),
}

/// A successfully drawn chart.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub kind: ChartKind,
    /// Where the image was written, when the `ChartSpec` named an output path.
    pub output: Option<PathBuf>,
    /// Final pixels; kept so callers can re-encode or compose further.
    pub image: skia::Image,
    pub derived: Derived,
}

impl Rendered {
    pub fn width(&self) -> i32 { self.image.width() }
    pub fn height(&self) -> i32 { self.image.height() }

    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>> {
        figure::encode(&self.image, format)
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        self.encode(ImageFormat::Png)
    }
}

pub type RenderResult = Result<Rendered>;

/// Render `spec` from `dataset`. Every failure is returned as a typed [`Error`].
pub fn render(dataset: &Dataset, spec: &ChartSpec) -> RenderResult {
    let result = render_inner(dataset, spec);
    match &result {
        Ok(r) => match &r.output {
            Some(p) => info!("{} chart saved to {}", spec.kind(), p.display()),
            None => info!("{} chart rendered ({}x{} px)", spec.kind(), r.width(), r.height()),
        },
        Err(e) => warn!("{} chart failed: {e}", spec.kind()),
    }
    result
}

fn render_inner(dataset: &Dataset, spec: &ChartSpec) -> RenderResult {
    // 1. validate
    for name in spec.columns().names() {
        dataset.column(name)?;
    }
    let format = spec.output().map(ImageFormat::from_path).transpose()?;
    let style = ResolvedStyle::resolve(spec)?;

    // 2. compute
    let derived = match spec.columns() {
        Columns::Pie { column } => Derived::Pie(wedges(dataset.column(column)?)?),
        Columns::Bar { x, y } => {
            Derived::Bar(bars(dataset.column(x)?, dataset.column(y)?, spec.style().duplicates)?)
        }
        Columns::Map { lon, lat, value } => {
            Derived::Map(points(dataset.column(lon)?, dataset.column(lat)?, dataset.column(value)?)?)
        }
    };

    // 3. draw; the figure is released at the end of this block whatever happens inside it
    let image = {
        let mut fig = Figure::open(spec.figure_size(), spec.dpi(), style.theme, &spec.style().extra)?;
        match (&derived, spec.columns()) {
            (Derived::Pie(w), _) => pie::draw(&mut fig, spec, &style, w),
            (Derived::Bar(b), Columns::Bar { x, y }) => bar::draw(&mut fig, spec, &style, b, x, y),
            (Derived::Map(p), Columns::Map { value, .. }) => map::draw(&mut fig, spec, &style, p, value)?,
            _ => return Err(Error::Render("derived series does not match chart kind".to_string())),
        }
        fig.snapshot()
    };

    // 4. persist
    let output = match (spec.output(), format) {
        (Some(path), Some(format)) => {
            persist(&image, path, format)?;
            Some(path.to_path_buf())
        }
        _ => None,
    };

    Ok(Rendered { kind: spec.kind(), output, image, derived })
}

fn persist(image: &skia::Image, path: &Path, format: ImageFormat) -> Result<()> {
    let bytes = figure::encode(image, format)?;
    figure::write_atomic(path, &bytes)
}

/// Style options checked and resolved to concrete values.
pub(crate) struct ResolvedStyle {
    pub theme: Theme,
    pub color_map: Option<Colormap>,
}

impl ResolvedStyle {
    fn resolve(spec: &ChartSpec) -> Result<Self> {
        let style = spec.style();
        let theme = match &style.theme {
            Some(name) => Theme::by_name(name).ok_or_else(|| {
                let known: Vec<&str> = crate::theme::presets().iter().map(|t| t.name).collect();
                Error::Render(format!("unknown theme '{name}'; expected one of: {}", known.join(", ")))
            })?,
            None => Theme::default(),
        };
        let color_map = match spec.color_map_name() {
            Some(name) => Some(Colormap::by_name(name).ok_or_else(|| {
                Error::Render(format!(
                    "unknown color map '{name}'; expected one of: {} (append _r to reverse)",
                    Colormap::names().join(", ")
                ))
            })?),
            None => None,
        };
        if let Some(alpha) = style.alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::Render(format!("alpha must be within [0, 1], got {alpha}")));
            }
        }
        if let Some(size) = style.marker_size {
            if !(size.is_finite() && size > 0.0) {
                return Err(Error::Render(format!("marker size must be positive, got {size}")));
            }
        }
        if let Some(angle) = style.start_angle {
            if !angle.is_finite() {
                return Err(Error::Render(format!("start angle must be finite, got {angle}")));
            }
        }
        debug!(
            "resolved style: theme {}, color map {}",
            theme.name,
            color_map.as_ref().map(Colormap::name).unwrap_or("categorical")
        );
        Ok(Self { theme, color_map })
    }
}

/// Require a numeric column for `role` (e.g. "y", "longitude").
pub(crate) fn require_numeric(column: &Column, role: &str) -> Result<()> {
    match column.kind() {
        ColumnKind::Numeric | ColumnKind::Empty => Ok(()),
        other => Err(Error::InvalidInput(format!(
            "{role} column '{}' must be numeric, found {other} values",
            column.name()
        ))),
    }
}

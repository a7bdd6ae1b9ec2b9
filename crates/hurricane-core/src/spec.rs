// File: crates/hurricane-core/src/spec.rs
// Summary: Immutable chart request: kind + columns, title, output path and styling options.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
    Map,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Pie => "Pie",
            ChartKind::Bar => "Bar",
            ChartKind::Map => "Map",
        }
    }

    pub fn default_title(&self) -> String {
        format!("{} Chart", self.name())
    }

    /// Default figure size in inches (width, height).
    pub fn default_figure_size(&self) -> (f32, f32) {
        match self {
            ChartKind::Pie => (10.0, 10.0),
            ChartKind::Bar => (12.0, 7.0),
            ChartKind::Map => (15.0, 10.0),
        }
    }

    pub fn default_color_map(&self) -> Option<&'static str> {
        match self {
            ChartKind::Pie => None,
            ChartKind::Bar => Some("viridis"),
            ChartKind::Map => Some("autumn_r"),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_lowercase())
    }
}

/// Columns a chart reads, by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Columns {
    Pie { column: String },
    Bar { x: String, y: String },
    Map { lon: String, lat: String, value: String },
}

impl Columns {
    pub fn kind(&self) -> ChartKind {
        match self {
            Columns::Pie { .. } => ChartKind::Pie,
            Columns::Bar { .. } => ChartKind::Bar,
            Columns::Map { .. } => ChartKind::Map,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Columns::Pie { column } => vec![column.as_str()],
            Columns::Bar { x, y } => vec![x.as_str(), y.as_str()],
            Columns::Map { lon, lat, value } => vec![lon.as_str(), lat.as_str(), value.as_str()],
        }
    }
}

/// How a bar chart treats repeated x-values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// One bar per key at the mean of its y-values.
    #[default]
    Mean,
    /// One bar per key at the sum of its y-values.
    Sum,
    /// Repeated keys are an input error.
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            "reject" | "error" => Ok(Self::Reject),
            other => Err(format!("unknown duplicate policy '{other}'; expected mean, sum or reject")),
        }
    }
}

/// Recognized styling options; `None` means "use the chart kind's default".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleOptions {
    /// Figure size in inches.
    pub figure_size: Option<(f32, f32)>,
    /// Pixels per inch; 100 when unset.
    pub dpi: Option<f32>,
    /// Theme preset name (see [`crate::theme::presets`]).
    pub theme: Option<String>,
    /// Named colormap, optionally suffixed `_r` for reversed.
    pub color_map: Option<String>,
    /// Pie only: angle of the first wedge edge, degrees counter-clockwise from 3 o'clock.
    pub start_angle: Option<f32>,
    /// Map only: marker area in points squared.
    pub marker_size: Option<f32>,
    /// Map only: marker opacity in [0, 1].
    pub alpha: Option<f32>,
    /// Bar only.
    pub duplicates: DuplicatePolicy,
    /// Passed through to the drawing context untouched.
    pub extra: BTreeMap<String, String>,
}

pub const DEFAULT_DPI: f32 = 100.0;
pub const DEFAULT_START_ANGLE: f32 = 90.0;
pub const DEFAULT_MARKER_SIZE: f32 = 50.0;
pub const DEFAULT_ALPHA: f32 = 0.7;

/// A complete chart request. Built once, never mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    columns: Columns,
    title: Option<String>,
    output: Option<PathBuf>,
    style: StyleOptions,
}

impl ChartSpec {
    pub fn new(columns: Columns) -> Self {
        Self { columns, title: None, output: None, style: StyleOptions::default() }
    }

    pub fn pie(column: impl Into<String>) -> Self {
        Self::new(Columns::Pie { column: column.into() })
    }

    pub fn bar(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(Columns::Bar { x: x.into(), y: y.into() })
    }

    pub fn map(lon: impl Into<String>, lat: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Columns::Map { lon: lon.into(), lat: lat.into(), value: value.into() })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> ChartKind { self.columns.kind() }
    pub fn columns(&self) -> &Columns { &self.columns }
    pub fn output(&self) -> Option<&Path> { self.output.as_deref() }
    pub fn style(&self) -> &StyleOptions { &self.style }

    /// Explicit title, or `"<Kind> Chart"`.
    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.kind().default_title())
    }

    pub fn figure_size(&self) -> (f32, f32) {
        self.style.figure_size.unwrap_or_else(|| self.kind().default_figure_size())
    }

    pub fn dpi(&self) -> f32 {
        self.style.dpi.unwrap_or(DEFAULT_DPI)
    }

    pub fn color_map_name(&self) -> Option<&str> {
        self.style.color_map.as_deref().or(self.kind().default_color_map())
    }
}

// File: crates/hurricane-core/src/lib.rs
// Summary: Core library entry point; exports the loader, chart specs and the rendering pipeline.

pub mod error;
pub mod dataset;
pub mod loader;
pub mod spec;
pub mod axis;
pub mod types;
pub mod theme;
pub mod colormap;
pub mod text;
pub mod figure;
pub mod geo;
pub mod render;

pub use error::{Error, Result};
pub use dataset::{Column, ColumnKind, Dataset, DatasetError, Dimension, Layout, Value};
pub use loader::{load, Format};
pub use spec::{ChartKind, ChartSpec, Columns, DuplicatePolicy, StyleOptions};
pub use theme::Theme;
pub use colormap::Colormap;
pub use figure::{Figure, ImageFormat};
pub use geo::ReferenceLayer;
pub use render::{render, BarDatum, Derived, MapPoint, RenderResult, Rendered, Wedge};

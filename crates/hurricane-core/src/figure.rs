// File: crates/hurricane-core/src/figure.rs
// Summary: Scoped drawing context over a Skia CPU raster surface, plus image encoding and atomic writes.
// Notes:
// - A `Figure` owns its surface; dropping it releases the pixels on every exit path,
//   including early returns through `?`.
// - Output goes to a sibling temp file first and is renamed over the target.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use skia_safe as skia;

use crate::error::{Error, Result};
use crate::text::{Align, TextShaper};
use crate::theme::{parse_hex_color, Theme};
use crate::types::MAX_PIXELS;

/// Raster formats the renderer can write, chosen by output extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub const EXTENSIONS: &'static [&'static str] = &["png", "jpg", "jpeg"];

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(Error::Write {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "unsupported image format '.{other}'; expected one of: {}",
                        Self::EXTENSIONS.join(", ")
                    ),
                ),
            }),
        }
    }

    fn skia_format(self) -> skia::EncodedImageFormat {
        match self {
            ImageFormat::Png => skia::EncodedImageFormat::PNG,
            ImageFormat::Jpeg => skia::EncodedImageFormat::JPEG,
        }
    }
}

/// Options from the style `extra` bucket that the drawing context understands.
#[derive(Clone, Copy, Debug)]
struct SurfaceOptions {
    antialias: bool,
    draw_text: bool,
    background: Option<skia::Color>,
}

impl SurfaceOptions {
    fn from_extra(extra: &BTreeMap<String, String>) -> Result<Self> {
        let mut opts = Self { antialias: true, draw_text: true, background: None };
        for (key, value) in extra {
            match key.as_str() {
                "antialias" => opts.antialias = parse_flag(key, value)?,
                "draw_text" => opts.draw_text = parse_flag(key, value)?,
                "background" => {
                    opts.background = Some(parse_hex_color(value).ok_or_else(|| {
                        Error::Render(format!("style option background='{value}' is not a #rrggbb color"))
                    })?)
                }
                _ => debug!("ignoring unrecognized style option {key}={value}"),
            }
        }
        Ok(opts)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::Render(format!("style option {key}='{value}' is not a boolean"))),
    }
}

/// An open drawing context. Pixels live as long as the value does.
pub struct Figure {
    surface: skia::Surface,
    width: i32,
    height: i32,
    /// Pixels per point (dpi / 72); scales fonts and strokes with resolution.
    scale: f32,
    theme: Theme,
    shaper: TextShaper,
    opts: SurfaceOptions,
}

impl Figure {
    /// Acquire a surface of `size_in` inches at `dpi`, cleared to the theme background.
    pub fn open(size_in: (f32, f32), dpi: f32, theme: Theme, extra: &BTreeMap<String, String>) -> Result<Self> {
        let (w_in, h_in) = size_in;
        if !(w_in.is_finite() && h_in.is_finite() && w_in > 0.0 && h_in > 0.0) {
            return Err(Error::Render(format!("figure size must be positive, got {w_in}x{h_in} in")));
        }
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(Error::Render(format!("dpi must be positive, got {dpi}")));
        }
        let width = (w_in * dpi).round().max(1.0) as i32;
        let height = (h_in * dpi).round().max(1.0) as i32;
        if width as i64 * height as i64 > MAX_PIXELS {
            return Err(Error::Render(format!("figure of {width}x{height} px exceeds the {MAX_PIXELS} pixel limit")));
        }

        let opts = SurfaceOptions::from_extra(extra)?;
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| Error::Render(format!("failed to create {width}x{height} raster surface")))?;
        surface.canvas().clear(opts.background.unwrap_or(theme.background));
        trace!("acquired {width}x{height} drawing surface");

        Ok(Self { surface, width, height, scale: dpi / 72.0, theme, shaper: TextShaper::new(), opts })
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }
    pub fn theme(&self) -> &Theme { &self.theme }

    /// Convert points to pixels at this figure's resolution.
    pub fn pt(&self, points: f32) -> f32 { points * self.scale }

    pub fn canvas(&mut self) -> &skia::Canvas {
        self.surface.canvas()
    }

    /// A paint with this figure's antialiasing setting.
    pub fn paint(&self, color: skia::Color, style: skia::paint::Style) -> skia::Paint {
        let mut p = skia::Paint::default();
        p.set_anti_alias(self.opts.antialias);
        p.set_style(style);
        p.set_color(color);
        p
    }

    pub fn fill(&self, color: skia::Color) -> skia::Paint {
        self.paint(color, skia::paint::Style::Fill)
    }

    pub fn stroke(&self, color: skia::Color, width_pt: f32) -> skia::Paint {
        let mut p = self.paint(color, skia::paint::Style::Stroke);
        p.set_stroke_width(self.pt(width_pt));
        p
    }

    /// Draw text at a pixel anchor; `size_pt` is in points. No-op when text is disabled.
    pub fn text(&mut self, text: &str, x: f32, y: f32, size_pt: f32, color: skia::Color, bold: bool, align: Align) {
        if !self.opts.draw_text {
            return;
        }
        let size = self.pt(size_pt);
        let canvas = self.surface.canvas();
        self.shaper.draw(canvas, text, x, y, size, color, bold, align);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text_rotated(&mut self, text: &str, x: f32, y: f32, size_pt: f32, color: skia::Color, degrees: f32, align: Align) {
        if !self.opts.draw_text {
            return;
        }
        let size = self.pt(size_pt);
        let canvas = self.surface.canvas();
        self.shaper.draw_rotated(canvas, text, x, y, size, color, degrees, align);
    }

    /// Bold title centered across the top of the figure.
    pub fn title(&mut self, title: &str, size_pt: f32) {
        let x = self.width as f32 * 0.5;
        let y = self.pt(size_pt) * 1.6;
        let color = self.theme.title;
        self.text(title, x, y, size_pt, color, true, Align::Center);
    }

    /// Immutable snapshot of the pixels drawn so far.
    pub fn snapshot(&mut self) -> skia::Image {
        self.surface.image_snapshot()
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        trace!("released {}x{} drawing surface", self.width, self.height);
    }
}

/// Encode a finished image.
pub fn encode(image: &skia::Image, format: ImageFormat) -> Result<Vec<u8>> {
    #[allow(deprecated)]
    let data = image
        .encode_to_data(format.skia_format())
        .ok_or_else(|| Error::Render(format!("encoding {format:?} failed")))?;
    Ok(data.as_bytes().to_vec())
}

/// Write `bytes` to `path` via a sibling temp file so readers never see a partial image.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source: std::io::Error| Error::Write { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = temp_sibling(path);
    if let Err(e) = std::fs::write(&tmp, bytes).and_then(|_| std::fs::rename(&tmp, path)) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "figure".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

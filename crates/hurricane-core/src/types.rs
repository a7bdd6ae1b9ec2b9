// File: crates/hurricane-core/src/types.rs
// Summary: Shared layout types and limits (plot margins, pixel budget).

use skia_safe as skia;

/// Largest surface we agree to allocate (width * height), roughly 10k x 10k.
pub const MAX_PIXELS: i64 = 100_000_000;

/// Plot margins, in pixels. The constructors clamp negative or NaN margins to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }

    /// Margins proportional to the figure, the way axes are placed in a figure of any size.
    pub fn scaled(width: f32, height: f32, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self::new(width * left, width * right, height * top, height * bottom)
    }

    /// The plot rectangle left inside a `width` x `height` surface.
    pub fn inner(&self, width: f32, height: f32) -> skia::Rect {
        let r = skia::Rect::from_ltrb(self.left, self.top, width - self.right, height - self.bottom);
        if r.width() <= 1.0 || r.height() <= 1.0 {
            skia::Rect::from_xywh(0.0, 0.0, width.max(1.0), height.max(1.0))
        } else {
            r
        }
    }
}

/// Fit a rectangle of the given aspect (width / height) centered inside `outer`.
pub fn fit_aspect(outer: skia::Rect, aspect: f32) -> skia::Rect {
    let (w, h) = (outer.width(), outer.height());
    if w / h > aspect {
        let nw = h * aspect;
        let l = outer.left + (w - nw) * 0.5;
        skia::Rect::from_ltrb(l, outer.top, l + nw, outer.bottom)
    } else {
        let nh = w / aspect;
        let t = outer.top + (h - nh) * 0.5;
        skia::Rect::from_ltrb(outer.left, t, outer.right, t + nh)
    }
}

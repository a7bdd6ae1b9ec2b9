// File: crates/hurricane-core/src/colormap.rs
// Summary: Named continuous colormaps and categorical palettes, converted to Skia colors.

use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use skia_safe as skia;

/// Anchor colors (sRGB hex) sampled evenly along each map.
const MAPS: &[(&str, &[u32])] = &[
    ("viridis", &[0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b, 0xfde725]),
    ("plasma", &[0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26, 0xf0f921]),
    ("autumn", &[0xff0000, 0xffff00]),
    ("coolwarm", &[0x3b4cc0, 0x6f92f3, 0xaac7fd, 0xdddddd, 0xf7b89c, 0xe7745b, 0xb40426]),
    ("gray", &[0x000000, 0xffffff]),
    ("blues", &[0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b]),
];

/// The ten-color categorical cycle used when no colormap is requested.
const TAB10: [u32; 10] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22, 0x17becf,
];

fn hex_to_linear(hex: u32) -> LinSrgb {
    let [_, r, g, b] = hex.to_be_bytes();
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

fn to_skia(c: Srgb) -> skia::Color {
    let c: Srgb<u8> = c.into_format();
    skia::Color::from_argb(255, c.red, c.green, c.blue)
}

/// A continuous colormap, interpolated in linear RGB between anchors.
#[derive(Clone, Debug)]
pub struct Colormap {
    name: String,
    stops: Vec<LinSrgb>,
}

impl Colormap {
    /// Look up a named map; a `_r` suffix reverses it.
    pub fn by_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let (base, reversed) = match lower.strip_suffix("_r") {
            Some(b) => (b, true),
            None => (lower.as_str(), false),
        };
        let (_, anchors) = MAPS.iter().find(|(n, _)| *n == base)?;
        let mut stops: Vec<LinSrgb> = anchors.iter().map(|&h| hex_to_linear(h)).collect();
        if reversed {
            stops.reverse();
        }
        Some(Self { name: lower, stops })
    }

    pub fn names() -> Vec<&'static str> {
        MAPS.iter().map(|(n, _)| *n).collect()
    }

    pub fn name(&self) -> &str { &self.name }

    /// Color at `t` in [0, 1]; out-of-range values clamp.
    pub fn sample(&self, t: f64) -> skia::Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
        let segments = (self.stops.len() - 1) as f32;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        let c = self.stops[i].mix(self.stops[i + 1], pos - i as f32);
        to_skia(Srgb::from_linear(c))
    }

    /// `n` colors spread evenly over the map.
    pub fn discrete(&self, n: usize) -> Vec<skia::Color> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.5)],
            _ => (0..n).map(|i| self.sample(i as f64 / (n - 1) as f64)).collect(),
        }
    }
}

/// Generates `n` visually distinct colours: the tab10 cycle, or evenly spaced hues past ten.
pub fn categorical(n: usize) -> Vec<skia::Color> {
    if n <= TAB10.len() {
        return TAB10[..n]
            .iter()
            .map(|&h| to_skia(Srgb::from_linear(hex_to_linear(h))))
            .collect();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            to_skia(rgb)
        })
        .collect()
}

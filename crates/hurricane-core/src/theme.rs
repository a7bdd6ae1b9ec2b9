// File: crates/hurricane-core/src/theme.rs
// Summary: Named color themes for figure chrome (background, text, axes, basemap).

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub title: skia::Color,
    pub text: skia::Color,
    pub axis_line: skia::Color,
    pub grid: skia::Color,
    /// Outline drawn around wedges and bars.
    pub edge: skia::Color,
    /// Basemap land fill and coastline.
    pub land: skia::Color,
    pub coastline: skia::Color,
    pub ocean: skia::Color,
}

impl Theme {
    /// White figure with black chrome; the default.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            background: skia::Color::from_argb(255, 255, 255, 255),
            title: skia::Color::from_argb(255, 0, 0, 0),
            text: skia::Color::from_argb(255, 30, 30, 30),
            axis_line: skia::Color::from_argb(255, 0, 0, 0),
            grid: skia::Color::from_argb(255, 220, 220, 220),
            edge: skia::Color::from_argb(255, 255, 255, 255),
            land: skia::Color::from_argb(255, 211, 211, 211),
            coastline: skia::Color::from_argb(255, 0, 0, 0),
            ocean: skia::Color::from_argb(255, 255, 255, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            title: skia::Color::from_argb(255, 20, 20, 30),
            text: skia::Color::from_argb(255, 60, 60, 70),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            edge: skia::Color::from_argb(255, 250, 250, 252),
            land: skia::Color::from_argb(255, 225, 225, 230),
            coastline: skia::Color::from_argb(255, 100, 100, 110),
            ocean: skia::Color::from_argb(255, 240, 246, 252),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            title: skia::Color::from_argb(255, 235, 235, 245),
            text: skia::Color::from_argb(255, 210, 210, 220),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            edge: skia::Color::from_argb(255, 18, 18, 20),
            land: skia::Color::from_argb(255, 60, 60, 66),
            coastline: skia::Color::from_argb(255, 150, 150, 160),
            ocean: skia::Color::from_argb(255, 24, 26, 32),
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            title: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),      // base2
            text: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),       // base1
            axis_line: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),
            grid: skia::Color::from_argb(255, 0x07, 0x36, 0x42),       // base02
            edge: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),
            land: skia::Color::from_argb(255, 0x07, 0x36, 0x42),
            coastline: skia::Color::from_argb(255, 0x83, 0x94, 0x96), // base0
            ocean: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3), // base3
            title: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),      // base03
            text: skia::Color::from_argb(255, 0x58, 0x6e, 0x75),       // base01
            axis_line: skia::Color::from_argb(255, 0x65, 0x7b, 0x83),  // base00
            grid: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),       // base2
            edge: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3),
            land: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),
            coastline: skia::Color::from_argb(255, 0x65, 0x7b, 0x83),
            ocean: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3),
        }
    }

    /// Case-insensitive preset lookup.
    pub fn by_name(name: &str) -> Option<Self> {
        presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Theme {
    fn default() -> Self { Self::classic() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::classic(),
        Theme::light(),
        Theme::dark(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
    ]
}

/// Parse `#rrggbb` or `#aarrggbb` into a color.
pub fn parse_hex_color(s: &str) -> Option<skia::Color> {
    let hex = s.strip_prefix('#')?;
    let v = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        6 => Some(skia::Color::new(0xff00_0000 | v)),
        8 => Some(skia::Color::new(v)),
        _ => None,
    }
}

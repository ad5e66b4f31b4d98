//! Named color palettes and color interpolation
//!
//! Palettes are looked up by name, or given inline as a `"start->end"`
//! gradient or a comma-separated list of CSS colors.

use palette::{FromColor, IntoColor, LinSrgb, Mix, Oklab, Srgb};

use crate::{Result, SynthplotError};

/// 8-bit sRGB color used throughout rendering
pub type Rgb = Srgb<u8>;

// =============================================================================
// Categorical Color Palettes
// =============================================================================

/// Tableau 10 - default categorical palette
pub const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f",
    "#edc948", "#b07aa1", "#ff9da7", "#9c755f", "#bab0ac",
];

/// D3 Category 10
pub const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// ColorBrewer Set1
pub const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00",
    "#ffff33", "#a65628", "#f781bf", "#999999",
];

/// ColorBrewer Set2
pub const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854",
    "#ffd92f", "#e5c494", "#b3b3b3",
];

/// ColorBrewer Dark2
pub const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e",
    "#e6ab02", "#a6761d", "#666666",
];

/// ColorBrewer Paired
pub const PAIRED: &[&str] = &[
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99",
    "#e31a1c", "#fdbf6f", "#ff7f00", "#cab2d6", "#6a3d9a",
    "#ffff99", "#b15928",
];

// =============================================================================
// Sequential Color Palettes
// =============================================================================

/// Viridis
pub const VIRIDIS: &[&str] = &[
    "#440154", "#482878", "#3e4a89", "#31688e", "#26828e",
    "#1f9e89", "#35b779", "#6ece58", "#b5de2b", "#fde725",
];

/// Plasma
pub const PLASMA: &[&str] = &[
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786",
    "#d8576b", "#ed7953", "#fb9f3a", "#fdca26", "#f0f921",
];

/// Magma
pub const MAGMA: &[&str] = &[
    "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f",
    "#cd4071", "#f1605d", "#fd9668", "#feca8d", "#fcfdbf",
];

/// Inferno
pub const INFERNO: &[&str] = &[
    "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60",
    "#cf4446", "#ed6925", "#fb9b06", "#f7d13d", "#fcffa4",
];

/// Cividis
pub const CIVIDIS: &[&str] = &[
    "#00224e", "#123570", "#3b496c", "#575d6d", "#707173",
    "#8a8678", "#a59c74", "#c3b369", "#e1cc55", "#fdea45",
];

/// Blues
pub const BLUES: &[&str] = &[
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6",
    "#4292c6", "#2171b5", "#08519c", "#08306b",
];

/// Greens
pub const GREENS: &[&str] = &[
    "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476",
    "#41ab5d", "#238b45", "#006d2c", "#00441b",
];

/// Reds
pub const REDS: &[&str] = &[
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a",
    "#ef3b2c", "#cb181d", "#a50f15", "#67000d",
];

// =============================================================================
// Diverging Color Palettes
// =============================================================================

/// Red-Blue diverging
pub const RDBU: &[&str] = &[
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7",
    "#f7f7f7", "#d1e5f0", "#92c5de", "#4393c3", "#2166ac", "#053061",
];

/// Red-Yellow-Blue diverging
pub const RDYLBU: &[&str] = &[
    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090",
    "#ffffbf", "#e0f3f8", "#abd9e9", "#74add1", "#4575b4", "#313695",
];

/// Spectral diverging
pub const SPECTRAL: &[&str] = &[
    "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b",
    "#ffffbf", "#e6f598", "#abdda4", "#66c2a5", "#3288bd", "#5e4fa2",
];

// =============================================================================
// Gradient Color Maps
// =============================================================================

/// Autumn - red to yellow
pub const AUTUMN: &[&str] = &["#ff0000", "#ffff00"];

/// Cool - cyan to magenta
pub const COOL: &[&str] = &["#00ffff", "#ff00ff"];

/// Hot - black through red and yellow to white
pub const HOT: &[&str] = &["#0b0000", "#ff0000", "#ffff00", "#ffffff"];

/// Cool-warm diverging
pub const COOLWARM: &[&str] = &[
    "#3b4cc0", "#6f92f3", "#aac7fd", "#dddcdc", "#f7b89c",
    "#e7745b", "#b40426",
];

// =============================================================================
// Color Utilities
// =============================================================================

/// Parse any CSS color (named, hex, `rgb()`, `hsl()`, ...).
pub fn parse_color(value: &str) -> Result<Rgb> {
    let parsed = csscolorparser::parse(value.trim()).map_err(|e| {
        SynthplotError::ConfigError(format!("Invalid color '{}': {}", value, e))
    })?;
    let [r, g, b, _] = parsed.to_rgba8();
    Ok(Rgb::new(r, g, b))
}

/// Format a color as `#rrggbb`.
pub fn color_to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

fn quantize(color: Srgb<f32>) -> Rgb {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(channel(color.red), channel(color.green), channel(color.blue))
}

// =============================================================================
// Color Interpolation
// =============================================================================

/// Color space options for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    /// Perceptually uniform; avoids muddy midpoints.
    #[default]
    Oklab,
    /// Plain linear RGB mixing.
    LinearRgb,
}

/// Sample a multi-stop gradient at `t` in `[0, 1]`.
///
/// `t` is clamped. The stops are spaced evenly along the gradient.
pub fn sample_gradient(stops: &[Rgb], t: f64, space: ColorSpace) -> Rgb {
    match stops.len() {
        0 => Rgb::new(0, 0, 0),
        1 => stops[0],
        n => {
            let segments = n - 1;
            let position = t.clamp(0.0, 1.0) as f32 * segments as f32;
            let segment = (position.floor() as usize).min(segments - 1);
            let local = position - segment as f32;

            let a = stops[segment].into_format::<f32>().into_linear::<f32>();
            let b = stops[segment + 1].into_format::<f32>().into_linear::<f32>();
            let mixed: LinSrgb<f32> = match space {
                ColorSpace::Oklab => {
                    let mixed = Oklab::from_color(a).mix(Oklab::from_color(b), local);
                    mixed.into_color()
                }
                ColorSpace::LinearRgb => a.mix(b, local),
            };
            quantize(Srgb::from_linear(mixed))
        }
    }
}

/// `count` evenly spaced colors along a gradient through `stops`.
pub fn interpolate_colors(stops: &[Rgb], count: usize, space: ColorSpace) -> Vec<Rgb> {
    match count {
        0 => Vec::new(),
        1 => stops.first().copied().into_iter().collect(),
        _ => (0..count)
            .map(|i| sample_gradient(stops, i as f64 / (count - 1) as f64, space))
            .collect(),
    }
}

// =============================================================================
// Lookup Functions
// =============================================================================

/// Look up a color palette by name.
/// Returns the palette colors as a static slice, or None if not found.
pub fn get_color_palette(name: &str) -> Option<&'static [&'static str]> {
    match name.to_lowercase().as_str() {
        // Categorical
        "tableau10" | "tableau" => Some(TABLEAU10),
        "category10" | "tab10" => Some(CATEGORY10),
        "set1" => Some(SET1),
        "set2" => Some(SET2),
        "dark2" => Some(DARK2),
        "paired" => Some(PAIRED),
        // Sequential
        "viridis" => Some(VIRIDIS),
        "plasma" => Some(PLASMA),
        "magma" => Some(MAGMA),
        "inferno" => Some(INFERNO),
        "cividis" => Some(CIVIDIS),
        "blues" => Some(BLUES),
        "greens" => Some(GREENS),
        "reds" => Some(REDS),
        // Diverging
        "rdbu" => Some(RDBU),
        "rdylbu" => Some(RDYLBU),
        "spectral" => Some(SPECTRAL),
        // Gradient maps
        "autumn" => Some(AUTUMN),
        "cool" => Some(COOL),
        "hot" => Some(HOT),
        "coolwarm" => Some(COOLWARM),
        _ => None,
    }
}

/// Palette names accepted by [`resolve_palette`]
pub const PALETTE_NAMES: &[&str] = &[
    "tableau10", "category10", "set1", "set2", "dark2", "paired", "viridis", "plasma", "magma",
    "inferno", "cividis", "blues", "greens", "reds", "rdbu", "rdylbu", "spectral", "autumn",
    "cool", "hot", "coolwarm",
];

/// Get the default color palette for categorical data.
pub fn default_color_palette() -> &'static [&'static str] {
    TABLEAU10
}

/// Resolve a palette specification to its color stops.
///
/// Accepts a palette name, a `"start->end"` gradient (any number of `->`
/// separated stops) or a comma-separated color list.
pub fn resolve_palette(spec: &str) -> Result<Vec<Rgb>> {
    if spec.contains("->") {
        return spec.split("->").map(parse_color).collect();
    }
    if spec.contains(',') {
        return spec.split(',').map(parse_color).collect();
    }
    match get_color_palette(spec.trim()) {
        Some(colors) => colors.iter().map(|c| parse_color(c)).collect(),
        None => Err(SynthplotError::ConfigError(format!(
            "Unknown palette '{}'. Available: {}",
            spec,
            PALETTE_NAMES.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(c: Rgb) -> String {
        color_to_hex(c)
    }

    #[test]
    fn test_get_color_palette() {
        assert!(get_color_palette("viridis").is_some());
        assert!(get_color_palette("VIRIDIS").is_some()); // case insensitive
        assert!(get_color_palette("coolwarm").is_some());
        assert!(get_color_palette("unknown").is_none());
    }

    #[test]
    fn test_every_listed_palette_resolves() {
        for name in PALETTE_NAMES {
            let colors = resolve_palette(name).unwrap();
            assert!(colors.len() >= 2, "palette {}", name);
        }
    }

    #[test]
    fn test_parse_color_named_and_hex() {
        assert_eq!(hex(parse_color("red").unwrap()), "#ff0000");
        assert_eq!(hex(parse_color("skyblue").unwrap()), "#87ceeb");
        assert_eq!(hex(parse_color("#F00").unwrap()), "#ff0000");
        assert!(parse_color("notacolor").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn test_resolve_inline_gradient() {
        let stops = resolve_palette("red->yellow").unwrap();
        assert_eq!(stops, vec![Rgb::new(255, 0, 0), Rgb::new(255, 255, 0)]);

        let stops = resolve_palette("red, white ,blue").unwrap();
        assert_eq!(stops.len(), 3);
    }

    #[test]
    fn test_resolve_unknown_palette() {
        let err = resolve_palette("rainbowish").unwrap_err();
        assert!(matches!(err, SynthplotError::ConfigError(_)));
        assert!(resolve_palette("red->nope").is_err());
    }

    #[test]
    fn test_interpolate_colors_basic() {
        let stops = resolve_palette("red->blue").unwrap();
        let colors = interpolate_colors(&stops, 5, ColorSpace::Oklab);
        assert_eq!(colors.len(), 5);
        assert_eq!(hex(colors[0]), "#ff0000");
        assert_eq!(hex(colors[4]), "#0000ff");
    }

    #[test]
    fn test_interpolate_colors_counts() {
        let stops = resolve_palette("white->black").unwrap();
        assert!(interpolate_colors(&stops, 0, ColorSpace::Oklab).is_empty());
        assert_eq!(
            interpolate_colors(&stops, 1, ColorSpace::Oklab),
            vec![Rgb::new(255, 255, 255)]
        );
        let linear = interpolate_colors(&stops, 3, ColorSpace::LinearRgb);
        assert_eq!(hex(linear[2]), "#000000");
    }

    #[test]
    fn test_multi_stop_midpoint() {
        let stops = resolve_palette("red->white->blue").unwrap();
        let colors = interpolate_colors(&stops, 5, ColorSpace::Oklab);
        assert_eq!(hex(colors[2]), "#ffffff");
    }

    #[test]
    fn test_oklab_vs_linear_rgb_red_cyan() {
        let stops = resolve_palette("red->cyan").unwrap();
        let oklab = sample_gradient(&stops, 0.5, ColorSpace::Oklab);
        let linear = sample_gradient(&stops, 0.5, ColorSpace::LinearRgb);
        assert_ne!(oklab, linear);
    }

    #[test]
    fn test_sample_gradient_clamps() {
        let stops = resolve_palette("autumn").unwrap();
        assert_eq!(sample_gradient(&stops, -3.0, ColorSpace::Oklab), stops[0]);
        assert_eq!(sample_gradient(&stops, 7.0, ColorSpace::Oklab), stops[1]);
    }
}

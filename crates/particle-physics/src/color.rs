//! Colour presets and per-particle colour synthesis

use rand::Rng;

use crate::constants::*;

/// A named hue band used to colour a particle field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPreset {
    pub name: &'static str,
    /// Swatch colours for UI display (linear RGB)
    pub primary_color: [f32; 3],
    pub secondary_color: [f32; 3],
    /// Hue band in degrees; `hue_end` may exceed 360 to wrap through red
    pub hue_start: f32,
    pub hue_end: f32,
}

pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset {
        name: "nebula",
        primary_color: [0.55, 0.25, 0.95],
        secondary_color: [0.15, 0.55, 1.0],
        hue_start: 220.0,
        hue_end: 300.0,
    },
    ColorPreset {
        name: "rose",
        primary_color: [1.0, 0.25, 0.45],
        secondary_color: [1.0, 0.6, 0.75],
        hue_start: 320.0,
        hue_end: 370.0,
    },
    ColorPreset {
        name: "neon",
        primary_color: [0.0, 1.0, 0.8],
        secondary_color: [0.2, 0.6, 1.0],
        hue_start: 160.0,
        hue_end: 220.0,
    },
    ColorPreset {
        name: "galaxy",
        primary_color: [0.4, 0.3, 1.0],
        secondary_color: [1.0, 0.75, 0.35],
        hue_start: 200.0,
        hue_end: 280.0,
    },
    ColorPreset {
        name: "aurora",
        primary_color: [0.2, 1.0, 0.5],
        secondary_color: [0.3, 0.8, 0.9],
        hue_start: 100.0,
        hue_end: 180.0,
    },
    ColorPreset {
        name: "ember",
        primary_color: [1.0, 0.35, 0.05],
        secondary_color: [1.0, 0.8, 0.2],
        hue_start: 0.0,
        hue_end: 45.0,
    },
];

impl ColorPreset {
    /// Look up a preset in the fixed registry
    pub fn named(name: &str) -> Option<&'static ColorPreset> {
        COLOR_PRESETS
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        COLOR_PRESETS.iter().map(|preset| preset.name)
    }

    fn hue_at(&self, t: f32) -> f32 {
        self.hue_start + (self.hue_end - self.hue_start) * t
    }
}

/// Convert HSL to RGB.
///
/// `h` in degrees (any value, wrapped to [0, 360)), `s` and `l` in [0, 1].
/// Output channels are linear values in [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        (r + m).clamp(0.0, 1.0),
        (g + m).clamp(0.0, 1.0),
        (b + m).clamp(0.0, 1.0),
    ]
}

/// Produce `3 * count` RGB values by sampling the preset's hue band
pub fn synthesize_colors<R: Rng + ?Sized>(
    count: u32,
    preset: &ColorPreset,
    rng: &mut R,
) -> Vec<f32> {
    let mut colors = Vec::with_capacity(count as usize * 3);
    for _ in 0..count {
        let t = rng.random::<f32>();
        let hue = preset.hue_at(t) + rng.random_range(-HUE_JITTER..=HUE_JITTER);
        let saturation = rng.random_range(SATURATION_MIN..=SATURATION_MAX);
        let lightness = rng.random_range(LIGHTNESS_MIN..=LIGHTNESS_MAX);
        colors.extend_from_slice(&hsl_to_rgb(hue, saturation, lightness));
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_rgb_eq(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_hsl_primaries() {
        assert_rgb_eq(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_rgb_eq(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_rgb_eq(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
        assert_rgb_eq(hsl_to_rgb(60.0, 1.0, 0.5), [1.0, 1.0, 0.0]);
        assert_rgb_eq(hsl_to_rgb(300.0, 1.0, 0.5), [1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hsl_grey_and_white() {
        assert_rgb_eq(hsl_to_rgb(200.0, 0.0, 0.5), [0.5, 0.5, 0.5]);
        assert_rgb_eq(hsl_to_rgb(17.0, 1.0, 1.0), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_hsl_wraps_hue() {
        assert_rgb_eq(hsl_to_rgb(370.0, 1.0, 0.5), hsl_to_rgb(10.0, 1.0, 0.5));
        assert_rgb_eq(hsl_to_rgb(-30.0, 1.0, 0.5), hsl_to_rgb(330.0, 1.0, 0.5));
    }

    #[test]
    fn test_synthesized_channels_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for preset in &COLOR_PRESETS {
            let colors = synthesize_colors(5_000, preset, &mut rng);
            assert_eq!(colors.len(), 15_000);
            assert!(
                colors.iter().all(|c| (0.0..=1.0).contains(c)),
                "{} produced out-of-range channel",
                preset.name
            );
        }
    }

    #[test]
    fn test_synthesize_zero_count() {
        let mut rng = StdRng::seed_from_u64(12);
        let preset = ColorPreset::named("ember").unwrap();
        assert!(synthesize_colors(0, preset, &mut rng).is_empty());
    }

    #[test]
    fn test_ember_leans_red() {
        let mut rng = StdRng::seed_from_u64(13);
        let preset = ColorPreset::named("ember").unwrap();
        let colors = synthesize_colors(2_000, preset, &mut rng);

        let (mut red, mut blue) = (0.0, 0.0);
        for rgb in colors.chunks_exact(3) {
            red += rgb[0];
            blue += rgb[2];
        }
        assert!(red > blue * 1.5);
    }

    #[test]
    fn test_preset_registry() {
        assert_eq!(ColorPreset::names().count(), COLOR_PRESETS.len());
        assert_eq!(ColorPreset::named("NEON").map(|p| p.name), Some("neon"));
        assert!(ColorPreset::named("plaid").is_none());
    }
}

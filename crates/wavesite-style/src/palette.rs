use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::theme::ThemeMode;

/// Colors used for one mode: a background fill plus an ordered list of
/// wave colors (layer `i` uses `waves[i % waves.len()]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgb,
    pub waves: Vec<Rgba>,
}

impl Palette {
    #[must_use]
    pub fn new(background: Rgb, waves: Vec<Rgba>) -> Self {
        Self { background, waves }
    }

    /// Color for wave layer `layer`. Falls back to the text color when the
    /// list is empty.
    #[must_use]
    pub fn wave_color(&self, layer: usize) -> Rgba {
        if self.waves.is_empty() {
            return Rgba::opaque(self.text_color()).with_alpha(64);
        }
        self.waves[layer % self.waves.len()]
    }

    /// Text color with enough contrast against the background.
    #[must_use]
    pub fn text_color(&self) -> Rgb {
        if self.background.is_light() {
            Rgb::new(0x1f, 0x23, 0x30)
        } else {
            Rgb::new(0xe6, 0xe9, 0xf0)
        }
    }

    /// First wave color at full opacity; used for links and buttons.
    #[must_use]
    pub fn accent(&self) -> Rgb {
        self.wave_color(0).rgb()
    }

    /// Default dark entry: deep navy with cyan/indigo/teal waves.
    #[must_use]
    pub fn dark() -> Self {
        Self::new(
            Rgb::new(0x0b, 0x10, 0x20),
            vec![
                Rgba::new(0x38, 0xbd, 0xf8, 0x59),
                Rgba::new(0x81, 0x8c, 0xf8, 0x4d),
                Rgba::new(0x2d, 0xd4, 0xbf, 0x40),
            ],
        )
    }

    /// Default light entry: paper white with the same hues, lighter alpha.
    #[must_use]
    pub fn light() -> Self {
        Self::new(
            Rgb::new(0xf5, 0xf7, 0xfb),
            vec![
                Rgba::new(0x0e, 0xa5, 0xe9, 0x40),
                Rgba::new(0x63, 0x66, 0xf1, 0x33),
                Rgba::new(0x14, 0xb8, 0xa6, 0x2e),
            ],
        )
    }
}

/// Fixed table from [`ThemeMode`] to [`Palette`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteMapping {
    pub dark: Palette,
    pub light: Palette,
}

impl PaletteMapping {
    #[must_use]
    pub const fn for_mode(&self, mode: ThemeMode) -> &Palette {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    /// Modes whose palette has no wave colors.
    pub fn empty_modes(&self) -> impl Iterator<Item = ThemeMode> + '_ {
        ThemeMode::ALL
            .into_iter()
            .filter(|mode| self.for_mode(*mode).waves.is_empty())
    }
}

impl Default for PaletteMapping {
    fn default() -> Self {
        Self {
            dark: Palette::dark(),
            light: Palette::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_mode_selects_entry() {
        let mapping = PaletteMapping::default();
        assert_eq!(mapping.for_mode(ThemeMode::Dark), &Palette::dark());
        assert_eq!(mapping.for_mode(ThemeMode::Light), &Palette::light());
        assert_ne!(
            mapping.for_mode(ThemeMode::Dark),
            mapping.for_mode(ThemeMode::Light)
        );
    }

    #[test]
    fn wave_color_cycles() {
        let palette = Palette::dark();
        assert_eq!(palette.wave_color(0), palette.waves[0]);
        assert_eq!(palette.wave_color(3), palette.waves[0]);
        assert_eq!(palette.wave_color(4), palette.waves[1]);
    }

    #[test]
    fn wave_color_with_no_waves_uses_text_color() {
        let palette = Palette::new(Rgb::WHITE, Vec::new());
        let color = palette.wave_color(2);
        assert_eq!(color.rgb(), palette.text_color());
        assert_eq!(color.a, 64);
    }

    #[test]
    fn text_color_contrasts_background() {
        assert!(Palette::dark().text_color().is_light());
        assert!(!Palette::light().text_color().is_light());
    }

    #[test]
    fn empty_modes_reports_offenders() {
        let mut mapping = PaletteMapping::default();
        assert_eq!(mapping.empty_modes().count(), 0);
        mapping.light.waves.clear();
        assert_eq!(mapping.empty_modes().collect::<Vec<_>>(), vec![ThemeMode::Light]);
    }

    #[test]
    fn deserializes_from_hex_json() {
        let json = r##"{
            "dark": { "background": "#000000", "waves": ["#ffffff80"] },
            "light": { "background": "#ffffff", "waves": ["#000000", "#11223344"] }
        }"##;
        let mapping: PaletteMapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping.dark.waves, vec![Rgba::new(255, 255, 255, 0x80)]);
        assert_eq!(mapping.light.waves.len(), 2);
        assert_eq!(mapping.light.background, Rgb::WHITE);
    }
}

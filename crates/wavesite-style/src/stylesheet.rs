//! CSS rules keyed on the root theme attribute.
//!
//! Static content never reads the mode directly; it reads the custom
//! properties below, which switch with `:root[data-theme=..]`.

use std::fmt::Write as _;

use crate::palette::PaletteMapping;
use crate::theme::{THEME_ATTRIBUTE, ThemeMode};

/// Class applied to the full-viewport background canvas.
pub const BACKGROUND_CLASS: &str = "wavesite-background";

const BASE_RULES: &str = "\
body {
  margin: 0;
  background: var(--wavesite-bg);
  color: var(--wavesite-fg);
  font-family: system-ui, -apple-system, \"Segoe UI\", sans-serif;
  line-height: 1.6;
}
a, code { color: var(--wavesite-accent); }
pre { background: var(--wavesite-surface); padding: 1rem; overflow-x: auto; border-radius: 8px; }
table { border-collapse: collapse; }
th, td { border: 1px solid var(--wavesite-surface); padding: 0.4rem 0.8rem; }
.container { position: relative; max-width: 960px; margin: 0 auto; padding: 2rem 1.5rem; }
.toggle-btn {
  position: fixed; top: 1rem; right: 1rem;
  background: var(--wavesite-surface); color: var(--wavesite-fg);
  border: 1px solid var(--wavesite-accent); border-radius: 999px;
  padding: 0.4rem 1rem; cursor: pointer;
}
";

/// Build the stylesheet for `mapping`.
///
/// Emits one `:root[data-theme="<mode>"]` block per mode followed by the
/// shared base rules and the background canvas rule.
#[must_use]
pub fn theme_stylesheet(mapping: &PaletteMapping) -> String {
    let mut css = String::with_capacity(2048);
    for mode in ThemeMode::ALL {
        let palette = mapping.for_mode(mode);
        let fg = palette.text_color();
        let surface = palette.background.lerp(fg, 0.08);
        // Writing into a String cannot fail.
        let _ = write!(
            css,
            ":root[{attr}=\"{mode}\"] {{\n  \
             --wavesite-bg: {bg};\n  \
             --wavesite-fg: {fg};\n  \
             --wavesite-accent: {accent};\n  \
             --wavesite-surface: {surface};\n  \
             color-scheme: {mode};\n}}\n",
            attr = THEME_ATTRIBUTE,
            mode = mode.as_attr(),
            bg = palette.background.to_hex(),
            fg = fg.to_hex(),
            accent = palette.accent().to_hex(),
            surface = surface.to_hex(),
        );
    }
    css.push_str(BASE_RULES);
    let _ = write!(
        css,
        ".{BACKGROUND_CLASS} {{\n  \
         position: fixed; inset: 0; width: 100vw; height: 100vh;\n  \
         z-index: 0; pointer-events: none;\n}}\n"
    );
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    #[test]
    fn one_block_per_mode() {
        let css = theme_stylesheet(&PaletteMapping::default());
        assert!(css.contains(":root[data-theme=\"dark\"] {"));
        assert!(css.contains(":root[data-theme=\"light\"] {"));
        assert!(css.contains("color-scheme: dark;"));
        assert!(css.contains("color-scheme: light;"));
    }

    #[test]
    fn uses_palette_backgrounds() {
        let css = theme_stylesheet(&PaletteMapping::default());
        assert!(css.contains(&format!("--wavesite-bg: {};", Palette::dark().background)));
        assert!(css.contains(&format!("--wavesite-bg: {};", Palette::light().background)));
    }

    #[test]
    fn dark_block_precedes_light_block() {
        let css = theme_stylesheet(&PaletteMapping::default());
        let dark = css.find("\"dark\"").unwrap();
        let light = css.find("\"light\"").unwrap();
        assert!(dark < light);
    }

    #[test]
    fn includes_background_class() {
        let css = theme_stylesheet(&PaletteMapping::default());
        assert!(css.contains(".wavesite-background {"));
        assert!(css.contains("pointer-events: none"));
    }
}

//! Sofa configurator: leg variants and colour presets.
//!
//! The preview stacks three images: the sofa base, an optional colour
//! layer tinted with a CSS filter, and the legs on top.

/// Image underneath every configuration.
pub const BASE_IMAGE: &str = "/static/sofa/base.svg";
/// Layer tinted by the colour preset.
pub const COLOR_LAYER_IMAGE: &str = "/static/sofa/color-layer.svg";

pub const LEG_VARIANTS: std::ops::RangeInclusive<u8> = 1..=5;

/// A colour preset expressed as CSS filter components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    /// Degrees.
    pub hue: u16,
    /// Percent.
    pub saturation: u16,
    /// Percent.
    pub brightness: u16,
}

impl ColorPreset {
    const fn new(name: &'static str, hue: u16, saturation: u16, brightness: u16) -> Self {
        Self {
            name,
            hue,
            saturation,
            brightness,
        }
    }

    /// Value of the CSS `filter` property for the colour layer.
    #[must_use]
    pub fn css_filter(&self) -> String {
        format!(
            "hue-rotate({}deg) saturate({}%) brightness({}%)",
            self.hue, self.saturation, self.brightness
        )
    }
}

/// The first entry is the untinted original.
pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset::new("Original", 0, 100, 100),
    ColorPreset::new("Warm Brown", 15, 80, 95),
    ColorPreset::new("Cool Gray", 0, 20, 85),
    ColorPreset::new("Burgundy", 340, 70, 90),
    ColorPreset::new("Navy", 220, 60, 75),
    ColorPreset::new("Sage", 95, 45, 80),
];

/// A leg variant and colour preset selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SofaConfig {
    leg: u8,
    color: usize,
}

impl Default for SofaConfig {
    fn default() -> Self {
        Self { leg: 1, color: 0 }
    }
}

impl SofaConfig {
    /// Build a selection, clamping both values into range. Missing values
    /// fall back to the defaults.
    #[must_use]
    pub fn new(leg: Option<i64>, color: Option<i64>) -> Self {
        let leg = leg.map_or(*LEG_VARIANTS.start(), |l| {
            u8::try_from(l.clamp(
                i64::from(*LEG_VARIANTS.start()),
                i64::from(*LEG_VARIANTS.end()),
            ))
            .unwrap_or(*LEG_VARIANTS.start())
        });
        let last = COLOR_PRESETS.len() - 1;
        let color = color.map_or(0, |c| usize::try_from(c.max(0)).unwrap_or(0).min(last));
        Self { leg, color }
    }

    #[must_use]
    pub const fn leg(&self) -> u8 {
        self.leg
    }

    #[must_use]
    pub const fn color_index(&self) -> usize {
        self.color
    }

    #[must_use]
    pub const fn color(&self) -> ColorPreset {
        COLOR_PRESETS[self.color]
    }

    /// The colour layer is only drawn for a non-original preset.
    #[must_use]
    pub const fn shows_color_layer(&self) -> bool {
        self.color != 0
    }

    #[must_use]
    pub fn legs_image(&self) -> String {
        format!("/static/sofa/legs-{}.svg", self.leg)
    }

    /// Link to this configuration.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/configurator?leg={}&color={}", self.leg, self.color)
    }

    #[must_use]
    pub const fn with_leg(self, leg: u8) -> Self {
        Self { leg, ..self }
    }

    #[must_use]
    pub const fn with_color(self, color: usize) -> Self {
        Self { color, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_string() {
        assert_eq!(
            COLOR_PRESETS[3].css_filter(),
            "hue-rotate(340deg) saturate(70%) brightness(90%)"
        );
        let navy = SofaConfig::new(Some(2), Some(4)).color();
        assert_eq!(navy.name, "Navy");
        assert_eq!(
            navy.css_filter(),
            "hue-rotate(220deg) saturate(60%) brightness(75%)"
        );
    }

    #[test]
    fn test_color_layer_only_for_tinted_presets() {
        assert!(!SofaConfig::default().shows_color_layer());
        assert!(SofaConfig::new(None, Some(1)).shows_color_layer());
    }

    #[test]
    fn test_out_of_range_clamps() {
        let config = SofaConfig::new(Some(9), Some(42));
        assert_eq!(config.leg(), 5);
        assert_eq!(config.color().name, "Sage");

        let config = SofaConfig::new(Some(-1), Some(-3));
        assert_eq!(config.leg(), 1);
        assert_eq!(config.color_index(), 0);

        assert_eq!(SofaConfig::new(None, None), SofaConfig::default());
    }

    #[test]
    fn test_href_and_images() {
        let config = SofaConfig::new(Some(3), Some(2));
        assert_eq!(config.href(), "/configurator?leg=3&color=2");
        assert_eq!(config.legs_image(), "/static/sofa/legs-3.svg");
        assert_eq!(config.with_leg(1).href(), "/configurator?leg=1&color=2");
    }
}

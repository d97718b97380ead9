/// Fill for wedges of absent students.
pub const DISABLED_FILL: &str = "#ccc";

const SATURATION: u8 = 85;
const LIGHTNESS: u8 = 55;

/// Which wheel a wedge belongs to; picks the hue pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Terms,
    Students,
}

impl ColorScheme {
    /// Hues for even and odd wedges.
    #[must_use]
    pub fn hues(self) -> (u16, u16) {
        match self {
            ColorScheme::Terms => (210, 190),
            ColorScheme::Students => (330, 300),
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ColorScheme::Terms => "terms",
            ColorScheme::Students => "students",
        }
    }
}

/// Fill color for wedge `index`, alternating hues by parity.
#[must_use]
pub fn wedge_fill(index: usize, scheme: ColorScheme, disabled: bool) -> String {
    if disabled {
        return DISABLED_FILL.to_string();
    }
    let (even, odd) = scheme.hues();
    let hue = if index % 2 == 0 { even } else { odd };
    format!("hsl({hue} {SATURATION}% {LIGHTNESS}%)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_by_parity() {
        assert_eq!(wedge_fill(0, ColorScheme::Terms, false), "hsl(210 85% 55%)");
        assert_eq!(wedge_fill(1, ColorScheme::Terms, false), "hsl(190 85% 55%)");
        assert_eq!(wedge_fill(2, ColorScheme::Students, false), "hsl(330 85% 55%)");
        assert_eq!(wedge_fill(3, ColorScheme::Students, false), "hsl(300 85% 55%)");
    }

    #[test]
    fn disabled_wedges_are_neutral() {
        assert_eq!(wedge_fill(0, ColorScheme::Students, true), DISABLED_FILL);
    }
}

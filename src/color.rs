use palette::named;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Curve colours
// ---------------------------------------------------------------------------

/// High-contrast curve colours, cycled per run.
pub const HIGH_CONTRAST: [Srgb<u8>; 10] = [
    named::BLACK,
    named::RED,
    named::BLUE,
    named::GREEN,
    named::ORANGE,
    named::PURPLE,
    named::CYAN,
    named::MAGENTA,
    named::BROWN,
    named::PINK,
];

/// Colour of the half-maximum reference lines.
pub const REFERENCE: Srgb<u8> = named::GRAY;

/// Colour for the run drawn at position `index` of a chart.
pub fn curve_color(index: usize) -> Srgb<u8> {
    HIGH_CONTRAST[index % HIGH_CONTRAST.len()]
}

// ---------------------------------------------------------------------------
// Dash patterns
// ---------------------------------------------------------------------------

/// Stroke pattern of a curve.  Both renderers map these onto their own
/// line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    LongDash,
    ShortDash,
    SparseDot,
    DenseDot,
}

const DASH_CYCLE: [Dash; 5] = [
    Dash::Solid,
    Dash::LongDash,
    Dash::SparseDot,
    Dash::ShortDash,
    Dash::DenseDot,
];

/// Dash pattern for the run drawn at position `index` of a chart.
pub fn curve_dash(index: usize) -> Dash {
    DASH_CYCLE[index % DASH_CYCLE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_cycle() {
        assert_eq!(curve_color(0), named::BLACK);
        assert_eq!(curve_color(1), named::RED);
        assert_eq!(curve_color(10), named::BLACK);
        assert_eq!(curve_dash(0), Dash::Solid);
        assert_eq!(curve_dash(5), Dash::Solid);
        assert_ne!(curve_dash(1), curve_dash(2));
    }
}

//! Colors for the charts.

use plotters::style::RGBColor;

/// Bar palette for the profit-by-region chart, cycled.
pub const REGION_PALETTE: [RGBColor; 4] = [
    RGBColor(0x4c, 0x72, 0xb0),
    RGBColor(0x55, 0xa8, 0x68),
    RGBColor(0xc4, 0x4e, 0x52),
    RGBColor(0x81, 0x72, 0xb2),
];

/// Bar palette for the emissions-by-practice chart, cycled.
pub const PRACTICE_PALETTE: [RGBColor; 3] = [
    RGBColor(0x4c, 0x72, 0xb0),
    RGBColor(0x55, 0xa8, 0x68),
    RGBColor(0xc4, 0x4e, 0x52),
];

/// Single color for the yield chart and the histogram.
pub const DEFAULT_BAR: RGBColor = RGBColor(0x4c, 0x72, 0xb0);

/// Fill for undefined heatmap cells.
pub const UNDEFINED_CELL: RGBColor = RGBColor(0xbd, 0xbd, 0xbd);

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

fn lerp(from: (f64, f64, f64), to: (f64, f64, f64), t: f64) -> RGBColor {
    let channel = |a: f64, b: f64| (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
    RGBColor(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Blue-white-red scale over [-1, 1], neutral at 0.
pub fn diverging_color(value: f64) -> RGBColor {
    let v = value.clamp(-1.0, 1.0);
    if v < 0.0 {
        lerp(NEUTRAL, COOL, -v)
    } else {
        lerp(NEUTRAL, WARM, v)
    }
}

/// Annotation color that stays readable on top of [`diverging_color`].
pub fn annotation_color(value: f64) -> RGBColor {
    if value.abs() > 0.6 {
        RGBColor(255, 255, 255)
    } else {
        RGBColor(0, 0, 0)
    }
}

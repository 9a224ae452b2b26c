//! Dial Computation

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

/// The dial is the upper half circle: background arc from `ARC_START` to
/// `ARC_START + ARC_SPAN`.
pub const ARC_START: f64 = PI;
pub const ARC_SPAN: f64 = PI;

/// Gauge construction errors
#[derive(Debug, Error, PartialEq)]
pub enum GaugeError {
    #[error("invalid bounds: min {min} must be below max {max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("color scheme needs at least one stop")]
    EmptyColorScheme,

    #[error("color stops must be ordered by threshold")]
    UnorderedStops,

    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string
    pub fn from_hex(hex: &str) -> Result<Self, GaugeError> {
        let invalid = || GaugeError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 {
            return Err(invalid());
        }

        let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?;
        Ok(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`, `t` in [0, 1]
    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// A color stop: readings at or beyond `threshold` lean towards `color`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub threshold: f64,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(threshold: f64, color: Color) -> Self {
        Self { threshold, color }
    }
}

/// Static description of one gauge: bounds, label and color scheme
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    min: f64,
    max: f64,
    label: String,
    stops: Vec<ColorStop>,
}

/// Everything a renderer needs to draw one gauge state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialFrame {
    /// `(value - min) / (max - min)`, clamped to [0, 1]
    pub proportion: f64,
    /// Background and value arcs both start here
    pub arc_start: f64,
    /// End angle of the value arc
    pub arc_end: f64,
    /// Needle rotation, equal to the value arc's end angle
    pub needle_angle: f64,
    /// Color interpolated across the stops at the current value
    pub color: Color,
    /// Centered label text
    pub label: String,
}

impl Gauge {
    /// Create a gauge; bounds must be a non-empty range and stops must be
    /// ordered by threshold.
    pub fn new(
        min: f64,
        max: f64,
        label: impl Into<String>,
        stops: Vec<ColorStop>,
    ) -> Result<Self, GaugeError> {
        if !(min < max) {
            return Err(GaugeError::InvalidBounds { min, max });
        }
        if stops.is_empty() {
            return Err(GaugeError::EmptyColorScheme);
        }
        if stops.windows(2).any(|w| w[0].threshold > w[1].threshold) {
            return Err(GaugeError::UnorderedStops);
        }

        Ok(Self {
            min,
            max,
            label: label.into(),
            stops,
        })
    }

    /// Compute the dial state for a value
    pub fn frame(&self, value: f64) -> DialFrame {
        let proportion = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        let arc_end = ARC_START + proportion * ARC_SPAN;

        DialFrame {
            proportion,
            arc_start: ARC_START,
            arc_end,
            needle_angle: arc_end,
            color: self.color_at(value),
            label: self.label.clone(),
        }
    }

    /// Piecewise-linear color across the stops
    fn color_at(&self, value: f64) -> Color {
        let first = self.stops.first().expect("stops are non-empty");
        if value <= first.threshold {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if value <= high.threshold {
                let span = high.threshold - low.threshold;
                if span <= 0.0 {
                    return high.color;
                }
                let t = (value - low.threshold) / span;
                return low.color.lerp(high.color, t);
            }
        }

        self.stops.last().expect("stops are non-empty").color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BLUE: Color = Color::new(0x3b, 0x82, 0xf6);
    const GREEN: Color = Color::new(0x22, 0xc5, 0x5e);
    const ORANGE: Color = Color::new(0xf9, 0x73, 0x16);

    fn temperature_gauge() -> Gauge {
        Gauge::new(
            0.0,
            40.0,
            "24°C",
            vec![
                ColorStop::new(10.0, BLUE),
                ColorStop::new(25.0, GREEN),
                ColorStop::new(40.0, ORANGE),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_degenerate_bounds() {
        let stops = vec![ColorStop::new(0.0, BLUE)];
        assert_eq!(
            Gauge::new(40.0, 40.0, "x", stops).unwrap_err(),
            GaugeError::InvalidBounds { min: 40.0, max: 40.0 }
        );
    }

    #[test]
    fn test_rejects_empty_color_scheme() {
        assert_eq!(
            Gauge::new(0.0, 40.0, "x", vec![]).unwrap_err(),
            GaugeError::EmptyColorScheme
        );
    }

    #[test]
    fn test_rejects_unordered_stops() {
        let stops = vec![ColorStop::new(25.0, GREEN), ColorStop::new(10.0, BLUE)];
        assert_eq!(
            Gauge::new(0.0, 40.0, "x", stops).unwrap_err(),
            GaugeError::UnorderedStops
        );
    }

    #[test]
    fn test_midpoint_sweep() {
        let frame = temperature_gauge().frame(20.0);
        assert!((frame.proportion - 0.5).abs() < 1e-9);
        assert!((frame.arc_end - 1.5 * PI).abs() < 1e-9);
        assert_eq!(frame.needle_angle, frame.arc_end);
        assert_eq!(frame.arc_start, PI);
        assert_eq!(frame.label, "24°C");
    }

    #[test]
    fn test_out_of_bounds_values_clamp() {
        let gauge = temperature_gauge();
        assert_eq!(gauge.frame(-5.0).proportion, 0.0);
        assert_eq!(gauge.frame(55.0).proportion, 1.0);
        assert_eq!(gauge.frame(55.0).needle_angle, 2.0 * PI);
    }

    #[test]
    fn test_color_at_stops_matches_scheme() {
        let gauge = temperature_gauge();
        assert_eq!(gauge.frame(10.0).color, BLUE);
        assert_eq!(gauge.frame(25.0).color, GREEN);
        assert_eq!(gauge.frame(40.0).color, ORANGE);
    }

    #[test]
    fn test_color_below_and_above_scheme_saturates() {
        let gauge = temperature_gauge();
        assert_eq!(gauge.frame(0.0).color, BLUE);
        assert_eq!(gauge.frame(999.0).color, ORANGE);
    }

    #[test]
    fn test_color_interpolates_between_stops() {
        let gauge = Gauge::new(
            0.0,
            100.0,
            "x",
            vec![
                ColorStop::new(0.0, Color::new(0, 0, 0)),
                ColorStop::new(100.0, Color::new(200, 100, 50)),
            ],
        )
        .unwrap();

        assert_eq!(gauge.frame(50.0).color, Color::new(100, 50, 25));
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Color::from_hex("#3b82f6").unwrap();
        assert_eq!(color, BLUE);
        assert_eq!(color.to_hex(), "#3b82f6");
    }

    #[test]
    fn test_invalid_hex_is_rejected() {
        assert!(Color::from_hex("3b82f6").is_err());
        assert!(Color::from_hex("#3b82").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    proptest! {
        #[test]
        fn prop_proportion_and_needle_stay_on_the_dial(value in -1e6f64..1e6f64) {
            let frame = temperature_gauge().frame(value);
            prop_assert!((0.0..=1.0).contains(&frame.proportion));
            prop_assert!((PI..=2.0 * PI).contains(&frame.needle_angle));
            prop_assert!(frame.arc_end >= frame.arc_start);
        }
    }
}

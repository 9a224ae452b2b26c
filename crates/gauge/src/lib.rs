//! Gauge Dial Geometry
//!
//! Pure computation behind the dashboard's semicircular gauge: arc sweep,
//! needle rotation and color interpolation across threshold stops.

mod dial;

pub use dial::{Color, ColorStop, DialFrame, Gauge, GaugeError, ARC_SPAN, ARC_START};

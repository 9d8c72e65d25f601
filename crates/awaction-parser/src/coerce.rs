//! Pure conversions from matched text to typed values.
//!
//! The grammar only hands well-formed text to these functions, but none of
//! them panic on malformed input: numbers fall back to zero and integer
//! overflow saturates.

use std::num::IntErrorKind;

use awaction_core::geometry::{Altitude, Vector3, WorldCoordinates};

/// Smallest scale factor on any axis.
pub(crate) const MIN_SCALE: f64 = 0.1;

/// Map a boolean keyword. Keywords are case-sensitive.
pub(crate) fn boolean(keyword: &str) -> Option<bool> {
    match keyword {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a possibly signed decimal number.
pub(crate) fn float(text: &str) -> f64 {
    text.parse().unwrap_or_default()
}

/// Parse a run of decimal digits, saturating at `u64::MAX`.
pub(crate) fn unsigned(text: &str) -> u64 {
    match text.parse::<u64>() {
        Ok(value) => value,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => 0,
    }
}

/// Expand move distances or rotation speeds to three axes.
///
/// A single value applies to the vertical axis.
pub(crate) fn complete_vector(values: &[f64]) -> Vector3 {
    match *values {
        [y] => Vector3::new(0.0, y, 0.0),
        [x, y] => Vector3::new(x, y, 0.0),
        [x, y, z] => Vector3::new(x, y, z),
        _ => Vector3::ZERO,
    }
}

/// Expand scale factors to three axes after clamping each to [`MIN_SCALE`].
pub(crate) fn complete_scale(values: &[f64]) -> Vector3 {
    let clamped: Vec<f64> = values.iter().map(|v| v.max(MIN_SCALE)).collect();
    match *clamped.as_slice() {
        [] => Vector3::splat(1.0),
        [factor] => Vector3::splat(factor),
        [x, y] => Vector3::new(x, y, 1.0),
        [x, y, z, ..] => Vector3::new(x, y, z),
    }
}

/// Clamp an opacity or light intensity to `0.0..=1.0`.
pub(crate) fn unit_interval(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Sign a magnitude by its hemisphere letter: south and west are negative.
pub(crate) fn hemisphere(magnitude: f64, letter: char) -> f64 {
    match letter.to_ascii_lowercase() {
        's' | 'w' => -magnitude,
        _ => magnitude,
    }
}

pub(crate) fn absolute_coordinates(
    north: (&str, char),
    east: (&str, char),
) -> WorldCoordinates {
    WorldCoordinates::Absolute {
        north: hemisphere(float(north.0), north.1),
        east: hemisphere(float(east.0), east.1),
    }
}

pub(crate) fn relative_coordinates(x: &str, y: &str) -> WorldCoordinates {
    WorldCoordinates::Relative {
        x: float(x),
        y: float(y),
    }
}

/// An explicit sign makes the altitude relative to the current height.
pub(crate) fn altitude(text: &str) -> Altitude {
    let value = float(text);
    if text.starts_with(['+', '-']) {
        Altitude::relative(value)
    } else {
        Altitude::absolute(value)
    }
}

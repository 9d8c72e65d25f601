//! Spatial values carried by movement and teleport commands.

use serde::Serialize;

/// A float triple used for move/rotate distances and scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns a vector with every component set to `value`.
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value)
    }
}

/// A position in a world, addressed absolutely or relative to the avatar.
///
/// Absolute coordinates are signed so that north and east are positive;
/// south and west values are negated while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "coordinateType", rename_all = "lowercase")]
pub enum WorldCoordinates {
    Absolute {
        #[serde(rename = "NS")]
        north: f64,
        #[serde(rename = "EW")]
        east: f64,
    },
    Relative {
        x: f64,
        y: f64,
    },
}

/// How an [`Altitude`] value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AltitudeKind {
    /// Written without a sign: an absolute height.
    Absolute,
    /// Written with an explicit `+`/`-`: an offset from the current height.
    Relative,
}

/// The optional altitude of a teleport or warp destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Altitude {
    #[serde(rename = "altitudeType")]
    pub kind: AltitudeKind,
    pub value: f64,
}

impl Altitude {
    pub fn absolute(value: f64) -> Self {
        Self {
            kind: AltitudeKind::Absolute,
            value,
        }
    }

    pub fn relative(value: f64) -> Self {
        Self {
            kind: AltitudeKind::Relative,
            value,
        }
    }
}

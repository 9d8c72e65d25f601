//! Color handling for action strings
//!
//! This module provides the [`Rgb`] type and the color resolution rules used
//! by `color`, `light` and `sign` commands. A color token resolves, in order:
//!
//! 1. to an entry of the Active Worlds preset palette ([`PRESET_COLORS`]),
//! 2. to the leading run of hexadecimal digits, read as an unsigned integer,
//! 3. to a deterministic hash of the whole token.

use serde::Serialize;

/// An RGB triple with every channel in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The Active Worlds preset color palette, sorted by name.
pub const PRESET_COLORS: [(&str, Rgb); 32] = [
    ("aquamarine", Rgb::new(112, 219, 147)),
    ("black", Rgb::new(0, 0, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("brass", Rgb::new(181, 166, 66)),
    ("bronze", Rgb::new(140, 120, 83)),
    ("brown", Rgb::new(166, 42, 42)),
    ("copper", Rgb::new(184, 115, 51)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("darkgrey", Rgb::new(48, 48, 48)),
    ("forestgreen", Rgb::new(35, 142, 35)),
    ("gold", Rgb::new(205, 127, 50)),
    ("green", Rgb::new(0, 255, 0)),
    ("grey", Rgb::new(112, 112, 112)),
    ("lightgrey", Rgb::new(192, 192, 192)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("maroon", Rgb::new(142, 35, 107)),
    ("navyblue", Rgb::new(35, 35, 142)),
    ("orange", Rgb::new(255, 127, 0)),
    ("orangered", Rgb::new(255, 36, 0)),
    ("orchid", Rgb::new(219, 112, 219)),
    ("pink", Rgb::new(255, 110, 199)),
    ("red", Rgb::new(255, 0, 0)),
    ("salmon", Rgb::new(111, 66, 66)),
    ("scarlet", Rgb::new(140, 23, 23)),
    ("silver", Rgb::new(230, 232, 250)),
    ("skyblue", Rgb::new(50, 153, 204)),
    ("tan", Rgb::new(219, 147, 112)),
    ("teal", Rgb::new(0, 112, 112)),
    ("turquoise", Rgb::new(173, 234, 234)),
    ("violet", Rgb::new(79, 47, 79)),
    ("white", Rgb::new(255, 255, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
];

impl Rgb {
    /// Opaque white, the result of an overflowing hexadecimal color.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from wide channel values, clamping each to `0..=255`.
    ///
    /// # Examples
    ///
    /// ```
    /// use awaction_core::color::Rgb;
    ///
    /// assert_eq!(Rgb::clamped(-4, 128, 999), Rgb::new(0, 128, 255));
    /// ```
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let clamp = |channel: i64| channel.clamp(0, 255) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    /// Look up a preset color by name, ignoring ASCII case.
    pub fn preset(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        PRESET_COLORS
            .binary_search_by(|(preset, _)| (*preset).cmp(name.as_str()))
            .ok()
            .map(|index| PRESET_COLORS[index].1)
    }

    /// Resolve a color token as the Active Worlds browser does.
    ///
    /// # Examples
    ///
    /// ```
    /// use awaction_core::color::Rgb;
    ///
    /// assert_eq!(Rgb::resolve("Red"), Rgb::new(255, 0, 0));
    /// assert_eq!(Rgb::resolve("ff8000"), Rgb::new(255, 128, 0));
    /// ```
    pub fn resolve(token: &str) -> Self {
        let token = token.to_lowercase();
        Self::preset(&token)
            .or_else(|| Self::from_hex_prefix(&token))
            .unwrap_or_else(|| Self::from_string_hash(&token))
    }

    /// Interpret the leading hexadecimal digits of `token` as a color value.
    ///
    /// Returns `None` when `token` does not start with a hexadecimal digit.
    /// Values above `u64::MAX` are white. Otherwise the channels are taken
    /// from the low 32 bits read as a signed integer, shifted arithmetically,
    /// reduced modulo 256 and lifted back into range when negative.
    pub fn from_hex_prefix(token: &str) -> Option<Self> {
        let digits_len = token
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(token.len());
        if digits_len == 0 {
            return None;
        }

        let mut value: u128 = 0;
        for digit in token[..digits_len].chars().filter_map(|c| c.to_digit(16)) {
            value = match value
                .checked_mul(16)
                .and_then(|v| v.checked_add(u128::from(digit)))
            {
                Some(next) => next,
                None => return Some(Self::WHITE),
            };
        }

        if value > u128::from(u64::MAX) {
            return Some(Self::WHITE);
        }

        let low = value as u32 as i32;
        let channel = |shift: u32| {
            let c = (low >> shift) % 256;
            i64::from(if c < 0 { c + 256 } else { c })
        };
        Some(Self::clamped(channel(16), channel(8), channel(0)))
    }

    /// Derive a color from a 32-bit string hash of `token`.
    ///
    /// The hash iterates UTF-16 code units as `hash = unit + (hash << 5) - hash`
    /// with signed 32-bit wraparound. The channels are bits 16-23, 8-15 and
    /// 0-7 of the final hash.
    pub fn from_string_hash(token: &str) -> Self {
        let hash = token.encode_utf16().fold(0i32, |hash, unit| {
            i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
        });
        Self::new(
            ((hash & 0x00FF_0000) >> 16) as u8,
            ((hash & 0x0000_FF00) >> 8) as u8,
            (hash & 0x0000_00FF) as u8,
        )
    }
}

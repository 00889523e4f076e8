//! Color utilities
//!
//! Conversion from `#RGB` / `#RRGGBB` hex strings to CSS-style `rgba()`
//! strings. This is the only validated input in the theming layer.

use std::fmt::Display;

/// Color conversion errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The input is not `#` followed by exactly 3 or 6 hex digits
    #[error("Bad hex color: expected #RGB or #RRGGBB")]
    InvalidFormat,
}

/// Result type for color operations
pub type Result<T> = std::result::Result<T, ColorError>;

/// Opacity used when a caller has no particular opacity in mind
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Parse `#RGB` or `#RRGGBB` (any casing) into channel values
///
/// The 3-digit form expands each digit by duplication, so `#F0C` is
/// `#FF00CC`.
pub fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').ok_or(ColorError::InvalidFormat)?;

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidFormat);
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::InvalidFormat),
    };

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&expanded[range], 16).map_err(|_| ColorError::InvalidFormat)
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert a hex color to `rgba(r,g,b,opacity)`
///
/// The opacity is written exactly as given; it is not range-checked.
///
/// ```rust
/// use theme_style::hex_to_rgba;
///
/// assert_eq!(hex_to_rgba("#FF0000", 1).unwrap(), "rgba(255,0,0,1)");
/// assert_eq!(hex_to_rgba("#F00", 0.5).unwrap(), "rgba(255,0,0,0.5)");
/// assert!(hex_to_rgba("not-a-hex", 1).is_err());
/// ```
pub fn hex_to_rgba(hex: &str, opacity: impl Display) -> Result<String> {
    let (r, g, b) = parse_hex(hex)?;
    Ok(format!("rgba({},{},{},{})", r, g, b, opacity))
}

/// Color helpers handed to style producers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorUtils;

impl ColorUtils {
    /// See [`hex_to_rgba`]
    pub fn hex_to_rgba(&self, hex: &str, opacity: impl Display) -> Result<String> {
        hex_to_rgba(hex, opacity)
    }

    /// [`hex_to_rgba`] with full opacity
    pub fn hex_to_rgb(&self, hex: &str) -> Result<String> {
        hex_to_rgba(hex, DEFAULT_OPACITY)
    }
}

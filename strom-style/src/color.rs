//! Color property helpers.

use thiserror::Error;

use crate::{params::Property, theme::Theme};

#[derive(Debug, Error)]
pub enum StyleError {
    /// Expected a `#rrggbb` value.
    #[error("invalid color format: {0}")]
    InvalidColor(String),
}

/// A color property from rgb values.
pub fn rgb(r: u8, g: u8, b: u8) -> Property {
    format!("rgb({r},{g},{b})")
}

/// A color property from rgba values; `a` in `0.0..=1.0`.
pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Property {
    format!("rgba({r},{g},{b},{a})")
}

/// A color property from hsl values; `s` and `l` in percent.
pub fn hsl(h: u16, s: u8, l: u8) -> Property {
    format!("hsl({h},{s}%,{l}%)")
}

/// A color property from hsla values.
pub fn hsla(h: u16, s: u8, l: u8, a: f64) -> Property {
    format!("hsla({h},{s}%,{l}%,{a})")
}

/// Alters the brightness of a `#rrggbb` color.
///
/// A factor between 1 and 2 brightens (towards a faded look rather than a
/// shining one), between 0 and 1 darkens; exactly 1 returns the input.
pub fn alter_brightness(color: &str, brightness: f64) -> Result<Property, StyleError> {
    let hex = color
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.is_ascii())
        .ok_or_else(|| StyleError::InvalidColor(color.to_owned()))?;

    if brightness == 1.0 {
        return Ok(color.to_owned());
    }

    let mut out = String::from("#");
    for i in 0..3 {
        let channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| StyleError::InvalidColor(color.to_owned()))?;
        let channel = channel as f64;
        let altered = if brightness > 1.0 {
            channel + (brightness - 1.0) * (255.0 - channel)
        } else {
            channel - (1.0 - brightness) * channel
        };
        out.push_str(&format!("{:02x}", altered.clamp(0.0, 255.0) as u8));
    }
    Ok(out)
}

/// The hover variant of a color, per the theme's brightness factor.
pub fn hover(color: &str, theme: &Theme) -> Result<Property, StyleError> {
    alter_brightness(color, theme.hover_brightness)
}

/// The darkened variant of a color, per the theme's darkness factor.
pub fn darken(color: &str, theme: &Theme) -> Result<Property, StyleError> {
    alter_brightness(color, theme.hover_darkness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting() {
        assert_eq!(rgb(255, 0, 8), "rgb(255,0,8)");
        assert_eq!(rgba(1, 2, 3, 0.5), "rgba(1,2,3,0.5)");
        assert_eq!(hsl(120, 50, 40), "hsl(120,50%,40%)");
        assert_eq!(hsla(120, 50, 40, 0.25), "hsla(120,50%,40%,0.25)");
    }

    #[test]
    fn brightness_bounds() {
        // Factor 2 saturates every channel, factor 0 zeroes them.
        assert_eq!(alter_brightness("#336699", 2.0).unwrap(), "#ffffff");
        assert_eq!(alter_brightness("#336699", 0.0).unwrap(), "#000000");
        assert_eq!(alter_brightness("#336699", 1.0).unwrap(), "#336699");
    }

    #[test]
    fn brightening_moves_towards_white() {
        // 0x80 + 0.5 * (255 - 0x80) = 0xbf
        assert_eq!(alter_brightness("#808080", 1.5).unwrap(), "#bfbfbf");
        // 0x80 - 0.5 * 0x80 = 0x40
        assert_eq!(alter_brightness("#808080", 0.5).unwrap(), "#404040");
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(matches!(
            alter_brightness("808080", 1.5),
            Err(StyleError::InvalidColor(_))
        ));
        assert!(matches!(
            alter_brightness("#80zz80", 1.5),
            Err(StyleError::InvalidColor(_))
        ));
    }
}

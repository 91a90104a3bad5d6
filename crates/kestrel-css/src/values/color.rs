//! CSS Color values
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

use super::parse::{consume_number, split_top_level};

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// [§ 6.2 The transparent keyword](https://www.w3.org/TR/css-color-4/#transparent-color)
    ///
    /// "The keyword transparent specifies a transparent black."
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        // [§ 4.2.1]
        // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
        // by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::opaque(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self::opaque(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// The seventeen CSS 2.1 color keywords, plus `transparent`.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "transparent" => Self::TRANSPARENT,
            "red" => Self::opaque(255, 0, 0),
            "green" => Self::opaque(0, 128, 0),
            "blue" => Self::opaque(0, 0, 255),
            "yellow" => Self::opaque(255, 255, 0),
            "gray" | "grey" => Self::opaque(128, 128, 128),
            "aqua" | "cyan" => Self::opaque(0, 255, 255),
            "fuchsia" | "magenta" => Self::opaque(255, 0, 255),
            "lime" => Self::opaque(0, 255, 0),
            "maroon" => Self::opaque(128, 0, 0),
            "navy" => Self::opaque(0, 0, 128),
            "olive" => Self::opaque(128, 128, 0),
            "orange" => Self::opaque(255, 165, 0),
            "purple" => Self::opaque(128, 0, 128),
            "silver" => Self::opaque(192, 192, 192),
            "teal" => Self::opaque(0, 128, 128),
            _ => return None,
        };
        Some(color)
    }

    /// Convert to hex string notation (#RRGGBB or #RRGGBBAA if alpha != 255)
    ///
    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// [§ 4.1 The RGB Functions: rgb() and rgba()](https://www.w3.org/TR/css-color-4/#rgb-functions)
/// [§ 4.1 The HSL Functions: hsl() and hsla()](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// Parse the argument text of a color function. `name` is the function name
/// without the parenthesis; `args` is the text between the parentheses.
///
/// Returns `None` when `name` is not a color function or the arguments are
/// not channels.
#[must_use]
pub fn parse_color_function(name: &str, args: &str) -> Option<ColorValue> {
    match name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => parse_rgb_function(args),
        "hsl" | "hsla" => parse_hsl_function(args),
        _ => None,
    }
}

/// A numeric value extracted from a color function argument.
///
/// Color function arguments can be either plain numbers (0-255 for RGB)
/// or percentages (0%-100%).
#[derive(Debug, Clone, Copy)]
enum ColorArg {
    Number(f64),
    Percentage(f64),
}

/// Extract numeric arguments from a color function's argument text.
///
/// Handles both modern syntax (space-separated with optional `/ alpha`)
/// and legacy syntax (comma-separated).
fn extract_color_args(args: &str) -> Option<Vec<ColorArg>> {
    let pieces = split_top_level(args, |c| c == ',' || c == '/' || c.is_ascii_whitespace()).ok()?;
    pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .map(|piece| match consume_number(piece)? {
            (value, "") => Some(ColorArg::Number(value)),
            (value, "%") => Some(ColorArg::Percentage(value)),
            _ => None,
        })
        .collect()
}

/// [§ 4.1 The RGB Functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// "Values outside these ranges are not invalid, but are clamped to the
/// ranges defined here at parsed-value time."
fn parse_rgb_function(args: &str) -> Option<ColorValue> {
    let vals = extract_color_args(args)?;
    let [r, g, b, rest @ ..] = vals.as_slice() else {
        return None;
    };

    // "The final argument, <alpha-value>, specifies the alpha of the color."
    // "If omitted, it defaults to 100%."
    let a = match rest {
        [] => 255,
        [alpha] => alpha_to_u8(*alpha),
        _ => return None,
    };

    Some(ColorValue {
        r: color_channel_to_u8(*r),
        g: color_channel_to_u8(*g),
        b: color_channel_to_u8(*b),
        a,
    })
}

/// [§ 4.1 The HSL Functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// "hsl() = hsl( <hue> <percentage> <percentage> [ / <alpha-value> ]? )"
fn parse_hsl_function(args: &str) -> Option<ColorValue> {
    let vals = extract_color_args(args)?;
    let [hue, saturation, lightness, rest @ ..] = vals.as_slice() else {
        return None;
    };

    // "Because this value is so often given in degrees, the argument
    // can also be given as a number, which is interpreted as degrees."
    let hue = match *hue {
        ColorArg::Number(v) => v,
        ColorArg::Percentage(v) => v * 3.6,
    };
    let fraction = |arg: ColorArg| match arg {
        ColorArg::Percentage(v) | ColorArg::Number(v) => v / 100.0,
    };

    let a = match rest {
        [] => 255,
        [alpha] => alpha_to_u8(*alpha),
        _ => return None,
    };

    let (r, g, b) = hsl_to_rgb(hue, fraction(*saturation), fraction(*lightness));
    Some(ColorValue { r, g, b, a })
}

/// Numbers are clamped to 0-255; percentages map 0%-100% to 0-255.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn color_channel_to_u8(arg: ColorArg) -> u8 {
    let v = match arg {
        ColorArg::Number(n) => n,
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
    };
    v.round().clamp(0.0, 255.0) as u8
}

/// "The <alpha-value> can be a <number> (clamped to [0, 1]) or a
/// <percentage> (clamped to [0%, 100%])."
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_to_u8(arg: ColorArg) -> u8 {
    let v = match arg {
        ColorArg::Number(n) => n * 255.0,
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
    };
    v.round().clamp(0.0, 255.0) as u8
}

/// [§ 4.2.4 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    (to_u8(r1), to_u8(g1), to_u8(b1))
}

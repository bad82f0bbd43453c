//! Winner colors (palette color shaded by tier opacity) and flat band colors.
use super::tiers::{AdvantageTable, ThresholdTable, Tier, NO_BAND_COLOR};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map, map_res},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

/// Base color for candidates missing from the palette.
pub const NEUTRAL_GRAY: &str = "#cccccc";

/// Info-panel bar color for candidates missing from the palette.
pub const PANEL_GRAY: &str = "#999";

/// Fill for features with no candidate data.
pub const NO_DATA: Rgba = Rgba {
    rgb: Rgb {
        r: 204,
        g: 204,
        b: 204,
    },
    alpha: 0.3,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex), |s| u8::from_str_radix(s, 16))(input)
}

fn hex_nibble(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, is_hex), |s| {
        u8::from_str_radix(s, 16).map(|v| v * 17)
    })(input)
}

fn hex_color(input: &str) -> IResult<&str, Rgb> {
    preceded(
        tag("#"),
        alt((
            map(tuple((hex_byte, hex_byte, hex_byte)), |(r, g, b)| Rgb { r, g, b }),
            map(tuple((hex_nibble, hex_nibble, hex_nibble)), |(r, g, b)| Rgb {
                r,
                g,
                b,
            }),
        )),
    )(input)
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Accepts `#rrggbb` and `#rgb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(hex_color)(s.trim())
            .map(|(_, rgb)| rgb)
            .map_err(|_| ColorError::InvalidHex(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// CSS `rgba(r,g,b,a)` color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

impl Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Apply `alpha` to a hex color. Unparseable colors shade the neutral gray instead.
pub fn shade_color(hex: &str, alpha: f64) -> Rgba {
    let rgb = hex
        .parse::<Rgb>()
        .unwrap_or(Rgb {
            r: 204,
            g: 204,
            b: 204,
        });
    rgb.with_alpha(alpha)
}

/// Candidate id → base hex color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(BTreeMap<String, String>);

impl Palette {
    pub fn get(&self, candidate: &str) -> Option<&str> {
        self.0.get(candidate).map(String::as_str)
    }

    /// Palette color or the neutral gray.
    pub fn color_for(&self, candidate: &str) -> &str {
        self.get(candidate).unwrap_or(NEUTRAL_GRAY)
    }

    pub fn validate(&self) -> Result<(), ColorError> {
        for color in self.0.values() {
            color.parse::<Rgb>()?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Palette {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Palette(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fill for a feature won by `winner` at `tier`. No winner means no data.
pub fn encode_winner_color(
    winner: Option<&str>,
    tier: Tier,
    palette: &Palette,
    table: &AdvantageTable,
) -> Rgba {
    match winner {
        Some(winner) => shade_color(palette.color_for(winner), table.alpha(tier)),
        None => NO_DATA,
    }
}

/// Flat color of the band `value` falls into.
pub fn encode_threshold_color(value: f64, table: &ThresholdTable) -> &str {
    table
        .bucket(value)
        .map(|band| band.color.as_str())
        .unwrap_or(NO_BAND_COLOR)
}

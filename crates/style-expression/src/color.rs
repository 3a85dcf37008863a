//! CSS color literal parsing.
//!
//! Recognizes the string forms styling documents use for color stops:
//! `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` and a table of
//! common named colors. Channels normalize to `[0, 1]`.

use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// An RGBA color with all channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f64; 4]);

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap())
}

fn rgb_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^rgba?\(\s*([0-9.]+)\s*,\s*([0-9.]+)\s*,\s*([0-9.]+)\s*(?:,\s*([0-9.]+)\s*)?\)$",
        )
        .unwrap()
    })
}

impl Color {
    /// Parses a CSS color string. Returns `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if hex_pattern().is_match(s) {
            return parse_hex(&s[1..]);
        }
        if let Some(captures) = rgb_pattern().captures(s) {
            let r = captures[1].parse::<f64>().ok()?;
            let g = captures[2].parse::<f64>().ok()?;
            let b = captures[3].parse::<f64>().ok()?;
            let a = match captures.get(4) {
                Some(a) => a.as_str().parse::<f64>().ok()?,
                None => 1.0,
            };
            if r > 255.0 || g > 255.0 || b > 255.0 || a > 1.0 {
                return None;
            }
            return Some(Color([r / 255.0, g / 255.0, b / 255.0, a]));
        }
        named(&s.to_ascii_lowercase())
    }

    /// The `[r, g, b, a]` JSON encoding handed to runtime evaluators.
    pub fn to_json(&self) -> Value {
        let [r, g, b, a] = self.0;
        json!([r, g, b, a])
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let (r, g, b) = if hex.len() == 3 {
        // Shorthand digits duplicate: #f80 == #ff8800.
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 17);
        (digit(0).ok()?, digit(1).ok()?, digit(2).ok()?)
    } else {
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        (byte(0).ok()?, byte(2).ok()?, byte(4).ok()?)
    };
    Some(Color([
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        1.0,
    ]))
}

fn named(name: &str) -> Option<Color> {
    let [r, g, b] = match name {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" => [0, 255, 255],
        "magenta" => [255, 0, 255],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        "gray" | "grey" => [128, 128, 128],
        "transparent" => return Some(Color([0.0, 0.0, 0.0, 0.0])),
        _ => return None,
    };
    Some(Color([
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        1.0,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#ff0000"), Some(Color([1.0, 0.0, 0.0, 1.0])));
        assert_eq!(Color::parse("#f00"), Some(Color([1.0, 0.0, 0.0, 1.0])));
        assert_eq!(Color::parse("#000000"), Some(Color([0.0, 0.0, 0.0, 1.0])));
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(
            Color::parse("rgb(255, 0, 0)"),
            Some(Color([1.0, 0.0, 0.0, 1.0]))
        );
        assert_eq!(
            Color::parse("rgba(0, 0, 255, 0.5)"),
            Some(Color([0.0, 0.0, 1.0, 0.5]))
        );
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("red"), Some(Color([1.0, 0.0, 0.0, 1.0])));
        assert_eq!(Color::parse("RED"), Some(Color([1.0, 0.0, 0.0, 1.0])));
        assert_eq!(Color::parse("transparent"), Some(Color([0.0, 0.0, 0.0, 0.0])));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Color::parse(""), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("rgb(300, 0, 0)"), None);
        assert_eq!(Color::parse("not-a-color"), None);
    }
}

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::app::infrastructure::error::AppError;

/// Page margin used for exported pages, in CSS `margin` shorthand.
///
/// Holds one to four lengths (`10mm`, `1in 0.5in`, `0 12pt 0 12pt`). Units
/// are limited to the absolute ones a print engine honours, plus `px`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageMargin(String);

fn length_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(0|[0-9]+(\.[0-9]+)?(mm|cm|in|pt|px))$").expect("valid margin pattern")
    })
}

impl PageMargin {
    pub fn parse(spec: &str) -> Result<Self, AppError> {
        let parts: Vec<&str> = spec.split_whitespace().collect();
        if parts.is_empty() || parts.len() > 4 {
            return Err(AppError::InvalidMargin(spec.to_string()));
        }
        if !parts.iter().all(|part| length_pattern().is_match(part)) {
            return Err(AppError::InvalidMargin(spec.to_string()));
        }
        Ok(Self(parts.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four sides in points, expanded the way CSS expands the shorthand.
    pub fn to_points(&self) -> MarginBox {
        let sides: Vec<f64> = self.0.split_whitespace().map(length_to_points).collect();
        let side = |i: usize| sides.get(i).copied().unwrap_or(0.0);
        let (top, right, bottom, left) = match sides.len() {
            1 => (side(0), side(0), side(0), side(0)),
            2 => (side(0), side(1), side(0), side(1)),
            3 => (side(0), side(1), side(2), side(1)),
            _ => (side(0), side(1), side(2), side(3)),
        };
        MarginBox {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Page margin resolved to points (1/72 in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginBox {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// One validated length in points. `px` is the CSS 96 dpi pixel.
fn length_to_points(length: &str) -> f64 {
    if length == "0" {
        return 0.0;
    }
    let (number, unit) = length.split_at(length.len().saturating_sub(2));
    let value: f64 = number.parse().unwrap_or(0.0);
    match unit {
        "mm" => value * 72.0 / 25.4,
        "cm" => value * 72.0 / 2.54,
        "in" => value * 72.0,
        "px" => value * 0.75,
        _ => value,
    }
}

impl Default for PageMargin {
    fn default() -> Self {
        Self("10mm".to_string())
    }
}

impl FromStr for PageMargin {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PageMargin {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PageMargin> for String {
    fn from(margin: PageMargin) -> Self {
        margin.0
    }
}

impl fmt::Display for PageMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

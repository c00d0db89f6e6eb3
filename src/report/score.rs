//! Success-probability extraction.
//!
//! The service does not return a structured score. It writes it into the
//! markdown report as a labelled line, for example:
//!
//! ```text
//! - **Probability of Success (Ps):** 85%
//! ```
//!
//! [`extract_probability`] finds the first such line. The label may carry any
//! suffix before the colon, and the number may be fractional. The trailing
//! percent sign is optional.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static PROBABILITY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*Probability of Success.*:\*\* ([0-9.]+)%?").unwrap());

/// Colour tier of the success badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    /// 80% and above
    Green,
    /// 60% to 79%
    Yellow,
    /// below 60%
    Red,
}

impl ScoreTier {
    /// Maps a rounded percentage to its tier. Lower bounds are inclusive.
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            ScoreTier::Green
        } else if percentage >= 60 {
            ScoreTier::Yellow
        } else {
            ScoreTier::Red
        }
    }

    /// CSS background used for the badge in HTML output.
    pub fn gradient(&self) -> &'static str {
        match self {
            ScoreTier::Green => "linear-gradient(135deg, #10b981 0%, #059669 100%)",
            ScoreTier::Yellow => "linear-gradient(135deg, #f59e0b 0%, #d97706 100%)",
            ScoreTier::Red => "linear-gradient(135deg, #ef4444 0%, #b91c1c 100%)",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ScoreTier::Green => "🟢",
            ScoreTier::Yellow => "🟡",
            ScoreTier::Red => "🔴",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTier::Green => write!(f, "Green"),
            ScoreTier::Yellow => write!(f, "Yellow"),
            ScoreTier::Red => write!(f, "Red"),
        }
    }
}

/// The success badge shown next to a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub percentage: u32,
    pub tier: ScoreTier,
}

impl Badge {
    pub fn new(percentage: u32) -> Self {
        Self {
            percentage,
            tier: ScoreTier::from_percentage(percentage),
        }
    }

    /// Badge label, e.g. `85% Success`.
    pub fn text(&self) -> String {
        format!("{}% Success", self.percentage)
    }
}

/// Extracts the rounded success probability from a markdown report.
///
/// Returns `None` when the labelled line is missing, its number cannot be
/// read, or it lies outside 0..=100. Callers treat that as "no badge", not as
/// an error.
pub fn extract_probability(report: &str) -> Option<u32> {
    let captures = PROBABILITY_LINE.captures(report)?;
    let value = parse_leading_float(captures.get(1)?.as_str())?;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return None;
    }
    // Half-up rounding; the value is non-negative so `round` agrees.
    Some(value.round() as u32)
}

/// Builds the badge for a report, if it carries a score.
pub fn badge_for_report(report: &str) -> Option<Badge> {
    extract_probability(report).map(Badge::new)
}

/// Parses the longest prefix of `digits` that is a valid decimal number.
///
/// The capture may hold stray dots (`85.`, `7.5.1`); only the leading number counts.
fn parse_leading_float(digits: &str) -> Option<f64> {
    let mut seen_dot = false;
    let mut end = 0;
    for (i, c) in digits.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    let number = digits[..end].trim_end_matches('.');
    if number.is_empty() || number == "." {
        return None;
    }
    number.parse::<f64>().ok()
}

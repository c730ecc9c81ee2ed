//! Shannon-entropy scoring for assignment values.
//!
//! A line passes the gate when the value after its first assignment token
//! looks random enough under at least one of two alphabet-restricted
//! estimates (base64 and hex). Low-entropy values such as placeholders
//! (`password=example`) score near zero bits and are rejected.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::DetectorError;

/// Default pattern locating the assignment token in a line.
pub const DEFAULT_ASSIGNMENT_PATTERN: &str = "(=|:=|:)";

/// Default cutoff in bits for the base64-alphabet estimate.
pub const DEFAULT_BASE64_CUTOFF: u32 = 70;

/// Default cutoff in bits for the hex-alphabet estimate.
pub const DEFAULT_HEX_CUTOFF: u32 = 40;

/// Characters counted by the base64 estimate.
pub const BASE64_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

/// Characters counted by the hex estimate.
pub const HEX_ALPHABET: &str = "1234567890abcdefABCDEF";

/// Values longer than this are rejected outright.
const MAX_VALUE_LENGTH: usize = 100;

/// Entropy gate applied to candidate lines when entropy scoring is enabled.
///
/// The assignment pattern and both cutoffs are configurable; the alphabets
/// default to [`BASE64_ALPHABET`] and [`HEX_ALPHABET`].
#[derive(Debug, Clone)]
pub struct EntropyGate {
    assignment: Regex,
    base64_alphabet: Box<str>,
    hex_alphabet: Box<str>,
    base64_cutoff: u32,
    hex_cutoff: u32,
}

impl EntropyGate {
    /// Creates a gate with the given assignment pattern and cutoffs.
    ///
    /// Returns `DetectorError::InvalidRegex` if the assignment pattern is
    /// not a valid regular expression.
    pub fn new(assignment_pattern: &str, base64_cutoff: u32, hex_cutoff: u32) -> Result<Self, DetectorError> {
        let assignment = Regex::new(assignment_pattern).map_err(|source| DetectorError::InvalidRegex {
            name: "assignment-pattern".to_string(),
            source,
        })?;

        Ok(Self {
            assignment,
            base64_alphabet: BASE64_ALPHABET.into(),
            hex_alphabet: HEX_ALPHABET.into(),
            base64_cutoff,
            hex_cutoff,
        })
    }

    /// Creates a gate with the default assignment pattern and cutoffs.
    #[must_use]
    pub fn standard() -> Self {
        #[expect(clippy::expect_used, reason = "the default assignment pattern is a known-valid literal")]
        Self::new(DEFAULT_ASSIGNMENT_PATTERN, DEFAULT_BASE64_CUTOFF, DEFAULT_HEX_CUTOFF)
            .expect("default assignment pattern compiles")
    }

    /// Replaces both alphabets.
    #[must_use]
    pub fn with_alphabets(mut self, base64: &str, hex: &str) -> Self {
        self.base64_alphabet = base64.into();
        self.hex_alphabet = hex.into();
        self
    }

    /// Scores `line` and returns `true` if it clears either cutoff.
    ///
    /// The value scored is the substring after the first assignment match,
    /// trimmed of surrounding spaces. Lines with no assignment token, and
    /// values longer than 100 bytes, always fail.
    #[must_use]
    pub fn passes(&self, line: &str) -> bool {
        let Some(assignment) = self.assignment.find(line) else {
            return false;
        };

        let value = line[assignment.end()..].trim_matches(' ');
        if value.len() > MAX_VALUE_LENGTH {
            return false;
        }

        entropy_bits(value, &self.base64_alphabet) > self.base64_cutoff
            || entropy_bits(value, &self.hex_alphabet) > self.hex_cutoff
    }
}

/// Computes the alphabet-restricted entropy estimate of `value` in bits.
///
/// Only characters of `value` that belong to `alphabet` are counted; with
/// `n` such characters and Shannon entropy `H` over their frequency table,
/// the estimate is `ceil(H) * n`. A value containing no alphabet characters
/// scores zero.
#[must_use]
pub fn entropy_bits(value: &str, alphabet: &str) -> u32 {
    let mut freq: BTreeMap<char, u32> = BTreeMap::new();
    let mut total: u32 = 0;

    for ch in value.chars() {
        if alphabet.contains(ch) {
            *freq.entry(ch).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return 0;
    }

    let n = f64::from(total);
    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = f64::from(count) / n;
            -p * p.log2()
        })
        .sum();

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "entropy over a 65-symbol alphabet is non-negative and below 7 bits"
    )]
    let whole_bits = entropy.ceil() as u32;

    whole_bits * total
}

//! Decoded feedback for one key submission.

use anyhow::{Result, bail};

/// One character's decoded hint from the keyhole service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptPart {
    /// The character that was submitted at this position.
    pub value: char,
    /// Whether the character appears anywhere in the correct key. Saturating:
    /// a character occurring several times in the correct key still decodes
    /// to a plain `true`.
    pub in_correct_key: bool,
    /// Whether the character sits at its correct position.
    pub in_correct_place: bool,
}

/// The decoded result of submitting one candidate key.
///
/// Owns one [`AttemptPart`] per submitted character, in position order. A
/// correct key carries no placement code, so `parts` is empty whenever
/// [`KeyAttempt::is_correct`] returns `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttempt {
    key_used: String,
    is_correct: bool,
    raw_result: String,
    parts: Vec<AttemptPart>,
}

impl KeyAttempt {
    /// Decode a raw service response into per-position parts.
    ///
    /// The code carries two decimal digits per submitted character: the left
    /// digit is `1` when the character is in the correct place, the right
    /// digit is the character's occurrence count in the correct key (any
    /// count >= 1 means it exists somewhere).
    pub fn decode(key_used: &str, raw_result: &str, is_correct: bool) -> Result<Self> {
        let mut parts = Vec::new();
        if !is_correct {
            let key_chars: Vec<char> = key_used.chars().collect();
            let code: Vec<char> = raw_result.chars().collect();
            if code.len() != key_chars.len() * 2 {
                bail!(
                    "placement code has {} characters, expected {} for key '{key_used}'",
                    code.len(),
                    key_chars.len() * 2
                );
            }
            parts.reserve(key_chars.len());
            for (i, &value) in key_chars.iter().enumerate() {
                let place_digit = code[i * 2];
                let count_digit = code[i * 2 + 1];
                if !place_digit.is_ascii_digit() || !count_digit.is_ascii_digit() {
                    bail!("placement code contains non-digit pair '{place_digit}{count_digit}'");
                }
                parts.push(AttemptPart {
                    value,
                    in_correct_key: count_digit != '0',
                    in_correct_place: place_digit == '1',
                });
            }
        }
        Ok(Self {
            key_used: key_used.to_string(),
            is_correct,
            raw_result: raw_result.to_string(),
            parts,
        })
    }

    /// The candidate key this feedback describes.
    pub fn key_used(&self) -> &str {
        &self.key_used
    }

    /// Whether the service declared total success.
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    /// The undecoded response text.
    pub fn raw_result(&self) -> &str {
        &self.raw_result
    }

    /// Per-position hints, empty when the key was correct.
    pub fn parts(&self) -> &[AttemptPart] {
        &self.parts
    }

    /// The parts whose character exists somewhere in the correct key, in
    /// position order.
    pub fn parts_in_correct_key(&self) -> Vec<AttemptPart> {
        self.parts
            .iter()
            .copied()
            .filter(|part| part.in_correct_key)
            .collect()
    }

    /// How many submitted characters exist somewhere in the correct key.
    pub fn in_correct_key_count(&self) -> usize {
        self.parts.iter().filter(|part| part.in_correct_key).count()
    }

    /// How many submitted characters sit at their correct position.
    pub fn in_correct_place_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| part.in_correct_place)
            .count()
    }
}

//! Deterministic in-process oracle for tests and offline runs.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::attempt::KeyAttempt;
use crate::io::oracle::{KeyOracle, ensure_valid_correct_key};

/// Scores candidates against a known correct key, producing the same wire
/// code the remote service sends.
///
/// Optionally sleeps per call to imitate service latency, which makes the
/// pause/stop controls observable in interactive runs.
#[derive(Debug, Clone)]
pub struct LocalOracle {
    correct_key: String,
    latency: Duration,
}

impl LocalOracle {
    /// Create an oracle for a known correct key.
    ///
    /// Fails immediately when the key is not alphanumeric or contains
    /// whitespace; that is a configuration error, not a search-time
    /// condition.
    pub fn new(correct_key: &str) -> Result<Self> {
        ensure_valid_correct_key(correct_key)
            .with_context(|| format!("invalid local correct key '{correct_key}'"))?;
        Ok(Self {
            correct_key: correct_key.to_string(),
            latency: Duration::ZERO,
        })
    }

    /// Sleep this long on every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Build the placement code for a candidate: per position, the left
    /// digit is `1` when the character matches the correct key at that
    /// index, the right digit is the character's occurrence count in the
    /// correct key.
    fn placement_code(&self, key: &str) -> String {
        let correct: Vec<char> = self.correct_key.chars().collect();
        let mut code = String::with_capacity(key.len() * 2);
        for (i, value) in key.chars().enumerate() {
            let count = correct.iter().filter(|&&c| c == value).count();
            if count > 0 {
                let placed = correct.get(i) == Some(&value);
                code.push(if placed { '1' } else { '0' });
                // The remote service saturates this digit at 1; report the
                // actual count, which decodes identically.
                code.push_str(&count.to_string());
            } else {
                code.push_str("00");
            }
        }
        code
    }
}

impl KeyOracle for LocalOracle {
    fn try_key(&self, key: &str) -> Result<KeyAttempt> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let code = self.placement_code(key);
        debug!(key, code = %code, "scored candidate locally");
        KeyAttempt::decode(key, &code, key == self.correct_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_correct_key() {
        assert!(LocalOracle::new("$3 2").is_err());
    }

    #[test]
    fn correct_key_reports_success() {
        let oracle = LocalOracle::new("zat").expect("oracle");
        let attempt = oracle.try_key("zat").expect("try");
        assert!(attempt.is_correct());
        assert!(attempt.parts().is_empty());
    }

    #[test]
    fn placement_code_reports_place_and_count() {
        let oracle = LocalOracle::new("zat").expect("oracle");
        let attempt = oracle.try_key("atz").expect("try");

        assert!(!attempt.is_correct());
        assert_eq!(attempt.raw_result(), "010101");
        assert_eq!(attempt.in_correct_key_count(), 3);
        assert_eq!(attempt.in_correct_place_count(), 0);
    }

    #[test]
    fn absent_chars_code_as_double_zero() {
        let oracle = LocalOracle::new("zat").expect("oracle");
        let attempt = oracle.try_key("zbc").expect("try");

        assert_eq!(attempt.raw_result(), "110000");
    }

    #[test]
    fn duplicate_chars_report_their_count() {
        let oracle = LocalOracle::new("tt").expect("oracle");
        let attempt = oracle.try_key("t").expect("try");

        assert_eq!(attempt.raw_result(), "12");
        assert!(attempt.parts()[0].in_correct_key);
        assert!(attempt.parts()[0].in_correct_place);
    }

    #[test]
    fn empty_target_matches_only_empty_key() {
        let oracle = LocalOracle::new("").expect("oracle");
        assert!(oracle.try_key("").expect("try").is_correct());
        assert!(!oracle.try_key("a").expect("try").is_correct());
    }
}

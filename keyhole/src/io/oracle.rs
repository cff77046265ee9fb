//! Oracle abstraction for key validation.
//!
//! The [`KeyOracle`] trait decouples the search loop from the transport that
//! scores a candidate (remote HTTP service or local scoring). Tests use
//! scripted oracles that return predetermined feedback. The trait is
//! object-safe so the CLI can pick a backend at runtime.

use anyhow::{Result, anyhow};

use crate::core::attempt::KeyAttempt;

/// A service that scores one candidate key against the unknown correct key.
pub trait KeyOracle {
    /// Submit one candidate key and return the decoded feedback.
    ///
    /// Synchronous; may block for transport latency. Transport faults
    /// propagate as errors and are never retried by the search loop.
    fn try_key(&self, key: &str) -> Result<KeyAttempt>;
}

/// Reject a correct key that the oracles cannot score.
///
/// The keyhole service accepts some non-alphanumeric correct keys, but they
/// are out of scope here: a correct key must be alphanumeric with no
/// whitespace.
pub(crate) fn ensure_valid_correct_key(key: &str) -> Result<()> {
    use std::sync::LazyLock;
    static KEY_RE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new("^[a-zA-Z0-9]*$").unwrap());

    if !KEY_RE.is_match(key) {
        return Err(anyhow!(
            "the correct key must be alphanumeric with no whitespace"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphanumeric_keys_pass() {
        ensure_valid_correct_key("").expect("empty");
        ensure_valid_correct_key("zat").expect("lowercase");
        ensure_valid_correct_key("tesTkEy42").expect("mixed");
    }

    #[test]
    fn whitespace_and_symbols_are_rejected() {
        assert!(ensure_valid_correct_key("$3 2").is_err());
        assert!(ensure_valid_correct_key("a b").is_err());
        assert!(ensure_valid_correct_key("key!").is_err());
    }
}

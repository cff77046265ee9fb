//! HTTP client for the remote keyhole service.

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::attempt::KeyAttempt;
use crate::io::oracle::{KeyOracle, ensure_valid_correct_key};

/// The literal phrase the service sends for a correct key.
const SUCCESS_MARKER: &str = "Congratulations. You got in!";
/// Prefix in front of the placement code for an incorrect key.
const DENIED_PREFIX: &str = "KEY DENIED: ";

/// Scores candidates by calling the remote keyhole service.
///
/// Each submission is a GET with the candidate in a `key` query parameter
/// and, when configured, a `keyhole` parameter overriding the service's
/// correct key. Connectivity faults propagate to the caller; the search loop
/// never retries them.
#[derive(Debug)]
pub struct RemoteOracle {
    url: String,
    key_override: Option<String>,
    agent: ureq::Agent,
}

impl RemoteOracle {
    /// Create an oracle for a service endpoint.
    ///
    /// The override, when given, must satisfy the same alphanumeric
    /// constraint as a local correct key.
    pub fn new(url: &str, key_override: Option<&str>) -> Result<Self> {
        if let Some(key) = key_override {
            ensure_valid_correct_key(key)
                .with_context(|| format!("invalid correct key override '{key}'"))?;
        }
        Ok(Self {
            url: url.to_string(),
            key_override: key_override.map(str::to_string),
            agent: ureq::agent(),
        })
    }
}

impl KeyOracle for RemoteOracle {
    #[instrument(skip_all, fields(url = %self.url))]
    fn try_key(&self, key: &str) -> Result<KeyAttempt> {
        let mut request = self.agent.get(&self.url).query("key", key);
        if let Some(correct_key) = &self.key_override {
            request = request.query("keyhole", correct_key);
        }
        let response = request
            .call()
            .with_context(|| format!("query keyhole service at {}", self.url))?;
        let body = response
            .into_string()
            .with_context(|| format!("read keyhole service response from {}", self.url))?;
        debug!(key, bytes = body.len(), "received service response");
        parse_response(key, &body)
    }
}

/// Decode a raw service response body.
///
/// A body containing the success phrase means the key was correct. Anything
/// else is markup-wrapped: tags are stripped and the denied prefix removed,
/// leaving the two-digits-per-character placement code.
fn parse_response(key: &str, raw_response: &str) -> Result<KeyAttempt> {
    use std::sync::LazyLock;
    static MARKUP_RE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new("<[^>]*>").unwrap());

    if raw_response.contains(SUCCESS_MARKER) {
        return KeyAttempt::decode(key, SUCCESS_MARKER, true);
    }
    let stripped = MARKUP_RE.replace_all(raw_response, "");
    let code = stripped.replace(DENIED_PREFIX, "");
    KeyAttempt::decode(key, code.trim(), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_phrase_anywhere_means_correct() {
        let body = "<html><body>Congratulations. You got in!</body></html>";
        let attempt = parse_response("zat", body).expect("parse");

        assert!(attempt.is_correct());
        assert_eq!(attempt.key_used(), "zat");
        assert!(attempt.parts().is_empty());
    }

    #[test]
    fn denied_response_is_stripped_to_the_code() {
        let body = "<html><pre>KEY DENIED: 010101</pre></html>";
        let attempt = parse_response("atz", body).expect("parse");

        assert!(!attempt.is_correct());
        assert_eq!(attempt.raw_result(), "010101");
        assert_eq!(attempt.in_correct_key_count(), 3);
    }

    #[test]
    fn bare_code_without_markup_still_decodes() {
        let attempt = parse_response("ab", "KEY DENIED: 0011").expect("parse");
        assert_eq!(attempt.raw_result(), "0011");
    }

    #[test]
    fn garbage_body_is_a_decode_fault() {
        assert!(parse_response("ab", "<html>server error</html>").is_err());
    }

    #[test]
    fn override_must_be_alphanumeric() {
        assert!(RemoteOracle::new("http://localhost:1", Some("$3 2")).is_err());
        assert!(RemoteOracle::new("http://localhost:1", Some("zat")).is_ok());
    }
}

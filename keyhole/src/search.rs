//! The key search loop.
//!
//! Submits candidates to a [`KeyOracle`] and refines them from placement
//! feedback until the key is found, a configured limit is hit, a stop is
//! requested, or the feedback collapses to a shape the rotation cannot
//! resolve. Expected terminations are data ([`SearchOutcome`]); only oracle
//! faults surface as errors, and those propagate unretried.

use anyhow::Result;
use tracing::{debug, info};

use crate::control::SearchControl;
use crate::core::attempt::KeyAttempt;
use crate::core::rotation::next_candidate;
use crate::io::oracle::KeyOracle;

/// Every character a correct key can be built from, in canonical submission
/// order. Submitted whole as the discovery candidate to learn which
/// characters the correct key contains.
pub const KEY_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Termination message when the configured submission limit runs out.
pub const LIMIT_REACHED_MESSAGE: &str = "Key search stopped; search limit reached.";
/// Termination message when the controller requested a stop.
pub const STOPPED_MESSAGE: &str = "Key search stopped by user.";
/// Termination message when the feedback shows a correct key the rotation
/// cannot resolve.
pub const UNRESOLVABLE_DUPLICATE_MESSAGE: &str = "The correct key appears to use the same \
    character more than once; this solver cannot work out which position each copy belongs to.";

/// Terminal outcome of a key search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Whether the correct key was found.
    pub found: bool,
    /// The last candidate submitted.
    pub final_key: String,
    /// Why the search ended. Empty on success.
    pub message: String,
    /// Number of keys submitted to the oracle.
    pub attempts_made: u32,
}

impl SearchOutcome {
    fn found(final_key: String, attempts_made: u32) -> Self {
        Self {
            found: true,
            final_key,
            message: String::new(),
            attempts_made,
        }
    }

    fn not_found(final_key: String, message: &str, attempts_made: u32) -> Self {
        Self {
            found: false,
            final_key,
            message: message.to_string(),
            attempts_made,
        }
    }
}

/// Search for the correct key until it is found, the submission limit is
/// exhausted, the controller stops the search, or the feedback shows an
/// unresolvable key.
///
/// The first submission is the full [`KEY_ALPHABET`]; the characters it
/// reports as present, kept in alphabet order, form the first real candidate
/// and fix the key length. Each later round rotates the misplaced characters
/// one slot to the right (see [`crate::core::rotation`]). Keys whose correct
/// value repeats a character are out of scope: the service's membership hint
/// saturates instead of reporting remaining multiplicity, so the search
/// reports a diagnostic rather than guessing.
///
/// `on_status` is notified with the candidate and the raw result of every
/// submission; pass `|_| {}` for silent operation. Pause and stop requests on
/// `control` are observed between submissions, never mid-flight.
pub fn run_search<O, F>(
    oracle: &O,
    control: &SearchControl,
    search_limit: Option<u32>,
    mut on_status: F,
) -> Result<SearchOutcome>
where
    O: KeyOracle + ?Sized,
    F: FnMut(&str),
{
    let discovery = submit(oracle, KEY_ALPHABET, &mut on_status)?;
    let mut attempts_made = 1u32;
    if discovery.is_correct() {
        return Ok(SearchOutcome::found(KEY_ALPHABET.to_string(), attempts_made));
    }

    let mut candidate: String = discovery
        .parts_in_correct_key()
        .iter()
        .map(|part| part.value)
        .collect();
    info!(length = candidate.chars().count(), "discovered key length");

    loop {
        if let Some(limit) = search_limit {
            if attempts_made >= limit {
                return Ok(SearchOutcome::not_found(
                    candidate,
                    LIMIT_REACHED_MESSAGE,
                    attempts_made,
                ));
            }
        }
        control.wait_if_paused();
        if control.is_stop_requested() {
            return Ok(SearchOutcome::not_found(
                candidate,
                STOPPED_MESSAGE,
                attempts_made,
            ));
        }

        let attempt = submit(oracle, &candidate, &mut on_status)?;
        attempts_made += 1;
        if attempt.is_correct() {
            info!(attempts_made, "correct key found");
            return Ok(SearchOutcome::found(candidate, attempts_made));
        }

        candidate = match next_candidate(attempt.parts()) {
            Some(next) => next,
            None => {
                return Ok(SearchOutcome::not_found(
                    candidate,
                    UNRESOLVABLE_DUPLICATE_MESSAGE,
                    attempts_made,
                ));
            }
        };
        debug!(attempts_made, candidate = %candidate, "rotated next candidate");
    }
}

fn submit<O, F>(oracle: &O, key: &str, on_status: &mut F) -> Result<KeyAttempt>
where
    O: KeyOracle + ?Sized,
    F: FnMut(&str),
{
    on_status(&format!("Trying key '{key}'"));
    let attempt = oracle.try_key(key)?;
    let shown = if attempt.is_correct() {
        "Success"
    } else {
        attempt.raw_result()
    };
    on_status(&format!("Result: '{shown}'"));
    Ok(attempt)
}

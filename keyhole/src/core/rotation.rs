//! Candidate derivation from decoded placement feedback.
//!
//! Each refinement round keeps every correctly-placed character where it is
//! and rotates the misplaced characters one slot to the right, so no
//! candidate repeats while every misplaced character circulates through the
//! remaining open positions. The rotation cannot make progress once fewer
//! than two characters are misplaced, which is exactly what feedback for a
//! correct key with repeated characters collapses to.

use crate::core::attempt::AttemptPart;

/// Extract, in position order, the characters the service reported out of
/// place.
pub fn misplaced_chars(parts: &[AttemptPart]) -> Vec<char> {
    parts
        .iter()
        .filter(|part| !part.in_correct_place)
        .map(|part| part.value)
        .collect()
}

/// Rotate right by one position: the last element moves to the front.
pub fn rotate_right_once(chars: &mut Vec<char>) {
    if let Some(last) = chars.pop() {
        chars.insert(0, last);
    }
}

/// Derive the next candidate from the previous round's feedback.
///
/// Writes the rotated misplaced characters back into the misplaced positions
/// left-to-right and leaves correctly-placed positions untouched. Returns
/// `None` when fewer than two characters are misplaced; the rotation is a
/// no-op there and the search cannot converge.
pub fn next_candidate(parts: &[AttemptPart]) -> Option<String> {
    let mut rotated = misplaced_chars(parts);
    if rotated.len() < 2 {
        return None;
    }
    rotate_right_once(&mut rotated);

    let mut next: Vec<char> = parts.iter().map(|part| part.value).collect();
    let mut replacements = rotated.into_iter();
    for (slot, part) in next.iter_mut().zip(parts) {
        if !part.in_correct_place {
            if let Some(replacement) = replacements.next() {
                *slot = replacement;
            }
        }
    }
    Some(next.into_iter().collect())
}

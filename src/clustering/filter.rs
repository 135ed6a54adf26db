//! Acceptance filtering of a capture batch.

use crate::models::Capture;

/// The sub-sequence of captures the user kept, in original order.
///
/// An empty result is valid; the assembler decides what that means for
/// the submission.
pub fn accepted_captures(captures: Vec<Capture>) -> Vec<Capture> {
    captures.into_iter().filter(|c| c.accepted).collect()
}

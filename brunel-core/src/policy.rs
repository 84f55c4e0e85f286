//! Termination policy for polling sessions
//!
//! A session must deliver at least one snapshot even when the job is already
//! finished, so the first emission always continues; after that the session
//! runs only while the job state is still live. Reaching a terminal state is
//! the natural end of a session, not an error.

use crate::domain::progress::JobProgress;

/// Decides whether the polling session should keep going after emitting
/// `progress`.
pub fn should_continue(progress: &JobProgress, first_emission: bool) -> bool {
    first_emission || !progress.state.is_terminal()
}

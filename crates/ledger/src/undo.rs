//! Undo lifecycle.

/// Lifecycle of one undo attempt.
///
/// Only the single most recent logged movement per actor is reversible; there
/// is no multi-step undo stack. A second undo (with no intervening movement)
/// starts a fresh lifecycle against the next-most-recent remaining entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UndoState {
    Idle,
    Requested,
    Reversing,
    Done,
    Failed,
}

impl UndoState {
    /// Whether `next` is a legal transition from this state.
    pub fn can_transition(self, next: UndoState) -> bool {
        use UndoState::*;
        matches!(
            (self, next),
            (Idle, Requested)
                | (Requested, Reversing)
                | (Requested, Failed)
                | (Reversing, Done)
                | (Reversing, Failed)
                | (Done, Idle)
                | (Failed, Idle)
        )
    }

    /// Advance to `next`, or stay put if the transition is illegal.
    pub fn advance(self, next: UndoState) -> Result<UndoState, UndoState> {
        if self.can_transition(next) {
            Ok(next)
        } else {
            Err(self)
        }
    }
}

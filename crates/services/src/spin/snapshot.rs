use draw_core::model::{Draw, EligibilitySet, SpinPhase, Student, Term};

/// Read-only view of the controller, published after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpinSnapshot {
    pub phase: SpinPhase,
    pub draw: Draw,
    pub revealed: bool,
    pub eligible: EligibilitySet,
    pub can_spin: bool,
    /// Bumped on every start and reset; lets views tell two spins apart
    /// even when they land on the same wedges.
    pub spin_id: u64,
    pub term: Option<Term>,
    pub student: Option<Student>,
}

impl SpinSnapshot {
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.phase.is_spinning()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Whether the definition dialog should be shown.
    #[must_use]
    pub fn shows_definition(&self) -> bool {
        self.revealed && self.term.is_some()
    }
}

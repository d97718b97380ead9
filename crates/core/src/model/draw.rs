/// Lifecycle of a single spin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
    Finished,
}

impl SpinPhase {
    #[must_use]
    pub fn is_spinning(self) -> bool {
        matches!(self, SpinPhase::Spinning)
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, SpinPhase::Finished)
    }
}

/// Indices picked for the current spin.
///
/// Both indices point into the full term and student lists, not into the
/// eligible subset, so the student wheel can keep rendering absent students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Draw {
    pub term_index: Option<usize>,
    pub student_index: Option<usize>,
}

impl Draw {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(term_index: usize, student_index: usize) -> Self {
        Self {
            term_index: Some(term_index),
            student_index: Some(student_index),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term_index.is_none() && self.student_index.is_none()
    }
}

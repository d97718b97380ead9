use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use draw_core::model::{
    Draw, EligibilitySet, SpinPhase, SpinSettings, Student, StudentId, Term, resolve_eligibility,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;

use crate::eligibility_service::EligibilityService;
use crate::error::EligibilityError;
use crate::roster_service::Roster;
use crate::scheduler::{TimerCallback, TimerHandle, TimerScheduler};
use crate::spin::SpinSnapshot;

struct SpinState {
    terms: Vec<Term>,
    students: Vec<Student>,
    eligible: EligibilitySet,
    draw: Draw,
    phase: SpinPhase,
    revealed: bool,
    generation: u64,
    pending: Option<TimerHandle>,
}

impl SpinState {
    fn eligible_indices(&self) -> Vec<usize> {
        self.students
            .iter()
            .enumerate()
            .filter(|(_, student)| self.eligible.contains(&student.id))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn can_spin(&self) -> bool {
        !self.terms.is_empty()
            && !self.phase.is_spinning()
            && self
                .students
                .iter()
                .any(|student| self.eligible.contains(&student.id))
    }

    fn selected_term(&self) -> Option<&Term> {
        self.draw.term_index.and_then(|idx| self.terms.get(idx))
    }

    fn selected_student(&self) -> Option<&Student> {
        self.draw.student_index.and_then(|idx| self.students.get(idx))
    }

    /// Invalidate any in-flight completion and hand back its timer.
    fn supersede(&mut self) -> Option<TimerHandle> {
        self.generation += 1;
        self.pending.take()
    }

    fn clear_draw(&mut self) {
        self.phase = SpinPhase::Idle;
        self.revealed = false;
        self.draw = Draw::empty();
    }

    fn snapshot(&self) -> SpinSnapshot {
        SpinSnapshot {
            phase: self.phase,
            draw: self.draw,
            revealed: self.revealed,
            eligible: self.eligible.clone(),
            can_spin: self.can_spin(),
            spin_id: self.generation,
            term: self.selected_term().cloned(),
            student: self.selected_student().cloned(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives the spin lifecycle: idle, spinning, finished, and the optional
/// definition reveal.
///
/// At most one completion timer is outstanding. Starting, resetting, shutting
/// down and dropping the controller all cancel it, and every completion
/// carries the generation it was scheduled for so a superseded timer that
/// already started running cannot apply a stale transition.
pub struct SpinController {
    state: Arc<Mutex<SpinState>>,
    scheduler: Arc<dyn TimerScheduler>,
    settings: SpinSettings,
    rng: Mutex<StdRng>,
    updates: Arc<watch::Sender<SpinSnapshot>>,
    persistence: Option<Arc<EligibilityService>>,
}

impl SpinController {
    #[must_use]
    pub fn new(
        roster: Roster,
        eligible: EligibilitySet,
        scheduler: Arc<dyn TimerScheduler>,
        settings: SpinSettings,
    ) -> Self {
        let state = SpinState {
            terms: roster.terms,
            students: roster.students,
            eligible,
            draw: Draw::empty(),
            phase: SpinPhase::Idle,
            revealed: false,
            generation: 0,
            pending: None,
        };
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            state: Arc::new(Mutex::new(state)),
            scheduler,
            settings,
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
            updates: Arc::new(updates),
            persistence: None,
        }
    }

    /// Build a controller whose eligible set comes from `persistence`, which
    /// also receives every later change through [`persist_eligibility`].
    ///
    /// [`persist_eligibility`]: SpinController::persist_eligibility
    pub async fn load(
        roster: Roster,
        persistence: Arc<EligibilityService>,
        scheduler: Arc<dyn TimerScheduler>,
        settings: SpinSettings,
    ) -> Self {
        let eligible = persistence.load(&roster.students).await;
        let mut controller = Self::new(roster, eligible, scheduler, settings);
        controller.persistence = Some(persistence);
        controller
    }

    /// Reproducible draws, for tests.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        *lock(&self.rng) = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn settings(&self) -> SpinSettings {
        self.settings
    }

    #[must_use]
    pub fn snapshot(&self) -> SpinSnapshot {
        lock(&self.state).snapshot()
    }

    /// Receiver that observes every published snapshot, including the
    /// transition to `Finished` fired by the timer.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SpinSnapshot> {
        self.updates.subscribe()
    }

    #[must_use]
    pub fn phase(&self) -> SpinPhase {
        lock(&self.state).phase
    }

    #[must_use]
    pub fn draw(&self) -> Draw {
        lock(&self.state).draw
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        lock(&self.state).revealed
    }

    #[must_use]
    pub fn can_spin(&self) -> bool {
        lock(&self.state).can_spin()
    }

    #[must_use]
    pub fn terms(&self) -> Vec<Term> {
        lock(&self.state).terms.clone()
    }

    #[must_use]
    pub fn students(&self) -> Vec<Student> {
        lock(&self.state).students.clone()
    }

    #[must_use]
    pub fn eligible(&self) -> EligibilitySet {
        lock(&self.state).eligible.clone()
    }

    /// Indices into the full student list of everyone currently eligible.
    #[must_use]
    pub fn eligible_indices(&self) -> Vec<usize> {
        lock(&self.state).eligible_indices()
    }

    /// Indices of absent students, drawn greyed out on the wheel.
    #[must_use]
    pub fn disabled_indices(&self) -> Vec<usize> {
        let state = lock(&self.state);
        state
            .students
            .iter()
            .enumerate()
            .filter(|(_, student)| !state.eligible.contains(&student.id))
            .map(|(idx, _)| idx)
            .collect()
    }

    #[must_use]
    pub fn selected_term(&self) -> Option<Term> {
        lock(&self.state).selected_term().cloned()
    }

    #[must_use]
    pub fn selected_student(&self) -> Option<Student> {
        lock(&self.state).selected_student().cloned()
    }

    /// Draw a term and an eligible student and start the spin.
    ///
    /// Returns `false` without touching any state when there is nothing to
    /// draw or a spin is already running.
    pub fn start_spin(&self) -> bool {
        let (generation, previous, draw) = {
            let mut state = lock(&self.state);
            if !state.can_spin() {
                tracing::debug!(phase = ?state.phase, "spin request ignored");
                return false;
            }
            let eligible = state.eligible_indices();
            let (term_index, student_index) = {
                let mut rng = lock(&self.rng);
                let term_index = rng.random_range(0..state.terms.len());
                let pick = rng.random_range(0..eligible.len());
                (term_index, eligible[pick])
            };

            state.draw = Draw::new(term_index, student_index);
            state.phase = SpinPhase::Spinning;
            state.revealed = false;
            let previous = state.supersede();
            (state.generation, previous, state.draw)
        };

        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
        let handle = self
            .scheduler
            .schedule(self.settings.completion_delay(), self.completion(generation));
        {
            let mut state = lock(&self.state);
            if state.generation == generation && state.phase.is_spinning() {
                state.pending = Some(handle);
            }
        }

        tracing::debug!(
            term_index = ?draw.term_index,
            student_index = ?draw.student_index,
            spin_id = generation,
            "spin started"
        );
        self.publish();
        true
    }

    fn completion(&self, generation: u64) -> TimerCallback {
        let state = Arc::clone(&self.state);
        let updates = Arc::clone(&self.updates);
        Box::new(move || {
            let snapshot = {
                let mut state = lock(&state);
                if state.generation != generation || !state.phase.is_spinning() {
                    return;
                }
                state.phase = SpinPhase::Finished;
                state.pending = None;
                state.snapshot()
            };
            tracing::debug!(spin_id = generation, "spin finished");
            updates.send_replace(snapshot);
        })
    }

    /// Back to idle with no draw. Allowed in any phase.
    pub fn reset_spin(&self) {
        let previous = {
            let mut state = lock(&self.state);
            state.clear_draw();
            state.supersede()
        };
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
        self.publish();
    }

    /// Flip whether a student is present. Ids not on the roster are ignored.
    ///
    /// Returns whether the student is eligible afterwards.
    pub fn toggle_eligibility(&self, id: &StudentId) -> bool {
        let present = {
            let mut state = lock(&self.state);
            if !state.students.iter().any(|student| &student.id == id) {
                return false;
            }
            state.eligible.toggle(id)
        };
        self.publish();
        present
    }

    /// Mark every student present (`true`) or absent (`false`).
    pub fn set_all_eligible(&self, on: bool) {
        {
            let mut state = lock(&self.state);
            state.eligible = if on {
                EligibilitySet::all(&state.students)
            } else {
                EligibilitySet::empty()
            };
        }
        self.publish();
    }

    /// Open the definition. Ignored unless a finished spin drew a term.
    pub fn reveal(&self) {
        {
            let mut state = lock(&self.state);
            if !state.phase.is_finished() || state.selected_term().is_none() {
                return;
            }
            state.revealed = true;
        }
        self.publish();
    }

    pub fn close_reveal(&self) {
        lock(&self.state).revealed = false;
        self.publish();
    }

    /// Swap in a freshly loaded roster.
    ///
    /// The current eligible set is pruned against the new students (falling
    /// back to everyone), and any draw is cleared since its indices may no
    /// longer be valid.
    pub fn replace_roster(&self, roster: Roster) {
        let previous = {
            let mut state = lock(&self.state);
            let current = state.eligible.to_vec();
            state.eligible = resolve_eligibility(Some(&current), &roster.students);
            state.terms = roster.terms;
            state.students = roster.students;
            state.clear_draw();
            state.supersede()
        };
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
        self.publish();
    }

    /// Save the current eligible set through the persistence port, if any.
    ///
    /// The set is read only once earlier saves have finished, so overlapping
    /// calls leave storage matching memory.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError` if the set cannot be stored.
    pub async fn persist_eligibility(&self) -> Result<(), EligibilityError> {
        let Some(persistence) = self.persistence.as_ref() else {
            return Ok(());
        };
        persistence.save_latest(|| self.eligible()).await
    }

    /// Cancel the outstanding completion timer, leaving the phase as is.
    pub fn shutdown(&self) {
        let previous = lock(&self.state).supersede();
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.updates.send_replace(snapshot);
    }
}

impl Drop for SpinController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for SpinController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("SpinController")
            .field("phase", &state.phase)
            .field("draw", &state.draw)
            .field("revealed", &state.revealed)
            .field("eligible", &state.eligible.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

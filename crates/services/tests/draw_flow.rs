use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use draw_core::model::{SpinPhase, SpinSettings, Student, StudentId, Term};
use services::{AppServices, ManualScheduler};
use storage::repository::{
    ELIGIBILITY_KEY, InMemoryRepository, KeyValueRepository, Storage, StorageError,
};

fn repo() -> InMemoryRepository {
    InMemoryRepository::with_roster(
        vec![Term::new("A", "defA")],
        vec![Student::new("1", "X"), Student::new("2", "Y")],
    )
}

#[tokio::test]
async fn persisted_subset_drives_the_draw() {
    let repo = repo();
    repo.put_value(ELIGIBILITY_KEY, r#"["2"]"#).await.unwrap();
    let scheduler = Arc::new(ManualScheduler::new());
    let services = AppServices::from_storage(
        &Storage::from_in_memory(repo),
        scheduler.clone(),
        SpinSettings::default(),
    )
    .await;
    let controller = services.controller();

    assert!(controller.start_spin());
    assert_eq!(controller.draw().term_index, Some(0));
    assert_eq!(controller.draw().student_index, Some(1));

    scheduler.advance(SpinSettings::default().completion_delay());
    assert_eq!(controller.phase(), SpinPhase::Finished);

    controller.reveal();
    let snapshot = controller.snapshot();
    assert!(snapshot.shows_definition());
    assert_eq!(snapshot.term.unwrap().definition, "defA");
}

#[tokio::test]
async fn eligibility_changes_are_persisted() {
    let repo = repo();
    let scheduler = Arc::new(ManualScheduler::new());
    let services = AppServices::from_storage(
        &Storage::from_in_memory(repo.clone()),
        scheduler,
        SpinSettings::default(),
    )
    .await;
    let controller = services.controller();

    assert_eq!(controller.eligible().len(), 2);
    controller.toggle_eligibility(&StudentId::new("1"));
    controller.persist_eligibility().await.expect("persist");

    let stored = repo.get_value(ELIGIBILITY_KEY).await.unwrap();
    assert_eq!(stored.as_deref(), Some(r#"["2"]"#));
}

#[tokio::test]
async fn stale_persisted_ids_fall_back_to_everyone() {
    let repo = repo();
    repo.put_value(ELIGIBILITY_KEY, r#"["9"]"#).await.unwrap();
    let services = AppServices::from_storage(
        &Storage::from_in_memory(repo),
        Arc::new(ManualScheduler::new()),
        SpinSettings::default(),
    )
    .await;

    let eligible = services.controller().eligible().to_vec();
    assert_eq!(eligible, vec![StudentId::new("1"), StudentId::new("2")]);
}

#[tokio::test]
async fn missing_roster_cannot_spin() {
    let scheduler = Arc::new(ManualScheduler::new());
    let services = AppServices::from_storage(
        &Storage::in_memory(),
        scheduler.clone(),
        SpinSettings::default(),
    )
    .await;
    let controller = services.controller();

    assert!(!controller.can_spin());
    assert!(!controller.start_spin());
    assert_eq!(controller.phase(), SpinPhase::Idle);
    assert_eq!(scheduler.pending(), 0);
}

#[tokio::test]
async fn reload_picks_up_new_students() {
    let repo = repo();
    let services = AppServices::from_storage(
        &Storage::from_in_memory(repo.clone()),
        Arc::new(ManualScheduler::new()),
        SpinSettings::default(),
    )
    .await;

    repo.set_students(vec![Student::new("2", "Y"), Student::new("3", "Z")])
        .unwrap();
    services.reload_roster().await;

    let controller = services.controller();
    assert_eq!(controller.students().len(), 2);
    assert_eq!(controller.eligible().to_vec(), vec![StudentId::new("2")]);
}

#[tokio::test(start_paused = true)]
async fn tokio_timer_finishes_spin() {
    use services::{Roster, SpinController, TokioScheduler};

    let scheduler = Arc::new(TokioScheduler::try_current().expect("runtime"));
    let roster = Roster::new(vec![Term::new("A", "defA")], vec![Student::new("1", "X")]);
    let eligible = std::iter::once(StudentId::new("1")).collect();
    let controller = SpinController::new(roster, eligible, scheduler, SpinSettings::default());
    let mut updates = controller.subscribe();

    assert!(controller.start_spin());
    updates
        .wait_for(|snapshot| snapshot.is_finished())
        .await
        .expect("finished");
    assert_eq!(controller.phase(), SpinPhase::Finished);
}

/// Value store whose first write is much slower than the ones after it.
struct SlowFirstWrite {
    inner: InMemoryRepository,
    writes: AtomicUsize,
}

#[async_trait]
impl KeyValueRepository for SlowFirstWrite {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_value(key).await
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let delay = if self.writes.fetch_add(1, Ordering::SeqCst) == 0 {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(5)
        };
        tokio::time::sleep(delay).await;
        self.inner.put_value(key, value).await
    }
}

#[tokio::test(start_paused = true)]
async fn overlapping_saves_leave_the_latest_set_stored() {
    let values = Arc::new(SlowFirstWrite {
        inner: InMemoryRepository::new(),
        writes: AtomicUsize::new(0),
    });
    let roster_repo = repo();
    let storage = Storage {
        values: values.clone(),
        roster: Arc::new(roster_repo),
    };
    let services = AppServices::from_storage(
        &storage,
        Arc::new(ManualScheduler::new()),
        SpinSettings::default(),
    )
    .await;
    let controller = services.controller();

    controller.toggle_eligibility(&StudentId::new("1"));
    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.persist_eligibility().await })
    };
    // Let the first save pick up its set and start its slow write.
    tokio::task::yield_now().await;

    controller.toggle_eligibility(&StudentId::new("2"));
    controller.toggle_eligibility(&StudentId::new("1"));
    let second = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.persist_eligibility().await })
    };

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert_eq!(controller.eligible().to_vec(), vec![StudentId::new("1")]);
    assert_eq!(
        values.inner.get_value(ELIGIBILITY_KEY).await.unwrap().as_deref(),
        Some(r#"["1"]"#)
    );
}

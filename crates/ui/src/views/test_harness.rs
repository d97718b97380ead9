use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use draw_core::model::{EligibilitySet, SpinSettings, Student, StudentId, Term};
use services::{ManualScheduler, Roster, SpinController};

use crate::context::{UiApp, build_app_context};
use crate::views::DrawView;

struct TestApp {
    controller: Arc<SpinController>,
}

impl UiApp for TestApp {
    fn spin_controller(&self) -> Arc<SpinController> {
        Arc::clone(&self.controller)
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn DrawHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { DrawView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub controller: Arc<SpinController>,
    pub scheduler: Arc<ManualScheduler>,
    app: Arc<TestApp>,
}

impl ViewHarness {
    /// Mounts a fresh tree over the same controller, picking up its current state.
    pub fn remount(&mut self) {
        self.dom = mount(Arc::clone(&self.app));
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

fn mount(app: Arc<TestApp>) -> VirtualDom {
    let mut dom = VirtualDom::new_with_props(DrawHarness, HarnessProps { app });
    dom.rebuild_in_place();
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom
}

pub fn sample_roster() -> Roster {
    Roster::new(
        vec![Term::new("Métaphore", "Figure de style par analogie")],
        vec![Student::new("1", "Alice"), Student::new("2", "Bruno")],
    )
}

pub fn setup_view_harness(roster: Roster, eligible: &[&str]) -> ViewHarness {
    let scheduler = Arc::new(ManualScheduler::new());
    let eligible: EligibilitySet = eligible.iter().map(|id| StudentId::new(*id)).collect();
    let controller = Arc::new(SpinController::new(
        roster,
        eligible,
        scheduler.clone(),
        SpinSettings::default(),
    ));
    let app = Arc::new(TestApp {
        controller: Arc::clone(&controller),
    });
    ViewHarness {
        dom: mount(Arc::clone(&app)),
        controller,
        scheduler,
        app,
    }
}

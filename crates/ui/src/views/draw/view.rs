use std::sync::Arc;

use dioxus::prelude::*;
use draw_core::model::StudentId;
use draw_core::wheel::ColorScheme;
use services::SpinController;

use super::components::{DefinitionModal, SelectionPanel, StudentList, Wheel};
use crate::context::AppContext;
use crate::vm::{map_selection, map_student_rows};

fn persist_eligibility(controller: Arc<SpinController>) {
    spawn(async move {
        if let Err(err) = controller.persist_eligibility().await {
            tracing::warn!(error = %err, "could not save eligible students");
        }
    });
}

#[component]
pub fn DrawView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = ctx.controller();
    let settings = controller.settings();

    let snapshot = use_signal(|| controller.snapshot());
    {
        let controller = Arc::clone(&controller);
        use_future(move || {
            let controller = Arc::clone(&controller);
            let mut snapshot = snapshot;
            async move {
                let mut updates = controller.subscribe();
                loop {
                    let next = updates.borrow_and_update().clone();
                    snapshot.set(next);
                    if updates.changed().await.is_err() {
                        break;
                    }
                }
            }
        });
    }

    let state = snapshot();
    let terms = controller.terms();
    let students = controller.students();
    let term_labels: Vec<String> = terms.iter().map(|t| t.term.clone()).collect();
    let student_labels: Vec<String> = students.iter().map(|s| s.name.clone()).collect();
    let disabled_indices = controller.disabled_indices();
    let rows = map_student_rows(&students, &state.eligible);
    let selection = map_selection(&state);
    let spinning = state.is_spinning();

    let on_spin = {
        let controller = Arc::clone(&controller);
        move |_: MouseEvent| {
            controller.start_spin();
        }
    };
    let on_reset = {
        let controller = Arc::clone(&controller);
        move |_: MouseEvent| controller.reset_spin()
    };
    let on_toggle = {
        let controller = Arc::clone(&controller);
        move |id: StudentId| {
            controller.toggle_eligibility(&id);
            persist_eligibility(Arc::clone(&controller));
        }
    };
    let on_select_all = {
        let controller = Arc::clone(&controller);
        move |on: bool| {
            controller.set_all_eligible(on);
            persist_eligibility(Arc::clone(&controller));
        }
    };
    let on_reveal = {
        let controller = Arc::clone(&controller);
        move |()| controller.reveal()
    };
    let on_close = {
        let controller = Arc::clone(&controller);
        move |()| controller.close_reveal()
    };

    rsx! {
        main { class: "layout",
            section { class: "wheels",
                div { class: "wheel-card",
                    h2 { "Terme" }
                    Wheel {
                        items: term_labels,
                        selected_index: state.draw.term_index,
                        spinning,
                        spin_id: state.spin_id,
                        duration_ms: settings.spin_duration_ms(),
                        base_turns: settings.base_turns(),
                        scheme: ColorScheme::Terms,
                    }
                }
                div { class: "wheel-card",
                    h2 { "Étudiant" }
                    Wheel {
                        items: student_labels,
                        selected_index: state.draw.student_index,
                        spinning,
                        spin_id: state.spin_id,
                        duration_ms: settings.spin_duration_ms(),
                        base_turns: settings.base_turns(),
                        disabled_indices,
                        scheme: ColorScheme::Students,
                    }
                }
            }

            section { class: "controls",
                if state.is_finished() {
                    SelectionPanel { selection, on_reveal }
                }
            }

            section { class: "students",
                StudentList {
                    rows,
                    locked: spinning,
                    on_toggle,
                    on_select_all,
                }
                div { class: "students-footer",
                    button {
                        class: "giant primary",
                        r#type: "button",
                        disabled: !state.can_spin,
                        onclick: on_spin,
                        "Lancer la roue"
                    }
                    button {
                        class: "giant",
                        r#type: "button",
                        disabled: spinning,
                        onclick: on_reset,
                        "Réinitialiser"
                    }
                }
            }
        }

        if state.is_finished() {
            div { class: "confetti", aria_hidden: "true" }
        }

        if let Some(term) = state.term.clone().filter(|_| state.revealed) {
            DefinitionModal {
                term: term.term,
                definition: term.definition,
                on_close,
            }
        }
    }
}

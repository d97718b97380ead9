use dioxus::prelude::*;
use draw_core::model::StudentId;

use crate::vm::{StudentRowVm, presence_label};

#[component]
pub fn StudentList(
    rows: Vec<StudentRowVm>,
    locked: bool,
    on_toggle: EventHandler<StudentId>,
    on_select_all: EventHandler<bool>,
) -> Element {
    let summary = presence_label(&rows);
    rsx! {
        div { class: "students-header",
            h2 { "Présence des étudiants" }
            span { class: "students-count", "{summary}" }
            div { class: "students-actions",
                button {
                    r#type: "button",
                    disabled: locked,
                    onclick: move |_| on_select_all.call(true),
                    "Tout cocher"
                }
                button {
                    r#type: "button",
                    disabled: locked,
                    onclick: move |_| on_select_all.call(false),
                    "Tout décocher"
                }
            }
        }
        ul { class: "student-list",
            for row in rows {
                li {
                    key: "{row.id}",
                    class: if row.present { "" } else { "disabled" },
                    label {
                        input {
                            r#type: "checkbox",
                            checked: row.present,
                            disabled: locked,
                            onchange: {
                                let id = row.id.clone();
                                move |_| on_toggle.call(id.clone())
                            },
                        }
                        span { "{row.name}" }
                    }
                }
            }
        }
    }
}

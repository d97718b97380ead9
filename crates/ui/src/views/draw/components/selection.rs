use dioxus::prelude::*;

use crate::vm::SelectionVm;

#[component]
pub fn SelectionPanel(selection: SelectionVm, on_reveal: EventHandler<()>) -> Element {
    rsx! {
        div { class: "current-selection",
            div {
                span { class: "label", "Terme tiré : " }
                strong { "{selection.term_label}" }
            }
            div {
                span { class: "label", "Étudiant tiré : " }
                strong { "{selection.student_label}" }
            }
            div { class: "result-actions",
                button {
                    class: "accent",
                    r#type: "button",
                    disabled: !selection.can_reveal,
                    onclick: move |_| on_reveal.call(()),
                    "Afficher la définition"
                }
            }
        }
    }
}

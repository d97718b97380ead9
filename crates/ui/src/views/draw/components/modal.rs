use dioxus::prelude::*;

#[component]
pub fn DefinitionModal(term: String, definition: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            role: "dialog",
            aria_modal: "true",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal-header",
                    h3 { "Définition" }
                    button {
                        class: "icon",
                        r#type: "button",
                        aria_label: "Fermer",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                div { class: "modal-body",
                    div { class: "term", "{term}" }
                    div { class: "def", "{definition}" }
                }
                div { class: "modal-footer",
                    button {
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Fermer"
                    }
                }
            }
        }
    }
}

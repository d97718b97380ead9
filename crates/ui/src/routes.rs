use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::DrawView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DrawView)] Draw {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Double Tirage au Sort" }
                p { class: "subtitle", "Un terme + un étudiant, une roue spectaculaire" }
            }
            Outlet::<Route> {}
        }
    }
}

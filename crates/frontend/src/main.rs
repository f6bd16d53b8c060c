mod api;
mod components;
mod config;
mod coords;
mod pages;
mod session;

use dioxus::prelude::*;
use smokes_shared::models::MapId;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/map/:id")]
    MapView { id: MapId },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::home::MapList {}
    }
}

#[component]
fn MapView(id: MapId) -> Element {
    // Keyed so navigating between maps starts from fresh page state.
    rsx! {
        pages::map_page::MapPage { key: "{id}", id }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    let _ = dioxus::logger::init(config::log_level());
    tracing::info!(api = config::api_base_url(), "starting smokes frontend");
    launch(App);
}

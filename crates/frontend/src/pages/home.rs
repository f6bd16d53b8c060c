use dioxus::prelude::*;
use smokes_shared::filter::filter_maps;
use smokes_shared::models::MapId;

use crate::api;
use crate::Route;

struct MapCard {
    id: MapId,
    title: String,
    description: String,
    thumbnail: Option<String>,
}

/// Map catalogue with a name search.
#[component]
pub fn MapList() -> Element {
    let mut maps_resource = use_resource(|| async {
        let result = api::fetch_maps().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "failed to load maps");
        }
        result
    });
    let mut search = use_signal(String::new);

    let state = maps_resource.read().clone();
    let needle = search.read().clone();

    let body = match state {
        None => rsx! {
            div { class: "page-status", "Loading maps..." }
        },
        Some(Err(e)) => {
            let msg = e.to_string();
            rsx! {
                div { class: "page-status error",
                    p { "Could not load maps: {msg}" }
                    button { class: "secondary", onclick: move |_| maps_resource.restart(), "Retry" }
                }
            }
        }
        Some(Ok(maps)) => {
            let cards: Vec<MapCard> = filter_maps(&maps, &needle)
                .into_iter()
                .map(|m| MapCard {
                    id: m.id,
                    title: m.title().to_string(),
                    description: m.description.clone().unwrap_or_default(),
                    thumbnail: m.thumbnail.clone(),
                })
                .collect();
            rsx! {
                if cards.is_empty() {
                    div { class: "page-status", "No maps match \"{needle}\"" }
                }
                div { class: "map-grid",
                    for card in cards {
                        Link {
                            key: "{card.id}",
                            class: "map-card",
                            to: Route::MapView { id: card.id },
                            if let Some(src) = card.thumbnail {
                                img { src: "{src}", alt: "{card.title}", loading: "lazy" }
                            }
                            h3 { "{card.title}" }
                            p { class: "muted", "{card.description}" }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "app home",
            div { class: "header",
                h1 { "Smoke Radar" }
                input {
                    class: "search",
                    r#type: "search",
                    placeholder: "Search maps...",
                    "aria-label": "Search maps",
                    value: "{needle}",
                    oninput: move |evt: Event<FormData>| search.set(evt.value()),
                }
            }
            {body}
        }
    }
}

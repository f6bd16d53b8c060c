use dioxus::prelude::*;
use smokes_shared::filter::{CategoryFilter, SmokeFilter};
use smokes_shared::models::{Category, Floor};

fn category_button_label(filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "All".to_string(),
        CategoryFilter::Only(c) => format!("{} {}", c.icon(), c.label()),
    }
}

#[component]
pub fn FilterPanel(filter: Signal<SmokeFilter>, show_floor: bool) -> Element {
    let current = filter.read().clone();
    let options: Vec<(CategoryFilter, String)> = std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
        .map(|f| (f, category_button_label(f)))
        .collect();
    let active_floor = current.floor.unwrap_or_default();
    let floors = [Floor::Upper, Floor::Lower].map(|f| (f, f.label()));

    rsx! {
        div { class: "panel filter-panel",
            input {
                class: "search",
                r#type: "search",
                placeholder: "Search smokes...",
                "aria-label": "Search smokes",
                value: "{current.search}",
                oninput: move |evt: Event<FormData>| {
                    filter.write().search = evt.value();
                },
            }

            if show_floor {
                div { class: "floor-toggle",
                    for (floor, label) in floors {
                        button {
                            key: "{label}",
                            class: if active_floor == floor { "active" } else { "" },
                            onclick: move |_| filter.write().floor = Some(floor),
                            "{label}"
                        }
                    }
                }
            }

            h3 { "Type" }
            div { class: "category-buttons",
                for (option, label) in options {
                    button {
                        class: if current.category == option { "active" } else { "" },
                        onclick: move |_| filter.write().category = option,
                        "{label}"
                    }
                }
            }
        }
    }
}

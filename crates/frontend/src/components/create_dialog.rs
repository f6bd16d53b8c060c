use dioxus::prelude::*;
use smokes_shared::models::{Category, Floor};
use smokes_shared::workflow::AnnotationFlow;

/// Point readout shown in the dialog, e.g. `X: 25.00%  Y: 50.00%`.
fn point_label(x: f64, y: f64) -> String {
    format!("X: {x:.2}%  Y: {y:.2}%")
}

/// Creation form bound to the page's annotation flow.
///
/// Only rendered while the flow is reviewing a picked point.
#[component]
pub fn CreateDialog(
    flow: Signal<AnnotationFlow>,
    map_has_floors: bool,
    on_submit: EventHandler<()>,
    on_repick: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let snapshot = flow.read().clone();
    let draft = snapshot.draft.clone();
    let point = snapshot
        .pending_point()
        .map(|p| point_label(p.x, p.y))
        .unwrap_or_else(|| "No point picked".to_string());
    let hint = snapshot.validation().err().map(|e| e.to_string());
    let error = snapshot.error().map(str::to_string);
    let submitting = snapshot.submitting();
    let can_submit = snapshot.can_submit();
    let floor = draft.floor.unwrap_or_default();
    let categories = Category::ALL.map(|c| (c.as_str(), format!("{} {}", c.icon(), c.label()), c == draft.category));
    let floors = [Floor::Upper, Floor::Lower].map(|f| (f, f.label()));

    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_cancel.call(()),

            div {
                class: "dialog create-dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "Add smoke" }

                div { class: "picked-point",
                    span { "{point}" }
                    button {
                        class: "link",
                        disabled: submitting,
                        onclick: move |_| on_repick.call(()),
                        "Pick again"
                    }
                }

                label { "Title"
                    input {
                        value: "{draft.title}",
                        placeholder: "Xbox smoke from T spawn",
                        oninput: move |evt: Event<FormData>| flow.write().draft.title = evt.value(),
                    }
                }

                label { "Video URL"
                    input {
                        r#type: "url",
                        value: "{draft.video_url}",
                        placeholder: "https://youtu.be/...",
                        oninput: move |evt: Event<FormData>| flow.write().draft.video_url = evt.value(),
                    }
                }

                label { "Timestamp (seconds)"
                    input {
                        r#type: "number",
                        min: "1",
                        step: "1",
                        value: "{draft.timestamp}",
                        oninput: move |evt: Event<FormData>| flow.write().draft.timestamp = evt.value(),
                    }
                }

                label { "Type"
                    select {
                        onchange: move |evt: Event<FormData>| {
                            if let Some(c) = Category::parse(&evt.value()) {
                                flow.write().draft.category = c;
                            }
                        },
                        for (value, label, selected) in categories {
                            option { value: "{value}", selected: selected, "{label}" }
                        }
                    }
                }

                if map_has_floors {
                    div { class: "floor-toggle",
                        for (f, label) in floors {
                            button {
                                key: "{label}",
                                class: if floor == f { "active" } else { "" },
                                onclick: move |_| flow.write().draft.floor = Some(f),
                                "{label}"
                            }
                        }
                    }
                }

                if let Some(msg) = error {
                    p { class: "form-error", "{msg}" }
                } else if let Some(msg) = hint {
                    p { class: "form-hint", "{msg}" }
                }

                div { class: "dialog-actions",
                    button {
                        class: "secondary",
                        disabled: submitting,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "primary",
                        disabled: !can_submit,
                        onclick: move |_| on_submit.call(()),
                        if submitting { "Saving..." } else { "Save smoke" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_label_two_decimals() {
        assert_eq!(point_label(25.0, 50.0), "X: 25.00%  Y: 50.00%");
        assert_eq!(point_label(3.14159, 99.999), "X: 3.14%  Y: 100.00%");
    }
}

use std::collections::HashSet;

use dioxus::prelude::*;
use smokes_shared::error::ServiceError;
use smokes_shared::filter::{filter_smokes_owned, has_floor_distinction, SmokeFilter};
use smokes_shared::highlight;
use smokes_shared::models::{GameMap, MapId, Smoke, SmokeId};
use smokes_shared::votes::VoteBook;
use smokes_shared::workflow::{AnnotationFlow, SmokeService};

use crate::api::{self, RestSmokeService};
use crate::components::create_dialog::CreateDialog;
use crate::components::filter_panel::FilterPanel;
use crate::components::map_viewer::MapViewer;
use crate::components::smoke_dialog::SmokeDialog;
use crate::components::smoke_list::SmokeList;
use crate::session::Session;
use crate::Route;

const LOGIN_TO_ADD: &str = "Log in to add smokes";

/// Floor filtering only applies on maps that have floors; elsewhere the
/// stored choice is ignored. On two-floor maps an unset choice means upper.
fn effective_filter(stored: &SmokeFilter, has_floors: bool) -> SmokeFilter {
    SmokeFilter {
        floor: has_floors.then(|| stored.floor.unwrap_or_default()),
        ..stored.clone()
    }
}

fn map_has_floors(map: &GameMap, smokes: &[Smoke]) -> bool {
    map.has_lower_floor() || has_floor_distinction(smokes)
}

/// One map: radar, smoke list, filters and the add-smoke workflow.
///
/// Owns every piece of page state; the viewer and list only report events.
#[component]
pub fn MapPage(id: MapId) -> Element {
    let session = use_hook(Session::load);
    let mut votes = use_signal(VoteBook::default);
    let filter = use_signal(SmokeFilter::default);
    let mut highlighted = use_signal(|| None::<SmokeId>);
    let mut flow = use_signal(AnnotationFlow::new);
    let mut selected = use_signal(|| None::<SmokeId>);
    let reported = use_signal(HashSet::<SmokeId>::new);
    let mut notice = use_signal(|| None::<String>);

    let mut map_resource = use_resource(move || async move {
        let result = api::fetch_map(id).await;
        if let Err(e) = &result {
            tracing::warn!(map = id, error = %e, "failed to load map");
        }
        result
    });

    let mut smokes_resource = use_resource(move || async move {
        let result = api::fetch_smokes(id).await;
        match &result {
            // Fetched scores already include this session's votes.
            Ok(smokes) => {
                tracing::debug!(map = id, count = smokes.len(), "smokes loaded");
                votes.write().clear_overrides();
            }
            Err(e) => tracing::warn!(map = id, error = %e, "failed to load smokes"),
        }
        result
    });

    let ratings_token = session.token.clone();
    use_future(move || {
        let token = ratings_token.clone();
        async move {
            if token.is_none() {
                return;
            }
            match api::fetch_user_ratings(token.as_deref()).await {
                Ok(ratings) => votes.set(VoteBook::from_ratings(&ratings)),
                Err(e) => tracing::warn!(error = %e, "failed to load user ratings"),
            }
        }
    });

    let map_state: Option<Result<GameMap, ServiceError>> = map_resource.read().clone();
    let map = match map_state {
        None => {
            return rsx! {
                div { class: "page-status", "Loading map..." }
            }
        }
        Some(Err(e)) => {
            let msg = e.to_string();
            return rsx! {
                div { class: "page-status error",
                    p { "Could not load this map: {msg}" }
                    div { class: "dialog-actions",
                        Link { class: "secondary", to: Route::Home {}, "Back to maps" }
                        button { class: "primary", onclick: move |_| map_resource.restart(), "Retry" }
                    }
                }
            };
        }
        Some(Ok(map)) => map,
    };

    let smokes_state: Option<Result<Vec<Smoke>, ServiceError>> = smokes_resource.read().clone();
    let smokes_error = match &smokes_state {
        Some(Err(e)) => Some(e.to_string()),
        _ => None,
    };
    let smokes_loading = smokes_state.is_none();
    let all_smokes: Vec<Smoke> = match smokes_state {
        Some(Ok(smokes)) => smokes,
        _ => Vec::new(),
    };

    let has_floors = map_has_floors(&map, &all_smokes);
    let active_filter = effective_filter(&filter.read(), has_floors);
    let visible = filter_smokes_owned(&all_smokes, &active_filter);
    let viewed_floor = active_filter.floor;
    let radar = map.radar_for(viewed_floor).map(str::to_string);
    let title = map.title().to_string();
    let total = all_smokes.len();

    let flow_now = flow.read().clone();
    let pick_mode = flow_now.pick_mode_enabled();
    let pending_point = flow_now.pending_point();
    let dialog_open = flow_now.dialog_open();

    let selected_id = *selected.read();
    let selected_smoke = selected_id
        .and_then(|sid| all_smokes.iter().find(|s| s.id == sid).cloned());
    let current_highlight = *highlighted.read();
    let vote_snapshot = votes.read().clone();
    let logged_in = session.is_authenticated();
    let notice_text = notice.read().clone();

    let submit_token = session.token.clone();
    let on_submit = move |_: ()| {
        let started = flow.write().begin_submit(id, has_floors);
        let payload = match started {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "submit blocked");
                return;
            }
        };
        let service = RestSmokeService::new(submit_token.clone());
        spawn(async move {
            let result = service.create(&payload).await;
            let created = flow.write().finish_submit(result);
            if created.is_some() {
                smokes_resource.restart();
            }
        });
    };

    rsx! {
        div { class: if pick_mode { "app map-page picking" } else { "app map-page" },
            div { class: "header",
                Link { class: "back-link", to: Route::Home {}, "← Maps" }
                h1 { "{title}" }
                div { class: "header-actions",
                    if pick_mode {
                        button {
                            class: "secondary",
                            onclick: move |_| flow.write().cancel(),
                            "Cancel picking"
                        }
                    } else {
                        button {
                            class: "primary",
                            disabled: dialog_open,
                            onclick: move |_| {
                                if !logged_in {
                                    notice.set(Some(LOGIN_TO_ADD.to_string()));
                                    return;
                                }
                                notice.set(None);
                                selected.set(None);
                                flow.write().begin_pick(viewed_floor);
                            },
                            "+ Add smoke"
                        }
                    }
                }
            }

            if let Some(msg) = notice_text {
                div { class: "notice",
                    span { "{msg}" }
                    button { class: "ghost", onclick: move |_| notice.set(None), "✕" }
                }
            }

            div { class: "sidebar",
                FilterPanel { filter: filter, show_floor: has_floors }

                if smokes_loading {
                    div { class: "panel page-status", "Loading smokes..." }
                } else if let Some(msg) = smokes_error {
                    div { class: "panel page-status error",
                        p { "Could not load smokes: {msg}" }
                        button { class: "secondary", onclick: move |_| smokes_resource.restart(), "Retry" }
                    }
                } else {
                    SmokeList {
                        smokes: visible.clone(),
                        total: total,
                        highlighted: current_highlight,
                        votes: vote_snapshot,
                        on_select: move |sid| {
                            if flow.read().accepts_marker_clicks() {
                                selected.set(Some(sid));
                            }
                        },
                        on_enter: move |sid| {
                            let current = *highlighted.read();
                            highlighted.set(highlight::on_enter(current, sid));
                        },
                        on_leave: move |sid| {
                            let current = *highlighted.read();
                            highlighted.set(highlight::on_leave(current, sid));
                        },
                    }
                }
            }

            if let Some(image_url) = radar {
                MapViewer {
                    key: "{image_url}",
                    image_url: image_url.clone(),
                    smokes: visible.clone(),
                    pending_point: pending_point,
                    pick_mode: pick_mode,
                    highlighted: current_highlight,
                    on_marker_click: move |sid| {
                        if flow.read().accepts_marker_clicks() {
                            selected.set(Some(sid));
                        }
                    },
                    on_pick: move |point| {
                        flow.write().pick(point);
                    },
                    on_marker_enter: move |sid| {
                        let current = *highlighted.read();
                        highlighted.set(highlight::on_enter(current, sid));
                    },
                    on_marker_leave: move |sid| {
                        let current = *highlighted.read();
                        highlighted.set(highlight::on_leave(current, sid));
                    },
                }
            } else {
                div { class: "map-container page-status", "No radar image is available for this map." }
            }

            if dialog_open {
                CreateDialog {
                    flow: flow,
                    map_has_floors: has_floors,
                    on_submit: on_submit,
                    on_repick: move |_| flow.write().begin_pick(viewed_floor),
                    on_cancel: move |_| flow.write().cancel(),
                }
            }

            if let Some(smoke) = selected_smoke {
                SmokeDialog {
                    smoke: smoke,
                    session: session.clone(),
                    votes: votes,
                    reported: reported,
                    on_close: move |_| selected.set(None),
                    on_deleted: move |sid: SmokeId| {
                        selected.set(None);
                        let current = *highlighted.read();
                        highlighted.set(highlight::on_leave(current, sid));
                        smokes_resource.restart();
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smokes_shared::filter::CategoryFilter;
    use smokes_shared::models::{Author, Category, Floor};

    fn map(radar_lower: Option<&str>) -> GameMap {
        GameMap {
            id: 1,
            name: "mirage".into(),
            display_name: Some("Mirage".into()),
            description: None,
            thumbnail: None,
            radar: Some("/radars/mirage.png".into()),
            radar_lower: radar_lower.map(str::to_string),
        }
    }

    fn smoke(id: SmokeId, floor: Option<Floor>) -> Smoke {
        Smoke {
            id,
            title: format!("smoke {id}"),
            video_url: "https://youtu.be/abc".into(),
            timestamp: 5,
            category: Category::Smoke,
            x_percent: 10.0,
            y_percent: 20.0,
            floor,
            score: 0,
            author: Author {
                id: 9,
                display_name: "ana".into(),
                avatar_url: None,
            },
            created_at: None,
        }
    }

    #[test]
    fn test_floors_from_lower_radar_or_tags() {
        assert!(map_has_floors(&map(Some("/radars/lower.png")), &[]));
        assert!(map_has_floors(&map(None), &[smoke(1, Some(Floor::Lower))]));
        assert!(!map_has_floors(&map(None), &[smoke(1, None)]));
    }

    #[test]
    fn test_effective_filter_defaults_to_upper() {
        let stored = SmokeFilter {
            floor: None,
            category: CategoryFilter::Only(Category::Flashbang),
            search: "xbox".into(),
        };
        let active = effective_filter(&stored, true);
        assert_eq!(active.floor, Some(Floor::Upper));
        assert_eq!(active.category, CategoryFilter::Only(Category::Flashbang));
        assert_eq!(active.search, "xbox");
    }

    #[test]
    fn test_effective_filter_ignores_floor_without_floors() {
        let stored = SmokeFilter {
            floor: Some(Floor::Lower),
            ..SmokeFilter::default()
        };
        assert_eq!(effective_filter(&stored, false).floor, None);
    }
}

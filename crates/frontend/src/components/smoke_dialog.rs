use std::collections::HashSet;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use smokes_shared::models::{Smoke, SmokeId};
use smokes_shared::video::{embeddable_video_url, is_frame_safe};
use smokes_shared::votes::{format_score, vote_action, Vote, VoteAction, VoteBook};
use smokes_shared::workflow::SmokeService;

use crate::api::{self, RestSmokeService};
use crate::session::Session;

/// Delete asks for a second click within this window.
const DELETE_CONFIRM_MS: u32 = 3_000;

const LOGIN_REQUIRED: &str = "You need to log in first";

/// What the report area of the dialog shows for the current viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportButton {
    Hidden,
    Available,
    AlreadyReported,
}

fn report_button(session: &Session, author_id: i64, already_reported: bool) -> ReportButton {
    if !session.is_authenticated() || session.is_author(author_id) {
        ReportButton::Hidden
    } else if already_reported {
        ReportButton::AlreadyReported
    } else {
        ReportButton::Available
    }
}

const COPY_FAILED: &str = "Could not copy the link";

/// Player source for a smoke, or `None` when the link can't be framed safely.
fn player_src(video_url: &str, timestamp: u32) -> Option<String> {
    let src = embeddable_video_url(video_url, Some(f64::from(timestamp)));
    is_frame_safe(&src).then_some(src)
}

/// Message to show once a clipboard write settles; a success clears it.
fn copy_notice<T, E: std::fmt::Debug>(result: Result<T, E>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = ?e, "clipboard write failed");
            Some(COPY_FAILED.to_string())
        }
    }
}

fn copy_to_clipboard(text: String, mut message: Signal<Option<String>>) {
    wasm_bindgen_futures::spawn_local(async move {
        let Some(window) = web_sys::window() else {
            message.set(copy_notice::<(), _>(Err("no window")));
            return;
        };
        let clipboard = window.navigator().clipboard();
        let written = wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await;
        message.set(copy_notice(written));
    });
}

/// Details for one smoke: embedded video, votes, report and delete.
#[component]
pub fn SmokeDialog(
    smoke: Smoke,
    session: Session,
    votes: Signal<VoteBook>,
    reported: Signal<HashSet<SmokeId>>,
    on_close: EventHandler<()>,
    on_deleted: EventHandler<SmokeId>,
) -> Element {
    let mut confirming_delete = use_signal(|| false);
    // Bumped on every confirm so a stale reset timer can't cancel a newer one.
    let mut confirm_generation = use_signal(|| 0u64);
    let mut busy = use_signal(|| false);
    let mut message = use_signal(|| None::<String>);
    let mut show_report = use_signal(|| false);
    let mut report_reason = use_signal(String::new);

    let id = smoke.id;
    let embed_url = player_src(&smoke.video_url, smoke.timestamp);
    let score = format_score(votes.read().display_score(id, smoke.score));
    let my_vote = votes.read().vote_for(id);
    let is_author = session.is_author(smoke.author.id);
    let report_state = report_button(&session, smoke.author.id, reported.read().contains(&id));
    let is_busy = *busy.read();

    let token = session.token.clone();
    let category_label = format!("{} {}", smoke.category.icon(), smoke.category);
    let mut press_vote = move |token: Option<String>, pressed: Vote| {
        let Some(token) = token else {
            message.set(Some(LOGIN_REQUIRED.to_string()));
            return;
        };
        let action = vote_action(votes.read().vote_for(id), pressed);
        busy.set(true);
        spawn(async move {
            let result = match action {
                VoteAction::Rate(v) => api::rate_smoke(Some(&token), id, v).await,
                VoteAction::Remove => api::remove_rating(Some(&token), id).await,
            };
            match result {
                Ok(()) => {
                    votes.write().apply(id, action);
                    message.set(None);
                }
                Err(e) => {
                    tracing::warn!(smoke = id, error = %e, "vote failed");
                    message.set(Some(format!("Could not register your vote: {e}")));
                }
            }
            busy.set(false);
        });
    };

    let delete_token = token.clone();
    let on_delete_click = move |_: Event<MouseData>| {
        if !*confirming_delete.read() {
            confirming_delete.set(true);
            let generation = *confirm_generation.read() + 1;
            confirm_generation.set(generation);
            spawn(async move {
                TimeoutFuture::new(DELETE_CONFIRM_MS).await;
                if *confirm_generation.read() == generation {
                    confirming_delete.set(false);
                }
            });
            return;
        }

        confirming_delete.set(false);
        busy.set(true);
        let service = RestSmokeService::new(delete_token.clone());
        spawn(async move {
            match service.delete(id).await {
                Ok(()) => {
                    tracing::info!(smoke = id, "smoke deleted");
                    busy.set(false);
                    on_deleted.call(id);
                }
                Err(e) => {
                    tracing::warn!(smoke = id, error = %e, "delete failed");
                    message.set(Some(format!("Could not delete the smoke: {e}")));
                    busy.set(false);
                }
            }
        });
    };

    let report_token = token.clone();
    let on_report_submit = move |_: Event<MouseData>| {
        let reason = report_reason.read().trim().to_string();
        if reason.is_empty() {
            return;
        }
        let Some(token) = report_token.clone() else {
            message.set(Some(LOGIN_REQUIRED.to_string()));
            return;
        };
        busy.set(true);
        spawn(async move {
            match api::report_smoke(Some(&token), id, &reason).await {
                Ok(()) => {
                    tracing::info!(smoke = id, "smoke reported");
                    reported.write().insert(id);
                    report_reason.set(String::new());
                    show_report.set(false);
                    busy.set(false);
                    on_close.call(());
                }
                Err(e) => {
                    tracing::warn!(smoke = id, error = %e, "report failed");
                    message.set(Some(format!("Could not send the report: {e}")));
                    busy.set(false);
                }
            }
        });
    };

    let video_url = smoke.video_url.clone();
    let report_blank = report_reason.read().trim().is_empty();

    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_close.call(()),

            div {
                class: "dialog smoke-dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                div { class: "dialog-header",
                    h2 { "{smoke.title}" }
                    button {
                        class: "ghost",
                        "aria-label": "Close",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }

                div { class: "smoke-meta",
                    span { class: "badge", "{score}" }
                    span { class: "badge outline", "{smoke.author.display_name}" }
                    span { class: "badge outline", "{smoke.timestamp}s" }
                    span { class: "badge outline", "{category_label}" }
                }

                if let Some(src) = embed_url {
                    div { class: "video-frame",
                        iframe {
                            src: "{src}",
                            title: "{smoke.title}",
                            allow: "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share",
                            referrerpolicy: "strict-origin-when-cross-origin",
                            allowfullscreen: true,
                        }
                    }
                } else {
                    p { class: "form-hint", "This video can't be played here." }
                }

                if let Some(msg) = message.read().clone() {
                    p { class: "form-error", "{msg}" }
                }

                div { class: "dialog-actions",
                    div { class: "votes",
                        button {
                            class: if my_vote == Some(Vote::Up) { "vote up active" } else { "vote up" },
                            "aria-label": "Upvote",
                            disabled: is_busy,
                            onclick: {
                                let token = token.clone();
                                move |_| press_vote(token.clone(), Vote::Up)
                            },
                            "▲"
                        }
                        button {
                            class: if my_vote == Some(Vote::Down) { "vote down active" } else { "vote down" },
                            "aria-label": "Downvote",
                            disabled: is_busy,
                            onclick: {
                                let token = token.clone();
                                move |_| press_vote(token.clone(), Vote::Down)
                            },
                            "▼"
                        }
                    }

                    button {
                        class: "secondary",
                        onclick: move |_| copy_to_clipboard(video_url.clone(), message),
                        "Copy link"
                    }

                    if is_author {
                        button {
                            class: if *confirming_delete.read() { "danger confirming" } else { "danger" },
                            disabled: is_busy,
                            onclick: on_delete_click,
                            if *confirming_delete.read() { "Delete?" } else { "Delete" }
                        }
                    }

                    {match report_state {
                        ReportButton::Hidden => rsx! {},
                        ReportButton::Available => rsx! {
                            button {
                                class: "warning",
                                disabled: is_busy,
                                onclick: move |_| {
                                    report_reason.set(String::new());
                                    show_report.set(true);
                                },
                                "Report"
                            }
                        },
                        ReportButton::AlreadyReported => rsx! {
                            button {
                                class: "warning",
                                disabled: true,
                                title: "You already reported this smoke",
                                "Reported"
                            }
                        },
                    }}
                }

                if *show_report.read() {
                    div { class: "report-form",
                        textarea {
                            placeholder: "What is wrong with this smoke?",
                            value: "{report_reason}",
                            oninput: move |evt: Event<FormData>| report_reason.set(evt.value()),
                        }
                        div { class: "dialog-actions",
                            button {
                                class: "secondary",
                                onclick: move |_| show_report.set(false),
                                "Cancel"
                            }
                            button {
                                class: "warning",
                                disabled: is_busy || report_blank,
                                onclick: on_report_submit,
                                "Send report"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionUser;

    fn session(user_id: Option<i64>) -> Session {
        Session {
            token: user_id.map(|_| "tok".to_string()),
            user: user_id.map(|id| SessionUser {
                id,
                username: None,
                avatar_url: None,
            }),
        }
    }

    #[test]
    fn test_player_src_rejects_script_links() {
        assert!(player_src("https://youtu.be/abc123", 4)
            .is_some_and(|src| src.starts_with("https://www.youtube-nocookie.com/embed/abc123?start=4")));
        assert_eq!(player_src("javascript:alert(1)", 4), None);
        assert_eq!(
            player_src("https://www.youtube.com/watch?v=javascript:alert(1)//", 4).as_deref(),
            Some("https://www.youtube.com/watch?v=javascript:alert(1)//")
        );
    }

    #[test]
    fn test_copy_failure_is_reported() {
        assert_eq!(copy_notice::<(), _>(Err("denied")), Some(COPY_FAILED.to_string()));
        assert_eq!(copy_notice::<_, &str>(Ok(())), None);
    }

    #[test]
    fn test_report_hidden_when_logged_out() {
        assert_eq!(report_button(&session(None), 3, false), ReportButton::Hidden);
    }

    #[test]
    fn test_author_cannot_report_own_smoke() {
        assert_eq!(report_button(&session(Some(3)), 3, false), ReportButton::Hidden);
    }

    #[test]
    fn test_report_once_per_session() {
        assert_eq!(report_button(&session(Some(4)), 3, false), ReportButton::Available);
        assert_eq!(
            report_button(&session(Some(4)), 3, true),
            ReportButton::AlreadyReported
        );
    }
}

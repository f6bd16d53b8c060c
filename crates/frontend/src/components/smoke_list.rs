use dioxus::prelude::*;
use smokes_shared::glyph::category_color;
use smokes_shared::highlight::is_highlighted;
use smokes_shared::models::{Smoke, SmokeId};
use smokes_shared::votes::{format_score, Vote, VoteBook};

struct Row {
    id: SmokeId,
    title: String,
    author: String,
    icon: &'static str,
    category: &'static str,
    color: &'static str,
    score: String,
    my_vote: Option<Vote>,
    highlighted: bool,
}

#[component]
pub fn SmokeList(
    smokes: Vec<Smoke>,
    total: usize,
    highlighted: Option<SmokeId>,
    votes: VoteBook,
    on_select: EventHandler<SmokeId>,
    on_enter: EventHandler<SmokeId>,
    on_leave: EventHandler<SmokeId>,
) -> Element {
    let shown = smokes.len();
    let rows: Vec<Row> = smokes
        .iter()
        .map(|s| Row {
            id: s.id,
            title: s.title.clone(),
            author: s.author.display_name.clone(),
            icon: s.category.icon(),
            category: s.category.label(),
            color: category_color(s.category),
            score: format_score(votes.display_score(s.id, s.score)),
            my_vote: votes.vote_for(s.id),
            highlighted: is_highlighted(highlighted, s.id),
        })
        .collect();

    rsx! {
        div { class: "panel smoke-list",
            div { class: "list-counts",
                span { class: "badge", "{total} smokes" }
                span { class: "badge outline", "{shown} shown" }
            }

            if rows.is_empty() {
                div { class: "empty-list", "No smokes found" }
            }

            for row in rows {
                div {
                    key: "{row.id}",
                    class: if row.highlighted { "smoke-row highlighted" } else { "smoke-row" },
                    onclick: move |_| on_select.call(row.id),
                    onmouseenter: move |_| on_enter.call(row.id),
                    onmouseleave: move |_| on_leave.call(row.id),

                    div { class: "smoke-row-title",
                        span { class: "truncate", "{row.title}" }
                        span {
                            class: "category-badge",
                            style: "border-color:{row.color};",
                            title: "{row.category}",
                            "{row.icon}"
                        }
                    }
                    div { class: "smoke-row-meta",
                        span { class: "author truncate", "{row.author}" }
                        span { class: "score", "{row.score}" }
                        if row.my_vote == Some(Vote::Up) {
                            span { class: "my-vote up", "↑" }
                        }
                        if row.my_vote == Some(Vote::Down) {
                            span { class: "my-vote down", "↓" }
                        }
                    }
                }
            }
        }
    }
}

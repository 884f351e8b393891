use dioxus::prelude::*;

use crate::components::common::IntegerField;
use crate::constants::*;
use crate::state::EditorSession;

const MAX_PLAYERS: u32 = 99;

/// Plan title, duration summary, merged tool list and player count.
#[component]
pub fn PlanHeader(session: Signal<Option<EditorSession>>) -> Element {
    let summary = session.read().as_ref().map(|s| {
        let labels = s.labels();
        (
            s.plan_name.clone(),
            s.duration_info(),
            labels.tr_with(
                "info_remaining",
                &[("minutes", s.timeline.remaining_minutes().to_string())],
            ),
            labels.tr_with(
                "info_tools",
                &[("tools", s.tool_summary().display_or(&labels.tr("no_tools")).to_string())],
            ),
            labels.tr("field_players"),
            s.player_count,
        )
    });
    let Some((plan_name, duration_info, remaining, tools, players_label, player_count)) = summary else {
        return rsx! {};
    };

    rsx! {
        div {
            style: "
                display: flex; align-items: flex-end; justify-content: space-between; gap: 24px;
                padding: 16px 20px 8px;
            ",
            div {
                style: "display: flex; flex-direction: column; gap: 4px; min-width: 0;",
                h1 { style: "margin: 0; font-size: 22px; font-weight: 600; color: {TEXT_TITLE};", "{plan_name}" }
                span { style: "font-size: 13px; color: {TEXT_SECONDARY};", "{duration_info}" }
                span { style: "font-size: 12px; color: {TEXT_MUTED};", "{remaining}" }
                span {
                    style: "font-size: 12px; color: {TEXT_MUTED}; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                    "{tools}"
                }
            }
            IntegerField {
                label: players_label,
                value: player_count,
                min: 1,
                max: MAX_PLAYERS,
                on_commit: move |count: u32| {
                    if let Some(s) = session.write().as_mut() {
                        s.player_count = count;
                    }
                },
            }
        }
    }
}

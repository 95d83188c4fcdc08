//! Plain-text views over controller state.

use client_core::{CatalogController, ConversationController, FetchApplied, ReplyApplied};
use shared::domain::TurnRole;

pub fn catalog_view(catalog: &CatalogController) -> String {
    let mut out = format!("== {}", catalog.category());
    if !catalog.available_sub_filters().is_empty() {
        out.push_str(&format!(" / {}", catalog.sub_filter()));
    }
    if catalog.is_loading() {
        out.push_str(" (loading)");
    }
    out.push('\n');

    if let Some(err) = catalog.last_error() {
        out.push_str(&format!("!! {err}\n"));
    }

    let entries = catalog.displayed_entries();
    if entries.is_empty() {
        out.push_str("No Data Found. Try selecting a different category.\n");
        return out;
    }
    for (key, product) in entries {
        out.push_str(&format!(
            "{key} | {} | {} | {} | ₹{}\n",
            product.name, product.category, product.volume, product.price
        ));
    }

    let filters = catalog.available_sub_filters();
    if !filters.is_empty() {
        let labels: Vec<_> = filters.iter().map(|f| f.label()).collect();
        out.push_str(&format!("filters: {}\n", labels.join(", ")));
    }
    out
}

pub fn fetch_notice(applied: FetchApplied) -> Option<String> {
    match applied {
        FetchApplied::Updated { category, count } => {
            Some(format!("{category}: {count} products loaded"))
        }
        FetchApplied::Failed { category } => {
            Some(format!("{category}: fetch failed, showing previous products"))
        }
        FetchApplied::Stale { .. } => None,
    }
}

pub fn transcript_view(conversation: &ConversationController) -> String {
    let mut out = String::new();
    for turn in conversation.turns() {
        let who = match turn.role {
            TurnRole::User => "you",
            TurnRole::Assistant => "bot",
        };
        out.push_str(&format!("{who}> {}\n", turn.text));
    }
    if conversation.is_awaiting_response() {
        out.push_str("bot> ...\n");
    }
    out
}

pub fn latest_reply(conversation: &ConversationController, applied: ReplyApplied) -> Option<String> {
    if applied == ReplyApplied::Ignored {
        return None;
    }
    conversation
        .turns()
        .last()
        .map(|turn| format!("bot> {}", turn.text))
}

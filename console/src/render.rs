use std::collections::HashSet;

use serde_json::json;
use social_graph_core::{NetworkView, Suggestion, WeightedPath};

/// How query results are printed. Mutation messages are always text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn network(view: &NetworkView, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return to_json(view);
    }
    if view.user_count == 0 {
        return "Network is empty.".to_string();
    }

    let mut lines = vec![
        "--- Social Network Structure ---".to_string(),
        format!("Total users: {}", view.user_count),
        format!("Total connections: {}", view.edge_count),
    ];
    for summary in &view.users {
        let friends = if summary.friends.is_empty() {
            "No friends".to_string()
        } else {
            summary
                .friends
                .iter()
                .map(|f| format!("{} (w={})", f.friend, f.weight))
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(format!("{}: {}", summary.user, friends));
    }
    lines.join("\n")
}

pub fn path(found: &WeightedPath, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(found),
        OutputFormat::Text => format!(
            "Shortest path: {}\nTotal interaction cost: {}",
            found.path.join(" -> "),
            found.cost
        ),
    }
}

pub fn mutual(a: &str, b: &str, friends: &HashSet<String>, format: OutputFormat) -> String {
    let sorted = sorted(friends);
    match format {
        OutputFormat::Json => to_json(&json!({ "users": [a, b], "mutual_friends": sorted })),
        OutputFormat::Text => format!(
            "Mutual friends between {a} and {b}: {}",
            list_or_none(&sorted)
        ),
    }
}

/// `ranked` is already in display order.
pub fn suggestions(user: &str, ranked: &[Suggestion], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&json!({ "user": user, "suggestions": ranked })),
        OutputFormat::Text => {
            let names: Vec<&str> = ranked.iter().map(|s| s.user.as_str()).collect();
            format!("Suggested friends for {user}: {}", list_or_none(&names))
        }
    }
}

fn sorted(set: &HashSet<String>) -> Vec<&str> {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    items
}

fn list_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

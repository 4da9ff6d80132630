//! Text rendering of derived views.

use container_core::{Collection, ContainerRecord, ContainerViews};
use std::fmt::Write;

const NAME_MAX_CHARS: usize = 20;
const DESCRIPTION_MAX_CHARS: usize = 80;

/// Renders both views as plain text sections.
pub fn render_views(views: &ContainerViews) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "search=\"{}\" sort={} revision={}",
        views.query.search_term,
        views.query.sort_order.as_wire(),
        views.revision
    );
    for (title, collection) in [
        ("My containers", Collection::Owned),
        ("Shared containers", Collection::Shared),
    ] {
        let records = views.view(collection);
        let _ = writeln!(out, "\n{title} ({})", records.len());
        for record in records {
            render_card(&mut out, record);
        }
    }
    out
}

fn render_card(out: &mut String, record: &ContainerRecord) {
    let name = record.name.as_deref().unwrap_or_default();
    let _ = writeln!(
        out,
        "- {} [{}] created {} | edited by {} on {}",
        truncate_chars(name, NAME_MAX_CHARS),
        record.kind.as_deref().unwrap_or("-"),
        date_part(record.created_time.as_deref()),
        record.edit_user_nickname.as_deref().unwrap_or("-"),
        date_part(record.last_modified_time.as_deref()),
    );
    if let Some(description) = record.description.as_deref() {
        let _ = writeln!(out, "    {}", truncate_chars(description, DESCRIPTION_MAX_CHARS));
    }
}

/// Keeps `max_chars` characters and appends `...` when text was cut.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut cut = value.chars().take(max_chars).collect::<String>();
    cut.push_str("...");
    cut
}

/// Calendar part of an ISO-8601 timestamp (text before `T`).
pub fn date_part(timestamp: Option<&str>) -> &str {
    match timestamp {
        Some(value) => value.split('T').next().unwrap_or(value),
        None => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::{date_part, render_views, truncate_chars};
    use container_core::{ContainerRecord, ContainerViews};

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("short", 20), "short");
        assert_eq!(truncate_chars("컨테이너목록", 3), "컨테이...");
    }

    #[test]
    fn date_part_strips_time_of_day() {
        assert_eq!(date_part(Some("2023-01-02T10:00:00Z")), "2023-01-02");
        assert_eq!(date_part(Some("2023-01-02")), "2023-01-02");
        assert_eq!(date_part(None), "-");
    }

    #[test]
    fn render_lists_both_sections() {
        let views = ContainerViews {
            owned: vec![ContainerRecord::new("mine").with_created_time("2023-01-02T00:00:00Z")],
            ..ContainerViews::default()
        };
        let text = render_views(&views);
        assert!(text.contains("My containers (1)"));
        assert!(text.contains("- mine [-] created 2023-01-02"));
        assert!(text.contains("Shared containers (0)"));
    }
}

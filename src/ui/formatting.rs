use colored::Colorize;
use occubrowse_core::{
    AvailableFilters, GroupNode, Record, SearchField, SearchFilters, SearchMatch, SearchResult,
    TaxonomyChild,
};

/// Render a field value with matched ranges highlighted
pub fn highlight(value: &str, indices: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(value.len());
    let mut plain = String::new();
    let mut marked = String::new();

    for (idx, c) in value.chars().enumerate() {
        let inside = indices
            .iter()
            .any(|&(start, end)| (start..=end).contains(&idx));

        if inside {
            if !plain.is_empty() {
                out.push_str(&plain);
                plain.clear();
            }
            marked.push(c);
        } else {
            if !marked.is_empty() {
                out.push_str(&marked.yellow().bold().to_string());
                marked.clear();
            }
            plain.push(c);
        }
    }

    out.push_str(&plain);
    if !marked.is_empty() {
        out.push_str(&marked.yellow().bold().to_string());
    }
    out
}

/// Flatten the tree into indented lines, descending at most `max_depth` groups.
/// Records are listed only when `with_records` is set.
pub fn format_tree(roots: &[GroupNode], max_depth: usize, with_records: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for root in roots {
        format_group(root, 0, max_depth, with_records, &mut lines);
    }
    lines
}

/// Recursively flatten a group node and its children
fn format_group(
    group: &GroupNode,
    depth: usize,
    max_depth: usize,
    with_records: bool,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    lines.push(format!(
        "{}{} - {} ({})",
        indent,
        group.code.bold(),
        group.display_name,
        group.record_count()
    ));

    if depth + 1 >= max_depth {
        return;
    }

    for child in &group.children {
        match child {
            TaxonomyChild::Group(inner) => {
                format_group(inner, depth + 1, max_depth, with_records, lines);
            }
            TaxonomyChild::Record(record) if with_records => {
                lines.push(format!("{}  • {}", indent, format_record_line(record)));
            }
            TaxonomyChild::Record(_) => {}
        }
    }
}

/// One-line summary: code and preferred label
pub fn format_record_line(record: &Record) -> String {
    if record.code.is_empty() {
        record.preferred_label.clone()
    } else {
        format!("{} {}", record.code.dimmed(), record.preferred_label)
    }
}

fn field_match<'a>(matches: &'a [SearchMatch], field: SearchField) -> Option<&'a SearchMatch> {
    matches.iter().find(|m| m.field == field)
}

/// Multi-line rendering of a ranked result
pub fn format_result(rank: usize, result: &SearchResult) -> String {
    let record = &result.record;
    let label = match field_match(&result.matches, SearchField::PreferredLabel) {
        Some(m) => highlight(&record.preferred_label, &m.indices),
        None => record.preferred_label.clone(),
    };

    let mut lines = vec![format!(
        "{}. {} {} {}",
        rank,
        label,
        format!("[{}]", record.code).dimmed(),
        format!("score {:.3}", result.score).cyan()
    )];

    if !result.breadcrumb.is_empty() {
        lines.push(format!("   {}", result.breadcrumb.dimmed()));
    }

    for m in result
        .matches
        .iter()
        .filter(|m| m.field != SearchField::PreferredLabel)
    {
        lines.push(format!("   {}: {}", m.field, excerpt(record.field(m.field), m)));
    }

    lines.join("\n")
}

/// The matched line of a field, highlighted
fn excerpt(value: &str, m: &SearchMatch) -> String {
    let first = m.indices.first().map_or(0, |&(start, _)| start);

    let mut offset = 0;
    for line in value.split('\n') {
        let len = line.chars().count();
        if first < offset + len || offset + len >= value.chars().count() {
            let local: Vec<(usize, usize)> = m
                .indices
                .iter()
                .filter(|&&(start, end)| start >= offset && end < offset + len)
                .map(|&(start, end)| (start - offset, end - offset))
                .collect();
            return highlight(line.trim_end(), &local);
        }
        offset += len + 1;
    }

    value.to_string()
}

/// Describe active filters, e.g. "major group: 2 OR 3; type: esco"
pub fn format_filters(filters: &SearchFilters) -> String {
    let mut parts = Vec::new();
    if !filters.isco_major_groups.is_empty() {
        let values: Vec<_> = filters.isco_major_groups.iter().map(String::as_str).collect();
        parts.push(format!("major group: {}", values.join(" OR ")));
    }
    if !filters.occupation_types.is_empty() {
        let values: Vec<_> = filters.occupation_types.iter().map(String::as_str).collect();
        parts.push(format!("type: {}", values.join(" OR ")));
    }
    parts.join("; ")
}

/// Listing of the facet values found in the corpus
pub fn format_available_filters(available: &AvailableFilters) -> Vec<String> {
    let mut lines = vec!["Major groups:".bold().to_string()];
    for major in &available.isco_major_groups {
        lines.push(format!("  {} - {}", major, occubrowse_core::display_name(major)));
    }

    lines.push("Occupation types:".bold().to_string());
    if available.occupation_types.is_empty() {
        lines.push("  (none)".to_string());
    }
    for occupation_type in &available.occupation_types {
        lines.push(format!("  {}", occupation_type));
    }
    lines
}

/// Full record listing for the `show` command
pub fn format_record_details(record: &Record, breadcrumb: &str) -> Vec<String> {
    let mut lines = vec![record.preferred_label.bold().to_string()];
    if !breadcrumb.is_empty() {
        lines.push(breadcrumb.dimmed().to_string());
    }
    lines.push(String::new());

    let fields = [
        ("Key", record.key_id.as_str()),
        ("Code", record.code.as_str()),
        ("ISCO group", record.isco_group_code.as_str()),
        ("Type", record.occupation_type.as_str()),
        ("Status", record.status.as_str()),
        ("Description", record.description.as_str()),
        ("Definition", record.definition.as_str()),
        ("Scope note", record.scope_note.as_str()),
        ("Regulated profession", record.regulated_profession_note.as_str()),
        ("URL", record.url.as_str()),
    ];
    for (name, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
        lines.push(format!("{}: {}", name.bold(), value));
    }

    let alternates: Vec<_> = record.alternate_designations().collect();
    if !alternates.is_empty() {
        lines.push(format!("{}:", "Also known as".bold()));
        for alternate in alternates {
            lines.push(format!("  - {}", alternate));
        }
    }

    lines
}

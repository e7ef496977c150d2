use std::io::Write;

use anyhow::Result;
use occubrowse_core::{parse_facet_filters, AvailableFilters, SearchFilters};
use tracing::warn;

use crate::state::AppState;
use crate::ui::format_available_filters;

/// Combine `--major`, `--type` and `key=value` facet strings into one filter set
pub fn build_filters(
    majors: &[String],
    types: &[String],
    facets: &[String],
) -> Result<SearchFilters> {
    let mut filters = parse_facet_filters(facets)?;

    filters
        .isco_major_groups
        .extend(majors.iter().map(|m| m.trim().to_string()));
    filters
        .occupation_types
        .extend(types.iter().map(|t| t.trim().to_string()));

    Ok(filters)
}

/// Warn about filter values that cannot match anything in the corpus
pub fn warn_unknown_values(filters: &SearchFilters, available: &AvailableFilters) {
    for major in filters.isco_major_groups.difference(&available.isco_major_groups) {
        warn!(major = %major, "no records in this major group");
    }
    for occupation_type in filters.occupation_types.difference(&available.occupation_types) {
        warn!(occupation_type = %occupation_type, "no records with this occupation type");
    }
}

/// Print facet values present in the loaded records
pub fn handle_filters(state: &AppState, out: &mut impl Write) -> Result<()> {
    for line in format_available_filters(state.index.available_filters()) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

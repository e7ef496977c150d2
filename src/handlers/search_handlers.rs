use std::io::Write;

use anyhow::Result;
use occubrowse_core::SearchFilters;

use crate::handlers::filter_handlers::warn_unknown_values;
use crate::state::AppState;
use crate::ui::{format_filters, format_result};

/// A search as requested on the command line
#[derive(Debug)]
pub struct SearchRequest {
    pub query: String,
    pub filters: SearchFilters,
    pub limit: usize,
    pub json: bool,
}

/// Run a query and print ranked results
pub fn handle_search(state: &AppState, request: &SearchRequest, out: &mut impl Write) -> Result<()> {
    warn_unknown_values(&request.filters, state.index.available_filters());

    let results = state
        .index
        .query(&request.query, &request.filters, request.limit);

    if request.json {
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
        return Ok(());
    }

    if request.query.trim().is_empty() {
        writeln!(out, "# Records\n")?;
    } else {
        writeln!(out, "# Results for '{}'\n", request.query.trim())?;
    }

    if !request.filters.is_empty() {
        writeln!(out, "**Filters:** {}\n", format_filters(&request.filters))?;
    }

    writeln!(out, "**Matching Items:** {}\n", results.len())?;

    if results.is_empty() {
        writeln!(out, "_No records match the query._")?;
    }
    for (rank, result) in results.iter().enumerate() {
        writeln!(out, "{}\n", format_result(rank + 1, result))?;
    }

    Ok(())
}

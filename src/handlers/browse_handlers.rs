use std::io::Write;

use anyhow::{bail, Result};
use occubrowse_core::find_group;

use crate::state::AppState;
use crate::ui::format_tree;

/// Print the classification tree, or the subtree below `code`
pub fn handle_browse(
    state: &AppState,
    code: Option<&str>,
    depth: usize,
    with_records: bool,
    out: &mut impl Write,
) -> Result<()> {
    let tree = state.taxonomy();

    let lines = match code {
        // Subtree below one group, headed by its level
        Some(code) => match find_group(tree, code) {
            Some(group) => {
                writeln!(
                    out,
                    "# {} {} in {}\n",
                    group.level,
                    group.code,
                    state.source_name()
                )?;
                format_tree(std::slice::from_ref(group), depth, with_records)
            }
            None => bail!("no group with code '{}' in {}", code, state.source_name()),
        },
        // Whole tree from the major groups down
        None => {
            writeln!(out, "# {} ({} records)\n", state.source_name(), state.record_count())?;
            format_tree(tree, depth, with_records)
        }
    };

    if lines.is_empty() {
        writeln!(out, "_No coded records to display._")?;
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}

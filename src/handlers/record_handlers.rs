use std::io::Write;

use anyhow::{anyhow, Result};
use occubrowse_core::breadcrumb;

use crate::state::AppState;
use crate::ui::format_record_details;

/// Print a single record, looked up by key id or code
pub fn handle_show(state: &AppState, key: &str, out: &mut impl Write) -> Result<()> {
    let record = state
        .find_record(key)
        .ok_or_else(|| anyhow!("no record with key or code '{}'", key))?;

    for line in format_record_details(record, &breadcrumb(record)) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use occubrowse_core::Record;

    #[test]
    fn test_show_record() {
        colored::control::set_override(false);
        let state = AppState::from_records(vec![Record {
            key_id: "dev".to_string(),
            code: "2512".to_string(),
            preferred_label: "Software developer".to_string(),
            ..Default::default()
        }]);

        let mut out = Vec::new();
        handle_show(&state, "dev", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Software developer\n2 - Professionals > 25 - "));
        assert!(handle_show(&state, "nope", &mut Vec::new()).is_err());
    }
}

//! JSON export of a computed pattern list.

use crate::error::Result;
use crate::types::Pattern;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// The full pattern list as indented JSON.
pub fn to_json(patterns: &[Pattern]) -> Result<String> {
    Ok(serde_json::to_string_pretty(patterns)?)
}

/// `patterns_<username>_<YYYY-MM-DD>.json`
///
/// Path separators in the username are replaced so the name stays a single
/// file component.
pub fn export_file_name(username: &str, date: NaiveDate) -> String {
    let safe: String = username
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("patterns_{}_{}.json", safe, date.format("%Y-%m-%d"))
}

/// Write the export into `dir`, creating it if needed, and return the path.
pub fn write_export(
    dir: &Path,
    username: &str,
    date: NaiveDate,
    patterns: &[Pattern],
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(username, date));
    std::fs::write(&path, to_json(patterns)?)?;

    tracing::info!(
        path = %path.display(),
        patterns = patterns.len(),
        "Exported patterns"
    );
    Ok(path)
}

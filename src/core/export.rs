//! # Export
//!
//! Writes the selected rows of a table to
//! `~/.aidboard/exports/<resource>-<timestamp>.json`.
//!
//! Rows are written in the order the table currently shows them (after
//! search, filter and sort), not in selection order. Writes go to a `.tmp`
//! file first and are renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use log::{debug, info};
use serde::Serialize;

use crate::api::Resource;
use crate::table::{Column, Record, ViewConfig, ViewState, process};

#[derive(Serialize)]
struct ExportFile<'a, R> {
    resource: Resource,
    exported_at: String,
    count: usize,
    records: Vec<&'a R>,
}

/// Selected records in view order.
pub fn selected_records<'a, R: Record>(
    records: &'a [R],
    columns: &[Column<R>],
    config: &ViewConfig,
    state: &ViewState<R::Id>,
) -> Vec<&'a R> {
    process(records, columns, config, state)
        .into_iter()
        .filter(|r| state.selected.contains(&r.id()))
        .collect()
}

/// Write `records` under `dir`, creating it if needed. Returns the final path.
pub fn export_records<R: Serialize>(
    dir: &Path,
    resource: Resource,
    records: Vec<&R>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let stamp = Local::now().format("%Y%m%d-%H%M%S-%3f").to_string();
    let path = unused_path(dir, &format!("{resource}-{stamp}"));

    let file = ExportFile {
        resource,
        exported_at: Utc::now().to_rfc3339(),
        count: records.len(),
        records,
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, &path)?;
    debug!("Renamed {} into place", tmp_path.display());
    info!("Exported {} {} to {}", file.count, resource, path.display());
    Ok(path)
}

/// `<stem>.json`, or `<stem>-N.json` for the first N not already taken.
fn unused_path(dir: &Path, stem: &str) -> PathBuf {
    let mut path = dir.join(format!("{stem}.json"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{stem}-{n}.json"));
        n += 1;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::{family_columns, view_config};
    use crate::table::ViewMode;
    use crate::test_support::family;

    #[test]
    fn test_selected_records_follow_view_order() {
        let records = vec![
            family(1, "Qureshi", "active"),
            family(2, "Ansari", "active"),
            family(3, "Memon", "inactive"),
        ];
        let columns = family_columns();
        let config = view_config(Resource::Families, 10, ViewMode::Table);
        let mut state = ViewState::new();
        state.sort_by("family_name");
        state.toggle_select_row(1);
        state.toggle_select_row(2);

        let ids: Vec<i64> = selected_records(&records, &columns, &config, &state)
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_export_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![family(1, "Qureshi", "active"), family(2, "Ansari", "active")];
        let path = export_records(
            &dir.path().join("exports"),
            Resource::Families,
            records.iter().collect(),
        )
        .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("families-"));
        assert!(name.ends_with(".json"));
        assert!(!path.with_extension("tmp").exists());

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["resource"], "families");
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["records"][1]["family_name"], "Ansari");
    }

    #[test]
    fn test_back_to_back_exports_keep_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![family(1, "Qureshi", "active")];
        let first = export_records(dir.path(), Resource::Families, records.iter().collect()).unwrap();
        let second = export_records(dir.path(), Resource::Families, records.iter().collect()).unwrap();
        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
    }

    #[test]
    fn test_unused_path_adds_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("members-x.json"), "[]").unwrap();
        fs::write(dir.path().join("members-x-1.json"), "[]").unwrap();
        assert_eq!(unused_path(dir.path(), "members-x"), dir.path().join("members-x-2.json"));
    }
}

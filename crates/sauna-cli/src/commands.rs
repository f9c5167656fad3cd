//! Command implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, warn};

use sauna_core::{AnalyticsConfig, DashboardStore, process_upload};
use sauna_ingest::{UploadStore, detect_data_type};
use sauna_model::DataType;

use crate::cli::{BatchArgs, IngestArgs, StateArgs};
use crate::summary::{FileReport, apply_table_style, header_cell, print_batch, print_outcome};

fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => AnalyticsConfig::load(path).context("load analytics config"),
        None => Ok(AnalyticsConfig::default()),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn run_ingest(args: &IngestArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let store = DashboardStore::load(&args.state)?;
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let filename = file_name(&args.file);
    let outcome = process_upload(&bytes, args.data_type, &filename, &config, &store)?;
    if let Some(dir) = &args.uploads_dir {
        UploadStore::open(dir)?.save(outcome.data_type, &filename, &bytes)?;
    }
    store.save(&args.state)?;
    print_outcome(&filename, &outcome);
    Ok(())
}

/// Processes every recognizable CSV in a directory. Returns false when
/// any file failed.
pub fn run_batch(args: &BatchArgs) -> Result<bool> {
    let mut config = load_config(args.config.as_deref())?;
    let store = DashboardStore::load(&args.state)?;
    let uploads = args
        .uploads_dir
        .as_ref()
        .map(UploadStore::open)
        .transpose()?;

    let mut csvs: Vec<PathBuf> = std::fs::read_dir(&args.data_dir)
        .with_context(|| format!("read directory {}", args.data_dir.display()))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    csvs.sort();

    // Delete lists first: their IDs are excluded from every roster
    // processed afterwards.
    for path in &csvs {
        let name = file_name(path).to_lowercase();
        if name.contains("member") && name.contains("delete") {
            match collect_delete_list(path) {
                Ok(ids) => {
                    info!(file = %path.display(), count = ids.len(), "loaded member delete list");
                    config.excluded_member_ids.extend(ids);
                }
                Err(error) => warn!(file = %path.display(), %error, "skipped delete list"),
            }
        }
    }

    let mut reports = Vec::new();
    for path in &csvs {
        let filename = file_name(path);
        let lower = filename.to_lowercase();
        if lower.contains("member") && lower.contains("delete") {
            continue;
        }
        if detect_data_type(&filename).is_none() {
            warn!(file = %filename, "unrecognized filename, skipping");
            continue;
        }
        let outcome = std::fs::read(path)
            .with_context(|| format!("read {}", path.display()))
            .and_then(|bytes| {
                let outcome =
                    process_upload(&bytes, DataType::Auto, &filename, &config, &store)?;
                if let Some(uploads) = &uploads {
                    uploads.save(outcome.data_type, &filename, &bytes)?;
                }
                Ok(outcome)
            });
        reports.push(FileReport {
            filename,
            outcome: outcome.map_err(|e| e.to_string()),
        });
    }

    store.save(&args.state)?;
    print_batch(&reports);
    Ok(reports.iter().all(|report| report.outcome.is_ok()))
}

/// Reads member IDs out of a delete-list export: the member-ID column
/// when one resolves, the first column otherwise.
///
/// Delete lists are commonly a single ID column, which the upload
/// prober rejects as a delimiter failure, so this is a plain CSV parse
/// that accepts one column.
fn collect_delete_list(path: &Path) -> Result<Vec<String>> {
    const ID_CANDIDATES: [&str; 4] = ["member_id", "メンバーid", "会員id", "会員番号"];
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record
            .iter()
            .map(|cell| cell.trim().trim_matches('\u{feff}').to_string())
            .collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let headers = rows.remove(0);
    let index = headers
        .iter()
        .position(|header| {
            let lower = header.to_lowercase();
            ID_CANDIDATES.iter().any(|c| lower.contains(c))
        })
        .unwrap_or(0);
    Ok(rows
        .into_iter()
        .filter_map(|mut row| {
            if index < row.len() {
                Some(row.swap_remove(index))
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty())
        .collect())
}

pub fn run_show(args: &StateArgs) -> Result<()> {
    let store = DashboardStore::load(&args.state)
        .context("dashboard state is unavailable")?;
    let json = serde_json::to_string_pretty(&store.snapshot_json())?;
    println!("{json}");
    Ok(())
}

pub fn run_reset(args: &StateArgs) -> Result<()> {
    let store = DashboardStore::load(&args.state)?;
    store.reset();
    store.save(&args.state)?;
    println!("dashboard state reset (competitor data preserved)");
    Ok(())
}

pub fn run_data_types() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Filename match"),
        header_cell("Dashboard section"),
    ]);
    apply_table_style(&mut table);
    for data_type in DataType::CONCRETE {
        let (pattern, section) = match data_type {
            DataType::Members => ("member*", "members, metrics"),
            DataType::Utilization => ("frame*, occupancy*", "utilization"),
            DataType::Competitors => ("competitor*", "competitors"),
            DataType::Finance => ("finance*", "finance"),
            DataType::Sales => ("sales*", "finance"),
            DataType::Reservation => ("reservation*", "reservations"),
            DataType::Auto => continue,
        };
        table.add_row(vec![data_type.to_string(), pattern.into(), section.into()]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_processes_a_directory_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(
            data.join("member_2024.csv"),
            "会員ID,性別,ステータス\n1,男性,在籍\n2,女性,在籍\n3,男性,退会\n",
        )
        .unwrap();
        std::fs::write(
            data.join("member_delete_list.csv"),
            "会員ID\n3\n",
        )
        .unwrap();
        std::fs::write(
            data.join("frame_2024-03.csv"),
            "日付,ルーム名,稼働率\n2024-03-01,Room1,85%\n",
        )
        .unwrap();
        std::fs::write(data.join("notes.csv"), "a,b\n1,2\n").unwrap();

        let state = dir.path().join("state.json");
        let args = BatchArgs {
            data_dir: data,
            uploads_dir: None,
            state: state.clone(),
            config: None,
        };
        assert!(run_batch(&args).unwrap());

        let store = DashboardStore::load(&state).unwrap();
        let snapshot = store.snapshot();
        // Member 3 was on the delete list.
        let members = snapshot.members.unwrap();
        assert_eq!(members.total, 2);
        assert_eq!(members.active, 2);
        assert_eq!(
            snapshot.utilization.unwrap().monthly_rates["2024-03"]["Room1"],
            85.0
        );
    }

    #[test]
    fn delete_list_falls_back_to_first_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("member_delete.csv");
        std::fs::write(&path, "id,reason\n7,退会済\n8,重複\n").unwrap();
        let ids = collect_delete_list(&path).unwrap();
        assert_eq!(ids, vec!["7", "8"]);
    }

    #[test]
    fn single_column_delete_list_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("member_delete_list.csv");
        std::fs::write(&path, "会員ID\n3\n137\n").unwrap();
        let ids = collect_delete_list(&path).unwrap();
        assert_eq!(ids, vec!["3", "137"]);
    }

    #[test]
    fn reset_command_preserves_competitors() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        let store = DashboardStore::default();
        store.reset();
        store.save(&state).unwrap();

        run_reset(&StateArgs {
            state: state.clone(),
        })
        .unwrap();
        let reloaded = DashboardStore::load(&state).unwrap();
        assert!(!reloaded.snapshot().competitors.unwrap().is_empty());
    }
}

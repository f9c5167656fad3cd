//! Tunable analytics configuration.
//!
//! Everything here has a working default so the pipeline runs with no
//! config file at all; a JSON file can override any subset of fields.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Status/roster vocabulary driving the aggregators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Member IDs whose no-show cancellations still count the slot as
    /// occupied (blocks held for staff or recurring bookings).
    pub staff_hold_member_ids: BTreeSet<String>,
    /// Status values meaning a slot was actually used or firmly booked.
    pub occupied_statuses: Vec<String>,
    /// Status values meaning the booking was abandoned without notice.
    pub no_show_statuses: Vec<String>,
    /// Roster status values counting a member as active.
    pub active_statuses: Vec<String>,
    /// Member IDs removed from the roster before aggregation (fed from
    /// a delete-list export in batch mode).
    pub excluded_member_ids: BTreeSet<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            staff_hold_member_ids: ["3", "137", "5576"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            occupied_statuses: [
                "予約済",
                "利用済",
                "reserved",
                "used",
                "confirmed",
                "booked",
                "確定",
            ]
            .map(str::to_string)
            .to_vec(),
            no_show_statuses: ["無断キャンセル", "no-show", "no show", "noshow"]
                .map(str::to_string)
                .to_vec(),
            active_statuses: ["active", "在籍", "有効", "契約中"]
                .map(str::to_string)
                .to_vec(),
            excluded_member_ids: BTreeSet::new(),
        }
    }
}

impl AnalyticsConfig {
    /// Loads config from a JSON file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CoreError::ConfigInvalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };
        serde_json::from_str(&contents).map_err(|e| CoreError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Case-insensitive substring test against `occupied_statuses`.
    /// Export tools vary suffix forms (予約済 vs 予約済み), so the
    /// status matches when it contains a vocabulary token.
    #[must_use]
    pub fn is_occupied_status(&self, status: &str) -> bool {
        status_contains(&self.occupied_statuses, status)
    }

    #[must_use]
    pub fn is_no_show_status(&self, status: &str) -> bool {
        status_contains(&self.no_show_statuses, status)
    }

    /// Roster statuses compare by equality, not containment:
    /// "inactive" contains "active".
    #[must_use]
    pub fn is_active_status(&self, status: &str) -> bool {
        contains_ignore_case(&self.active_statuses, status)
    }

    #[must_use]
    pub fn is_staff_hold(&self, member_id: &str) -> bool {
        self.staff_hold_member_ids.contains(member_id.trim())
    }

    #[must_use]
    pub fn is_excluded_member(&self, member_id: &str) -> bool {
        self.excluded_member_ids.contains(member_id.trim())
    }
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    haystack.iter().any(|s| s.to_lowercase() == needle)
}

fn status_contains(tokens: &[String], status: &str) -> bool {
    let status = status.trim().to_lowercase();
    if status.is_empty() {
        return false;
    }
    tokens.iter().any(|token| status.contains(&token.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_languages() {
        let config = AnalyticsConfig::default();
        assert!(config.is_occupied_status("予約済"));
        assert!(config.is_occupied_status("Reserved"));
        assert!(config.is_no_show_status("無断キャンセル"));
        assert!(config.is_no_show_status("No-Show"));
        assert!(config.is_active_status("在籍"));
        assert!(config.is_staff_hold("137"));
        assert!(!config.is_staff_hold("9999"));
    }

    #[test]
    fn status_suffix_forms_still_match() {
        let config = AnalyticsConfig::default();
        assert!(config.is_occupied_status("予約済み"));
        assert!(config.is_occupied_status("利用済み"));
        assert!(config.is_no_show_status("無断キャンセル(未連絡)"));
        assert!(!config.is_occupied_status("キャンセル"));
        assert!(!config.is_occupied_status(""));
        // Roster statuses stay exact: "inactive" must not count.
        assert!(!config.is_active_status("inactive"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AnalyticsConfig::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, AnalyticsConfig::default());
    }

    #[test]
    fn partial_file_overrides_one_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"staff_hold_member_ids": ["42"]}"#).unwrap();
        let loaded = AnalyticsConfig::load(&path).unwrap();
        assert!(loaded.is_staff_hold("42"));
        assert!(!loaded.is_staff_hold("137"));
        // Untouched fields keep their defaults.
        assert!(loaded.is_occupied_status("利用済"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            AnalyticsConfig::load(&path),
            Err(CoreError::ConfigInvalid { .. })
        ));
    }
}

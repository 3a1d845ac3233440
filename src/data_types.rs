// src/data_types.rs
use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

/// One parsed data line, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord(HashMap<String, String>);

impl RowRecord {
    pub fn new() -> Self {
        RowRecord(HashMap::new())
    }

    pub fn insert(&mut self, column: String, value: String) {
        self.0.insert(column, value);
    }

    /// Missing columns read as empty string.
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Header schema plus rows, regenerated wholesale on every successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<RowRecord>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("A CSV export URL is required.")]
    MissingUrl,
    #[error("Could not fetch the sheet data.")]
    FetchFailed,
    #[error("The sheet contained no usable data.")]
    EmptyOrInvalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Structured payload for the transient banner. The state machine produces
/// these; the shell decides how and whether to display them.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded { at: DateTime<Local> },
    Failed { reason: String },
}

/// Fetch lifecycle plus the last successfully loaded table.
///
/// A failed load keeps the previous data so the table keeps rendering the
/// last good payload next to the error notice.
#[derive(Debug, Clone)]
pub struct SheetState {
    pub fetch: FetchState,
    pub data: Option<TableData>,
    loaded_at: Option<DateTime<Local>>,
}

impl SheetState {
    pub fn new() -> Self {
        SheetState {
            fetch: FetchState::Idle,
            data: None,
            loaded_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchState::Loading)
    }

    /// Enters `Loading`. Returns false if a fetch is already in flight, in
    /// which case the caller must not issue another request.
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.fetch = FetchState::Loading;
        true
    }

    /// Applies a fetch outcome and produces the notice to raise.
    ///
    /// Completions that arrive while the machine is not `Loading` are
    /// abandoned: nothing is mutated and no notice is produced.
    pub fn finish_load(&mut self, result: Result<TableData, LoadError>) -> Option<Notice> {
        if !self.is_loading() {
            return None;
        }
        match result {
            Ok(data) => {
                let rows = data.rows.len();
                let at = Local::now();
                self.data = Some(data);
                self.loaded_at = Some(at);
                self.fetch = FetchState::Loaded { at };
                Some(Notice::success(format!("{} rows loaded.", rows)))
            }
            Err(err) => {
                let reason = err.to_string();
                self.fetch = FetchState::Failed {
                    reason: reason.clone(),
                };
                let description = match err {
                    LoadError::MissingUrl => reason,
                    _ => format!(
                        "{} Check that the sheet is shared with anyone who has the link.",
                        reason
                    ),
                };
                Some(Notice::error(description))
            }
        }
    }

    /// Time of the last successful load. Survives a failed refresh, like
    /// the data it belongs to.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> TableData {
        let mut row = RowRecord::new();
        row.insert("name".to_string(), "amara".to_string());
        TableData {
            headers: vec!["name".to_string()],
            rows: vec![row],
        }
    }

    #[test]
    fn starts_idle_with_no_data() {
        let state = SheetState::new();
        assert_eq!(state.fetch, FetchState::Idle);
        assert!(state.data.is_none());
    }

    #[test]
    fn begin_load_guards_against_overlapping_fetches() {
        let mut state = SheetState::new();
        assert!(state.begin_load());
        assert!(state.is_loading());
        // A second load while one is in flight is a no-op.
        assert!(!state.begin_load());
    }

    #[test]
    fn successful_load_replaces_data_and_reports_row_count() {
        let mut state = SheetState::new();
        state.begin_load();
        let notice = state.finish_load(Ok(sample_data())).expect("notice");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(notice.description.contains("1 rows"));
        assert!(matches!(state.fetch, FetchState::Loaded { .. }));
        assert_eq!(state.data, Some(sample_data()));
        assert!(state.last_updated().is_some());
    }

    #[test]
    fn failed_load_keeps_previous_data() {
        let mut state = SheetState::new();
        state.begin_load();
        state.finish_load(Ok(sample_data()));

        state.begin_load();
        let notice = state
            .finish_load(Err(LoadError::FetchFailed))
            .expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        match &state.fetch {
            FetchState::Failed { reason } => assert!(!reason.is_empty()),
            other => panic!("expected Failed, got {:?}", other),
        }
        // The last good table and its timestamp survive the failed refresh.
        assert_eq!(state.data, Some(sample_data()));
        assert!(state.last_updated().is_some());
    }

    #[test]
    fn retry_is_allowed_after_failure() {
        let mut state = SheetState::new();
        state.begin_load();
        state.finish_load(Err(LoadError::FetchFailed));
        assert!(state.begin_load());
    }

    #[test]
    fn stale_completion_is_abandoned() {
        let mut state = SheetState::new();
        assert!(state.finish_load(Ok(sample_data())).is_none());
        assert_eq!(state.fetch, FetchState::Idle);
        assert!(state.data.is_none());
    }

    #[test]
    fn missing_url_notice_skips_the_sharing_hint() {
        let mut state = SheetState::new();
        state.begin_load();
        let notice = state
            .finish_load(Err(LoadError::MissingUrl))
            .expect("notice");
        assert_eq!(notice.description, "A CSV export URL is required.");
    }

    #[test]
    fn row_record_defaults_missing_columns_to_empty() {
        let row = RowRecord::new();
        assert_eq!(row.get("anything"), "");
    }
}

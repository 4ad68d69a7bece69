#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use strix_baseline::{BaselineFile, BaselineRange, BaselineStore};
use strix_diagnostic::RawDiagnostic;
use strix_ir::{Category, Range};
use strix_rules::Rule;

use crate::cancel::CancelHandle;
use crate::coordinator::Delivered;

use super::*;

/// Engine backed by a fixed path → diagnostics map.
struct MapEngine {
    files: BTreeMap<PathBuf, Vec<RawDiagnostic>>,
}

impl MapEngine {
    fn new(files: impl IntoIterator<Item = (PathBuf, Vec<RawDiagnostic>)>) -> Self {
        MapEngine {
            files: files.into_iter().collect(),
        }
    }
}

impl AnalysisEngine for MapEngine {
    fn analyze(
        &self,
        file: &Path,
        _config: &ConfigSnapshot,
        _cancel: &dyn CancelHandle,
    ) -> Result<Vec<RawDiagnostic>, EngineError> {
        Ok(self.files.get(file).cloned().unwrap_or_default())
    }

    fn project_files(&self, _config: &ConfigSnapshot) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }
}

fn undefined(line: u32, name: &str) -> RawDiagnostic {
    RawDiagnostic::new(
        Rule::UndefinedVariable,
        Range::from_parts(line, 4, line, 9),
        format!("`{name}` is not defined"),
        Category::Error,
    )
}

fn open_session(
    root: &Path,
    files: impl IntoIterator<Item = (PathBuf, Vec<RawDiagnostic>)>,
) -> Session {
    Session::open(
        root,
        Arc::new(MapEngine::new(files)),
        &CheckerConfig::default(),
        2,
    )
    .unwrap()
}

fn await_ready(session: &Session, target: &Target) -> Delivered {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let QueryResult::Ready(delivered) = session.diagnostics(target) {
            return delivered;
        }
        assert!(Instant::now() < deadline, "no result within deadline");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn background_check_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(
        dir.path(),
        [(PathBuf::from("src/app.py"), vec![undefined(3, "x")])],
    );

    let target = Target::file("src/app.py");
    session.request_check(target.clone());
    let Delivered::Diagnostics { files, .. } = await_ready(&session, &target) else {
        panic!("expected diagnostics");
    };
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].visible.len(), 1);
    assert_eq!(files[0].visible[0].rule, Some(Rule::UndefinedVariable));
}

#[test]
fn unqueried_target_is_computing() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(dir.path(), []);
    assert_eq!(
        session.diagnostics(&Target::file("src/never.py")),
        QueryResult::Computing
    );
}

#[test]
fn exhaustive_update_persists_sorted_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(
        dir.path(),
        [
            (PathBuf::from("src/b.py"), vec![undefined(1, "b")]),
            (PathBuf::from("src/a.py"), vec![undefined(2, "a")]),
            (PathBuf::from("src/clean.py"), vec![]),
        ],
    );

    let message = session
        .update_baseline(ScanMode::Exhaustive, &[])
        .unwrap();
    assert_eq!(message, "error count went up by 2");

    let saved = BaselineStore::load(dir.path());
    let keys: Vec<&String> = saved.files.keys().collect();
    assert_eq!(keys, ["src/a.py", "src/b.py"]);
    assert_eq!(
        saved.entries_for("src/a.py")[0].range,
        BaselineRange {
            start_column: 4,
            end_column: 9,
            line_count: Some(1),
        }
    );
}

#[test]
fn repeated_updates_without_changes_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(
        dir.path(),
        [(PathBuf::from("src/app.py"), vec![undefined(3, "x")])],
    );

    session.update_baseline(ScanMode::Exhaustive, &[]).unwrap();
    let first = std::fs::read(BaselineStore::path_in(dir.path())).unwrap();

    let message = session.update_baseline(ScanMode::Exhaustive, &[]).unwrap();
    assert_eq!(message, "error count didn't change");
    let second = std::fs::read(BaselineStore::path_in(dir.path())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn open_files_scan_keeps_unscanned_entries() {
    let dir = tempfile::tempdir().unwrap();

    // Seed a baseline for a file that is neither open nor on disk.
    let mut seeded = BaselineFile::empty();
    seeded.insert(
        "src/closed.py".to_string(),
        vec![strix_baseline::BaselineEntry {
            code: Some("undefined-variable".to_string()),
            range: BaselineRange {
                start_column: 0,
                end_column: 3,
                line_count: Some(1),
            },
        }],
    );
    BaselineStore::save(dir.path(), &seeded).unwrap();

    let session = open_session(
        dir.path(),
        [(PathBuf::from("src/open.py"), vec![undefined(8, "q")])],
    );
    let message = session
        .update_baseline(ScanMode::OpenFilesOnly, &[PathBuf::from("src/open.py")])
        .unwrap();
    assert_eq!(message, "error count went up by 1");

    let saved = BaselineStore::load(dir.path());
    assert_eq!(saved.entries_for("src/closed.py").len(), 1);
    assert_eq!(saved.entries_for("src/open.py").len(), 1);
}

#[test]
fn exhaustive_update_prunes_files_confirmed_gone() {
    let dir = tempfile::tempdir().unwrap();

    let mut seeded = BaselineFile::empty();
    seeded.insert(
        "src/deleted.py".to_string(),
        vec![strix_baseline::BaselineEntry {
            code: Some("undefined-variable".to_string()),
            range: BaselineRange {
                start_column: 0,
                end_column: 9,
                line_count: Some(1),
            },
        }],
    );
    BaselineStore::save(dir.path(), &seeded).unwrap();

    let session = open_session(dir.path(), []);
    let message = session
        .update_baseline(ScanMode::Exhaustive, &[])
        .unwrap();
    assert_eq!(message, "error count went down by 1");
    assert!(BaselineStore::load(dir.path()).is_empty());
}

#[test]
fn summary_counts_only_error_category_entries() {
    let dir = tempfile::tempdir().unwrap();
    // One error-category diagnostic and one warning-category one. Both land
    // in the baseline, but only the error moves the reported count.
    let session = open_session(
        dir.path(),
        [(
            PathBuf::from("src/app.py"),
            vec![
                undefined(3, "x"),
                RawDiagnostic::new(
                    Rule::UnreachableCode,
                    Range::from_parts(9, 0, 9, 12),
                    "code is unreachable",
                    Category::Warning,
                ),
            ],
        )],
    );

    let message = session.update_baseline(ScanMode::Exhaustive, &[]).unwrap();
    assert_eq!(message, "error count went up by 1");
    assert_eq!(BaselineStore::load(dir.path()).total_entries(), 2);
}

#[test]
fn update_after_baseline_suppresses_on_next_check() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(
        dir.path(),
        [(PathBuf::from("src/app.py"), vec![undefined(3, "x")])],
    );

    session
        .update_baseline(ScanMode::Exhaustive, &[])
        .unwrap();

    let target = Target::file("src/app.py");
    session.request_check(target.clone());
    let Delivered::Diagnostics { files, .. } = await_ready(&session, &target) else {
        panic!("expected diagnostics");
    };
    assert!(files[0].visible.is_empty());
}

#[test]
fn invalid_reload_is_rejected_and_previous_config_stays() {
    let dir = tempfile::tempdir().unwrap();
    let session = open_session(
        dir.path(),
        [(PathBuf::from("src/app.py"), vec![undefined(3, "x")])],
    );

    let bad: CheckerConfig =
        serde_json::from_value(serde_json::json!({ "rules": { "no-such-rule": "error" } }))
            .unwrap();
    let err = session.reload_config(&bad, &RuleOverrides::new()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownRule {
            key: "no-such-rule".to_string(),
        }
    );

    // Analysis still runs under the previous, valid configuration.
    let target = Target::file("src/app.py");
    session.request_check(target.clone());
    let Delivered::Diagnostics { files, .. } = await_ready(&session, &target) else {
        panic!("expected diagnostics");
    };
    assert_eq!(files[0].visible.len(), 1);
}

//! Shared helpers for integration tests.

use enertool::input::Prompter;
use enertool::menu::{self, Session};
use enertool::report::ReportStore;
use enertool::usage_log::UsageLog;

/// Builds a session whose stores live in a fresh temp directory.
pub fn temp_session() -> (tempfile::TempDir, Session) {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = Session {
        report: ReportStore::new(dir.path().join("report.txt")),
        usage: UsageLog::new(dir.path().join("energy_log.csv")),
        emission_factor: 0.233,
    };
    (dir, session)
}

/// Drives the menu loop with scripted input and returns everything written
/// to the output sink.
pub fn run_menu(session: &Session, script: &str) -> String {
    let mut p = Prompter::new(script.as_bytes(), Vec::<u8>::new());
    menu::run(session, &mut p).expect("menu run should complete");
    String::from_utf8(p.into_output()).expect("utf-8 output")
}

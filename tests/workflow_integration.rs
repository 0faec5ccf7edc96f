// End-to-end scenarios through the public API
//
// Each test drives one flow the way the desktop shell would: feed user
// actions into a panel, fast-forward virtual time, and check what the
// panel ends up showing.

use std::time::Duration;

use prepvista::files::SelectedFile;
use prepvista::panels::interview::{InterviewPanel, InterviewStage, InterviewType};
use prepvista::panels::reports::{ReportEntry, ReportKind, ReportsPanel};
use prepvista::panels::resume::{Rating, ResumePanel, ResumeStage};
use prepvista::session::AuthMode;
use prepvista::{
    AppConfig, AppContext, DevicePermissions, Panel, PrepVistaError, SectionId, Shell,
    SimulatedDevices, SimulatedIdentityProvider, Timings, export,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

fn shell() -> Shell {
    let ctx = AppContext::new(
        Box::new(SimulatedDevices::new(DevicePermissions::default())),
        StdRng::seed_from_u64(42),
        Timings::default(),
    );
    Shell::new(Box::new(SimulatedIdentityProvider), ctx)
}

#[test]
fn test_resume_scenario() {
    let timings = Timings::default();
    let mut panel = ResumePanel::new(timings.resume_analysis());
    assert_eq!(panel.stage(), ResumeStage::NoFile);
    assert!(!panel.can_analyze());

    let docx = SelectedFile::new("resume.docx", None, 20_000);
    assert!(matches!(
        panel.select_file(docx),
        Err(PrepVistaError::UnsupportedFileType { .. })
    ));
    assert!(!panel.can_analyze());
    assert!(panel.last_error().is_some());

    let pdf = SelectedFile::new("resume.pdf", Some("application/pdf"), 250_000);
    panel.select_file(pdf).unwrap();
    assert!(panel.can_analyze());
    panel.analyze().unwrap();
    assert_eq!(panel.stage(), ResumeStage::Analyzing);

    panel.advance(timings.resume_analysis() - Duration::from_millis(1));
    assert_eq!(panel.stage(), ResumeStage::Analyzing);
    panel.advance(Duration::from_millis(1));
    assert_eq!(panel.stage(), ResumeStage::Result);

    let report = panel.report().unwrap();
    assert!(report.ats_score <= 100);
    assert_eq!(report.overall_rating, Rating::from_score(report.ats_score));
    assert!(["A", "B", "C", "D", "F"].contains(&report.overall_rating.letter()));
    assert!(!report.strengths.is_empty());
    assert!(!report.weaknesses.is_empty());
    assert!(!report.suggestions.is_empty());
}

#[test]
fn test_oversized_pdf_is_rejected() {
    let mut panel = ResumePanel::new(Duration::from_secs(3));
    let big = SelectedFile::new("resume.pdf", Some("application/pdf"), 11 * 1024 * 1024);
    assert!(matches!(
        panel.select_file(big),
        Err(PrepVistaError::FileTooLarge { .. })
    ));
    assert_eq!(panel.stage(), ResumeStage::NoFile);
}

#[test]
fn test_interview_ended_manually_at_five_minutes() {
    let mut devices = SimulatedDevices::new(DevicePermissions::default());
    let mut rng = StdRng::seed_from_u64(1);
    let mut panel = InterviewPanel::new(Timings::default().metrics_refresh());
    panel.setup.interview_type = InterviewType::Technical;
    panel.setup.duration_minutes = 15;

    panel.start(&mut devices).unwrap();
    assert_eq!(panel.time_remaining_s(), Some(15 * 60));
    assert_eq!(devices.open_streams(), 1);

    panel.next_question();
    panel.advance(Duration::from_secs(150), &mut devices, &mut rng);
    panel.next_question();
    panel.advance(Duration::from_secs(150), &mut devices, &mut rng);
    assert_eq!(panel.time_remaining_s(), Some(10 * 60));

    panel.end(&mut devices);
    assert_eq!(panel.stage(), InterviewStage::Complete);
    assert_eq!(devices.open_streams(), 0);

    let summary = panel.summary().unwrap();
    assert_eq!(summary.interview_type, InterviewType::Technical);
    assert_eq!(summary.duration_minutes, 5);
    assert_eq!(summary.questions_answered, 3);
    assert!(summary.overall_score <= 100);
}

#[test]
fn test_interview_runs_out_of_time() {
    let mut devices = SimulatedDevices::new(DevicePermissions::default());
    let mut rng = StdRng::seed_from_u64(9);
    let mut panel = InterviewPanel::new(Duration::from_secs(2));
    panel.setup.duration_minutes = 15;
    panel.start(&mut devices).unwrap();

    panel.advance(Duration::from_secs(15 * 60), &mut devices, &mut rng);
    assert_eq!(panel.stage(), InterviewStage::Complete);
    assert_eq!(panel.summary().unwrap().duration_minutes, 15);
    assert_eq!(devices.open_streams(), 0);
}

#[test]
fn test_sign_in_then_navigate() {
    let mut shell = shell();
    assert!(!shell.is_authenticated());
    assert_eq!(shell.auth.mode(), AuthMode::Login);

    assert!(shell.auth.submit_login("alex@example.com", "secret"));
    assert!(!shell.auth.submit_login("alex@example.com", "secret"));
    shell.advance(Duration::from_millis(500));
    assert!(!shell.is_authenticated());
    shell.advance(Duration::from_millis(500));
    assert!(shell.is_authenticated());

    let (workspace, ctx) = shell.workspace_mut().unwrap();
    assert_eq!(workspace.active_section(), SectionId::Dashboard);
    workspace.navigate(SectionId::Resume, ctx);
    assert!(matches!(workspace.panel(), Panel::Resume(_)));

    shell.sign_out();
    assert!(!shell.is_authenticated());
    assert!(shell.workspace().is_none());
}

#[test]
fn test_exported_reports_read_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.jsonl");
    let mut panel = ReportsPanel::default();
    panel.kind_filter = Some(ReportKind::Interview);

    let written = panel.export(&path).unwrap();
    let read: Vec<ReportEntry> = export::read_json_lines(&path).unwrap();
    assert_eq!(read.len(), written);
    assert!(read.iter().all(|r| r.kind == ReportKind::Interview));
}

#[test]
fn test_config_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let mut config = AppConfig::default();
    config.sidebar_collapsed = true;
    config.rng_seed = Some(1234);
    config.device_permissions.camera = false;
    config.save_to(&path).unwrap();

    let loaded = AppConfig::from_path(&path).unwrap();
    assert!(loaded.sidebar_collapsed);
    assert_eq!(loaded.rng_seed, Some(1234));
    assert!(!loaded.device_permissions.camera);
    assert_eq!(loaded.timings, Timings::default());
}

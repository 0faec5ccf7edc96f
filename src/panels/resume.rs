use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::PrepVistaError;
use crate::files::SelectedFile;
use crate::scheduler::Scheduler;
use crate::workflow::{PhaseMachine, Workflow};

/// Letter grade derived from an ATS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    A,
    B,
    C,
    D,
    F,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => Rating::A,
            70..=84 => Rating::B,
            55..=69 => Rating::C,
            40..=54 => Rating::D,
            _ => Rating::F,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
            Rating::F => "F",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeReport {
    pub ats_score: u8,
    pub overall_rating: Rating,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ResumeReport {
    fn sample() -> Self {
        let ats_score = 87;
        Self {
            ats_score,
            overall_rating: Rating::from_score(ats_score),
            strengths: [
                "Strong technical skills section",
                "Clear work experience descriptions",
                "Proper formatting and structure",
                "Relevant keywords present",
            ]
            .map(String::from)
            .to_vec(),
            weaknesses: [
                "Missing soft skills section",
                "Could include more metrics",
                "Education section needs improvement",
            ]
            .map(String::from)
            .to_vec(),
            suggestions: [
                "Add a professional summary at the top",
                "Include more quantifiable achievements",
                "Optimize for applicant tracking systems",
                "Consider adding relevant certifications",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeSubmission {
    pub file: SelectedFile,
    pub job_description: String,
}

pub struct ResumeAnalyzer {
    delay: Duration,
}

impl Workflow for ResumeAnalyzer {
    type Session = ResumeSubmission;
    type Report = ResumeReport;

    fn name(&self) -> &'static str {
        "resume analysis"
    }

    fn validate(&self, session: &ResumeSubmission) -> Result<(), PrepVistaError> {
        session.file.check_resume()
    }

    fn processing_delay(&self, _session: &ResumeSubmission) -> Option<Duration> {
        Some(self.delay)
    }

    fn finish(&self, _session: &ResumeSubmission) -> ResumeReport {
        ResumeReport::sample()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeStage {
    NoFile,
    FileSelected,
    Analyzing,
    Result,
}

#[derive(Debug, Clone, PartialEq)]
enum ResumeTimer {
    AnalysisDone,
}

pub struct ResumePanel {
    machine: PhaseMachine<ResumeAnalyzer>,
    scheduler: Scheduler<ResumeTimer>,
    selected: Option<SelectedFile>,
    pub job_description: String,
    last_error: Option<String>,
}

impl ResumePanel {
    pub fn new(delay: Duration) -> Self {
        Self {
            machine: PhaseMachine::new(ResumeAnalyzer { delay }),
            scheduler: Scheduler::new(),
            selected: None,
            job_description: String::new(),
            last_error: None,
        }
    }

    pub fn stage(&self) -> ResumeStage {
        if self.machine.is_done() {
            ResumeStage::Result
        } else if self.machine.is_processing() {
            ResumeStage::Analyzing
        } else if self.selected.is_some() {
            ResumeStage::FileSelected
        } else {
            ResumeStage::NoFile
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Accepts a PDF within the size limit. A rejected file leaves the current
    /// selection untouched.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), PrepVistaError> {
        if !self.machine.is_idle() {
            return Err(PrepVistaError::invalid_transition(
                self.machine.workflow().name(),
                "select a file",
                self.machine.phase().label(),
            ));
        }
        if let Err(e) = file.check_resume() {
            warn!("Rejected resume upload: {e}");
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        info!("Selected resume {} ({:.2} MB)", file.name, file.size_mb());
        self.last_error = None;
        self.selected = Some(file);
        Ok(())
    }

    pub fn remove_file(&mut self) {
        if self.machine.is_idle() {
            self.selected = None;
        }
    }

    pub fn can_analyze(&self) -> bool {
        self.stage() == ResumeStage::FileSelected
    }

    pub fn analyze(&mut self) -> Result<(), PrepVistaError> {
        if !self.machine.is_idle() {
            return Err(PrepVistaError::invalid_transition(
                self.machine.workflow().name(),
                "analyze",
                self.machine.phase().label(),
            ));
        }
        let file = self.selected.clone().ok_or(PrepVistaError::NoFileSelected)?;
        let submission = ResumeSubmission {
            file,
            job_description: self.job_description.clone(),
        };
        self.machine
            .begin(submission, &mut self.scheduler, ResumeTimer::AnalysisDone)
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.horizon(elapsed);
        while let Some(timer) = self.scheduler.poll(until) {
            match timer {
                ResumeTimer::AnalysisDone => {
                    if let Ok(report) = self.machine.complete(&mut self.scheduler) {
                        info!("Resume analysis finished, ATS score {}", report.ats_score);
                    }
                }
            }
        }
    }

    pub fn report(&self) -> Option<&ResumeReport> {
        self.machine.report()
    }

    /// "Analyze New Resume": back to an empty upload.
    pub fn start_over(&mut self) {
        self.machine.reset(&mut self.scheduler);
        self.selected = None;
        self.last_error = None;
    }

    pub fn exit(&mut self) {
        self.scheduler.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(3);

    fn pdf() -> SelectedFile {
        SelectedFile::new("resume.pdf", Some("application/pdf"), 250_000)
    }

    #[test]
    fn test_analyze_unavailable_without_file() {
        let mut panel = ResumePanel::new(DELAY);
        assert_eq!(panel.stage(), ResumeStage::NoFile);
        assert!(!panel.can_analyze());
        assert!(matches!(panel.analyze(), Err(PrepVistaError::NoFileSelected)));
        assert_eq!(panel.stage(), ResumeStage::NoFile);
    }

    #[test]
    fn test_non_pdf_rejected_without_state_change() {
        let mut panel = ResumePanel::new(DELAY);
        let docx = SelectedFile::new("resume.docx", Some("application/msword"), 1000);
        assert!(panel.select_file(docx).is_err());
        assert_eq!(panel.stage(), ResumeStage::NoFile);
        assert!(panel.last_error().is_some());

        panel.select_file(pdf()).unwrap();
        let png = SelectedFile::new("photo.png", Some("image/png"), 1000);
        assert!(panel.select_file(png).is_err());
        assert_eq!(panel.selected_file(), Some(&pdf()));
    }

    #[test]
    fn test_result_after_delay() {
        let mut panel = ResumePanel::new(DELAY);
        panel.select_file(pdf()).unwrap();
        assert!(panel.can_analyze());
        panel.analyze().unwrap();
        assert_eq!(panel.stage(), ResumeStage::Analyzing);

        panel.advance(Duration::from_millis(2999));
        assert_eq!(panel.stage(), ResumeStage::Analyzing);
        panel.advance(Duration::from_millis(1));
        assert_eq!(panel.stage(), ResumeStage::Result);

        let report = panel.report().unwrap();
        assert!(report.ats_score <= 100);
        assert_eq!(report.overall_rating, Rating::from_score(report.ats_score));
        assert!(!report.strengths.is_empty());
        assert!(!report.weaknesses.is_empty());
        assert!(!report.suggestions.is_empty());
    }

    #[test]
    fn test_start_over_clears_file() {
        let mut panel = ResumePanel::new(DELAY);
        panel.select_file(pdf()).unwrap();
        panel.analyze().unwrap();
        panel.advance(DELAY);
        panel.start_over();
        assert_eq!(panel.stage(), ResumeStage::NoFile);
        assert!(panel.report().is_none());
    }

    #[test]
    fn test_exit_cancels_pending_analysis() {
        let mut panel = ResumePanel::new(DELAY);
        panel.select_file(pdf()).unwrap();
        panel.analyze().unwrap();
        panel.exit();
        panel.advance(Duration::from_secs(60));
        assert_eq!(panel.stage(), ResumeStage::Analyzing);
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(Rating::from_score(100), Rating::A);
        assert_eq!(Rating::from_score(85), Rating::A);
        assert_eq!(Rating::from_score(84), Rating::B);
        assert_eq!(Rating::from_score(55), Rating::C);
        assert_eq!(Rating::from_score(40), Rating::D);
        assert_eq!(Rating::from_score(0), Rating::F);
    }
}

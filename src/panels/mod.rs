// Headless models for every top-level panel.

pub mod dashboard;
pub mod help;
pub mod interview;
pub mod library;
pub mod profile;
pub mod reports;
pub mod resume;
pub mod settings;
pub mod video;

use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{AppConfig, Timings};
use crate::devices::{MediaDevices, SimulatedDevices};
use crate::navigation::SectionId;
use crate::session::User;

use dashboard::DashboardPanel;
use help::HelpPanel;
use interview::InterviewPanel;
use library::LibraryPanel;
use profile::ProfilePanel;
use reports::ReportsPanel;
use resume::ResumePanel;
use settings::SettingsPanel;
use video::VideoPanel;

/// Result of a filter. Views render an explicit empty state for `Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filtered<'a, T> {
    Matches(Vec<&'a T>),
    Empty,
}

impl<'a, T> Filtered<'a, T> {
    pub fn from_matches(matches: Vec<&'a T>) -> Self {
        if matches.is_empty() {
            Filtered::Empty
        } else {
            Filtered::Matches(matches)
        }
    }

    pub fn items(&self) -> &[&'a T] {
        match self {
            Filtered::Matches(items) => items,
            Filtered::Empty => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Filtered::Empty)
    }
}

/// Outcome of a save-style action. No action in the application stores
/// anything beyond the panel that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    NotPersisted,
}

impl CommitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CommitOutcome::NotPersisted => "Saved for this session only, changes are not stored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => ScoreBand::Good,
            70..=84 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

/// Formats seconds as `mm:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Capabilities shared by every panel.
pub struct AppContext {
    pub devices: Box<dyn MediaDevices>,
    pub rng: StdRng,
    pub timings: Timings,
}

impl AppContext {
    pub fn new(devices: Box<dyn MediaDevices>, rng: StdRng, timings: Timings) -> Self {
        Self {
            devices,
            rng,
            timings,
        }
    }

    /// Simulated devices with the configured permissions, and an RNG seeded
    /// from the config when a seed is set.
    pub fn from_config(config: &AppConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => {
                debug!("Seeding RNG with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::new(
            Box::new(SimulatedDevices::new(config.device_permissions)),
            rng,
            config.timings,
        )
    }
}

/// The panel shown for the active section. Exactly one exists at a time.
pub enum Panel {
    Dashboard(DashboardPanel),
    Resume(ResumePanel),
    Video(VideoPanel),
    Interview(InterviewPanel),
    Reports(ReportsPanel),
    Library(LibraryPanel),
    Profile(ProfilePanel),
    Settings(SettingsPanel),
    Help(HelpPanel),
}

impl Panel {
    /// Builds a fresh panel for `section`.
    pub fn enter(section: SectionId, user: &User, timings: &Timings) -> Self {
        info!("Entering {section}");
        match section {
            SectionId::Dashboard => Panel::Dashboard(DashboardPanel::new(user)),
            SectionId::Resume => Panel::Resume(ResumePanel::new(timings.resume_analysis())),
            SectionId::Video => Panel::Video(VideoPanel::new(
                timings.video_analysis(),
                timings.max_recording_s,
            )),
            SectionId::Interview => {
                Panel::Interview(InterviewPanel::new(timings.metrics_refresh()))
            }
            SectionId::Reports => Panel::Reports(ReportsPanel::default()),
            SectionId::Library => Panel::Library(LibraryPanel::default()),
            SectionId::Profile => Panel::Profile(ProfilePanel::new(user)),
            SectionId::Settings => Panel::Settings(SettingsPanel::new(user)),
            SectionId::Help => Panel::Help(HelpPanel::default()),
        }
    }

    pub fn section(&self) -> SectionId {
        match self {
            Panel::Dashboard(_) => SectionId::Dashboard,
            Panel::Resume(_) => SectionId::Resume,
            Panel::Video(_) => SectionId::Video,
            Panel::Interview(_) => SectionId::Interview,
            Panel::Reports(_) => SectionId::Reports,
            Panel::Library(_) => SectionId::Library,
            Panel::Profile(_) => SectionId::Profile,
            Panel::Settings(_) => SectionId::Settings,
            Panel::Help(_) => SectionId::Help,
        }
    }

    /// Drives the panel's timers forward. Static panels have none.
    pub fn advance(&mut self, elapsed: Duration, ctx: &mut AppContext) {
        match self {
            Panel::Resume(panel) => panel.advance(elapsed),
            Panel::Video(panel) => panel.advance(elapsed, ctx.devices.as_mut()),
            Panel::Interview(panel) => {
                panel.advance(elapsed, ctx.devices.as_mut(), &mut ctx.rng)
            }
            _ => {}
        }
    }

    /// Cancels every timer and releases every stream the panel holds.
    pub fn exit(&mut self, ctx: &mut AppContext) {
        debug!("Leaving {}", self.section());
        match self {
            Panel::Resume(panel) => panel.exit(),
            Panel::Video(panel) => panel.exit(ctx.devices.as_mut()),
            Panel::Interview(panel) => panel.exit(ctx.devices.as_mut()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(30 * 60), "30:00");
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(85), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(84), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(69), ScoreBand::Poor);
    }

    #[test]
    fn test_entered_panel_matches_section() {
        let user = User::demo();
        let timings = Timings::default();
        for section in SectionId::ALL {
            assert_eq!(Panel::enter(section, &user, &timings).section(), section);
        }
    }

    #[test]
    fn test_unpersisted_commit_is_reported() {
        let message = CommitOutcome::NotPersisted.message();
        assert!(message.contains("not stored"));
    }

    #[test]
    fn test_filtered_empty() {
        let values = [1, 2, 3];
        let none: Filtered<'_, i32> = Filtered::from_matches(Vec::new());
        assert!(none.is_empty());
        assert_eq!(none.len(), 0);
        let some = Filtered::from_matches(values.iter().collect());
        assert_eq!(some.len(), 3);
    }
}

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::PrepVistaError;

/// Every top-level panel of the application. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Dashboard,
    Resume,
    Video,
    Interview,
    Reports,
    Library,
    Profile,
    Settings,
    Help,
}

impl SectionId {
    /// Sidebar order.
    pub const ALL: [SectionId; 9] = [
        SectionId::Dashboard,
        SectionId::Resume,
        SectionId::Video,
        SectionId::Interview,
        SectionId::Reports,
        SectionId::Library,
        SectionId::Profile,
        SectionId::Settings,
        SectionId::Help,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "dashboard",
            SectionId::Resume => "resume",
            SectionId::Video => "video",
            SectionId::Interview => "interview",
            SectionId::Reports => "reports",
            SectionId::Library => "library",
            SectionId::Profile => "profile",
            SectionId::Settings => "settings",
            SectionId::Help => "help",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "Dashboard",
            SectionId::Resume => "Resume Analysis",
            SectionId::Video => "Video Practice",
            SectionId::Interview => "Live Interview",
            SectionId::Reports => "Reports",
            SectionId::Library => "Roadmaps",
            SectionId::Profile => "Profile",
            SectionId::Settings => "Settings",
            SectionId::Help => "Help & Support",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "🏠",
            SectionId::Resume => "📄",
            SectionId::Video => "🎥",
            SectionId::Interview => "👥",
            SectionId::Reports => "📊",
            SectionId::Library => "📚",
            SectionId::Profile => "👤",
            SectionId::Settings => "⚙",
            SectionId::Help => "❓",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SectionId {
    type Err = PrepVistaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| PrepVistaError::UnknownSection { id: s.to_string() })
    }
}

/// Single source of truth for which panel is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRouter {
    active: SectionId,
}

impl Default for SectionRouter {
    fn default() -> Self {
        Self {
            active: SectionId::Dashboard,
        }
    }
}

impl SectionRouter {
    pub fn active_section(&self) -> SectionId {
        self.active
    }

    /// Returns true if the active section changed.
    pub fn set_active_section(&mut self, section: SectionId) -> bool {
        if self.active == section {
            return false;
        }
        debug!("Section {} -> {}", self.active.id(), section.id());
        self.active = section;
        true
    }

    pub fn is_active(&self, section: SectionId) -> bool {
        self.active == section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for section in SectionId::ALL {
            assert_eq!(section.id().parse::<SectionId>().unwrap(), section);
        }
    }

    #[test]
    fn test_unknown_id_fails_loudly() {
        let err = "billing".parse::<SectionId>().unwrap_err();
        assert!(matches!(err, PrepVistaError::UnknownSection { ref id } if id == "billing"));
    }

    #[test]
    fn test_router_starts_on_dashboard() {
        let router = SectionRouter::default();
        assert_eq!(router.active_section(), SectionId::Dashboard);
    }

    #[test]
    fn test_router_reports_change() {
        let mut router = SectionRouter::default();
        assert!(router.set_active_section(SectionId::Help));
        assert!(!router.set_active_section(SectionId::Help));
        assert!(router.is_active(SectionId::Help));
        assert!(!router.is_active(SectionId::Dashboard));
    }
}

use serde::{Deserialize, Serialize};

use crate::panels::reports::ReportKind;
use crate::session::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub resume_score: u8,
    pub interview_count: u32,
    pub success_rate: u8,
    pub total_sessions: u32,
    pub improvement: u8,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            resume_score: 87,
            interview_count: 12,
            success_rate: 89,
            total_sessions: 45,
            improvement: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingInterview {
    pub company: &'static str,
    pub position: &'static str,
    pub date: &'static str,
    pub time: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub kind: ReportKind,
    pub action: &'static str,
    pub score: u8,
    pub when: &'static str,
}

pub const UPCOMING_INTERVIEWS: [UpcomingInterview; 3] = [
    UpcomingInterview {
        company: "Google",
        position: "Software Engineer",
        date: "2024-01-15",
        time: "10:00 AM",
    },
    UpcomingInterview {
        company: "Microsoft",
        position: "Product Manager",
        date: "2024-01-18",
        time: "2:30 PM",
    },
    UpcomingInterview {
        company: "Amazon",
        position: "Data Scientist",
        date: "2024-01-20",
        time: "11:15 AM",
    },
];

pub const RECENT_ACTIVITY: [Activity; 3] = [
    Activity {
        kind: ReportKind::Resume,
        action: "Resume analyzed",
        score: 87,
        when: "2 hours ago",
    },
    Activity {
        kind: ReportKind::Video,
        action: "Video practice completed",
        score: 92,
        when: "1 day ago",
    },
    Activity {
        kind: ReportKind::Interview,
        action: "Mock interview finished",
        score: 78,
        when: "3 days ago",
    },
];

/// Landing panel. Everything but the greeting is mock data.
#[derive(Debug, Clone)]
pub struct DashboardPanel {
    user_name: String,
    pub stats: DashboardStats,
}

impl DashboardPanel {
    pub fn new(user: &User) -> Self {
        Self {
            user_name: user.name.clone(),
            stats: DashboardStats::default(),
        }
    }

    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.user_name)
    }

    /// Labelled progress bars shown next to the resume score ring.
    pub fn skill_bars(&self) -> [(&'static str, u8); 3] {
        [
            ("Interview Skills", self.stats.success_rate),
            ("Communication", 85),
            ("Confidence", 78),
        ]
    }

    pub fn upcoming(&self) -> &'static [UpcomingInterview] {
        &UPCOMING_INTERVIEWS
    }

    pub fn recent_activity(&self) -> &'static [Activity] {
        &RECENT_ACTIVITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::ScoreBand;

    #[test]
    fn test_greets_current_user() {
        let panel = DashboardPanel::new(&User::demo());
        assert_eq!(panel.greeting(), "Welcome back, Alex Johnson!");
        assert_eq!(panel.stats.resume_score, 87);
    }

    #[test]
    fn test_activity_bands() {
        let bands: Vec<ScoreBand> = RECENT_ACTIVITY
            .iter()
            .map(|a| ScoreBand::from_score(a.score))
            .collect();
        assert_eq!(bands, vec![ScoreBand::Good, ScoreBand::Good, ScoreBand::Fair]);
    }
}

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PrepVistaError;
use crate::export;
use crate::panels::Filtered;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Resume,
    Video,
    Interview,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Resume, ReportKind::Video, ReportKind::Interview];

    pub fn icon(&self) -> &'static str {
        match self {
            ReportKind::Resume => "📄",
            ReportKind::Video => "🎥",
            ReportKind::Interview => "👥",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Resume => write!(f, "resume"),
            ReportKind::Video => write!(f, "video"),
            ReportKind::Interview => write!(f, "interview"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = PrepVistaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PrepVistaError::InvalidInput {
                field: "report kind".to_string(),
                reason: format!("'{s}' is not one of resume, video, interview"),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: u32,
    pub kind: ReportKind,
    pub title: String,
    pub date: String,
    pub score: u8,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportsOverview {
    pub total_sessions: u32,
    pub average_score: u8,
    pub improvement: u8,
    pub hours_spent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Week, Period::Month, Period::Quarter, Period::Year];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "This Week",
            Period::Month => "This Month",
            Period::Quarter => "This Quarter",
            Period::Year => "This Year",
        }
    }
}

pub const SKILLS: [(&str, u8); 5] = [
    ("Technical", 85),
    ("Communication", 78),
    ("Problem Solving", 82),
    ("Leadership", 75),
    ("Teamwork", 88),
];

pub const MONTHLY_PROGRESS: [(&str, u8); 5] = [
    ("Sep", 65),
    ("Oct", 72),
    ("Nov", 78),
    ("Dec", 81),
    ("Jan", 82),
];

pub fn sample_reports() -> Vec<ReportEntry> {
    [
        (1, ReportKind::Resume, "Resume Analysis Report", "2024-01-15", 87),
        (2, ReportKind::Video, "Video Interview Practice", "2024-01-14", 79),
        (3, ReportKind::Interview, "Live Technical Interview", "2024-01-12", 85),
        (4, ReportKind::Video, "Behavioral Interview Practice", "2024-01-10", 73),
    ]
    .into_iter()
    .map(|(id, kind, title, date, score)| ReportEntry {
        id,
        kind,
        title: title.to_string(),
        date: date.to_string(),
        score,
        status: "completed".to_string(),
    })
    .collect()
}

pub struct ReportsPanel {
    pub overview: ReportsOverview,
    reports: Vec<ReportEntry>,
    pub kind_filter: Option<ReportKind>,
    /// Display only, nothing is recomputed per period.
    pub period: Period,
}

impl Default for ReportsPanel {
    fn default() -> Self {
        Self {
            overview: ReportsOverview {
                total_sessions: 45,
                average_score: 82,
                improvement: 15,
                hours_spent: 12.5,
            },
            reports: sample_reports(),
            kind_filter: None,
            period: Period::Month,
        }
    }
}

impl ReportsPanel {
    pub fn reports(&self) -> &[ReportEntry] {
        &self.reports
    }

    pub fn filtered(&self) -> Filtered<'_, ReportEntry> {
        filter_reports(&self.reports, self.kind_filter)
    }

    /// Writes the currently visible reports as JSON lines.
    pub fn export(&self, path: &Path) -> Result<usize, PrepVistaError> {
        let visible: Vec<&ReportEntry> = self.filtered().items().to_vec();
        export::write_json_lines(path, &visible)
    }
}

pub fn filter_reports(
    reports: &[ReportEntry],
    kind: Option<ReportKind>,
) -> Filtered<'_, ReportEntry> {
    Filtered::from_matches(
        reports
            .iter()
            .filter(|r| kind.is_none_or(|k| r.kind == k))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filter_by_kind() {
        let mut panel = ReportsPanel::default();
        assert_eq!(panel.filtered().len(), 4);
        panel.kind_filter = Some(ReportKind::Video);
        let ids: Vec<u32> = panel.filtered().items().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_filter_empty_state() {
        let reports: Vec<ReportEntry> = sample_reports()
            .into_iter()
            .filter(|r| r.kind != ReportKind::Interview)
            .collect();
        assert_eq!(
            filter_reports(&reports, Some(ReportKind::Interview)),
            Filtered::Empty
        );
    }

    #[test]
    fn test_export_writes_visible_reports() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports.jsonl");
        let mut panel = ReportsPanel::default();
        panel.kind_filter = Some(ReportKind::Resume);

        assert_eq!(panel.export(&path).unwrap(), 1);
        let back: Vec<ReportEntry> = export::read_json_lines(&path).unwrap();
        assert_eq!(back[0].title, "Resume Analysis Report");
        assert_eq!(back[0].kind, ReportKind::Resume);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Video".parse::<ReportKind>().unwrap(), ReportKind::Video);
        assert!("podcast".parse::<ReportKind>().is_err());
    }
}

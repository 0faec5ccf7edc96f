use crate::panels::Filtered;

pub const SUPPORT_EMAIL: &str = "support@prepvista.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpCategory {
    GettingStarted,
    ResumeAnalysis,
    VideoPractice,
    LiveInterview,
    Reports,
    Account,
}

impl HelpCategory {
    pub const ALL: [HelpCategory; 6] = [
        HelpCategory::GettingStarted,
        HelpCategory::ResumeAnalysis,
        HelpCategory::VideoPractice,
        HelpCategory::LiveInterview,
        HelpCategory::Reports,
        HelpCategory::Account,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HelpCategory::GettingStarted => "Getting Started",
            HelpCategory::ResumeAnalysis => "Resume Analysis",
            HelpCategory::VideoPractice => "Video Practice",
            HelpCategory::LiveInterview => "Live Interview",
            HelpCategory::Reports => "Reports & Analytics",
            HelpCategory::Account => "Account & Billing",
        }
    }

    pub fn faqs(&self) -> &'static [Faq] {
        match self {
            HelpCategory::GettingStarted => &GETTING_STARTED,
            HelpCategory::ResumeAnalysis => &RESUME_ANALYSIS,
            HelpCategory::VideoPractice => &VIDEO_PRACTICE,
            HelpCategory::LiveInterview => &LIVE_INTERVIEW,
            HelpCategory::Reports => &REPORTS,
            HelpCategory::Account => &ACCOUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

impl Faq {
    fn mentions(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle) || self.answer.to_lowercase().contains(needle)
    }
}

const GETTING_STARTED: [Faq; 3] = [
    Faq {
        question: "How do I get started with PrepVista?",
        answer: "Welcome to PrepVista! Start by completing your profile, then upload your resume for analysis. After that, you can practice with video interviews or jump into live interview simulations.",
    },
    Faq {
        question: "What features are available for free?",
        answer: "All PrepVista features are completely free! This includes resume analysis, video practice, live interview simulations, detailed reports, and access to our question library.",
    },
    Faq {
        question: "How accurate is the AI feedback?",
        answer: "Our AI is trained on thousands of successful interviews and provides feedback based on industry best practices. While it's highly accurate, we recommend using it as a guide alongside human feedback.",
    },
];

const RESUME_ANALYSIS: [Faq; 3] = [
    Faq {
        question: "What file formats are supported for resume upload?",
        answer: "We currently support PDF files up to 10MB in size. Make sure your resume is clearly formatted and readable for the best analysis results.",
    },
    Faq {
        question: "How is the ATS score calculated?",
        answer: "The ATS score is based on factors like keyword optimization, formatting, structure, and readability. We analyze how well your resume would perform with Applicant Tracking Systems.",
    },
    Faq {
        question: "Can I analyze my resume multiple times?",
        answer: "Yes! You can upload and analyze your resume as many times as you want. This is helpful for tracking improvements after making changes.",
    },
];

const VIDEO_PRACTICE: [Faq; 3] = [
    Faq {
        question: "What does the video analysis include?",
        answer: "Our video analysis covers eye contact percentage, posture scoring, gesture analysis, emotional analysis, speech quality, and overall confidence levels.",
    },
    Faq {
        question: "Can I upload pre-recorded videos?",
        answer: "Yes, you can either record directly in the platform or upload existing video files for analysis. We support most common video formats.",
    },
    Faq {
        question: "How long should my practice videos be?",
        answer: "We recommend 2-5 minute responses for most questions. This gives enough content for meaningful analysis while keeping sessions manageable.",
    },
];

const LIVE_INTERVIEW: [Faq; 3] = [
    Faq {
        question: "How does the live interview simulation work?",
        answer: "The live interview feature provides real-time questions with an AI interviewer. You'll receive immediate feedback on your performance including posture, eye contact, and speech patterns.",
    },
    Faq {
        question: "Can I pause during a live interview?",
        answer: "Yes, you can pause or end the interview at any time. However, for the most realistic practice, we recommend completing full sessions when possible.",
    },
    Faq {
        question: "What types of interviews are available?",
        answer: "We offer HR/General, Technical, and Behavioral interview types. Each type focuses on different question categories and evaluation criteria.",
    },
];

const REPORTS: [Faq; 3] = [
    Faq {
        question: "How often are reports updated?",
        answer: "Reports are updated in real-time as you complete practice sessions. You can view your progress and analytics immediately after each session.",
    },
    Faq {
        question: "Can I export my reports?",
        answer: "Yes, you can export your reports from the Reports section, including scores, feedback, and improvement recommendations.",
    },
    Faq {
        question: "How far back does the analytics data go?",
        answer: "We store all your practice data from when you first started using PrepVista. You can view historical trends and track long-term improvement.",
    },
];

const ACCOUNT: [Faq; 3] = [
    Faq {
        question: "How do I update my profile information?",
        answer: "Go to the Profile section in the sidebar menu. Click \"Edit Profile\" to update your personal information, skills, and experience.",
    },
    Faq {
        question: "Is my data secure and private?",
        answer: "Yes, we take data security seriously. All your information is encrypted and stored securely. You can control your privacy settings in the Settings section.",
    },
    Faq {
        question: "How do I delete my account?",
        answer: "You can delete your account from the Settings page under Account Actions. This will permanently remove all your data and cannot be undone.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialKind {
    Video,
    Article,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tutorial {
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub kind: TutorialKind,
}

pub const TUTORIALS: [Tutorial; 4] = [
    Tutorial {
        title: "Getting Started with PrepVista",
        description: "Complete walkthrough of all features",
        duration: "5 min",
        kind: TutorialKind::Video,
    },
    Tutorial {
        title: "Resume Analysis Deep Dive",
        description: "How to get the best ATS scores",
        duration: "3 min",
        kind: TutorialKind::Video,
    },
    Tutorial {
        title: "Video Interview Best Practices",
        description: "Tips for better video performance",
        duration: "4 min",
        kind: TutorialKind::Article,
    },
    Tutorial {
        title: "Understanding Your Reports",
        description: "Make sense of your analytics",
        duration: "2 min",
        kind: TutorialKind::Article,
    },
];

/// FAQ browser: one category at a time, a text query, and at most one
/// expanded answer.
#[derive(Debug)]
pub struct HelpPanel {
    category: HelpCategory,
    query: String,
    expanded: Option<usize>,
}

impl Default for HelpPanel {
    fn default() -> Self {
        Self {
            category: HelpCategory::GettingStarted,
            query: String::new(),
            expanded: None,
        }
    }
}

impl HelpPanel {
    pub fn category(&self) -> HelpCategory {
        self.category
    }

    pub fn set_category(&mut self, category: HelpCategory) {
        if self.category != category {
            self.category = category;
            self.expanded = None;
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Changing the query collapses the open entry, its index would point
    /// into a different result list.
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.expanded = None;
        }
    }

    pub fn filtered(&self) -> Filtered<'static, Faq> {
        let needle = self.query.to_lowercase();
        Filtered::from_matches(
            self.category
                .faqs()
                .iter()
                .filter(|faq| faq.mentions(&needle))
                .collect(),
        )
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Opens entry `index` of the current results, or closes it if it is
    /// already open.
    pub fn toggle(&mut self, index: usize) {
        self.expanded = match self.expanded {
            Some(open) if open == index => None,
            _ if index < self.filtered().len() => Some(index),
            other => other,
        };
    }
}

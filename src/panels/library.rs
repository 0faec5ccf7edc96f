use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::PrepVistaError;
use crate::panels::Filtered;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technical,
    Behavioral,
    Hr,
    Leadership,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Technical,
        Category::Behavioral,
        Category::Hr,
        Category::Leadership,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Behavioral => "Behavioral",
            Category::Hr => "HR & General",
            Category::Leadership => "Leadership",
        }
    }

    /// Size of the full catalogue this category advertises.
    pub fn catalogue_count(&self) -> u32 {
        match self {
            Category::Technical => 180,
            Category::Behavioral => 120,
            Category::Hr => 90,
            Category::Leadership => 60,
        }
    }
}

pub const CATALOGUE_TOTAL: u32 = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    OpenEnded,
    Situational,
    Knowledge,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::OpenEnded,
        QuestionType::Situational,
        QuestionType::Knowledge,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Category::Technical => "technical",
            Category::Behavioral => "behavioral",
            Category::Hr => "hr",
            Category::Leadership => "leadership",
        };
        write!(f, "{id}")
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{id}")
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            QuestionType::OpenEnded => "open-ended",
            QuestionType::Situational => "situational",
            QuestionType::Knowledge => "knowledge",
        };
        write!(f, "{id}")
    }
}

fn parse_facet<T: fmt::Display + Copy>(
    field: &str,
    all: &[T],
    value: &str,
) -> Result<T, PrepVistaError> {
    all.iter()
        .copied()
        .find(|candidate| candidate.to_string().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| PrepVistaError::InvalidInput {
            field: field.to_string(),
            reason: format!(
                "'{value}' is not one of {}",
                all.iter().map(ToString::to_string).join(", ")
            ),
        })
}

impl FromStr for Category {
    type Err = PrepVistaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("category", &Category::ALL, s)
    }
}

impl FromStr for Difficulty {
    type Err = PrepVistaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("difficulty", &Difficulty::ALL, s)
    }
}

impl FromStr for QuestionType {
    type Err = PrepVistaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("type", &QuestionType::ALL, s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub kind: QuestionType,
    pub tags: Vec<String>,
    pub bookmarked: bool,
    pub time_to_answer: String,
    pub tips: String,
    pub sample_answer: String,
}

impl Question {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: u32,
        text: &str,
        category: Category,
        difficulty: Difficulty,
        kind: QuestionType,
        tags: &[&str],
        bookmarked: bool,
        time_to_answer: &str,
        tips: &str,
        sample_answer: &str,
    ) -> Self {
        Self {
            id,
            text: text.to_string(),
            category,
            difficulty,
            kind,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            bookmarked,
            time_to_answer: time_to_answer.to_string(),
            tips: tips.to_string(),
            sample_answer: sample_answer.to_string(),
        }
    }
}

/// The built-in question set.
pub fn question_bank() -> Vec<Question> {
    use Category::*;
    use Difficulty::*;
    use QuestionType::*;
    vec![
        Question::new(
            1,
            "Tell me about yourself and your background.",
            Hr,
            Easy,
            OpenEnded,
            &["introduction", "background", "general"],
            true,
            "2-3 minutes",
            "Focus on professional background, key achievements, and what makes you unique.",
            "I am a software engineer with 3 years of experience...",
        ),
        Question::new(
            2,
            "Explain the difference between REST and GraphQL APIs.",
            Technical,
            Medium,
            Knowledge,
            &["api", "rest", "graphql", "backend"],
            false,
            "3-4 minutes",
            "Compare key differences, advantages, and use cases for each.",
            "REST is an architectural style while GraphQL is a query language...",
        ),
        Question::new(
            3,
            "Describe a time when you had to work with a difficult team member.",
            Behavioral,
            Medium,
            Situational,
            &["teamwork", "conflict resolution", "communication"],
            true,
            "4-5 minutes",
            "Use the STAR method: Situation, Task, Action, Result.",
            "In my previous role, I worked with a colleague who...",
        ),
        Question::new(
            4,
            "How do you handle tight deadlines and pressure?",
            Behavioral,
            Easy,
            Situational,
            &["pressure", "time management", "stress"],
            false,
            "3-4 minutes",
            "Discuss your strategies for prioritization and stress management.",
            "When facing tight deadlines, I first assess the scope...",
        ),
        Question::new(
            5,
            "What are the principles of good software architecture?",
            Technical,
            Hard,
            Knowledge,
            &["architecture", "design patterns", "scalability"],
            false,
            "5-6 minutes",
            "Cover SOLID principles, scalability, maintainability, and modularity.",
            "Good software architecture follows several key principles...",
        ),
        Question::new(
            6,
            "Where do you see yourself in 5 years?",
            Hr,
            Easy,
            OpenEnded,
            &["career goals", "future plans", "ambition"],
            true,
            "2-3 minutes",
            "Align your goals with the company's growth opportunities.",
            "In five years, I see myself having grown into...",
        ),
    ]
}

/// Active predicates over the question list. `None` facets match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub query: String,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub kind: Option<QuestionType>,
    pub bookmarked_only: bool,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        let query = self.query.to_lowercase();
        let matches_query = query.is_empty()
            || question.text.to_lowercase().contains(&query)
            || question
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query));

        matches_query
            && self.category.is_none_or(|c| question.category == c)
            && self.difficulty.is_none_or(|d| question.difficulty == d)
            && self.kind.is_none_or(|k| question.kind == k)
            && (!self.bookmarked_only || question.bookmarked)
    }

    pub fn apply<'a>(&self, questions: &'a [Question]) -> Filtered<'a, Question> {
        Filtered::from_matches(questions.iter().filter(|q| self.matches(q)).collect())
    }
}

const MAX_RELATED: usize = 3;

pub struct LibraryPanel {
    questions: Vec<Question>,
    pub filter: QuestionFilter,
    selected: Option<u32>,
}

impl Default for LibraryPanel {
    fn default() -> Self {
        Self::new(question_bank())
    }
}

impl LibraryPanel {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            filter: QuestionFilter::default(),
            selected: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn filtered(&self) -> Filtered<'_, Question> {
        self.filter.apply(&self.questions)
    }

    /// Every distinct tag, sorted, for search suggestions.
    pub fn all_tags(&self) -> Vec<&str> {
        self.questions
            .iter()
            .flat_map(|q| q.tags.iter().map(String::as_str))
            .sorted()
            .dedup()
            .collect()
    }

    /// Flips the bookmark flag. Returns the new value, or `None` for an
    /// unknown id.
    pub fn toggle_bookmark(&mut self, id: u32) -> Option<bool> {
        let question = self.questions.iter_mut().find(|q| q.id == id)?;
        question.bookmarked = !question.bookmarked;
        debug!("Question {id} bookmarked: {}", question.bookmarked);
        Some(question.bookmarked)
    }

    pub fn select(&mut self, id: u32) -> bool {
        if self.questions.iter().any(|q| q.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn back_to_library(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Question> {
        let id = self.selected?;
        self.questions.iter().find(|q| q.id == id)
    }

    /// Up to three other questions sharing the selected question's category.
    pub fn related(&self) -> Vec<&Question> {
        let Some(selected) = self.selected() else {
            return Vec::new();
        };
        self.questions
            .iter()
            .filter(|q| q.id != selected.id && q.category == selected.category)
            .take(MAX_RELATED)
            .collect()
    }
}

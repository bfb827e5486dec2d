//! Row types for the three persisted entities.
use chrono::{DateTime, Utc};

/// A player or quiz author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// A question/answer pair owned by an author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub author_id: i64,
}

/// Quiz row with its author eagerly joined, as shown by `list`
#[derive(Debug, Clone)]
pub struct QuizWithAuthor {
    pub quiz: Quiz,
    pub author: User,
}

/// Tally of correct answers for one play session
#[derive(Debug, Clone)]
pub struct Score {
    pub id: i64,
    pub wins: u32,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}

/// Score row with its player joined, as shown by `scores`
#[derive(Debug, Clone)]
pub struct ScoreWithUser {
    pub score: Score,
    pub user: User,
}

/// Format used for score timestamps, e.g. `Tue, 15 Oct 2024 10:00:00 GMT`.
pub const SCORE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

impl ScoreWithUser {
    /// Renders the `name|wins|date` line printed by `scores`.
    pub fn display_line(&self) -> String {
        format!(
            "{}|{}|{}",
            self.user.name,
            self.score.wins,
            self.score.created_at.format(SCORE_DATE_FORMAT)
        )
    }
}

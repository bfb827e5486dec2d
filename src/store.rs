//! Queries over users, quizzes and scores.
//!
//! Every function takes a borrowed connection and maps rows into the types in
//! [`crate::models`].
use crate::error::Result;
use crate::models::{Quiz, QuizWithAuthor, Score, ScoreWithUser, User};
use chrono::Utc;
use rand::seq::IteratorRandom;
use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;
use tracing::{debug, info};

fn user_from_row(row: &Row, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        age: row.get(offset + 2)?,
    })
}

fn quiz_from_row(row: &Row) -> rusqlite::Result<Quiz> {
    Ok(Quiz {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        author_id: row.get(3)?,
    })
}

fn score_from_row(row: &Row) -> rusqlite::Result<Score> {
    Ok(Score {
        id: row.get(0)?,
        wins: row.get(1)?,
        created_at: row.get(2)?,
        user_id: row.get(3)?,
    })
}

// --- users ---

pub fn find_user_by_name(conn: &Connection, name: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, name, age FROM users WHERE name = ?1",
            params![name],
            |row| user_from_row(row, 0),
        )
        .optional()?;
    Ok(user)
}

pub fn create_user(conn: &Connection, name: &str, age: i64) -> Result<User> {
    conn.execute(
        "INSERT INTO users (name, age) VALUES (?1, ?2)",
        params![name, age],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, name, "created user");
    Ok(User {
        id,
        name: name.to_string(),
        age,
    })
}

/// Fetches the user called `name`, inserting it with `default_age` first if absent.
pub fn find_or_create_user(conn: &Connection, name: &str, default_age: i64) -> Result<User> {
    match find_user_by_name(conn, name)? {
        Some(user) => Ok(user),
        None => create_user(conn, name, default_age),
    }
}

// --- quizzes ---

/// All quizzes with their authors, in id order.
pub fn all_quizzes_with_author(conn: &Connection) -> Result<Vec<QuizWithAuthor>> {
    let mut stmt = conn.prepare(
        "SELECT q.id, q.question, q.answer, q.author_id, u.id, u.name, u.age
         FROM quizzes q
         JOIN users u ON u.id = q.author_id
         ORDER BY q.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(QuizWithAuthor {
            quiz: quiz_from_row(row)?,
            author: user_from_row(row, 4)?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    debug!(count = out.len(), "loaded quizzes");
    Ok(out)
}

pub fn find_quiz(conn: &Connection, id: i64) -> Result<Option<Quiz>> {
    let quiz = conn
        .query_row(
            "SELECT id, question, answer, author_id FROM quizzes WHERE id = ?1",
            params![id],
            quiz_from_row,
        )
        .optional()?;
    Ok(quiz)
}

pub fn create_quiz(conn: &Connection, question: &str, answer: &str, author_id: i64) -> Result<Quiz> {
    conn.execute(
        "INSERT INTO quizzes (question, answer, author_id) VALUES (?1, ?2, ?3)",
        params![question, answer, author_id],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, author_id, "created quiz");
    Ok(Quiz {
        id,
        question: question.to_string(),
        answer: answer.to_string(),
        author_id,
    })
}

/// Saves only the question and answer columns of `quiz`.
pub fn update_quiz_text(conn: &Connection, quiz: &Quiz) -> Result<()> {
    conn.execute(
        "UPDATE quizzes SET question = ?1, answer = ?2 WHERE id = ?3",
        params![quiz.question, quiz.answer, quiz.id],
    )?;
    info!(id = quiz.id, "updated quiz");
    Ok(())
}

/// Deletes the quiz with `id`, returning how many rows went away.
pub fn delete_quiz(conn: &Connection, id: i64) -> Result<usize> {
    let n = conn.execute("DELETE FROM quizzes WHERE id = ?1", params![id])?;
    info!(id, deleted = n, "deleted quiz");
    Ok(n)
}

/// Every quiz id, in id order.
pub fn quiz_ids(conn: &Connection) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM quizzes ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

/// Picks a uniformly random quiz not in `excluded`, or `None` once all have been used.
///
/// The exclusion is applied in memory, so a long session never runs into
/// SQLite's bound-parameter limit.
pub fn random_quiz_excluding<R: Rng + ?Sized>(
    conn: &Connection,
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> Result<Option<Quiz>> {
    let remaining: Vec<i64> = quiz_ids(conn)?
        .into_iter()
        .filter(|id| !excluded.contains(id))
        .collect();
    debug!(remaining = remaining.len(), "picking random quiz");

    match remaining.iter().choose(rng) {
        Some(&id) => find_quiz(conn, id),
        None => Ok(None),
    }
}

// --- scores ---

pub fn create_score(conn: &Connection, user_id: i64, wins: u32) -> Result<Score> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO scores (wins, created_at, user_id) VALUES (?1, ?2, ?3)",
        params![wins, created_at, user_id],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, user_id, wins, "recorded score");
    Ok(Score {
        id,
        wins,
        created_at,
        user_id,
    })
}

/// All scores with their players, best first. Ties keep insertion order.
pub fn scores_by_wins_desc(conn: &Connection) -> Result<Vec<ScoreWithUser>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.wins, s.created_at, s.user_id, u.id, u.name, u.age
         FROM scores s
         JOIN users u ON u.id = s.user_id
         ORDER BY s.wins DESC, s.id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ScoreWithUser {
            score: score_from_row(row)?,
            user: user_from_row(row, 4)?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

//! The quiz commands: list, create, test, play, scores, update and delete.
//!
//! Each command prompts through the [`Shell`], runs one or two queries and
//! prints its outcome. Failures are returned to the REPL, which reports them.
use crate::error::{QuizError, Result};
use crate::models::{Quiz, Score};
use crate::shell::Shell;
use crate::store;
use rand::Rng;
use rusqlite::Connection;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Whether `given` matches `expected`, ignoring case and surrounding whitespace.
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Prompts for a field that must not be blank and returns it trimmed.
fn required<R: BufRead, W: Write>(sh: &mut Shell<R, W>, prompt: &str) -> Result<String> {
    let value = sh.question(prompt)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(QuizError::EmptyResponse);
    }
    Ok(value.to_string())
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Prompts for a quiz id and loads that quiz.
fn prompt_quiz<R: BufRead, W: Write>(
    sh: &mut Shell<R, W>,
    conn: &Connection,
) -> Result<Quiz> {
    let raw = sh.question("Enter quiz Id")?;
    let quiz = match parse_id(&raw) {
        Some(id) => store::find_quiz(conn, id)?,
        None => None,
    };
    quiz.ok_or_else(|| QuizError::QuizNotFound(raw.trim().to_string()))
}

pub fn list<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<()> {
    for entry in store::all_quizzes_with_author(conn)? {
        sh.log(&format!(
            "  \"{}\" (by {}, id={})",
            entry.quiz.question, entry.author.name, entry.quiz.id
        ))?;
    }
    Ok(())
}

pub fn create<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<()> {
    let name = sh.question("Enter user")?;
    let name = name.trim();
    let user = store::find_user_by_name(conn, name)?
        .ok_or_else(|| QuizError::UserNotFound(name.to_string()))?;

    let question = required(sh, "Enter question")?;
    let answer = required(sh, "Enter answer")?;

    store::create_quiz(conn, &question, &answer, user.id)?;
    sh.log(&format!(
        "   User {} creates quiz: {} -> {}",
        user.name, question, answer
    ))
}

pub fn test<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<()> {
    let quiz = prompt_quiz(sh, conn)?;
    let answered = sh.question(&quiz.question)?;

    if answers_match(&answered, &quiz.answer) {
        sh.log(&format!("  The answer \"{answered}\" is right!"))
    } else {
        sh.log(&format!("  The answer \"{answered}\" is wrong!"))
    }
}

/// Plays with the thread-local RNG.
pub fn play<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<Score> {
    play_with_rng(sh, conn, &mut rand::thread_rng())
}

/// Asks random quizzes, never repeating one, until all are used or an answer is wrong.
///
/// Records the number of right answers as a score for the named player and
/// returns the stored row.
pub fn play_with_rng<R: BufRead, W: Write, G: Rng + ?Sized>(
    sh: &mut Shell<R, W>,
    conn: &Connection,
    rng: &mut G,
) -> Result<Score> {
    let mut score = 0u32;
    let mut asked: HashSet<i64> = HashSet::new();

    while let Some(quiz) = store::random_quiz_excluding(conn, &asked, rng)? {
        asked.insert(quiz.id);
        debug!(id = quiz.id, asked = asked.len(), "asking quiz");

        let answer = sh.question(&quiz.question)?;
        if !answers_match(&answer, &quiz.answer) {
            sh.log(&format!("The answer \"{answer}\" is wrong!"))?;
            break;
        }
        score += 1;
        sh.log(&format!("The answer \"{answer}\" is right!"))?;
    }

    sh.log(&format!("Score: {score}"))?;

    let name = sh.question("What is your name?")?;
    let player = store::find_or_create_user(conn, name.trim(), 0)?;
    let recorded = store::create_score(conn, player.id, score)?;
    info!(
        score_id = recorded.id,
        user_id = recorded.user_id,
        wins = recorded.wins,
        "play session finished"
    );
    Ok(recorded)
}

pub fn scores<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<()> {
    for entry in store::scores_by_wins_desc(conn)? {
        sh.log(&entry.display_line())?;
    }
    Ok(())
}

pub fn update<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<()> {
    let mut quiz = prompt_quiz(sh, conn)?;

    let question = required(sh, &format!("Enter question ({})", quiz.question))?;
    let answer = required(sh, &format!("Enter answer ({})", quiz.answer))?;

    quiz.question = question;
    quiz.answer = answer;
    store::update_quiz_text(conn, &quiz)?;

    sh.log(&format!(
        "  Quiz {} updated to: {} -> {}",
        quiz.id, quiz.question, quiz.answer
    ))
}

pub fn delete<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<()> {
    let raw = sh.question("Enter quiz Id")?;
    let raw = raw.trim();

    let deleted = match parse_id(raw) {
        Some(id) => store::delete_quiz(conn, id)?,
        None => 0,
    };
    if deleted == 0 {
        return Err(QuizError::NotDeleted(raw.to_string()));
    }
    sh.log(&format!("  {raw} deleted from DB"))
}

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("quizzes.sqlite")
}

fn shell(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quiz_shell").unwrap();
    cmd.arg("--db").arg(db);
    cmd
}

fn seeded_shell(db: &Path) -> Command {
    let mut cmd = shell(db);
    cmd.arg("--seed");
    cmd
}

fn count(db: &Path, table: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

// Test that the program starts and shows welcome message
#[test]
fn test_program_starts() {
    let dir = TempDir::new().unwrap();

    shell(&db_path(&dir))
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the Quiz shell"))
        .stdout(predicate::str::contains("Goodbye!"));
}

// End of input ends the session like quit
#[test]
fn test_end_of_input_exits() {
    let dir = TempDir::new().unwrap();

    shell(&db_path(&dir))
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}

// A line that is not valid UTF-8 is reported and the session goes on
#[test]
fn test_invalid_utf8_line_is_skipped() {
    let dir = TempDir::new().unwrap();

    seeded_shell(&db_path(&dir))
        .write_stdin(b"\xff\xfe\n list\nquit\n".to_vec())
        .assert()
        .success()
        .stderr(predicate::str::contains("Error reading input, try again."))
        .stdout(predicate::str::contains(
            "\"Capital of Italy\" (by pepe, id=1)",
        ))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();

    shell(&db_path(&dir))
        .write_stdin("help\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("scores  -> show recorded scores"));
}

#[test]
fn test_invalid_command() {
    let dir = TempDir::new().unwrap();

    shell(&db_path(&dir))
        .write_stdin("notacommand\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command: 'notacommand'"));
}

#[test]
fn test_case_insensitive_commands() {
    let dir = TempDir::new().unwrap();

    seeded_shell(&db_path(&dir))
        .write_stdin("LIST\nEXIT\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"Capital of Italy\" (by pepe, id=1)",
        ));
}

#[test]
fn test_create_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    seeded_shell(&db)
        .write_stdin("create\nana\nCapital of Germany\nBerlin\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "User ana creates quiz: Capital of Germany -> Berlin",
        ));

    shell(&db)
        .write_stdin("list\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"Capital of Germany\" (by ana, id=5)",
        ));
}

#[test]
fn test_create_with_unknown_user_fails() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    seeded_shell(&db)
        .write_stdin("create\nnobody\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("User ('nobody') doesn't exist!"));

    assert_eq!(count(&db, "quizzes"), 4);
}

#[test]
fn test_test_command() {
    let dir = TempDir::new().unwrap();

    seeded_shell(&db_path(&dir))
        .write_stdin("test\n2\n paris \ntest\n99\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The answer \" paris \" is right!"))
        .stderr(predicate::str::contains("Error: Quiz '99' is not in DB"));
}

#[test]
fn test_update_command() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    seeded_shell(&db)
        .write_stdin("update\n1\nCapital of Italia\nRoma\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter question (Capital of Italy)"))
        .stdout(predicate::str::contains(
            "Quiz 1 updated to: Capital of Italia -> Roma",
        ));

    let conn = Connection::open(&db).unwrap();
    let answer: String = conn
        .query_row("SELECT answer FROM quizzes WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(answer, "Roma");
}

#[test]
fn test_delete_command() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    seeded_shell(&db)
        .write_stdin("delete\n99\ndelete\n1\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: 99 not in DB"))
        .stdout(predicate::str::contains("1 deleted from DB"));

    assert_eq!(count(&db, "quizzes"), 3);
}

#[test]
fn test_play_records_score() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    // first answer is wrong whichever quiz comes up
    seeded_shell(&db)
        .write_stdin("play\nnot a capital\nzoe\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("is wrong!"))
        .stdout(predicate::str::contains("Score: 0"))
        .stdout(predicate::str::contains("What is your name?"));

    let conn = Connection::open(&db).unwrap();
    let wins: i64 = conn
        .query_row(
            "SELECT s.wins FROM scores s JOIN users u ON u.id = s.user_id WHERE u.name = 'zoe'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(wins, 0);
}

#[test]
fn test_scores_sorted_by_wins_desc() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    seeded_shell(&db).write_stdin("quit\n").assert().success();
    {
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "INSERT INTO scores (wins, created_at, user_id) VALUES (1, '2024-10-15 10:00:00+00:00', 1);
             INSERT INTO scores (wins, created_at, user_id) VALUES (3, '2024-10-15 10:00:00+00:00', 2);
             INSERT INTO scores (wins, created_at, user_id) VALUES (2, '2024-10-15 10:00:00+00:00', 3);",
        )
        .unwrap();
    }

    let output = shell(&db).write_stdin("scores\nquit\n").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let ana = stdout.find("ana|3|Tue, 15 Oct 2024 10:00:00 GMT").unwrap();
    let paco = stdout.find("paco|2|").unwrap();
    let pepe = stdout.find("pepe|1|").unwrap();
    assert!(ana < paco && paco < pepe, "scores should be best first");
}

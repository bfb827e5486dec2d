mod commands;
mod db;
mod error;
mod models;
mod shell;
mod store;
mod telemetry;

use crate::error::{QuizError, Result};
use crate::shell::Shell;
use clap::Parser;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "quiz_shell")]
#[command(about = "Interactive quiz manager backed by SQLite", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "QUIZ_DB", default_value = db::DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Load sample users and quizzes into an empty database
    #[arg(long)]
    seed: bool,
}

const HELP: &str = "Commands:
  help    -> show this help
  list    -> list all quizzes
  create  -> create a new quiz
  test    -> answer one quiz by id
  play    -> answer random quizzes until one is wrong
  scores  -> show recorded scores, best first
  update  -> edit a quiz by id
  delete  -> delete a quiz by id
  quit    -> exit";

/// What the REPL does after a line has been handled.
enum Flow {
    Continue,
    Quit,
}

fn dispatch<R: BufRead, W: Write>(
    line: &str,
    sh: &mut Shell<R, W>,
    conn: &Connection,
) -> Result<Flow> {
    match line.to_lowercase().as_str() {
        "quit" | "q" | "exit" => return Ok(Flow::Quit),
        "help" | "h" => sh.log(HELP)?,
        "list" => commands::list(sh, conn)?,
        "create" => commands::create(sh, conn)?,
        "test" => commands::test(sh, conn)?,
        "play" => {
            commands::play(sh, conn)?;
        }
        "scores" => commands::scores(sh, conn)?,
        "update" => commands::update(sh, conn)?,
        "delete" => commands::delete(sh, conn)?,
        other => {
            sh.log(&format!("Unknown command: '{other}'"))?;
            sh.log("Type 'help' to see available commands.\n")?;
        }
    }
    Ok(Flow::Continue)
}

fn run<R: BufRead, W: Write>(sh: &mut Shell<R, W>, conn: &Connection) -> Result<()> {
    sh.log("Welcome to the Quiz shell (Rust / SQLite edition)")?;
    sh.log(HELP)?;
    sh.log("")?;

    loop {
        sh.prompt()?;
        let input = match sh.read_line() {
            Ok(Some(input)) => input,
            Ok(None) => {
                // end of input behaves like quit
                sh.log("")?;
                break;
            }
            Err(QuizError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(error = %e, "unreadable input line");
                eprintln!("Error reading input, try again.");
                continue;
            }
            Err(e) => return Err(e),
        };

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        match dispatch(line, sh, conn) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                warn!(command = line, error = %e, "command failed");
                eprintln!("Error: {e}");
            }
        }
    }

    sh.log("Goodbye!")
}

fn main() {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let mut conn = match db::open(&cli.db) {
        Ok(conn) => conn,
        Err(e) => {
            error!(path = %cli.db.display(), error = %e, "cannot open database");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!(path = %cli.db.display(), "database ready");

    if cli.seed {
        if let Err(e) = db::seed(&mut conn) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let stdin = io::stdin();
    let mut sh = Shell::new(stdin.lock(), io::stdout());
    if let Err(e) = run(&mut sh, &conn) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

//! Interactive maze editor on the terminal

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use itertools::Itertools;
use maze_editor::{parse_dimension, Direction, Position, Session, Token};
use tracing_subscriber::EnvFilter;

/// Generate a random maze, edit it and watch its shortest path
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of rows, a positive odd number
    #[arg(long, default_value_t = 11, value_parser = parse_dimension)]
    rows: usize,

    /// Number of columns, a positive odd number
    #[arg(long, default_value_t = 11, value_parser = parse_dimension)]
    cols: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// File written by the `export` command
    #[arg(short, long, default_value = "out.txt")]
    output: PathBuf,

    /// Show the shortest path from the start
    #[arg(short = 'p', long)]
    show_path: bool,
}

/// One line of user input
#[derive(Debug, PartialEq)]
enum Action {
    Toggle(Position),
    Regenerate,
    Undo,
    Redo,
    ShowPath,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl Action {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let action = match words.next().unwrap_or("") {
            "toggle" | "t" => {
                let mut coord = || -> anyhow::Result<usize> {
                    words
                        .next()
                        .context("Usage: toggle <row> <col>")?
                        .parse::<usize>()
                        .context("Row and column must be non-negative integers")
                };
                let row = coord()?;
                let col = coord()?;
                Action::Toggle(Position::new(row, col))
            }
            "regen" | "r" => Action::Regenerate,
            "undo" | "u" => Action::Undo,
            "redo" | "y" => Action::Redo,
            "path" | "p" => Action::ShowPath,
            "export" | "e" => Action::Export(words.next().map(PathBuf::from)),
            "help" | "h" | "" => Action::Help,
            "quit" | "q" => Action::Quit,
            other => bail!("Unknown command `{}`, try `help`", other),
        };
        Ok(action)
    }
}

const HELP: &str = "\
Commands:
  toggle <row> <col>  flip a cell between wall and path (t)
  regen               generate a new maze (r)
  undo                undo the last edit (u)
  redo                redo the last undone edit (y)
  path                show or hide the shortest path (p)
  export [file]       write the maze as numbers (e)
  quit                leave (q)";

fn glyph(token: Token) -> char {
    match token {
        Token::Empty => '🟩',
        Token::Wall => '🟫',
        Token::StartFlag => '🏃',
        Token::EndFlag => '❎',
        Token::Arrow(Direction::Up) => '⏫',
        Token::Arrow(Direction::Down) => '⏬',
        Token::Arrow(Direction::Left) => '⏪',
        Token::Arrow(Direction::Right) => '⏩',
    }
}

fn print_session(session: &Session) {
    let board = session
        .tokens()
        .iter()
        .map(|row| row.iter().map(|t| glyph(*t)).join(""))
        .join("\n");
    println!("{}\n{}", board, session.summary());
}

/// Run one action against the session. Returns `false` to quit.
fn run(session: &mut Session, action: Action, output: &Path) -> anyhow::Result<bool> {
    match action {
        Action::Toggle(pos) => session.toggle_cell(pos)?,
        Action::Regenerate => session.regenerate()?,
        Action::Undo => {
            session.undo()?;
        }
        Action::Redo => {
            session.redo()?;
        }
        Action::ShowPath => {
            session.toggle_show_path();
        }
        Action::Export(path) => {
            let path = path.as_deref().unwrap_or(output);
            session
                .export_to_path(path)
                .with_context(|| format!("Could not export to {}", path.display()))?;
            println!("Exported to {}", path.display());
            return Ok(true);
        }
        Action::Help => {
            println!("{}", HELP);
            return Ok(true);
        }
        Action::Quit => return Ok(false),
    }
    print_session(session);
    Ok(true)
}

/// Read commands from stdin until `quit` or end of input
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::new(args.rows, args.cols, args.seed)?;
    if args.show_path {
        session.toggle_show_path();
    }
    print_session(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match Action::parse(&line).and_then(|action| run(&mut session, action, &args.output)) {
            Ok(true) => (),
            Ok(false) => break,
            Err(e) => println!("{:#}", e),
        }
    }
    Ok(())
}

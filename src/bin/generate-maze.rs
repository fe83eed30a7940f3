//! CLI for maze generation

use std::io;

use clap::Parser;
use maze_editor::{parse_dimension, MazeGenerator};
use tracing_subscriber::EnvFilter;

/// Print a random perfect maze as rows of numbers
/// (0 path, 1 wall, 2 start, 3 end)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated field height, a positive odd number
    #[arg(long, default_value_t = 11, value_parser = parse_dimension)]
    rows: usize,

    /// Generated field width, a positive odd number
    #[arg(long, default_value_t = 11, value_parser = parse_dimension)]
    cols: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate one maze, write it to stdout
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut gen = MazeGenerator::new(args.seed);
    let grid = gen.generate(args.rows, args.cols)?;
    grid.export(io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::Args;

    #[test]
    fn dimensions_must_be_odd() {
        let args = Args::try_parse_from(["generate-maze", "--rows", "7", "--seed", "3"]).unwrap();
        assert_eq!((args.rows, args.cols, args.seed), (7, 11, Some(3)));
        assert!(Args::try_parse_from(["generate-maze", "--rows", "8"]).is_err());
        assert!(Args::try_parse_from(["generate-maze", "--cols", "-1"]).is_err());
    }
}

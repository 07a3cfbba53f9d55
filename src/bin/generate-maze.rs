//! CLI for one-shot maze generation

use anyhow::Context;
use clap::Parser;
use maze_escape::Maze;

/// Generate a perfect maze and print it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze height
    #[arg(long, default_value_t = 15)]
    height: usize,

    /// Maze width
    #[arg(long, default_value_t = 15)]
    width: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also mark the escape from the entrance to the exit
    #[arg(short, long)]
    escape: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut maze = Maze::with_seed(args.height, args.width, args.seed)
        .context("Cannot generate a maze")?;
    if args.escape {
        print!("{}", maze.find_escape());
    } else {
        print!("{}", maze);
    }
    Ok(())
}

//! Interactive console for generating mazes and finding their escape

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use log::info;
use maze_escape::Maze;
use thiserror::Error;

/// Generate perfect mazes and find the way out of them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Random seed. The n-th maze of the session is generated with `seed + n`.
    #[arg(long)]
    seed: Option<u64>,
}

/// Invalid maze size typed by the user
#[derive(Debug, Error, PartialEq, Eq)]
enum SizeError {
    #[error("Expected [size] or [height width], got {0} values")]
    TokenCount(usize),
    #[error("`{0}` is not a valid size")]
    NotANumber(String),
}

/// Parse `size` (square maze) or `height width`.
fn parse_size(line: &str) -> Result<(usize, usize), SizeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (height, width) = match tokens[..] {
        [size] => (size, size),
        [height, width] => (height, width),
        _ => return Err(SizeError::TokenCount(tokens.len())),
    };

    let parse = |token: &str| {
        token
            .parse::<usize>()
            .map_err(|_| SizeError::NotANumber(token.to_owned()))
    };
    Ok((parse(height)?, parse(width)?))
}

/// Menu loop over any input and output
struct Console<R, W> {
    input: R,
    output: W,
    /// Current maze; options 2 and 3 are available only when it exists
    maze: Option<Maze>,
    seed: Option<u64>,
    generated: u64,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn new(input: R, output: W, seed: Option<u64>) -> Self {
        Self {
            input,
            output,
            maze: None,
            seed,
            generated: 0,
        }
    }

    /// Print the menu and process choices until exit or end of input.
    fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            match (line.trim(), self.maze.is_some()) {
                ("1", _) => self.generate()?,
                ("2", true) => self.display()?,
                ("3", true) => self.find_escape()?,
                ("4", _) => break,
                _ => writeln!(self.output, "Incorrect option. Please try again")?,
            }
        }
        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n\n=============== Menu ===============")?;
        writeln!(self.output, "1. Generate a new maze")?;
        if self.maze.is_some() {
            writeln!(self.output, "2. Display the maze")?;
            writeln!(self.output, "3. Find the escape")?;
        }
        writeln!(self.output, "4. Exit")?;
        write!(self.output, "Enter your Choice : ")?;
        self.output.flush()
    }

    /// Next line of input, `None` at the end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok((read > 0).then_some(line))
    }

    /// Ask for the dimensions, then generate and print a new maze.
    ///
    /// On invalid input the previous maze is kept.
    fn generate(&mut self) -> anyhow::Result<()> {
        write!(
            self.output,
            "Enter the size of the new maze (in the [size] or [height width] format) : "
        )?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(());
        };

        let maze = parse_size(&line)
            .map_err(anyhow::Error::from)
            .and_then(|(height, width)| Ok(Maze::with_seed(height, width, self.next_seed())?));
        match maze {
            Ok(maze) => {
                info!("New {}x{} maze", maze.height(), maze.width());
                self.maze = Some(maze);
                self.display()
            }
            Err(err) => {
                writeln!(self.output, "Cannot generate a maze. {}", err)?;
                Ok(())
            }
        }
    }

    fn next_seed(&mut self) -> Option<u64> {
        let seed = self.seed.map(|seed| seed.wrapping_add(self.generated));
        self.generated += 1;
        seed
    }

    fn display(&mut self) -> anyhow::Result<()> {
        if let Some(maze) = &self.maze {
            writeln!(self.output, "{}", maze)?;
        }
        Ok(())
    }

    fn find_escape(&mut self) -> anyhow::Result<()> {
        if let Some(maze) = &mut self.maze {
            writeln!(self.output, "{}", maze.find_escape())?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock(), args.seed).run()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{parse_size, Console, SizeError};

    /// Run the console on scripted input, return everything it printed
    fn run_script(script: &str) -> String {
        let mut output = Vec::new();
        Console::new(Cursor::new(script), &mut output, Some(1))
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_square_and_rectangular_sizes() {
        assert_eq!(parse_size("7"), Ok((7, 7)));
        assert_eq!(parse_size("  5   9 \n"), Ok((5, 9)));
    }

    #[test]
    fn parse_rejects_wrong_token_counts() {
        assert_eq!(parse_size(""), Err(SizeError::TokenCount(0)));
        assert_eq!(parse_size("1 2 3"), Err(SizeError::TokenCount(3)));
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert_eq!(parse_size("5 x"), Err(SizeError::NotANumber("x".to_owned())));
        assert_eq!(parse_size("-3"), Err(SizeError::NotANumber("-3".to_owned())));
    }

    #[test]
    fn generate_display_and_solve() {
        let output = run_script("1\n3\n2\n3\n4\n");
        assert_eq!(output.matches("██  ██\n██  ██\n██  ██\n").count(), 2);
        assert!(output.contains("██▓▓██\n██▓▓██\n██▓▓██\n"));
        assert!(output.contains("3. Find the escape"));
        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn maze_options_need_a_maze() {
        let output = run_script("2\n3\n");
        assert_eq!(output.matches("Incorrect option").count(), 2);
        assert!(!output.contains("2. Display the maze"));
        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn invalid_size_keeps_previous_maze() {
        let output = run_script("1\n2 5\n1\nabc\n2\n");
        assert!(output.contains("Cannot generate a maze. Both the height"));
        assert!(output.contains("Cannot generate a maze. `abc` is not a valid size"));
        assert!(output.contains("Incorrect option"));

        let output = run_script("1\n3 3\n1\n1 2 3\n2\n");
        assert!(output.contains("Cannot generate a maze. Expected [size] or [height width]"));
        // Printed once when generated and once more on request
        assert_eq!(output.matches("██  ██\n██  ██\n██  ██\n").count(), 2);
    }

    #[test]
    fn unknown_choice_is_reported() {
        let output = run_script("9\nhello\n4\n");
        assert_eq!(output.matches("Incorrect option").count(), 2);
    }
}

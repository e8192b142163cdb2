/// Output sinks and the run summary.
///
/// Two sinks: a results file that gets one human-readable line per
/// processed command, and a separate CSV file
/// the `print` command streams the tree into. Both are opened in append
/// mode so repeated runs accumulate.
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The two command-output destinations. Generic over the writer so tests
/// can capture output in memory.
pub struct Sinks<W: Write> {
    results: W,
    print: W,
    print_path: PathBuf,
}

pub type FileSinks = Sinks<BufWriter<File>>;

impl FileSinks {
    pub fn open(results: &Path, print_to: &Path) -> io::Result<Self> {
        let results = OpenOptions::new().create(true).append(true).open(results)?;
        let print = OpenOptions::new().create(true).append(true).open(print_to)?;
        Ok(Sinks::new(
            BufWriter::new(results),
            BufWriter::new(print),
            print_to.to_path_buf(),
        ))
    }
}

impl<W: Write> Sinks<W> {
    pub fn new(results: W, print: W, print_path: PathBuf) -> Self {
        Sinks {
            results,
            print,
            print_path,
        }
    }

    /// Append one line to the results sink.
    pub fn result(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.results, "{line}")
    }

    /// Append one line to the print sink.
    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.print, "{line}")
    }

    pub fn print_path(&self) -> &Path {
        &self.print_path
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.results.flush()?;
        self.print.flush()
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, W) {
        (self.results, self.print)
    }
}

/// What a run did, for the end-of-run summary.
pub struct RunSummary {
    pub players_loaded: usize,
    pub rows_skipped: usize,
    pub commands_processed: usize,
    pub invalid_commands: usize,
    pub tree_size: usize,
}

#[derive(Serialize)]
struct JsonSummary {
    players_loaded: usize,
    rows_skipped: usize,
    commands_processed: usize,
    invalid_commands: usize,
    tree_size: usize,
}

/// Print the run summary as plain text.
pub fn print_summary(summary: &RunSummary, results_path: &Path) {
    println!(
        "{} players loaded ({} rows skipped)",
        summary.players_loaded, summary.rows_skipped,
    );
    println!(
        "{} commands processed ({} invalid), results in {}",
        summary.commands_processed,
        summary.invalid_commands,
        results_path.display(),
    );
    println!("Final tree size: {}", summary.tree_size);
}

/// Print the run summary as JSON.
pub fn print_json(summary: &RunSummary) {
    let output = JsonSummary {
        players_loaded: summary.players_loaded,
        rows_skipped: summary.rows_skipped,
        commands_processed: summary.commands_processed,
        invalid_commands: summary.invalid_commands,
        tree_size: summary.tree_size,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

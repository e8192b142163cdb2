/// Command-file interpretation.
///
/// One command per line: a name, then optionally a space and a
/// comma-separated argument list. Lines are lowercased and trimmed, so
/// command names are case-insensitive and player arguments normalize the
/// same way dataset rows do. `insert`, `remove` and `search` take a full
/// player row as arguments; `clear`, `isempty` and `print` take none.
/// Anything else is the defined invalid-command outcome, reported to the
/// results sink rather than treated as an error.
use rostertree_core::{OrderedTree, Player};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::output::Sinks;

pub struct RunStats {
    pub processed: usize,
    pub invalid: usize,
}

/// Run every command in `path` against `tree`, appending one outcome line
/// per command to the results sink.
pub fn process_file<W: Write>(
    path: &Path,
    tree: &mut OrderedTree<Player>,
    sinks: &mut Sinks<W>,
) -> io::Result<RunStats> {
    process_reader(BufReader::new(File::open(path)?), tree, sinks)
}

pub fn process_reader<R: BufRead, W: Write>(
    reader: R,
    tree: &mut OrderedTree<Player>,
    sinks: &mut Sinks<W>,
) -> io::Result<RunStats> {
    let mut stats = RunStats {
        processed: 0,
        invalid: 0,
    };

    for line in reader.lines() {
        let line = line?.to_lowercase();
        let Some((name, args)) = split_command(&line) else {
            continue;
        };
        let valid = execute(name, args.as_deref(), tree, sinks)?;
        stats.processed += 1;
        if !valid {
            stats.invalid += 1;
        }
    }

    Ok(stats)
}

/// Splits a line into (command name, optional argument fields).
/// `None` for blank lines.
fn split_command(line: &str) -> Option<(&str, Option<Vec<&str>>)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.split_once(' ') {
        None => Some((line, None)),
        Some((name, rest)) => {
            let rest = rest.trim();
            if rest.is_empty() {
                Some((name, None))
            } else {
                Some((name, Some(rest.split(',').map(str::trim).collect())))
            }
        }
    }
}

/// Executes one command. Returns whether the command itself was valid;
/// "not found" outcomes from the tree are still valid commands.
fn execute<W: Write>(
    name: &str,
    args: Option<&[&str]>,
    tree: &mut OrderedTree<Player>,
    sinks: &mut Sinks<W>,
) -> io::Result<bool> {
    match name {
        "insert" | "remove" | "search" => {
            let Some(fields) = args else {
                sinks.result("Invalid Command")?;
                return Ok(false);
            };
            // Construction happens before any tree call, so a bad argument
            // list abandons the command with the tree untouched.
            let player = match Player::from_fields(fields) {
                Ok(p) => p,
                Err(_) => {
                    let line = format!("Invalid player data for [{}]", fields.join(", "));
                    sinks.result(&line)?;
                    return Ok(false);
                }
            };
            match name {
                "insert" => {
                    let line = format!("inserted [{player}]");
                    tree.insert(player);
                    sinks.result(&line)?;
                }
                "remove" => match tree.remove(&player) {
                    Some(removed) => sinks.result(&format!("removed [{removed}]"))?,
                    None => sinks.result("remove failed")?,
                },
                "search" => match tree.search(&player) {
                    Some(found) => sinks.result(&format!("found [{found}]"))?,
                    None => sinks.result("search failed")?,
                },
                _ => unreachable!(),
            }
            Ok(true)
        }
        "clear" => {
            tree.clear();
            sinks.result("Tree cleared")?;
            Ok(true)
        }
        "isempty" => {
            sinks.result(if tree.is_empty() {
                "Tree is empty"
            } else {
                "Tree is not empty"
            })?;
            Ok(true)
        }
        "print" => {
            for player in tree.iter() {
                sinks.print_line(&player.to_string())?;
            }
            let line = format!("Printed in {}", sinks.print_path().display());
            sinks.result(&line)?;
            Ok(true)
        }
        _ => {
            sinks.result("Invalid Command")?;
            Ok(false)
        }
    }
}

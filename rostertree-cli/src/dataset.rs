/// Dataset loading: CSV rows in, tree inserts out.
///
/// The dataset is a header-bearing comma-delimited file. Lines are
/// lowercased before splitting, the same normalization the command
/// interpreter applies, so identity comparisons between loaded records and
/// command arguments line up. Fields in this dataset carry no quoting, so
/// a plain comma split is the whole parse.
use rostertree_core::{OrderedTree, Player};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub struct LoadStats {
    pub loaded: usize,
    pub skipped: usize,
}

/// Load every well-formed row of `path` into `tree`. Malformed rows are
/// reported to stderr by data line number and skipped; the load never
/// aborts on them.
pub fn load_players(path: &Path, tree: &mut OrderedTree<Player>) -> io::Result<LoadStats> {
    load_from_reader(BufReader::new(File::open(path)?), tree)
}

pub fn load_from_reader<R: BufRead>(
    reader: R,
    tree: &mut OrderedTree<Player>,
) -> io::Result<LoadStats> {
    let mut lines = reader.lines();

    // Header line: always present, never data.
    if let Some(header) = lines.next() {
        header?;
    }

    let mut stats = LoadStats {
        loaded: 0,
        skipped: 0,
    };

    for (idx, line) in lines.enumerate() {
        let line = line?.to_lowercase();
        if line.trim().is_empty() {
            continue;
        }

        let line_number = idx + 1; // 1-based over data rows
        let fields: Vec<&str> = line.split(',').collect();
        match Player::from_fields(&fields) {
            Ok(player) => {
                tree.insert(player);
                stats.loaded += 1;
            }
            Err(e) => {
                eprintln!("line {line_number} has an invalid format: {e}");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

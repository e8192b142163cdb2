mod commands;
mod config;
mod dataset;
mod output;

use clap::Parser;
use rostertree_core::OrderedTree;
use std::path::PathBuf;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(
    name = "rostertree",
    version,
    about = "Load a player dataset into an ordered tree and run command files against it"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Load the dataset and process a command file
    Run(RunArgs),
    /// Create a default config file at ~/.config/rostertree/config.toml
    Init,
}

#[derive(Parser)]
struct RunArgs {
    /// Player dataset CSV (header line is skipped)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Command file, one command per line
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Results file, one line appended per command (default: result.txt)
    #[arg(long)]
    results: Option<PathBuf>,

    /// Destination for the `print` command's CSV output (default: printed_tree.csv)
    #[arg(long)]
    print_to: Option<PathBuf>,

    /// Path to config file (default: ~/.config/rostertree/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output the run summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Show progress during execution
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default dataset and output paths.");
        }
    }
}

fn run(args: RunArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let dataset_path = args
        .dataset
        .clone()
        .or(cfg.dataset.map(PathBuf::from))
        .unwrap_or_else(|| {
            bail(format!(
                "No dataset specified. Pass --dataset or set it in {}",
                config_path.display()
            ));
        });
    let commands_path = args
        .commands
        .clone()
        .or(cfg.commands.map(PathBuf::from))
        .unwrap_or_else(|| {
            bail(format!(
                "No command file specified. Pass --commands or set it in {}",
                config_path.display()
            ));
        });
    let results_path = args
        .results
        .clone()
        .or(cfg.results.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("result.txt"));
    let print_path = args
        .print_to
        .clone()
        .or(cfg.print_to.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("printed_tree.csv"));

    let mut tree = OrderedTree::new();

    let load = dataset::load_players(&dataset_path, &mut tree).unwrap_or_else(|e| {
        bail(format!(
            "Failed to read dataset {}: {e}",
            dataset_path.display()
        ))
    });

    if args.verbose {
        eprintln!(
            "Loaded {} players from {} ({} rows skipped)",
            load.loaded,
            dataset_path.display(),
            load.skipped,
        );
    }

    let mut sinks = output::FileSinks::open(&results_path, &print_path).unwrap_or_else(|e| {
        bail(format!(
            "Failed to open output files {} / {}: {e}",
            results_path.display(),
            print_path.display()
        ))
    });

    let stats = commands::process_file(&commands_path, &mut tree, &mut sinks).unwrap_or_else(|e| {
        bail(format!(
            "Failed to process command file {}: {e}",
            commands_path.display()
        ))
    });

    sinks
        .flush()
        .unwrap_or_else(|e| bail(format!("Failed to flush output files: {e}")));

    if args.verbose {
        eprintln!(
            "Processed {} commands ({} invalid)",
            stats.processed, stats.invalid,
        );
    }

    let summary = output::RunSummary {
        players_loaded: load.loaded,
        rows_skipped: load.skipped,
        commands_processed: stats.processed,
        invalid_commands: stats.invalid,
        tree_size: tree.len(),
    };

    if args.json {
        output::print_json(&summary);
    } else {
        output::print_summary(&summary, &results_path);
    }
}

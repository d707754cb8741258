mod commands;
mod logger;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "quotecmp",
    version,
    about = "Side-by-side comparison of commercial insurance quotes"
)]
struct Cli {
    /// Log rule decisions (or set RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one quote (PDF, or pre-extracted .txt) into structured data
    Parse {
        /// Path to PDF or text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output (with trace) to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom vocabulary file(s) extending the built-in one
        #[arg(long = "vocabulary", value_name = "FILE")]
        vocabulary: Vec<PathBuf>,
    },
    /// Parse two quotes and align them side by side
    Compare {
        /// First quote (shown as Option A)
        quote1: PathBuf,

        /// Second quote (shown as Option B)
        quote2: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Custom vocabulary file(s) extending the built-in one
        #[arg(long = "vocabulary", value_name = "FILE")]
        vocabulary: Vec<PathBuf>,
    },
    /// Inspect and validate vocabularies
    Vocabulary {
        #[command(subcommand)]
        action: VocabularyAction,
    },
}

#[derive(Subcommand)]
enum VocabularyAction {
    /// List built-in vocabularies
    List,
    /// Show carriers, coverage names and synonyms of a built-in vocabulary
    Explain {
        /// Preset name (e.g., "commercial")
        #[arg(default_value = "commercial")]
        preset: String,
    },
    /// Print the JSON vocabulary schema with field descriptions and example
    Schema,
    /// Validate a custom vocabulary file
    Validate {
        /// Path to JSON vocabulary file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            vocabulary,
        } => commands::parse::run(input_file, &output, out, &vocabulary),
        Commands::Compare {
            quote1,
            quote2,
            output,
            vocabulary,
        } => commands::compare::run(&quote1, &quote2, &output, &vocabulary),
        Commands::Vocabulary { action } => match action {
            VocabularyAction::List => commands::vocabulary::list(),
            VocabularyAction::Explain { preset } => commands::vocabulary::explain(&preset),
            VocabularyAction::Schema => commands::vocabulary::schema(),
            VocabularyAction::Validate { file } => commands::vocabulary::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

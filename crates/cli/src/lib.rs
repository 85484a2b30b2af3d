mod probe;

use clap::{Parser, Subcommand};
use galah_core::Settings;
use galah_core::logging::LogMode;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "galah",
    version,
    about = "Hover and go-to-definition for galah documents",
    long_about = "galah-nav resolves bracketed path references such as <enum/Foo/Bar> against the \
                  enum, struct and class declarations of the same document. It runs as a language \
                  server, or offline against a file for scripting and debugging."
)]
pub struct Cli {
    /// JSON settings file (languageId, keywords, unmatchedClose, declarationsPerLine)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Positions are zero-based; columns count UTF-16 code units.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server on stdio
    Lsp,
    /// List the bracketed references on a line
    Paths {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "LINE")]
        line: usize,
    },
    /// Show the reference under a cursor, as an editor hover would
    Hover {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "LINE")]
        line: usize,
        #[arg(value_name = "COLUMN")]
        column: usize,
    },
    /// Resolve the reference under a cursor to its declaration
    Definition {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "LINE")]
        line: usize,
        #[arg(value_name = "COLUMN")]
        column: usize,
    },
    /// Resolve a path such as `Shape/Circle` directly
    Resolve {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// List every declaration the resolver can see
    Declarations {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Exit code 0 means a hit, 1 a miss.
pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mode = match &cli.command {
        Commands::Lsp => LogMode::Server,
        _ => LogMode::Command,
    };
    let _guard = galah_core::logging::init_logging(mode);

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    tracing::debug!("running with {:?}", settings);

    let out = probe::Output { json: cli.json };
    match cli.command {
        Commands::Lsp => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(galah_lsp::run_server(settings))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Paths { file, line } => probe::paths(&file, line, &settings, out),
        Commands::Hover { file, line, column } => {
            probe::hover(&file, line, column, &settings, out)
        }
        Commands::Definition { file, line, column } => {
            probe::definition(&file, line, column, &settings, out)
        }
        Commands::Resolve { file, path } => probe::resolve(&file, &path, &settings, out),
        Commands::Declarations { file } => probe::declarations(&file, &settings, out),
    }
}

mod lens;

use clap::{Parser, Subcommand};
use mapperlens_runtime::LogSink;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mapperlens",
    version,
    about = "Code lenses linking MyBatis mapper interfaces to their XML statements",
    long_about = "mapperlens matches the methods of Java MyBatis mapper interfaces to the \
                  <select|insert|update|delete|sql> statements of their mapper XML, offering \
                  to jump to an existing statement or to create a missing one."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server on stdio
    Lsp,
    /// Print the code lenses of a Java mapper file
    #[command(
        long_about = "Computes the lenses an editor would show for FILE: one per mapper method, \
                      either navigating to its XML statement or generating one."
    )]
    Lens {
        /// Java mapper interface to inspect
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Workspace folder the file belongs to. Defaults to the current directory.
        #[arg(short, long, value_name = "DIR")]
        workspace: Option<PathBuf>,

        /// Print the lenses as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = mapperlens_runtime::init_logging(match &cli.command {
        Commands::Lsp => LogSink::Lsp,
        Commands::Lens { .. } => LogSink::Cli,
    });

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Lsp => rt.block_on(mapperlens_lsp::run_server()),
        Commands::Lens {
            path,
            workspace,
            json,
        } => rt.block_on(lens::run(path, workspace, json)),
    }
}

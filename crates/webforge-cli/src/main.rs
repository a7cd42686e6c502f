use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "webforge")]
#[command(about = "WEBFORGE CLI - preview, prompt and snippet tools for the website workbench", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the preview HTML document for a component file
    Preview {
        /// Component source, `-` for stdin
        file: PathBuf,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Extra stylesheet available for inlining
        #[arg(long = "css", value_name = "NAME=PATH")]
        css: Vec<String>,
    },
    /// Print the starter project tree
    Tree {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract fenced code snippets from an assistant reply
    Snippets {
        /// Reply text, `-` for stdin
        file: PathBuf,
    },
    /// Print the prompt that would be sent for a message
    Prompt {
        utterance: String,
        /// Name of the active file
        #[arg(long)]
        file: Option<String>,
        /// Path to the buffer content
        #[arg(long)]
        code: Option<PathBuf>,
    },
    /// Send one message to Gemini and print the reply
    Ask {
        utterance: String,
        /// Model override
        #[arg(long)]
        model: Option<String>,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("WEBFORGE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview { file, output, css } => {
            commands::preview::run(&file, output.as_deref(), &css)?
        }
        Commands::Tree { json } => commands::tree::run(json)?,
        Commands::Snippets { file } => commands::snippets::run(&file)?,
        Commands::Prompt {
            utterance,
            file,
            code,
        } => commands::prompt::run(&utterance, file.as_deref(), code.as_deref())?,
        Commands::Ask { utterance, model } => commands::ask::run(&utterance, model).await?,
    }

    Ok(())
}

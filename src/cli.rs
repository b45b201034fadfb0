//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lokai CLI
#[derive(Parser, Debug)]
#[command(
    name = "lokai",
    version,
    about = "Chat with local models, adapting to what each one supports"
)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with a model (interactive when no message is given)
    Chat(ChatArgs),
    /// Manage models on the server
    Models(ModelsArgs),
    /// Run the web front-end
    #[cfg(feature = "web")]
    Serve(ServeArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Server base URL
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Image file to include (repeatable)
    #[arg(short, long = "image")]
    pub images: Vec<PathBuf>,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Disable token streaming
    #[arg(long)]
    pub no_stream: bool,

    /// Message to send (omit for interactive mode)
    pub message: Option<String>,
}

/// Arguments for the `models` subcommand group.
#[derive(Parser, Debug)]
pub struct ModelsArgs {
    /// Server base URL
    #[arg(short = 'u', long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: ModelsCommands,
}

/// Model management subcommands.
#[derive(Subcommand, Debug)]
pub enum ModelsCommands {
    /// List models available on the server
    List,
    /// Download a model
    Pull {
        /// Model to download
        name: String,
    },
    /// Delete a model
    Delete {
        /// Model to delete
        name: String,
    },
}

/// Arguments for the `serve` subcommand.
#[cfg(feature = "web")]
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: std::net::SocketAddr,

    /// Server base URL
    #[arg(short = 'u', long)]
    pub url: Option<String>,
}

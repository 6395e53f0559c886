use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ideabox")]
#[command(version, about = "Capture, organize and develop your ideas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where the client looks for the service and its offline copy.
#[derive(Args, Debug, Clone, Default)]
pub struct ClientArgs {
    /// Base URL of the ideabox service
    #[arg(long)]
    pub api_url: Option<String>,

    /// Directory for the offline copy
    #[arg(long)]
    pub local_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,

        /// JSON file holding every idea
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// List ideas, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over title and description
        #[arg(short, long)]
        search: Option<String>,

        /// Category name, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Show ideas carrying any of these tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Capture a new idea
    #[command(alias = "n")]
    Add {
        title: String,
        description: String,

        #[arg(short, long)]
        category: String,

        #[arg(short, long = "tag")]
        tags: Vec<String>,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Replace an idea's title, description, category and tags
    #[command(alias = "e")]
    Edit {
        id: String,
        title: String,
        description: String,

        #[arg(short, long)]
        category: String,

        #[arg(short, long = "tag")]
        tags: Vec<String>,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Delete an idea
    #[command(alias = "rm")]
    Delete {
        id: String,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// List every tag in use
    Tags {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Show totals per category
    Stats {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Ask the service whether it is up
    Health {
        #[command(flatten)]
        client: ClientArgs,
    },
}

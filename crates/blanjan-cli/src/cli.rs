use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "blanjan")]
#[command(about = "Keep a shopping list from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Quick add: blanjan "oat milk"
    #[arg(trailing_var_arg = true)]
    pub item: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an item to the top of the list
    #[command(alias = "new")]
    Add {
        /// Item text
        text: Vec<String>,
    },
    /// List items
    #[command(alias = "ls")]
    List {
        /// Only show items containing this text
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search items
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the text of an item
    Edit {
        /// Item ID or unique ID prefix
        id: String,
        /// New text (opens $EDITOR when omitted)
        text: Vec<String>,
        /// Edit even if the item is completed
        #[arg(short, long)]
        force: bool,
    },
    /// Mark items as completed, or back to open
    #[command(alias = "done")]
    Toggle {
        /// Item IDs or unique ID prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete items
    #[command(alias = "rm")]
    Delete {
        /// Item IDs or unique ID prefixes
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,
        /// Delete every item
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        /// Delete a single completed item
        #[arg(short, long)]
        force: bool,
    },
    /// Switch between light and dark theme
    Theme {
        /// Print the current theme without switching
        #[arg(long)]
        show: bool,
    },
    /// Export items
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Interactive session keeping selection, edit, and search state
    Session,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for blanjan_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

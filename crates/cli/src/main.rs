mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ng", version, about = "Index, search and explore the link graph of a markdown vault")]
struct Cli {
    /// Path to config.toml (default: $XDG_CONFIG_HOME/notegraph/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile to use from the config file
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Use this vault directly with default settings instead of a config file
    #[arg(long, global = true, conflicts_with = "profile")]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Build the index and print statistics
    Index(IndexArgs),

    /// Search file names and content for a substring
    Search(SearchArgs),

    /// Print the metadata extracted from a single document
    Parse(ParseArgs),

    /// Show backlinks and outgoing links of a note
    Links(LinksArgs),

    /// List tags, or the notes carrying one tag
    Tags(TagsArgs),

    /// Print the link graph as JSON
    Graph,

    /// Find notes with no incoming or outgoing links
    Orphans(OrphansArgs),

    /// List links whose target does not resolve
    Unresolved(UnresolvedArgs),
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Quiet,
}

#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Print every indexed document as JSON instead of statistics
    #[arg(long)]
    pub json: bool,

    /// Print each document as it is indexed
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    pub query: String,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Shorthand for --output quiet
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Document to parse
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Note path (absolute or relative to the vault) or note name
    pub note: String,

    /// Only show backlinks
    #[arg(long, conflicts_with = "outlinks")]
    pub backlinks: bool,

    /// Only show outgoing links
    #[arg(long)]
    pub outlinks: bool,

    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Show the notes carrying this tag
    pub tag: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct OrphansArgs {
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct UnresolvedArgs {
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();
    let vault = cli.vault.as_deref();

    // Every command except doctor and parse works on a configured vault
    let setup = || {
        let rc = cmd::load_config(config, profile, vault);
        logging::init(&rc);
        rc
    };

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile, vault),
        Commands::Parse(args) => cmd::parse::run(args),
        Commands::Index(args) => cmd::index::run(&setup(), args),
        Commands::Search(args) => cmd::search::run(&setup(), args),
        Commands::Links(args) => cmd::links::run(&setup(), args),
        Commands::Tags(args) => cmd::tags::run(&setup(), args),
        Commands::Graph => cmd::graph::run(&setup()),
        Commands::Orphans(args) => cmd::orphans::run(&setup(), args),
        Commands::Unresolved(args) => cmd::unresolved::run(&setup(), args),
    }
}

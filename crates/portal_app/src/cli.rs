use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "portal",
    version,
    about = "Browse and manage organization records over the GraphQL API"
)]
pub struct Cli {
    /// Configuration file; missing means defaults.
    #[arg(long, global = true, default_value = "portal.ron")]
    pub config: PathBuf,

    /// GraphQL endpoint, overriding the config file.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub log: Option<LogDestination>,

    /// More log detail; repeat for trace output.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the session file, overriding the config file.
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a user id and API token for later requests.
    Login {
        #[arg(long)]
        user: String,
        #[arg(long)]
        token: String,
    },
    /// Forget the stored session.
    Logout,
    /// Print a filtered, sorted list.
    List(ListArgs),
    /// Delete one record.
    Delete {
        #[arg(value_enum)]
        resource: ResourceKind,
        /// Organization id, or campaign id for pledges.
        #[arg(long)]
        scope: String,
        #[arg(long)]
        id: String,
    },
    CreateCategory {
        #[arg(long)]
        scope: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        disabled: bool,
    },
    /// Change the given fields of a category. Unchanged values are not sent.
    UpdateCategory {
        #[arg(long)]
        scope: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        disabled: Option<bool>,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub resource: ResourceKind,
    /// Organization id, or campaign id for pledges.
    #[arg(long)]
    pub scope: String,
    /// Case-insensitive substring to look for.
    #[arg(long)]
    pub search: Option<String>,
    /// Field the search is restricted to, e.g. `name` or `assignee`.
    #[arg(long)]
    pub search_by: Option<String>,
    /// Status filter, e.g. `active`, `disabled`, `pending`, `completed`.
    #[arg(long)]
    pub status: Option<String>,
    /// Sort key such as `createdAt_DESC`, `amount_ASC` or `none`.
    #[arg(long)]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Categories,
    ActionItems,
    Pledges,
}

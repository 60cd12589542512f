use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "thread-labels", version, about = "Labels for discussion threads, over GraphQL")]
pub struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(long, env = "THREAD_LABELS_CONFIG", default_value = "thread-labels.json")]
    pub config: PathBuf,

    /// Override the configured SQLite database path
    #[arg(long)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the GraphQL schema in SDL form
    Schema,
    /// Execute one GraphQL request (JSON on stdin) and print the response
    Exec {
        /// Database ID of the acting user; anonymous when omitted
        #[arg(long)]
        viewer: Option<i64>,
    },
    CreateUser {
        username: String,
        #[arg(long)]
        site_admin: bool,
    },
    CreateOrg {
        name: String,
    },
    AddMember {
        org_id: i64,
        user_id: i64,
    },
    CreateThread {
        title: String,
    },
    DeleteThread {
        thread_id: i64,
    },
}

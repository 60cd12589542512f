pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod ids;
pub mod labels;
pub mod pagination;
pub mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tokio::io::AsyncReadExt;

use auth::Viewer;
use cli::{Cli, Command};
use config::Config;
use db::Database;
use ids::GlobalId;
use labels::LabelService;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    // RUST_LOG takes precedence over the configured filter
    utils::logging::init(&config.log_filter);
    log::info!("thread-labels starting up...");

    let open_database = || Database::new(config.database_path.clone());

    let output = match cli.command {
        Command::Schema => {
            let schema = graphql::build_schema(LabelService::new(Database::in_memory()?));
            println!("{}", schema.sdl());
            return Ok(());
        }
        Command::Exec { viewer } => {
            let mut body = String::new();
            tokio::io::stdin()
                .read_to_string(&mut body)
                .await
                .context("failed to read GraphQL request from stdin")?;
            let request: async_graphql::Request =
                serde_json::from_str(&body).context("stdin is not a GraphQL request")?;

            let viewer = viewer.map(Viewer::user).unwrap_or_default();
            let schema = graphql::build_schema(LabelService::new(open_database()?));
            let response = graphql::execute(&schema, request, viewer).await;
            serde_json::to_value(&response)?
        }
        Command::CreateUser {
            username,
            site_admin,
        } => {
            let user = open_database()?.create_user(&username, site_admin).await?;
            serde_json::to_value(&user)?
        }
        Command::CreateOrg { name } => {
            let org = open_database()?.create_org(&name).await?;
            json!({ "id": GlobalId::Org(org.id).encode(), "org": org })
        }
        Command::AddMember { org_id, user_id } => {
            open_database()?.add_org_member(org_id, user_id).await?;
            json!({ "orgId": org_id, "userId": user_id })
        }
        Command::CreateThread { title } => {
            let thread = open_database()?.create_thread(&title).await?;
            json!({ "id": GlobalId::Thread(thread.id).encode(), "thread": thread })
        }
        Command::DeleteThread { thread_id } => {
            open_database()?.soft_delete_thread(thread_id).await?;
            json!({ "deleted": GlobalId::Thread(thread_id).encode() })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

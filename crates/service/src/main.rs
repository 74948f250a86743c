// Entry point: run one request flow against the record store and print the result

mod blogposts;
mod cli;
mod config;
mod database;
mod error;
mod seed;
mod users;
mod visualize;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use database::Database;
use error::ApiResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config).await?;

    match run(cli.command, &db, &config).await {
        Ok(output) => {
            let json = serde_json::to_string_pretty(&output).context("Failed to render output")?;
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Request failed with status {}: {}", e.status(), e);
            let body = serde_json::json!({ "status": e.status(), "message": e.to_string() });
            eprintln!("{body}");
            std::process::exit(1);
        }
    }
}

async fn run(command: Command, db: &Database, config: &Config) -> ApiResult<Value> {
    match command {
        Command::Seed { users, posts } => {
            let mut rng = StdRng::from_entropy();
            to_json(seed::seed(db, users, posts, &mut rng).await?)
        }
        Command::UsersAsc => to_json(users::users_ascending(db).await?),
        Command::UsersDesc => to_json(users::users_descending(db).await?),
        Command::User { id } => to_json(users::read_user(db, &id).await?),
        Command::CreateUser { fields } => {
            to_json(users::create_user(db, config, &fields.into()).await?)
        }
        Command::UpdateUser { id, fields } => {
            to_json(users::update_user(db, &id, &fields.into()).await?)
        }
        Command::DeleteUser { id } => {
            users::delete_user(db, &id).await?;
            to_json(serde_json::json!({ "message": "User deleted" }))
        }
        Command::UserPosts { id } => to_json(users::user_blogposts(db, &id).await?),
        Command::CreatePost { user_id, fields } => {
            to_json(blogposts::create_blogpost(db, config, &user_id, &fields.into()).await?)
        }
        Command::Post { id } => to_json(blogposts::read_blogpost(db, &id).await?),
        Command::UpdatePost { id, fields } => {
            to_json(blogposts::update_blogpost(db, &id, &fields.into()).await?)
        }
        Command::DeletePost { id } => {
            blogposts::delete_blogpost(db, &id).await?;
            to_json(serde_json::json!({ "message": "Blog post deleted" }))
        }
        Command::Numerics => to_json(blogposts::numeric_blogposts(db).await?),
        Command::DeleteRecent { count } => {
            let count = count.unwrap_or(config.delete_recent_count);
            let deleted = blogposts::delete_recent_blogposts(db, count).await?;
            to_json(serde_json::json!({ "deleted": deleted }))
        }
        Command::Visualize { structure } => visualize::visualize(db, config, structure).await,
    }
}

fn to_json<T: Serialize>(value: T) -> ApiResult<Value> {
    Ok(serde_json::to_value(value).context("Failed to serialize response")?)
}

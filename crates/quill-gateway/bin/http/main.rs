mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use quill_gateway::app::App;
use quill_gateway::state::AppState;
use quill_service::{CommentService, PostService};
use quill_storage::{InMemoryRepository, MySqlRepository};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let state = match config.storage {
        StorageBackendArg::InMemory => {
            let repository = Arc::new(InMemoryRepository::new());
            AppState::new(
                PostService::new(repository.clone()),
                CommentService::new(repository.clone(), repository),
            )
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = Arc::new(MySqlRepository::connect(&mysql_dsn).await?);
            AppState::new(
                PostService::new(repository.clone()),
                CommentService::new(repository.clone(), repository),
            )
        }
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state)).await?;

    Ok(())
}

//! School locator HTTP server.

use anyhow::Context;
use log::{error, info};
use school_core::db::{open_db, open_db_in_memory};
use school_core::SqliteSchoolRepository;
use school_server::build_router;
use school_server::config::{DatabaseLocation, ServerConfig};
use school_server::state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    school_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let repo = match open_store(&config.database) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=store_open module=server status=error error={err:#}");
            return Err(err);
        }
    };

    let app = build_router(AppState::new(Arc::new(repo)));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!("event=server_start module=server status=ok addr={bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

fn open_store(location: &DatabaseLocation) -> anyhow::Result<SqliteSchoolRepository> {
    let conn = match location {
        DatabaseLocation::Memory => open_db_in_memory()?,
        DatabaseLocation::File(path) => open_db(path)
            .with_context(|| format!("failed to open database `{}`", path.display()))?,
    };
    Ok(SqliteSchoolRepository::try_new(conn)?)
}

//! SampleDB demo CLI
//!
//! Parses CLI configuration, connects to the document store with schema
//! migration, then runs a scripted insert → read-all → update → read-all →
//! delete → read-all sequence, logging each result.

mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Args, Config};
use sampledb_domain::SampleEntity;
use sampledb_persistence::{DocumentStore, Repository, SampleEntityRepository, Schema};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sampledb=info".parse()?))
        .init();

    let config = Config::from_args(Args::parse());
    info!(
        arg1 = %config.arg1,
        env = ?config.env,
        "Application started with configuration"
    );

    let database_name = config.database_name();
    let schema = Schema::new(database_name, SampleEntity::SCHEMA.name);

    info!(
        host = %config.store.host,
        port = config.store.port,
        database = database_name,
        force_drop = config.store.force_drop,
        "Connecting to document store"
    );

    let mut store = DocumentStore::new(config.store.clone());
    store.connect(&schema).await?;

    let store = Arc::new(store);
    let repository = SampleEntityRepository::new(Arc::clone(&store), database_name);

    let first_entry = SampleEntity::new(1, "jeden");
    repository.insert(&first_entry).await?;
    log_snapshot("after insertion", &repository.get_all().await?)?;

    let updated_first_entry = SampleEntity::new(first_entry.id, "jeden after update");
    repository.update(&updated_first_entry).await?;
    log_snapshot("after update", &repository.get_all().await?)?;

    repository.delete(&first_entry).await?;
    log_snapshot("after deletion", &repository.get_all().await?)?;

    Ok(())
}

/// Log a JSON snapshot of the entity list after a CRUD step.
fn log_snapshot(step: &str, entities: &[SampleEntity]) -> Result<()> {
    info!(
        count = entities.len(),
        entities = %serde_json::to_string(entities)?,
        "All sample entities {}",
        step
    );
    Ok(())
}

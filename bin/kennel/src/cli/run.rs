use crate::cli::run::graphql::GraphQLArgs;
use anyhow::Context;
use clap::Parser;
use kennel::{
    service::{
        Config,
        KennelService,
    },
    store::{
        Record,
        RecordStore,
    },
};
use std::{
    fs,
    net,
    path::{
        Path,
        PathBuf,
    },
};

pub mod graphql;

#[derive(Debug, Clone, Parser)]
pub struct Command {
    #[clap(flatten)]
    pub graphql: GraphQLArgs,

    /// Path to a JSON array of records to serve instead of the built-in ones.
    #[clap(long = "records", value_parser, env)]
    pub records: Option<PathBuf>,
}

impl Command {
    pub fn get_config(&self) -> Config {
        let GraphQLArgs {
            ip,
            port,
            graphql_max_depth,
            graphql_max_complexity,
            graphql_max_concurrent_queries,
            query_log_threshold_time,
            api_request_timeout,
        } = self.graphql.clone();

        Config {
            addr: net::SocketAddr::new(ip, port),
            max_queries_depth: graphql_max_depth,
            max_queries_complexity: graphql_max_complexity,
            max_concurrent_queries: graphql_max_concurrent_queries,
            query_log_threshold_time: query_log_threshold_time.into(),
            api_request_timeout: api_request_timeout.into(),
        }
    }

    pub fn get_store(&self) -> anyhow::Result<RecordStore> {
        match &self.records {
            Some(path) => load_records(path),
            None => Ok(RecordStore::reference()),
        }
    }
}

fn load_records(path: &Path) -> anyhow::Result<RecordStore> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse records from {}", path.display()))?;
    let store = RecordStore::new(records)
        .with_context(|| format!("Invalid records in {}", path.display()))?;

    tracing::info!("Loaded {} records from {}", store.len(), path.display());
    Ok(store)
}

fn print_usage(port: u16) {
    println!("The server is running on port: {port}");
    println!(
        "Get single record: curl -g 'http://localhost:{port}/graphql?query={{byId(id:1){{id,name,category,age}}}}'"
    );
    println!(
        "Get all records: curl -g 'http://localhost:{port}/graphql?query={{list{{id,name,category,age}}}}'"
    );
    println!("Access the playground via browser at 'http://localhost:{port}/playground'");
}

pub async fn exec(command: Command) -> anyhow::Result<()> {
    let config = command.get_config();
    let store = command.get_store()?;

    let mut service = KennelService::from_store(store, config).await?;
    print_usage(service.bound_address.port());

    let stop_requested = tokio::select! {
        result = service.await_stop() => {
            result?;
            false
        }
        result = shutdown_signal() => {
            result?;
            true
        }
    };

    if stop_requested {
        service.send_stop_signal_and_await_shutdown().await?;
    }

    tracing::info!("Graceful shutdown");

    Ok(())
}

async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .context("failed to install sigterm handler")?;

        let mut sigint =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
                .context("failed to install sigint handler")?;

        tokio::select! {
            _ = sigterm.recv() => {
                tracing::info!("sigterm received");
            }
            _ = sigint.recv() => {
                tracing::info!("sigint received");
            }
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("failed to install CTRL+C signal handler")?;
        tracing::info!("CTRL+C received");
    }

    Ok(())
}

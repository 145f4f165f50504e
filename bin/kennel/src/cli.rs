use anyhow::Context;
use clap::Parser;
use std::{
    env,
    path::PathBuf,
    str::FromStr,
};
use tracing_subscriber::{
    Layer,
    filter::EnvFilter,
    layer::SubscriberExt,
    registry,
};

#[cfg(feature = "env")]
use dotenvy::dotenv;

pub mod dump;
pub mod run;

#[derive(Parser, Debug)]
#[clap(
    name = "kennel",
    about = "GraphQL server for the kennel records",
    version,
    rename_all = "kebab-case"
)]
pub struct Opt {
    #[clap(subcommand)]
    command: Kennel,
}

#[derive(Debug, Parser)]
pub enum Kennel {
    Run(run::Command),
    DumpSchema(dump::Command),
}

pub const LOG_FILTER: &str = "RUST_LOG";
pub const HUMAN_LOGGING: &str = "HUMAN_LOGGING";

#[cfg(feature = "env")]
fn init_environment() -> Option<PathBuf> {
    dotenv().ok()
}

#[cfg(not(feature = "env"))]
fn init_environment() -> Option<PathBuf> {
    None
}

pub fn init_logging() -> anyhow::Result<()> {
    let filter = match env::var_os(LOG_FILTER) {
        Some(_) => EnvFilter::try_from_default_env()
            .with_context(|| format!("Invalid `{LOG_FILTER}` provided"))?,
        None => EnvFilter::new("info"),
    };

    let human_logging = match env::var(HUMAN_LOGGING) {
        Ok(value) => bool::from_str(&value).with_context(|| {
            format!("Expected `true` or `false` to be provided for `{HUMAN_LOGGING}`")
        })?,
        Err(_) => true,
    };

    let layer = tracing_subscriber::fmt::Layer::default().with_writer(std::io::stderr);

    let fmt = if human_logging {
        // use pretty logs
        layer
            .with_ansi(true)
            .with_level(true)
            .with_line_number(true)
            .boxed()
    } else {
        // use machine parseable structured logs
        layer
            // disable terminal colors
            .with_ansi(false)
            .with_level(true)
            .with_line_number(true)
            // use json
            .json()
            .boxed()
    };

    let subscriber = registry::Registry::default() // provide underlying span data store
        .with(filter) // filter out low-level debug tracing (eg tokio executor)
        .with(fmt); // log to stderr

    tracing::subscriber::set_global_default(subscriber)
        .context("setting global default failed")?;
    Ok(())
}

pub async fn run_cli() -> anyhow::Result<()> {
    // `.env` has to be loaded before logging reads `RUST_LOG` and `HUMAN_LOGGING`.
    let env_path = init_environment();
    init_logging()?;
    if let Some(path) = env_path {
        let path = path.display();
        tracing::info!("Loading environment variables from {path}");
    }

    let opt = Opt::try_parse();
    if opt.is_err() {
        // `kennel` without a subcommand behaves like `kennel run`.
        let command = run::Command::try_parse();
        if let Ok(command) = command {
            return run::exec(command).await
        }
    }

    match opt {
        Ok(opt) => match opt.command {
            Kennel::Run(command) => run::exec(command).await,
            Kennel::DumpSchema(command) => dump::exec(command),
        },
        Err(e) => {
            // Prints the error and exits.
            e.exit()
        }
    }
}

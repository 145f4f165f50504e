use anyhow::Context;
use clap::Parser;
use kennel::schema::build_schema;
use std::{
    fs::File,
    io::Write,
    path::PathBuf,
};

/// Print the GraphQL schema in SDL form.
#[derive(Debug, Clone, Parser)]
pub struct Command {
    /// Write the schema into this file instead of stdout.
    #[clap(long = "output", short = 'o', value_parser)]
    pub output: Option<PathBuf>,
}

pub fn exec(command: Command) -> anyhow::Result<()> {
    let sdl = build_schema().finish().sdl();

    match command.output {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(sdl.as_bytes())?;
            file.sync_all()?;
            tracing::info!("Schema is written to {}", path.display());
        }
        None => {
            std::io::stdout().write_all(sdl.as_bytes())?;
        }
    }

    Ok(())
}

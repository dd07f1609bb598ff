//! The `generate`, `stage` and `list` flows.

use anyhow::{Context, Result};
use tracing::{debug, info};

use tropo_install::{
    BatchTransformer, Launcher, StagedEnvironment, Stager, install_libraries, output_path_for,
};
use tropo_platform::Orchestrator;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::scan::Scanner;

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config, &cli.overrides)
        .with_context(|| format!("failed to load configuration from '{}'", cli.config.display()))?;
    debug!(?config, "configuration loaded");

    match cli.command.unwrap_or_default() {
        Command::Generate => generate(&config).await,
        Command::Stage => stage(&config).await.map(|_| ()),
        Command::List => list(&config),
    }
}

async fn generate(config: &Config) -> Result<()> {
    debug!(
        source = %config.source_directory.display(),
        target = %config.output_directory.display(),
        "generate"
    );
    if !config.source_directory.exists() {
        info!(
            "Request to add '{}' folder. Not added since it does not exist.",
            config.source_directory.display()
        );
        return Ok(());
    }

    let env = stage(config).await?;

    let matched = scan(config)?;
    if matched.is_empty() {
        info!("no sources matched in '{}'", config.source_directory.display());
    }

    let launcher = Launcher::new(&config.java);
    let outputs = BatchTransformer::new(&env, &launcher, &config.libraries, &config.output_directory)
        .transform_all(&config.source_directory, &matched, &Orchestrator::new())
        .await?;
    info!(count = outputs.len(), "templates generated");

    Ok(())
}

/// Create the output directory, stage the runtime and install libraries.
async fn stage(config: &Config) -> Result<StagedEnvironment> {
    tropo_fs::ensure_dir(&config.output_directory)?;

    let artifact = config.runtime_artifact()?;
    let env = Stager::new(&config.temp_directory)
        .stage(artifact, &config.bootstrap_resource())
        .context("staging the runtime failed")?;

    let launcher = Launcher::new(&config.java);
    install_libraries(&env, &launcher, &config.libraries, &Orchestrator::new()).await?;

    Ok(env)
}

fn list(config: &Config) -> Result<()> {
    if !config.source_directory.exists() {
        info!("'{}' does not exist", config.source_directory.display());
        return Ok(());
    }
    for relative in scan(config)? {
        println!(
            "{}\t{}",
            config.source_directory.join(&relative).display(),
            config.output_directory.join(output_path_for(&relative)).display()
        );
    }
    Ok(())
}

fn scan(config: &Config) -> Result<Vec<std::path::PathBuf>> {
    let scanner = Scanner::new(&config.includes, &config.excludes)?;
    Ok(scanner.scan(&config.source_directory)?)
}

//! Fakefile command line
//!
//! `fakefile <provider> [--param value ...]` writes bytes providers to stdout
//! and prints the path of files written by `_file` providers.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgMatches;
use fakefile::{FileRegistry, FileSystemStorage, Generator, ProviderOutput, find_provider, organize_providers};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;

use config::CliConfig;
use error::{CliError, Result};

fn main() -> ExitCode {
    // Load environment variables
    dotenv::dotenv().ok();

    // Logs go to stderr, stdout carries the generated bytes
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fakefile=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli::command().get_matches()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: ArgMatches) -> Result<()> {
    let mut config = CliConfig::from_env()?;
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Err(CliError::Config("no subcommand given".to_string()));
    };
    if let Some(root) = sub_matches.get_one::<std::path::PathBuf>("root") {
        config.root = root.clone();
    }
    if let Some(rel_path) = sub_matches.get_one::<std::path::PathBuf>("rel-path") {
        config.rel_path = rel_path.clone();
    }
    if sub_matches.get_flag("clean-up") {
        config.clean_up = true;
    }
    debug!("configuration: {:?}", config);

    if name == "list" {
        return list(sub_matches.get_flag("json"));
    }

    let provider = find_provider(name).ok_or_else(|| CliError::UnknownProvider(name.to_string()))?;
    let generator = Generator::builder()
        .storage(Arc::new(FileSystemStorage::new(&config.root, &config.rel_path)))
        .registry(Arc::new(FileRegistry::new()))
        .build();

    let args = cli::provider_args(provider, sub_matches);
    match (provider.run)(&generator, &args)? {
        ProviderOutput::Bytes(data) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
            info!("{}: wrote {} bytes", provider.name, data.len());
        }
        ProviderOutput::File(file) => {
            if config.absolute {
                println!("{}", file.absolute_path().display());
            } else {
                println!("{}", file);
            }
            info!("{}: created {}", provider.name, file);
        }
    }
    if config.clean_up {
        generator.registry().clean_up();
        info!("removed generated files");
    }
    Ok(())
}

fn list(json: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, fakefile::PROVIDERS)?;
        writeln!(stdout)?;
        return Ok(());
    }
    for (category, names) in organize_providers() {
        writeln!(stdout, "{category}")?;
        for name in names {
            let summary = find_provider(name).map(|provider| provider.summary).unwrap_or_default();
            writeln!(stdout, "  {name:<15} {summary}")?;
        }
    }
    Ok(())
}

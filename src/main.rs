// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (layered) --> Logging --> Command Dispatch
//!   Version | Options | Sources | RepoName | CheckUrl | Publish
//! ```

use std::process::ExitCode;

use gitops_rs::cli::global::GlobalOptions;
use gitops_rs::cli::{self, Command};
use gitops_rs::cmd::config::{run_options_command, run_sources_command};
use gitops_rs::cmd::locator::{run_check_url_command, run_repo_name_command};
use gitops_rs::cmd::publish::run_publish_command;
use gitops_rs::config::loader::ConfigLoader;
use gitops_rs::config::types::GlobalConfig;
use gitops_rs::config::Config;
use gitops_rs::error::Result;
use gitops_rs::logging::init_logging;
use gitops_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "gitops.toml";
const ENV_PREFIX: &str = "GITOPS";

/// Effective configuration plus the files it was read from.
struct Loaded {
    config: Config,
    sources: Vec<String>,
}

fn main() -> ExitCode {
    let cli = cli::parse();
    let loaded = load_config(&cli.global);

    let log_config = match &loaded {
        Ok(loaded) => log_config_from(&loaded.config.global),
        Err(_) => build_log_config(&cli.global),
    };
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, loaded)
}

fn log_config_from(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn dispatch_command(cli: &cli::Cli, loaded: Result<Loaded>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options(args)) => {
            loaded.and_then(|loaded| run_options_command(args, &loaded.config))
        }
        Some(Command::Sources) => loaded.map(|loaded| run_sources_command(&loaded.sources)),
        Some(Command::RepoName(args)) => run_repo_name_command(args),
        Some(Command::CheckUrl(args)) => {
            return if run_check_url_command(args) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
        Some(Command::Publish(args)) => {
            loaded.and_then(|loaded| run_publish_command(args, &loaded.config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .add_overrides(global.to_config_overrides())
}

fn load_config(global: &GlobalOptions) -> Result<Loaded> {
    let loader = build_config_loader(global)?;
    let sources = loader.format_loaded_files();
    let config = loader.build()?;
    Ok(Loaded { config, sources })
}

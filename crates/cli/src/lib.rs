// FILE: crates/cli/src/lib.rs
//! Shared entry point of the `games`, `anime` and `books` programs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use shelfkeeper_config::{AppConfig, ConfigManager, LogLevel, Settings};
use shelfkeeper_core::Domain;
use shelfkeeper_session::{LiveServices, Session};
use std::path::PathBuf;

mod terminal;

pub use terminal::DialoguerTerminal;

fn program_name(domain: Domain) -> &'static str {
    match domain {
        Domain::Games => "games",
        Domain::Anime => "anime",
        Domain::Books => "books",
    }
}

pub fn build_cli(domain: Domain) -> Command {
    Command::new(program_name(domain))
        .version(env!("CARGO_PKG_VERSION"))
        .about(format!(
            "Search {} and keep your {} collection in Notion",
            domain.catalog_name(),
            domain.noun()
        ))
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Loads settings, sets up logging and runs the menu until the user exits
pub fn run(domain: Domain) -> Result<()> {
    let matches = build_cli(domain).get_matches();
    run_with(domain, &matches)
}

fn run_with(domain: Domain, matches: &ArgMatches) -> Result<()> {
    let manager = match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone()),
        None => ConfigManager::new(),
    }
    .context("Failed to locate the configuration directory")?;

    let verbose = matches.get_flag("verbose");
    init_logging(verbose);

    let path = manager.config_path();
    let settings = Settings::load(manager)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    set_log_level(settings.config().app.log_level, verbose);
    log::debug!("Using configuration at {}", path.display());

    println!(
        "\n{} {}",
        style(format!("{} Collection", domain.label())).bold().cyan(),
        style(format!("(catalog: {})", domain.catalog_name())).dim()
    );

    let mut session = Session::new(domain, DialoguerTerminal::new(), settings, LiveServices);
    session.run().context("Interactive session failed")?;

    println!("{}", style("Goodbye!").dim());
    Ok(())
}

/// Starts logging before the config is read so load warnings are kept
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env();
    // a second init (tests) is harmless
    let _ = builder.try_init();
    set_log_level(AppConfig::default().log_level, verbose);
}

/// `RUST_LOG` wins over `-v`, which wins over the configured level
fn set_log_level(level: LogLevel, verbose: bool) {
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level_filter(level, verbose));
    }
}

fn level_filter(level: LogLevel, verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        level.to_level_filter()
    }
}

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use namewise_core::{Config, Morphology, OutputFormat, StringCache};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod check;
mod cli;
mod morph;
mod rules;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    };

    let use_color = !cli.no_color
        && config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal());
    let format = cli.output.map_or_else(|| config_format(&config), Into::into);

    let morphology = Arc::new(Morphology::with_config(
        Arc::new(StringCache::new()),
        &config.morphology,
    ));

    let result = match cli.command {
        Commands::Pluralize {
            name,
            suffixes,
            case_sensitive,
        } => morph::handle_pluralize(&morphology, &config, &name, suffixes, case_sensitive, format)
            .map(|()| 0),

        Commands::Verb { name } => morph::handle_verb(&morphology, &name, format).map(|()| 0),

        Commands::StripMarker { name } => {
            morph::handle_strip_marker(&morphology, &name, format).map(|()| 0)
        },

        Commands::Check { symbols, disabled } => check::handle_check(
            Arc::clone(&morphology),
            &config,
            &symbols,
            &disabled,
            format,
            use_color,
        ),

        Commands::Rules => rules::handle_rules(&config, format).map(|()| 0),

        Commands::Completions { shell, dir } => {
            let mut cmd = Cli::command();
            let generated = match dir {
                Some(dir) => generate_completions(shell, &mut cmd, "namewise", &dir),
                None => {
                    clap_complete::generate(shell, &mut cmd, "namewise", &mut io::stdout());
                    Ok(())
                },
            };
            generated.map(|()| 0)
        },
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    }
}

/// Log to stderr; NAMEWISE_LOG overrides the level picked by -v
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("NAMEWISE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load().context("Failed to load .namewise/config.toml"),
    }
}

fn config_format(config: &Config) -> OutputFormat {
    OutputFormat::from_name(&config.defaults.output_format).unwrap_or_else(|| {
        warn!(
            format = %config.defaults.output_format,
            "unknown output format in config, using summary"
        );
        OutputFormat::Summary
    })
}

/// Print command output, making sure it ends with a newline
pub fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    eprintln!("Generated completion file: {}", path.display());
    Ok(())
}

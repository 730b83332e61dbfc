use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::OutputFormat;

/// Naming-convention checks and English identifier morphology
#[derive(Parser, Debug)]
#[command(name = "namewise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to the config's output_format)
    #[arg(long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Use this config file instead of .namewise/config.toml
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Propose the plural name for a collection identifier
    Pluralize {
        /// Identifier to pluralize (e.g. CustomerList)
        name: String,

        /// Collection suffix to strip; repeat for several (defaults to the built-in list)
        #[arg(long = "suffix", value_name = "SUFFIX")]
        suffixes: Vec<String>,

        /// Match suffixes case-sensitively
        #[arg(long)]
        case_sensitive: bool,
    },

    /// Turn a verb-derived noun into its verb (Registration -> Register)
    Verb {
        name: String,
    },

    /// Remove Entity/Model markers from an identifier
    StripMarker {
        name: String,
    },

    /// Check a JSON file of symbol records against the rule catalog
    Check {
        /// Symbol file, or '-' for stdin
        symbols: PathBuf,

        /// Rule ids to skip, in addition to those disabled in config
        #[arg(long = "disable", value_name = "RULE", value_delimiter = ',')]
        disabled: Vec<String>,
    },

    /// List the built-in rules
    Rules,

    /// Print shell completions
    Completions {
        shell: Shell,

        /// Write the completion file into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

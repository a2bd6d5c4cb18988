use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mk_core::{Coercion, ExtraFields, ValidateOptions};

/// Top-level CLI parser for the `mkit` binary.
#[derive(Debug, Parser)]
#[command(name = "mkit", version, about = "modelkit - validate JSON against declared models")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file, layered above the project and user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Require JSON types to match exactly (no numeric-string coercion)
    #[arg(long, global = true)]
    pub strict: bool,

    /// Reject keys that the model does not declare
    #[arg(long, global = true)]
    pub forbid_extra: bool,

    /// Indent JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List the available models.
    Models,
    /// Show a model's fields.
    Describe {
        /// Model name, e.g. `User`
        model: String,
    },
    /// Validate a JSON document against a model.
    Validate {
        /// Model name, e.g. `DetailedUser`
        model: String,
        /// JSON file to read; stdin when omitted
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Apply command-line overrides on top of configured options.
    #[must_use]
    pub fn validate_options(&self, configured: ValidateOptions) -> ValidateOptions {
        let mut opts = configured;
        if self.strict {
            opts.coercion = Coercion::Strict;
        }
        if self.forbid_extra {
            opts = opts.with_extra_fields(ExtraFields::Forbid);
        }
        opts
    }
}

//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// conkytext - Conky-compatible text templates for system metrics.
#[derive(Debug, Parser)]
#[command(name = "conkytext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .conkytext.yml in the working directory)
    #[arg(short, long, global = true, env = "CONKYTEXT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print rendered output and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template (default if no command specified)
    Render(RenderArgs),

    /// Report structural problems in a template
    Check(CheckArgs),

    /// List registered directives and predicates
    Directives(DirectivesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where the template text comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct TemplateInput {
    /// Template text
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    pub template: Option<String>,

    /// Read the template from a file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: TemplateInput,

    /// Metric snapshot file (YAML or JSON)
    #[arg(short, long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Render N frames, pausing `update_interval` between them
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: Option<u32>,

    /// Print cache statistics after rendering
    #[arg(long)]
    pub stats: bool,

    /// Keep widget markers in the output
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: TemplateInput,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `directives` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DirectivesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridline")]
#[command(about = "Render a themed status line from session JSON on stdin", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Main configuration file
    #[arg(long, default_value = "~/.config/gridline/config.toml", global = true)]
    pub config: String,

    /// Override the configured theme (classic, powerline, capsule)
    #[arg(long)]
    pub theme: Option<String>,

    /// Disable ANSI color regardless of terminal support
    #[arg(long)]
    pub no_color: bool,

    /// Skip the multi-line widget grid
    #[arg(long)]
    pub no_multiline: bool,

    /// Print load/render diagnostics to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config and a sample component file
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

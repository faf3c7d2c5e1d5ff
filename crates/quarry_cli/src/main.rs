//! Quarry CLI — the command-line interface for the quarry asset pipeline.
//!
//! Provides `quarry build` for building markup from asset lists and
//! `quarry clear` for wiping the public artifact store.

#![warn(missing_docs)]

mod build;
mod clear;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Quarry — a content-addressed asset build cache.
#[derive(Parser, Debug)]
#[command(name = "quarry", version, about = "Quarry asset build cache")]
pub struct Cli {
    /// Suppress all output except errors and the built markup.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory containing `quarry.toml` (default: current directory).
    #[arg(long, global = true)]
    pub project_dir: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build markup for a list of assets.
    Build(BuildArgs),
    /// Remove the public artifact store.
    Clear,
}

/// Arguments for the `quarry build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Asset identifiers, in output order. Paths resolve against the
    /// assets directory; `http(s)://` and `//` URLs pass through.
    #[arg(required = true)]
    pub assets: Vec<String>,

    /// Emit linked tags instead of inline content.
    #[arg(long)]
    pub no_inline: bool,

    /// Skip minification.
    #[arg(long)]
    pub no_minify: bool,

    /// Logical base name for published artifacts.
    #[arg(long)]
    pub name: Option<String>,

    /// URL prefix for generated artifact URLs.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory that relative asset identifiers resolve against
    /// (default: the project directory).
    #[arg(long)]
    pub assets_dir: Option<String>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error progress output.
    pub quiet: bool,
    /// Optional project directory override.
    pub project_dir: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalArgs {
        quiet: cli.quiet,
        project_dir: cli.project_dir,
    };

    let result = match cli.command {
        Command::Build(ref args) => build::run(args, &global),
        Command::Clear => clear::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_build_basic() {
        let cli = Cli::parse_from(["quarry", "build", "app.js"]);
        match cli.command {
            Command::Build(ref args) => {
                assert_eq!(args.assets, vec!["app.js"]);
                assert!(!args.no_inline);
                assert!(!args.no_minify);
                assert!(args.name.is_none());
                assert!(args.base_url.is_none());
                assert!(args.assets_dir.is_none());
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_multiple_assets() {
        let cli = Cli::parse_from(["quarry", "build", "a.js", "b.css", "c.js"]);
        match cli.command {
            Command::Build(ref args) => {
                assert_eq!(args.assets, vec!["a.js", "b.css", "c.js"]);
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_requires_assets() {
        assert!(Cli::try_parse_from(["quarry", "build"]).is_err());
    }

    #[test]
    fn parse_build_with_flags() {
        let cli = Cli::parse_from([
            "quarry",
            "build",
            "app.js",
            "--no-inline",
            "--no-minify",
            "--name",
            "bundle",
            "--base-url",
            "/cache/",
            "--assets-dir",
            "assets",
        ]);
        match cli.command {
            Command::Build(ref args) => {
                assert!(args.no_inline);
                assert!(args.no_minify);
                assert_eq!(args.name.as_deref(), Some("bundle"));
                assert_eq!(args.base_url.as_deref(), Some("/cache/"));
                assert_eq!(args.assets_dir.as_deref(), Some("assets"));
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_clear() {
        let cli = Cli::parse_from(["quarry", "clear"]);
        assert!(matches!(cli.command, Command::Clear));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["quarry", "--quiet", "--project-dir", "/srv/app", "clear"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.project_dir.as_deref(), Some("/srv/app"));
    }

    #[test]
    fn parse_verbose_flag() {
        let cli = Cli::parse_from(["quarry", "--verbose", "build", "app.js"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quarry", "build", "app.js", "--quiet"]);
        assert!(cli.quiet);
    }
}

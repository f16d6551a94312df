//! Shortcodes CLI.
//!
//! Provides commands for:
//! - `replace`: Substitute shortcodes in a file or stdin
//! - `list`: Show active shortcodes
//! - `editor`: Render the editor form of a stored shortcode
//! - `add`: Store a new shortcode
//! - `status`, `enable`, `disable`: Inspect and toggle the addon

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sc_config::{CliSettings, Config};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, Context, EditorArgs, ReplaceArgs};
use error::CliError;
use output::Output;

/// Shortcodes - substitute `[tag]` tokens with admin-maintained text.
#[derive(Parser)]
#[command(name = "sc", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
struct GlobalArgs {
    /// Path to configuration file (default: auto-discover shortcodes.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides config).
    #[arg(short, long, global = true, env = "SC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Substitute shortcodes in FILE (or stdin) and write the result to stdout.
    Replace(ReplaceArgs),
    /// List active shortcodes.
    List,
    /// Print the editor form for a stored shortcode.
    Editor(EditorArgs),
    /// Store a new shortcode.
    Add(AddArgs),
    /// Show the addon key and status.
    Status,
    /// Enable the addon.
    Enable,
    /// Disable the addon.
    Disable,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cli_settings = CliSettings {
        data_dir: cli.global.data_dir,
    };
    let config = Config::load(cli.global.config.as_deref(), Some(&cli_settings))?;

    init_tracing(cli.global.verbose, config.logging.filter.as_deref());

    let ctx = Context::open(&config)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Replace(args) => args.execute(&ctx, &mut stdout),
        Commands::List => commands::list(&ctx, &mut stdout),
        Commands::Editor(args) => args.execute(&ctx, &mut stdout),
        Commands::Add(args) => args.execute(&ctx),
        Commands::Status => commands::status(&ctx, &mut stdout),
        Commands::Enable => commands::enable(&ctx),
        Commands::Disable => commands::disable(&ctx),
    }
}

/// Initialize tracing on stderr; stdout carries command output.
///
/// `--verbose` enables INFO level. Otherwise `RUST_LOG` wins over the
/// configured filter, and the default is WARN.
fn init_tracing(verbose: bool, config_filter: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else if let Some(directives) = config_filter
        && std::env::var_os(EnvFilter::DEFAULT_ENV).is_none()
    {
        EnvFilter::new(directives)
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_replace_with_file() {
        let cli = Cli::try_parse_from(["sc", "replace", "page.html"]).unwrap();

        let Commands::Replace(args) = cli.command else {
            panic!("expected replace command");
        };
        assert_eq!(args.file, Some(PathBuf::from("page.html")));
    }

    #[test]
    fn test_parse_global_args_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sc",
            "list",
            "--data-dir",
            "/srv/data",
            "--config",
            "site.toml",
            "-v",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.global.data_dir, Some(PathBuf::from("/srv/data")));
        assert_eq!(cli.global.config, Some(PathBuf::from("site.toml")));
        assert!(cli.global.verbose);
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "sc",
            "add",
            "year",
            "2024",
            "--description",
            "Current year",
            "--inactive",
        ])
        .unwrap();

        let Commands::Add(args) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(args.tag, "year");
        assert_eq!(args.replacement, "2024");
        assert_eq!(args.description, "Current year");
        assert!(args.inactive);
    }

    #[test]
    fn test_editor_requires_tag() {
        assert!(Cli::try_parse_from(["sc", "editor"]).is_err());
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["sc", "publish"]).is_err());
    }
}

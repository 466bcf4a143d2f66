#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use sociogram_core::GraphError;
use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sociogram: components, egonets and greedy covers of directed graphs",
    long_about = None
)]
struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Read configuration from this file instead of the default lookup.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging (unless SOCIOGRAM_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "List strongly connected components",
        long_about = "List the strongly connected components of an edge-list graph, largest first. \
                      Each component keeps the edges between its own members.",
        after_help = "EXAMPLES:\n    # Every component\n    sg scc follows.txt\n\n    # Only components with three or more members\n    sg scc follows.txt --min-size 3\n\n    # Emit machine-readable output\n    sg scc follows.txt --format json"
    )]
    Scc(cmd::scc::SccArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show the mutual neighborhood of a vertex",
        long_about = "Show a vertex, every vertex it is mutually connected to, and the mutual \
                      connections among them. One-way edges are left out.",
        after_help = "EXAMPLES:\n    # Egonet of vertex 42\n    sg egonet follows.txt 42\n\n    # Read the graph from stdin\n    cat follows.txt | sg egonet - 42"
    )]
    Egonet(cmd::egonet::EgonetArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Pick a greedy dominating set",
        long_about = "Repeatedly pick the vertex reaching the most uncovered vertices until every \
                      vertex is picked or reached. Ties go to the lowest id.",
        after_help = "EXAMPLES:\n    # The cover sequence\n    sg cover follows.txt\n\n    # One report per selection\n    sg cover follows.txt --steps"
    )]
    Cover(cmd::cover::CoverArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Summarize graph structure",
        long_about = "Report size, density, degree extremes, component counts, cover size and a \
                      content hash of the graph.",
        after_help = "EXAMPLES:\n    # Summary\n    sg stats follows.txt\n\n    # Emit machine-readable output\n    sg stats follows.txt --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    sg completions bash > ~/.local/share/bash-completion/completions/sg"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Cli {
    fn output_mode(&self, config_format: Option<&str>) -> OutputMode {
        resolve_output_mode(self.format, self.json, config_format)
    }
}

fn default_log_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose || env::var("DEBUG").is_ok() {
        "sociogram=debug,info"
    } else {
        "sociogram=info,warn"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("SOCIOGRAM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose, quiet)));

    let format = env::var("SOCIOGRAM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

/// Map an error to its CLI shape, keeping code and suggestion for graph errors.
fn cli_error(err: &anyhow::Error) -> CliError {
    err.downcast_ref::<GraphError>().map_or_else(
        || {
            CliError::with_details(
                format!("{err:#}"),
                "check the path and file contents",
                "input_error",
            )
        },
        CliError::from,
    )
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let working_dir = env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &working_dir)?;
    let ctx = cmd::Context {
        output: cli.output_mode(config.output.format.as_deref()),
        load: config.load,
        scc_min_size: config.scc.min_size,
        quiet: cli.quiet,
    };
    debug!(output = ?ctx.output, "resolved context");

    match &cli.command {
        Commands::Scc(args) => cmd::scc::run_scc(args, &ctx),
        Commands::Egonet(args) => cmd::egonet::run_egonet(args, &ctx),
        Commands::Cover(args) => cmd::cover::run_cover(args, &ctx),
        Commands::Stats(args) => cmd::stats::run_stats(args, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The config may be what failed, so resolve without it.
            let mode = cli.output_mode(None);
            if let Err(render_err) = render_error(mode, &cli_error(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scc_subcommand_parses() {
        let cli = Cli::parse_from(["sg", "scc", "g.txt"]);
        assert!(matches!(cli.command, Commands::Scc(_)));
    }

    #[test]
    fn egonet_subcommand_parses() {
        let cli = Cli::parse_from(["sg", "egonet", "g.txt", "7"]);
        assert!(matches!(cli.command, Commands::Egonet(ref args) if args.center == 7));
    }

    #[test]
    fn cover_subcommand_parses() {
        let cli = Cli::parse_from(["sg", "cover", "g.txt", "--steps"]);
        assert!(matches!(cli.command, Commands::Cover(ref args) if args.steps));
    }

    #[test]
    fn stats_subcommand_parses() {
        let cli = Cli::parse_from(["sg", "stats", "-"]);
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["sg", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "sg", "scc", "g.txt", "--format", "json", "--config", "c.toml", "-v",
        ]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["sg", "--json", "stats", "g.txt"]);
        assert!(cli.json);
        assert_eq!(cli.output_mode(None), OutputMode::Json);
    }

    #[test]
    fn format_flag_beats_json_flag() {
        let cli = Cli::parse_from(["sg", "--json", "--format", "text", "stats", "g.txt"]);
        assert_eq!(cli.output_mode(Some("json")), OutputMode::Text);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["sg", "-q", "-v", "stats", "g.txt"]).is_err());
    }

    #[test]
    fn strict_flag_is_per_command() {
        let cli = Cli::parse_from(["sg", "cover", "g.txt", "--strict"]);
        assert!(matches!(cli.command, Commands::Cover(ref args) if args.input.strict));
    }

    #[test]
    fn log_filter_defaults() {
        assert_eq!(default_log_filter(false, true), "error");
        assert_eq!(default_log_filter(true, false), "sociogram=debug,info");
    }

    #[test]
    fn graph_errors_keep_their_code() {
        let err = anyhow::Error::new(GraphError::UnknownVertex(3));
        let rendered = cli_error(&err);
        assert_eq!(rendered.error_code.as_deref(), Some("unknown_vertex"));
    }

    #[test]
    fn other_errors_get_generic_code() {
        let err = anyhow::anyhow!("disk on fire");
        let rendered = cli_error(&err);
        assert_eq!(rendered.message, "disk on fire");
        assert_eq!(rendered.error_code.as_deref(), Some("input_error"));
    }
}

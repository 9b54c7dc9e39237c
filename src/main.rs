use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod registry;
mod tools;
mod utils;

use cmd::{DescribeArgs, ListArgs, RunArgs};
use tools::Backends;

/// cloudtool - schema-validated dispatcher for cloud service commands
///
/// Command layout:
///   cloudtool run <command> [args...] [--param k=v ...] [--param-file p.yaml] [--json]
///   cloudtool list [--json]
///   cloudtool describe <command> [--json]
///
/// Notes:
///   - run      : positional args map to the command's parameters in declaration order
///   - list     : every command with usage + description, sorted by name
///   - describe : full parameter schema for one command
///
/// Global flags:
///   -v / -vv        Increase verbosity
///   -q / --quiet    Errors only
///
/// Command families (see `cloudtool list`):
///   kv_*       - key-value namespaces
///   r2_*       - object-storage buckets
///   d1_*       - SQL databases
///   worker_*   - worker deployment
///   claude_* / embeddings_* / content_moderation - AI gateway
///   analytics_get - zone analytics
///   sequential_thinking / context_manager - reasoning
///   memory_*   - agent memory
///
/// Backends are injected at registry construction; this binary wires the
/// dry-run clients, which echo the request each command would send.
///
/// Examples:
///   cloudtool run kv_get myNamespace myKey
///   cloudtool run kv_put ns1 k1 v1 --param expirationTtl=60
///   cloudtool run claude_completion "summarize this" --param max_tokens=256 --json
///   cloudtool list --json
#[derive(Parser, Debug)]
#[command(
    name = "cloudtool",
    version,
    author,
    about = "Schema-validated command dispatcher for multi-backend cloud tooling",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch one registered command
    Run(RunArgs),

    /// List registered commands (sorted by name)
    List(ListArgs),

    /// Show the parameter schema for one command
    Describe(DescribeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    // Built once, then read-only for every dispatch.
    let registry = tools::builtin(&Backends::dry_run())?;
    utils::logging::debug(format!("registry built with {} commands", registry.len()));

    match cli.command {
        Commands::Run(args) => cmd::execute_run(args, &registry),
        Commands::List(args) => cmd::execute_list(args, &registry),
        Commands::Describe(args) => cmd::execute_describe(args, &registry),
    }
}

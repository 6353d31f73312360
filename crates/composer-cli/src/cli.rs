//! The command surface: one subcommand per `composer-cli` operation.
//! Built with `clap`'s derive API rather than manual `Command`/`Arg`
//! builders, since the surface here is small enough that the generated
//! parser needs no shared `Arg` factories.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "composer", about = "A serverless composition engine", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a composition AST to a flat FSM program.
    Build(BuildArgs),
    /// Pretty-print a compiled program, one line per state.
    Dump(DumpArgs),
    /// Run a compiled program against an initial (or resumed) params value.
    Run(RunArgs),
    /// Deploy a named composition and its action artifacts.
    Deploy(DeployArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Path to the composition AST as JSON. Reads stdin if omitted.
    pub ast: Option<PathBuf>,

    /// Where to write the compiled program JSON. Prints to stdout if omitted.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct DumpArgs {
    /// Path to a compiled program as JSON. Reads stdin if omitted.
    pub program: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to a compiled program as JSON.
    pub program: PathBuf,

    /// Initial (or `$resume`-carrying) params as a JSON literal.
    #[arg(long, default_value = "{}")]
    pub params: String,

    /// A JSON object mapping action name to the result params it should
    /// be treated as having returned, so a multi-step composition can be
    /// driven to completion without a real platform. An action the table
    /// doesn't cover stops the run at that suspension.
    #[arg(long)]
    pub actions: Option<PathBuf>,

    /// Print one line per interpreter step.
    #[arg(long)]
    pub trace: bool,

    /// Upper bound on how many suspensions `--actions` is allowed to
    /// resolve automatically, guarding against an action table that
    /// loops forever.
    #[arg(long, default_value_t = 1000)]
    pub max_steps: usize,
}

#[derive(clap::Args, Debug)]
pub struct DeployArgs {
    /// Path to the composition AST as JSON.
    pub ast: PathBuf,

    /// The name to deploy the composition's own program under.
    #[arg(long)]
    pub name: String,

    /// Path to a JSON array of artifacts hoisted from the AST's
    /// `action` nodes. Omit if the composition captured none.
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Deploy against a recording, always-succeeding client instead of
    /// a real platform — there is no bundled HTTP implementation.
    #[arg(long)]
    pub offline: bool,

    /// Override the API host `read_wskprops` discovered.
    #[arg(long)]
    pub apihost: Option<String>,

    /// Override the auth token `read_wskprops` discovered.
    #[arg(long)]
    pub auth: Option<String>,
}

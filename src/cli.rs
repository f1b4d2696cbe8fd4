//! CLI argument parsing with clap derive.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::output::OutputContext;
use crate::plan::Verb;

/// Create and run simple daily launchd user agents.
#[derive(Parser)]
#[command(
    name = "launchutil",
    version,
    about = "Utility to create and run a simple launchd service",
    long_about = "Utility to create and run a simple launchd service that is \
                  run daily. A service can be specified either by its label \
                  or by the plist file name defining it.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Options every verb accepts.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Output file for captured command output (- for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Execute the composed commands instead of printing them
    #[arg(short = 'x', long)]
    pub execute: bool,
}

/// Options every service-addressing verb accepts.
#[derive(Args, Debug)]
pub struct ServiceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Service label or its plist file name (typically com.domain.servicename)
    pub service: String,
}

/// Arguments for the create command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Full path to the launchd job program
    #[arg(short, long)]
    pub program: String,

    /// Arguments to the job program; place after the service argument
    #[arg(short = 'a', long, num_args = 1.., allow_hyphen_values = true)]
    pub program_arguments: Vec<String>,

    /// Daily 24-hour firing times (HH:MM), space separated
    #[arg(short, long, num_args = 1..)]
    pub daily: Vec<String>,

    /// Directory to chdir to before running the job
    #[arg(short, long)]
    pub working_directory: Option<String>,

    /// File to write the job's stdout to
    #[arg(short = 'O', long)]
    pub standard_out_path: Option<String>,

    /// File to write the job's stderr to
    #[arg(short = 'E', long)]
    pub standard_error_path: Option<String>,
}

/// Arguments for the reload command.
#[derive(Args, Debug)]
pub struct ReloadArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Install the service plist to ~/Library/LaunchAgents before reloading
    #[arg(short, long)]
    pub install: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a launchd service plist file for a daily job
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Install the service plist into ~/Library/LaunchAgents
    #[command(visible_alias = "i")]
    Install(ServiceArgs),

    /// Remove the installed service plist
    #[command(visible_alias = "u")]
    Uninstall(ServiceArgs),

    /// Bootstrap (load) the installed service
    #[command(visible_aliases = ["s", "start", "load"])]
    Bootstrap(ServiceArgs),

    /// Bootout (unload) the installed service
    #[command(visible_aliases = ["t", "stop", "unload"])]
    Bootout(ServiceArgs),

    /// Bootout then bootstrap the service, optionally installing first
    #[command(visible_aliases = ["r", "restart"])]
    Reload(ReloadArgs),

    /// Enable the service
    #[command(visible_alias = "e")]
    Enable(ServiceArgs),

    /// Disable the service
    #[command(visible_alias = "d")]
    Disable(ServiceArgs),

    /// Print service information and status
    #[command(visible_aliases = ["p", "list", "status"])]
    Print(ServiceArgs),

    /// List the LaunchAgents directory
    Dir(CommonArgs),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if the verb's preconditions fail or a composed
    /// command cannot be issued.
    pub async fn run(self) -> Result<()> {
        let Cli {
            quiet,
            no_color,
            command,
        } = self;
        let ctx = OutputContext::new(no_color, quiet);

        match command {
            Command::Create(args) => commands::create::run(&args, &ctx),
            Command::Install(args) => lifecycle(Verb::Install, &args, &ctx).await,
            Command::Uninstall(args) => lifecycle(Verb::Uninstall, &args, &ctx).await,
            Command::Bootstrap(args) => lifecycle(Verb::Bootstrap, &args, &ctx).await,
            Command::Bootout(args) => lifecycle(Verb::Bootout, &args, &ctx).await,
            Command::Reload(args) => {
                let verb = Verb::Reload {
                    install: args.install,
                };
                lifecycle(verb, &args.service, &ctx).await
            }
            Command::Enable(args) => lifecycle(Verb::Enable, &args, &ctx).await,
            Command::Disable(args) => lifecycle(Verb::Disable, &args, &ctx).await,
            Command::Print(args) => lifecycle(Verb::Print, &args, &ctx).await,
            Command::Dir(common) => {
                commands::lifecycle::run(Verb::Dir, None, &common, &ctx).await
            }
        }
    }
}

async fn lifecycle(verb: Verb, args: &ServiceArgs, ctx: &OutputContext) -> Result<()> {
    commands::lifecycle::run(verb, Some(args.service.as_str()), &args.common, ctx).await
}

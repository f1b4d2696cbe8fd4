//! `launchutil create` — build the service plist and write it out.

use anyhow::{Context, Result};

use crate::cli::CreateArgs;
use crate::descriptor::{self, JobOptions};
use crate::execute::Mode;
use crate::output::OutputContext;
use crate::service::{ServiceIdentity, ServicePaths};

/// Run `launchutil create`.
///
/// The built descriptor is always echoed to the report stream; apply mode
/// additionally encodes it as an XML plist into the source location
/// (`<label>.plist` in the working directory). Dry-run never writes the
/// file.
///
/// # Errors
///
/// Returns an error if a `--daily` timestamp is malformed, the home
/// directory cannot be determined, or the plist file cannot be written.
pub fn run(args: &CreateArgs, ctx: &OutputContext) -> Result<()> {
    let identity = ServiceIdentity::resolve(&args.service.service);
    let paths = ServicePaths::derive(&identity)?;
    let mode = Mode::from_flag(args.service.common.execute);
    let cwd = std::env::current_dir().context("reading current directory")?;

    let options = JobOptions {
        program: Some(args.program.clone()),
        program_arguments: args.program_arguments.clone(),
        daily: args.daily.clone(),
        working_directory: args.working_directory.clone(),
        standard_out_path: args.standard_out_path.clone(),
        standard_error_path: args.standard_error_path.clone(),
    };
    let descriptor = descriptor::build(&identity, &options, &cwd, ctx)?;

    let dump = serde_json::to_string_pretty(&descriptor).context("rendering descriptor")?;
    ctx.report(&dump);

    if mode == Mode::Apply {
        plist::to_file_xml(&paths.source, &descriptor)
            .with_context(|| format!("writing {}", paths.source.display()))?;
    }

    Ok(())
}

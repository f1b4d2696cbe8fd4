//! Launchd job descriptors and their construction from CLI options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::output::OutputContext;
use crate::service::ServiceIdentity;

/// One daily firing time for `StartCalendarInterval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarInterval {
    pub hour: u8,
    pub minute: u8,
}

impl CalendarInterval {
    /// Parse a 24-hour `HH:MM` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MalformedTimestamp`] when the token has no
    /// colon, a non-numeric half, or an out-of-range hour or minute.
    pub fn parse(token: &str) -> Result<Self, ServiceError> {
        let malformed = || ServiceError::MalformedTimestamp(token.to_string());
        let (hour, minute) = token.split_once(':').ok_or_else(malformed)?;
        let hour: u8 = hour.parse().map_err(|_| malformed())?;
        let minute: u8 = minute.parse().map_err(|_| malformed())?;
        if hour > 23 || minute > 59 {
            return Err(malformed());
        }
        Ok(Self { hour, minute })
    }
}

/// A launchd job definition, keyed exactly as the plist schema expects.
///
/// Only `Label` is required. A descriptor with no `Program` is structurally
/// valid but operationally useless; launchd itself accepts it, so nothing
/// here rejects it. Unset fields are omitted from the encoded plist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobDescriptor {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_arguments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_calendar_interval: Option<Vec<CalendarInterval>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_out_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_error_path: Option<PathBuf>,
}

/// Raw user-supplied job configuration, prior to path resolution.
#[derive(Debug, Default, Clone)]
pub struct JobOptions {
    pub program: Option<String>,
    pub program_arguments: Vec<String>,
    pub daily: Vec<String>,
    pub working_directory: Option<String>,
    pub standard_out_path: Option<String>,
    pub standard_error_path: Option<String>,
}

/// Build a job descriptor from CLI options.
///
/// Relative paths are resolved against `cwd` before storage; a program path
/// that was not already absolute is reported as a warning but stored
/// absolutized regardless. When program arguments are given, the resolved
/// program is prepended so index 0 is always the executable itself.
/// Calendar times keep their input order; duplicates are not collapsed.
///
/// # Errors
///
/// Returns [`ServiceError::MalformedTimestamp`] when a `--daily` entry is
/// not a valid `HH:MM` timestamp.
pub fn build(
    identity: &ServiceIdentity,
    options: &JobOptions,
    cwd: &Path,
    ctx: &OutputContext,
) -> Result<JobDescriptor, ServiceError> {
    let mut descriptor = JobDescriptor {
        label: identity.label().to_string(),
        ..JobDescriptor::default()
    };

    if let Some(program) = &options.program {
        if !Path::new(program).is_absolute() {
            ctx.warn(&format!("program \"{program}\" is not a full path."));
        }
        let resolved = absolutize(program, cwd);
        if !options.program_arguments.is_empty() {
            let mut argv = vec![resolved.to_string_lossy().into_owned()];
            argv.extend(options.program_arguments.iter().cloned());
            descriptor.program_arguments = Some(argv);
        }
        descriptor.program = Some(resolved);
    }

    if !options.daily.is_empty() {
        let intervals = options
            .daily
            .iter()
            .map(|token| CalendarInterval::parse(token))
            .collect::<Result<Vec<_>, _>>()?;
        descriptor.start_calendar_interval = Some(intervals);
    }

    descriptor.working_directory = options
        .working_directory
        .as_deref()
        .map(|path| absolutize(path, cwd));
    descriptor.standard_out_path = options
        .standard_out_path
        .as_deref()
        .map(|path| absolutize(path, cwd));
    descriptor.standard_error_path = options
        .standard_error_path
        .as_deref()
        .map(|path| absolutize(path, cwd));

    Ok(descriptor)
}

fn absolutize(path: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

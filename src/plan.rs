//! Lifecycle verbs and the command plans they compose.

use std::path::PathBuf;

use crate::service::{ServiceIdentity, ServicePaths};

/// The closed set of lifecycle verbs that compose into command plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Install,
    Uninstall,
    Bootstrap,
    Bootout,
    Reload { install: bool },
    Enable,
    Disable,
    Print,
    Dir,
}

/// Everything [`compose`] needs: the resolved identity, the derived paths,
/// and the numeric user session id. The uid is injected rather than looked
/// up here so tests can pin it.
#[derive(Debug, Clone)]
pub struct PlanContext {
    pub identity: ServiceIdentity,
    pub paths: ServicePaths,
    pub uid: u32,
}

/// One step of a command plan, immutable once composed.
///
/// `Invoke` goes through the command runner; the file operations execute
/// natively in apply mode but still render as their shell equivalents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleCommand {
    CopyFile { source: PathBuf, dest: PathBuf },
    RemoveFile { path: PathBuf },
    Invoke { argv: Vec<String>, note: Option<String> },
}

impl LifecycleCommand {
    /// Render the command as the single line shown in dry-run mode.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::CopyFile { source, dest } => {
                format!("cp {} {}", source.display(), dest.display())
            }
            Self::RemoveFile { path } => format!("rm {}", path.display()),
            Self::Invoke { argv, .. } => argv.join(" "),
        }
    }

    /// The progress line announced before running this command, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Invoke { note, .. } => note.as_deref(),
            _ => None,
        }
    }
}

/// An ordered command sequence realizing one user-level verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPlan(Vec<LifecycleCommand>);

impl CommandPlan {
    #[must_use]
    pub fn new(commands: Vec<LifecycleCommand>) -> Self {
        Self(commands)
    }

    #[must_use]
    pub fn commands(&self) -> &[LifecycleCommand] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compose the ordered command plan for `verb`.
///
/// Pure function of the verb and context. Existence checks and overwrite
/// warnings gate execution, not composition, and live in the command
/// handlers.
#[must_use]
pub fn compose(verb: Verb, ctx: &PlanContext) -> CommandPlan {
    let label = ctx.identity.label();
    let gui_domain = format!("gui/{}", ctx.uid);
    let gui_service = format!("gui/{}/{label}", ctx.uid);
    let installed = ctx.paths.installed.display().to_string();

    let commands = match verb {
        Verb::Install => vec![LifecycleCommand::CopyFile {
            source: ctx.paths.source.clone(),
            dest: ctx.paths.installed.clone(),
        }],
        Verb::Uninstall => vec![LifecycleCommand::RemoveFile {
            path: ctx.paths.installed.clone(),
        }],
        Verb::Bootstrap => vec![launchctl(
            &["bootstrap", &gui_domain, &installed],
            Some(format!("Bootstrap \"{label}\"")),
        )],
        Verb::Bootout => vec![launchctl(
            &["bootout", &gui_domain, &installed],
            Some(format!("Bootout \"{label}\"")),
        )],
        Verb::Reload { install } => {
            let mut commands = Vec::new();
            if install {
                commands.push(LifecycleCommand::CopyFile {
                    source: ctx.paths.source.clone(),
                    dest: ctx.paths.installed.clone(),
                });
            }
            commands.push(launchctl(
                &["bootout", &gui_domain, &installed],
                Some(format!("Stopping \"{label}\"")),
            ));
            commands.push(launchctl(
                &["bootstrap", &gui_domain, &installed],
                Some(format!("Starting \"{label}\"")),
            ));
            commands
        }
        Verb::Enable => vec![launchctl(&["enable", &gui_service], None)],
        Verb::Disable => vec![launchctl(&["disable", &gui_service], None)],
        Verb::Print => vec![launchctl(&["print", &gui_service], None)],
        Verb::Dir => vec![LifecycleCommand::Invoke {
            argv: vec![
                "ls".to_string(),
                "-l".to_string(),
                ctx.paths.agents_dir.display().to_string(),
            ],
            note: None,
        }],
    };

    CommandPlan(commands)
}

fn launchctl(args: &[&str], note: Option<String>) -> LifecycleCommand {
    let mut argv = vec!["launchctl".to_string()];
    argv.extend(args.iter().map(ToString::to_string));
    LifecycleCommand::Invoke { argv, note }
}

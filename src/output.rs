//! Report-stream output and the redirect sink for captured command output.
//!
//! Every diagnostic, dry-run command line, and descriptor echo goes to
//! stderr; stdout is reserved for command output forwarded through the
//! [`OutputSink`] (which `-o` can point at a file instead).

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use console::Term;
use owo_colors::{OwoColorize as _, Style};

/// Centralized stylesheet for report-stream colors.
#[derive(Default, Clone, Copy)]
pub struct Styles {
    /// Warning prefix (yellow)
    pub warning: Style,
    /// Dimmed/secondary text
    pub dim: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.warning = Style::new().yellow();
        self.dim = Style::new().dimmed();
    }
}

/// Report-stream context carrying styling and the quiet flag.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress informational output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create an output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stderr().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print an informational line. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{msg}");
        }
    }

    /// Print a warning prefixed with `WARNING:`. Never suppressed.
    pub fn warn(&self, msg: &str) {
        eprintln!("{} {msg}", "WARNING:".style(self.styles.warning));
    }

    /// Print one composed command line. Never suppressed.
    pub fn command(&self, line: &str) {
        eprintln!("{} {line}", "command:".style(self.styles.dim));
    }

    /// Print a block of report output verbatim. Never suppressed.
    pub fn report(&self, msg: &str) {
        eprintln!("{msg}");
    }
}

/// Destination for captured standard output of executed commands.
///
/// Opened once per invocation; `-` selects the tool's own stdout.
pub enum OutputSink {
    Stdout,
    File(File),
}

impl OutputSink {
    /// Open the sink named by the `-o/--output` option.
    ///
    /// # Errors
    ///
    /// Returns an error if the output file cannot be created.
    pub fn open(spec: &str) -> Result<Self> {
        if spec == "-" {
            return Ok(Self::Stdout);
        }
        let file = File::create(Path::new(spec))
            .with_context(|| format!("creating output file {spec}"))?;
        Ok(Self::File(file))
    }

    /// Forward captured bytes to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout();
                stdout.write_all(bytes).context("writing to stdout")?;
                stdout.flush().context("flushing stdout")
            }
            Self::File(file) => file.write_all(bytes).context("writing output file"),
        }
    }
}

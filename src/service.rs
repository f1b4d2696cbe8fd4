//! Service identity and the two well-known descriptor locations.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ServiceError;

/// Matches a service argument given as a plist file name.
static PLIST_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^([\w.]*)\.plist$").expect("valid regex")
});

/// Canonical label of a launchd service, in reverse-domain dotted form.
///
/// Never carries a `.plist` extension; user input is normalized once, up
/// front, and everything downstream sees only the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity(String);

impl ServiceIdentity {
    /// Normalize a user-supplied service argument into a canonical label.
    ///
    /// `com.example.job` and `com.example.job.plist` resolve to the same
    /// identity. Stripping repeats until no `.plist` suffix remains, so
    /// resolution is idempotent. Any other string passes through unchanged;
    /// a label does not have to be a well-formed reverse-domain name.
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        let mut label = raw;
        while let Some(caps) = PLIST_FILE_RE.captures(label) {
            label = caps.get(1).map_or("", |m| m.as_str());
        }
        Self(label.to_string())
    }

    /// The canonical label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }

    /// The descriptor file name for this label.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.plist", self.0)
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two places a service descriptor lives, both pure functions of the
/// identity and the user's home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePaths {
    /// Descriptor in the invocation's working directory.
    pub source: PathBuf,
    /// Descriptor installed in the per-user agent directory.
    pub installed: PathBuf,
    /// The agent directory itself (`~/Library/LaunchAgents`).
    pub agents_dir: PathBuf,
}

impl ServicePaths {
    /// Derive both descriptor locations for a service.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EnvironmentUnavailable`] when the home
    /// directory cannot be determined.
    pub fn derive(identity: &ServiceIdentity) -> Result<Self, ServiceError> {
        let home = dirs::home_dir().ok_or(ServiceError::EnvironmentUnavailable)?;
        Ok(Self::with_home(identity, &home))
    }

    /// Same derivation with an explicit home directory (used in tests).
    #[must_use]
    pub fn with_home(identity: &ServiceIdentity, home: &Path) -> Self {
        let file_name = identity.file_name();
        let agents_dir = home.join("Library").join("LaunchAgents");
        Self {
            source: PathBuf::from(&file_name),
            installed: agents_dir.join(&file_name),
            agents_dir,
        }
    }
}

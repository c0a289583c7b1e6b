use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

use crate::oauth::{errors::OAuthError, sources::CredentialConfigSource};

/// Which git configuration file to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitConfigScope {
    /// git's normal system < global < local precedence
    #[default]
    Any,
    Local,
    Global,
    System,
}

impl GitConfigScope {
    fn flag(self) -> Option<&'static str> {
        match self {
            GitConfigScope::Any => None,
            GitConfigScope::Local => Some("--local"),
            GitConfigScope::Global => Some("--global"),
            GitConfigScope::System => Some("--system"),
        }
    }
}

impl FromStr for GitConfigScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "" => Ok(GitConfigScope::Any),
            "local" => Ok(GitConfigScope::Local),
            "global" => Ok(GitConfigScope::Global),
            "system" => Ok(GitConfigScope::System),
            other => Err(format!("unknown git config scope: {}", other)),
        }
    }
}

/// Credential configuration read from git config `credential.<url>.<key>` entries
#[derive(Debug, Clone)]
pub struct GitConfigSource {
    repo_dir: PathBuf,
    scope: GitConfigScope,
}

impl GitConfigSource {
    /// Query git config as seen from `repo_dir`
    pub fn new(repo_dir: impl Into<PathBuf>, scope: GitConfigScope) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            scope,
        }
    }
}

impl CredentialConfigSource for GitConfigSource {
    fn get(&self, section: &str, key: &str) -> Result<Option<String>, OAuthError> {
        let name = format!("credential.{}.{}", section, key);

        let mut command = Command::new("git");
        command.arg("config");
        if let Some(flag) = self.scope.flag() {
            command.arg(flag);
        }
        let output = command
            .args(["--get", &name])
            .current_dir(&self.repo_dir)
            .output()?;

        match output.status.code() {
            Some(0) => {
                let value = String::from_utf8(output.stdout)
                    .map_err(|_| OAuthError::NonUtf8ConfigValue(name))?;
                Ok(Some(value.trim().to_string()))
            }
            // git config --get exits 1 when the key is absent
            Some(1) => Ok(None),
            status => Err(OAuthError::GitConfig {
                status: status.unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

use url::Url;

use crate::oauth::errors::OAuthError;

/// Fixed prefix of every environment override variable
pub const ENV_PREFIX: &str = "GC_OAUTH_";

/// Lookup keys derived from a hosting-provider base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    section: String,
    host_label: String,
    env_prefix: String,
}

impl HostIdentity {
    /// Derive the credential-config section and environment prefix for `base_url`.
    ///
    /// `https://gitlab.com` yields the section `https://gitlab.com` and the
    /// prefix `GC_OAUTH_GITLAB_`.
    pub fn derive(base_url: &str) -> Result<Self, OAuthError> {
        let url = Url::parse(base_url)
            .map_err(|e| OAuthError::HostUrlMalformed(format!("{}: {}", base_url, e)))?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| OAuthError::HostUrlMalformed(format!("{}: no host", base_url)))?;

        // IPv6 literals come back bracketed
        let host = host.trim_start_matches('[');
        let host_label = host
            .split(['.', ':', ']'])
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| OAuthError::HostUrlMalformed(format!("{}: empty host label", base_url)))?
            .to_string();

        let env_token: String = host_label
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();

        Ok(Self {
            section: base_url.to_string(),
            host_label,
            env_prefix: format!("{}{}_", ENV_PREFIX, env_token),
        })
    }

    /// Credential-config section, the base URL verbatim
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn host_label(&self) -> &str {
        &self.host_label
    }

    /// Environment variable prefix, e.g. `GC_OAUTH_GITLAB_`
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Full environment variable name for one override suffix
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}{}", self.env_prefix, suffix)
    }
}

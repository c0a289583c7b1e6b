use serde::Serialize;

/// Resolved OAuth2 client configuration for one hosting provider
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct OAuthClientConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
    /// Absolute authorization endpoint URL
    pub authorize_url: String,
    /// Absolute token exchange endpoint URL
    pub token_url: String,
}

impl std::fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &if self.client_secret.is_empty() {
                    ""
                } else {
                    "<redacted>"
                },
            )
            .field("scopes", &self.scopes)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl OAuthClientConfig {
    /// Whether enough is known to build an authorize request
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.authorize_url.is_empty() && !self.token_url.is_empty()
    }
}

/// Compiled-in endpoints for well-known hosting providers
///
/// Endpoints are path suffixes joined onto the base URL, so self-hosted
/// instances of the same product resolve to their own host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub auth_path: &'static str,
    pub token_path: &'static str,
    pub scopes: &'static [&'static str],
}

const GITHUB: ProviderDefaults = ProviderDefaults {
    auth_path: "/login/oauth/authorize",
    token_path: "/login/oauth/access_token",
    scopes: &["repo", "read:user", "user:email"],
};

const GITLAB: ProviderDefaults = ProviderDefaults {
    auth_path: "/oauth/authorize",
    token_path: "/oauth/token",
    scopes: &["api", "read_user"],
};

const BITBUCKET: ProviderDefaults = ProviderDefaults {
    auth_path: "/site/oauth2/authorize",
    token_path: "/site/oauth2/access_token",
    scopes: &["repository:write", "account"],
};

impl ProviderDefaults {
    /// Look up defaults by host label (`gitlab`) or full host (`gitlab.com`)
    pub fn for_host(host: &str) -> Option<ProviderDefaults> {
        let label = host.split('.').next().unwrap_or(host);
        match label.to_ascii_lowercase().as_str() {
            "github" => Some(GITHUB),
            "gitlab" => Some(GITLAB),
            "bitbucket" => Some(BITBUCKET),
            _ => None,
        }
    }

    pub fn scopes(&self) -> Vec<String> {
        self.scopes.iter().map(|s| s.to_string()).collect()
    }
}

/// Resolve a configured endpoint against the provider base URL.
///
/// Values are normally path suffixes (`/oauth/token`) and are appended to the
/// base URL. Values that are already absolute `http(s)` URLs are kept as-is.
pub fn join_endpoint(base_url: &str, value: &str) -> String {
    if value.starts_with("https://") || value.starts_with("http://") {
        return value.to_string();
    }

    let base = if value.starts_with('/') {
        base_url.strip_suffix('/').unwrap_or(base_url)
    } else {
        base_url
    };

    format!("{}{}", base, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_endpoint_path_suffix() {
        assert_eq!(
            join_endpoint("https://gitlab.com", "/oauth/authorize"),
            "https://gitlab.com/oauth/authorize"
        );
        assert_eq!(
            join_endpoint("https://gitlab.com/", "/oauth/token"),
            "https://gitlab.com/oauth/token"
        );
    }

    #[test]
    fn test_join_endpoint_absolute_value() {
        assert_eq!(
            join_endpoint("https://gitlab.com", "https://auth.example.com/authorize"),
            "https://auth.example.com/authorize"
        );
    }

    #[test]
    fn test_provider_defaults_lookup() {
        assert_eq!(ProviderDefaults::for_host("gitlab"), Some(GITLAB));
        assert_eq!(ProviderDefaults::for_host("github.com"), Some(GITHUB));
        assert_eq!(ProviderDefaults::for_host("Bitbucket"), Some(BITBUCKET));
        assert_eq!(ProviderDefaults::for_host("gitea"), None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = OAuthClientConfig {
            client_id: "id".to_string(),
            client_secret: "hunter2".to_string(),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_is_complete() {
        let mut config = OAuthClientConfig::default();
        assert!(!config.is_complete());
        config.client_id = "id".to_string();
        config.authorize_url = "https://gitlab.com/oauth/authorize".to_string();
        config.token_url = "https://gitlab.com/oauth/token".to_string();
        assert!(config.is_complete());
    }
}
